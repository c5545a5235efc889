//! # Closure-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(&Event)`, so simple handlers don't need a
//! dedicated type. The closure is shared across workers; use atomics or `Arc<Mutex<..>>`
//! inside it for any state.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use eventvisor::{ListenerFn, ListenerRef};
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&hits);
//!
//! let l: ListenerRef = ListenerFn::arc("counter", move |_ev| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! assert_eq!(l.name(), "counter");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Event;
use crate::listeners::listener::Listener;

/// Function-backed listener implementation.
#[derive(Debug)]
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F> Listener for ListenerFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    async fn handle(&self, event: &Event) {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
