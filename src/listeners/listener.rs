//! # Event listener trait.
//!
//! Provides [`Listener`] the extension point for reacting to named events.
//!
//! ## Delivery
//! ```text
//! synchronous bus:   trigger() ──► listener.handle(&ev)           (caller's task)
//! asynchronous bus:  trigger() ──► [queue] ──► worker ──► listener.handle(&ev)
//!                                                 └─► panic caught → worker respawned
//! ```
//!
//! ## Rules
//! - Listeners under one name run **sequentially**, in registration order.
//! - A panic in a synchronous bus propagates to the caller of `trigger`.
//! - A panic in an asynchronous bus is logged, the rest of that event is skipped,
//!   and the worker is replaced.
//! - Listeners may register further listeners while handling an event; the
//!   change is visible from the next dispatch on.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use eventvisor::{Event, Listener};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Listener for Audit {
//!     async fn handle(&self, ev: &Event) {
//!         if let Some(user) = ev.payload::<String>() {
//!             // write an audit record for `user`
//!             let _ = user;
//!         }
//!     }
//!
//!     fn name(&self) -> &str { "audit" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Event;

/// Handler invoked for events matching the name it was registered under.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; a panic costs the current event in async mode.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Processes a single event.
    async fn handle(&self, event: &Event);

    /// Returns the listener name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a listener.
pub type ListenerRef = Arc<dyn Listener>;
