//! # Dispatch a single event to its listeners.
//!
//! Resolves the listeners registered under the event's name and invokes them one by
//! one, in registration order, on the calling task.
//!
//! ## Flow
//! ```text
//! dispatch(ev):
//!   registry.lookup(ev.name) ──► [l1, l2, l3]
//!                                  │
//!                                  ├─► l1.handle(&ev).await
//!                                  ├─► l2.handle(&ev).await
//!                                  └─► l3.handle(&ev).await
//!
//! dispatch_isolated(ev):
//!   catch_unwind(dispatch(ev)) ──► Ok(())
//!                              └─► Err(message)   (l2 panicked → l3 skipped)
//! ```
//!
//! ## Rules
//! - Unknown names are a no-op
//! - [`dispatch`] lets listener panics unwind to the caller (synchronous bus)
//! - [`dispatch_isolated`] stops at the first panic and reports it (worker loop)

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::events::Event;
use crate::listeners::Registry;

/// Invokes every listener registered for `event.name()` in registration order.
pub(crate) async fn dispatch(registry: &Registry, event: &Event) {
    let listeners = registry.lookup(event.name());
    for listener in listeners.iter() {
        listener.handle(event).await;
    }
}

/// Same as [`dispatch`], but a listener panic is caught and returned as its message.
///
/// **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
/// if a listener uses `Arc<Mutex<T>>` and panics while holding the lock.
pub(crate) async fn dispatch_isolated(registry: &Registry, event: &Event) -> Result<(), String> {
    AssertUnwindSafe(dispatch(registry, event))
        .catch_unwind()
        .await
        .map_err(|panic| panic_message(panic.as_ref()))
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::listeners::{ListenerFn, ListenerRef};

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> ListenerRef {
        let log = Arc::clone(log);
        ListenerFn::arc(tag, move |_ev: &Event| log.lock().unwrap().push(tag))
    }

    #[tokio::test]
    async fn test_dispatch_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let reg = Registry::new();
        reg.register("a", recorder(&log, "one"));
        reg.register("b", recorder(&log, "skip"));
        reg.register("a", recorder(&log, "two"));

        dispatch(&reg, &Event::named("a")).await;
        assert_eq!(*log.lock().unwrap(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_dispatch_isolated_reports_panic_and_skips_rest() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let reg = Registry::new();
        reg.register("a", recorder(&log, "before"));
        reg.register("a", ListenerFn::arc("bomb", |_ev: &Event| panic!("kaboom")));
        reg.register("a", recorder(&log, "after"));

        let res = dispatch_isolated(&reg, &Event::named("a")).await;
        assert_eq!(res, Err("kaboom".to_string()));
        assert_eq!(*log.lock().unwrap(), vec!["before"]);
    }

    #[test]
    fn test_panic_message_variants() {
        let s: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(s.as_ref()), "static");

        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let other: Box<dyn Any + Send> = Box::new(5_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
