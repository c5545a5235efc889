//! # Event listeners and their registry.
//!
//! This module provides the [`Listener`] trait, the closure adapter [`ListenerFn`],
//! and the [`Registry`] that maps event names to ordered listener lists.
//!
//! ## Architecture
//! ```text
//! Bus::add_listener(name, l) ──► Registry::register
//!                                     │
//!                     HashMap<String, Arc<[ListenerRef]>>
//!                                     │
//! dispatch(&Event) ──► Registry::lookup(ev.name) ──► l1.handle ─► l2.handle ─► ...
//! ```

#[cfg(feature = "logging")]
mod log;
mod listener;
mod listener_fn;
mod registry;

#[cfg(feature = "logging")]
pub use log::LogListener;
pub use listener::{Listener, ListenerRef};
pub use listener_fn::ListenerFn;
pub use registry::Registry;
