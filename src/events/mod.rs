//! Bus events: the value type moved from producers to listeners.
//!
//! ## Contents
//! - [`Event`] a name plus an opaque payload
//! - [`Payload`] the boxed payload type
//!
//! See `core/mod.rs` for how events flow through the bus.

mod event;

pub use event::{Event, Payload};
