//! # Named events delivered through the bus.
//!
//! An [`Event`] is a name plus an opaque payload. The name selects which listeners
//! run; the payload is whatever the producer attached and is recovered by the
//! listener with a typed downcast.
//!
//! ## Ownership
//! ```text
//! producer ──► Event ──► [queue] ──► worker ──► &Event to each listener
//!   (owns)      (moved)               (owns)      (borrowed, read-only)
//! ```
//! Events are never shared mutably: they are moved into the queue, moved out by exactly
//! one worker, and lent to listeners by reference.
//!
//! ## Ordering
//! Each event carries a process-wide sequence number (`seq`) that increases monotonically.
//! It is diagnostic only: the bus does not order dispatch by it.
//!
//! ## Example
//! ```rust
//! use eventvisor::Event;
//!
//! let ev = Event::new("user.created", 42_u64);
//!
//! assert_eq!(ev.name(), "user.created");
//! assert_eq!(ev.payload::<u64>(), Some(&42));
//! assert!(ev.payload::<String>().is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque payload attached to an [`Event`].
pub type Payload = Box<dyn Any + Send + Sync>;

/// Immutable named event with an opaque payload.
///
/// - `name`: selects the listeners to invoke
/// - `payload`: producer data, read back with [`Event::payload`]
/// - `seq`: monotonic global sequence (diagnostics)
/// - `at`: wall-clock creation timestamp (diagnostics)
pub struct Event {
    name: String,
    payload: Payload,
    seq: u64,
    at: SystemTime,
}

impl Event {
    /// Creates a new event with the given name and payload.
    pub fn new<T>(name: impl Into<String>, payload: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::from_boxed(name, Box::new(payload))
    }

    /// Creates an event that carries no data (unit payload).
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, ())
    }

    /// Creates an event from an already boxed payload.
    pub fn from_boxed(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
        }
    }

    /// Event name used for listener lookup.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the payload as `T`, or `None` if it holds a different type.
    #[inline]
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns the untyped payload.
    #[inline]
    pub fn payload_any(&self) -> &(dyn Any + Send + Sync) {
        self.payload.as_ref()
    }

    /// Consumes the event and returns its payload as `T`.
    ///
    /// On type mismatch the event is handed back unchanged.
    pub fn into_payload<T: Any>(self) -> Result<Box<T>, Self> {
        let Self {
            name,
            payload,
            seq,
            at,
        } = self;

        payload.downcast::<T>().map_err(|payload| Self {
            name,
            payload,
            seq,
            at,
        })
    }

    /// Globally unique, monotonically increasing sequence number.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Wall-clock creation timestamp.
    #[inline]
    pub fn at(&self) -> SystemTime {
        self.at
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("seq", &self.seq)
            .field("at", &self.at)
            .finish_non_exhaustive()
    }
}
