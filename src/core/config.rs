//! # Bus configuration.
//!
//! Provides [`Config`] centralized settings for a [`Bus`](crate::Bus).
//!
//! Config is consumed by [`BusBuilder`](crate::BusBuilder):
//! `Bus::builder("name").with_config(cfg).build()`.
//!
//! ## Sentinel values
//! - `workers = 0` → synchronous bus (no queue, no worker pool)
//! - `queue_capacity = 0` → rendezvous queue (producer waits for a free worker)

use std::time::Duration;

/// Default time a draining worker waits for another queued event before exiting.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for a bus.
///
/// ## Field semantics
/// - `drain_timeout`: How long each worker keeps waiting for queued events after close
/// - `workers`: Size of the worker pool (`0` = synchronous dispatch)
/// - `queue_capacity`: Bounded queue size (`0` = rendezvous)
#[derive(Clone, Debug)]
pub struct Config {
    /// Idle window a draining worker waits for the next queued event before it exits.
    ///
    /// The window restarts every time the worker dispatches an event, so a queue
    /// that keeps receiving events keeps the pool draining. Can be overridden per
    /// call with [`Bus::close_with_timeout`](crate::Bus::close_with_timeout).
    pub drain_timeout: Duration,

    /// Number of worker loops draining the queue.
    ///
    /// - `0` = synchronous bus (events dispatched on the caller's task)
    /// - `n > 0` = asynchronous bus with `n` concurrent workers
    pub workers: usize,

    /// Capacity of the event queue.
    ///
    /// Producers wait while the queue is full. Ignored for synchronous buses.
    pub queue_capacity: usize,
}

impl Config {
    /// Returns `(workers, queue_capacity)` if this config asks for asynchronous dispatch.
    #[inline]
    pub fn async_mode(&self) -> Option<(usize, usize)> {
        if self.workers == 0 {
            None
        } else {
            Some((self.workers, self.queue_capacity))
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `drain_timeout = 2s`
    /// - `workers = 0` (synchronous)
    /// - `queue_capacity = 0`
    fn default() -> Self {
        Self {
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
            workers: 0,
            queue_capacity: 0,
        }
    }
}
