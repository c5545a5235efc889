//! Error types used by the event bus.
//!
//! Listener panics, triggers after close, double close and drain timeouts are
//! **not** errors: they are handled (or tolerated) by the bus itself. The only
//! failures surfaced to callers are configuration misuse, described by [`BusError`].
//!
//! [`BusError`] provides helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by the event bus.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Asynchronous mode was requested with an empty worker pool.
    #[error("asynchronous mode requires at least one worker (got {workers})")]
    InvalidWorkers {
        /// The rejected worker count.
        workers: usize,
    },

    /// The bus has already been closed.
    #[error("bus {bus:?} is closed")]
    Closed {
        /// Name of the closed bus.
        bus: String,
    },

    /// Asynchronous mode was requested outside a Tokio runtime.
    #[error("bus {bus:?} needs a Tokio runtime to start its workers")]
    NoRuntime {
        /// Name of the bus.
        bus: String,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::BusError;
    ///
    /// let err = BusError::InvalidWorkers { workers: 0 };
    /// assert_eq!(err.as_label(), "bus_invalid_workers");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::InvalidWorkers { .. } => "bus_invalid_workers",
            BusError::Closed { .. } => "bus_closed",
            BusError::NoRuntime { .. } => "bus_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::InvalidWorkers { workers } => format!("invalid worker count: {workers}"),
            BusError::Closed { bus } => format!("bus closed: {bus}"),
            BusError::NoRuntime { bus } => format!("no tokio runtime for bus: {bus}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            BusError::Closed { bus: "main".into() }.as_label(),
            "bus_closed"
        );
        assert_eq!(
            BusError::InvalidWorkers { workers: 0 }.as_label(),
            "bus_invalid_workers"
        );
    }

    #[test]
    fn test_display_mentions_bus_name() {
        let err = BusError::Closed { bus: "orders".into() };
        assert_eq!(err.to_string(), "bus \"orders\" is closed");
        assert_eq!(err.as_message(), "bus closed: orders");
    }
}
