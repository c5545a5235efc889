//! # LogListener — simple event recorder
//!
//! A minimal listener that records every event it receives through `tracing`.
//! Use it for test or demo.
//!
//! ## Example output (with a `tracing-subscriber` fmt layer)
//! ```text
//! INFO eventvisor::listeners::log: event received event="user.created" seq=12
//! ```

use async_trait::async_trait;

use crate::events::Event;
use crate::listeners::Listener;

/// Event logging listener.
#[derive(Default)]
pub struct LogListener;

impl LogListener {
    /// Construct a new [`LogListener`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listener for LogListener {
    async fn handle(&self, e: &Event) {
        tracing::info!(event = %e.name(), seq = e.seq(), "event received");
    }

    fn name(&self) -> &str {
        "LogListener"
    }
}
