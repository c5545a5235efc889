//! Bus core: dispatch, worker pool, and shutdown.
//!
//! The public API from this module is [`Bus`], its [`BusBuilder`], and [`Config`].
//!
//! Internal modules:
//! - [`dispatcher`]: invokes the listeners of one event, optionally catching panics;
//! - [`pool`]: the bounded queue and the workers draining it;
//! - [`worker`]: one worker loop (Running → Draining → Exited) with panic respawn;
//! - [`bus`]: registration, triggering, and the close protocol.
//!
//! ## Wiring
//! ```text
//! producer ── trigger(ev) ──► Bus ──┬─► (sync)  dispatcher::dispatch ──► listeners
//!                                   └─► (async) Pool.tx ──► [queue] ──► Worker × N
//!                                                                         │
//!                                                   dispatcher::dispatch_isolated ──► listeners
//! ```

mod builder;
mod bus;
mod config;
mod dispatcher;
mod pool;
mod worker;

pub use builder::BusBuilder;
pub use bus::Bus;
pub use config::{Config, DEFAULT_DRAIN_TIMEOUT};
