//! # eventvisor
//!
//! **Eventvisor** is an in-process publish/subscribe event bus for Rust.
//!
//! Producers trigger named events carrying arbitrary payloads; every listener registered
//! under that name is invoked, in registration order. A bus dispatches synchronously on
//! the caller's task, or asynchronously through a bounded queue drained by a supervised,
//! self-healing worker pool.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   producer   │   │   producer   │   │   producer   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ trigger(Event)   │ append(name, payload)
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Bus                                                              │
//! │  - Registry (name → ordered listeners, copy-on-append)            │
//! │  - closed-signal (CancellationToken, latched)                     │
//! │  - Pool (bounded queue + workers), only after enable_async        │
//! └──────┬──────────────────────────────────────────────┬─────────────┘
//!        │ synchronous                                  │ asynchronous
//!        ▼                                              ▼
//!   dispatch on the                         ┌────────────────────────┐
//!   caller's task                           │  bounded MPMC queue    │
//!   (panics propagate)                      │  (producer waits full) │
//!                                           └───┬────────┬────────┬──┘
//!                                               ▼        ▼        ▼
//!                                           worker 1  worker 2  worker N
//!                                               │        │        │
//!                                       catch_unwind(dispatch) → panic: log + respawn
//! ```
//!
//! ### Lifecycle
//! ```text
//! Bus::new(name) ──► [enable_async(workers, capacity)] ──► trigger* / add_listener* ──► close()
//!
//! worker loop {
//!   Running:  queue item ─► dispatch        closed-signal ─► Draining
//!   Draining: queue item ─► dispatch        drain timeout ─► Exited
//!   listener panic ─► log(bus, backtrace) ─► spawn replacement ─► end
//! }
//!
//! close():
//!   latch closed-signal ─► wait for every worker to exit ─► discard leftovers
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                 |
//! |-------------------|---------------------------------------------------------------|------------------------------------|
//! | **Listener API**  | React to named events, as a type or a closure.                | [`Listener`], [`ListenerFn`]       |
//! | **Events**        | Named values with a typed, opaque payload.                    | [`Event`]                          |
//! | **Bus**           | Register, trigger, enable async mode, close with draining.    | [`Bus`], [`BusBuilder`]            |
//! | **Errors**        | Typed configuration errors.                                   | [`BusError`]                       |
//! | **Configuration** | Worker pool size, queue capacity, drain timeout.              | [`Config`]                         |
//!
//! ## Delivery guarantees
//! - At-most-once, best effort: a panicking listener loses the event it was handling.
//! - Events triggered after close are dropped silently.
//! - Per-worker FIFO; no global order across workers.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use eventvisor::{Bus, Config, Event, ListenerFn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seen = Arc::new(AtomicUsize::new(0));
//!     let counter = Arc::clone(&seen);
//!
//!     let bus = Bus::builder("app")
//!         .with_config(Config { workers: 3, queue_capacity: 25, ..Config::default() })
//!         .with_listener("user.created", ListenerFn::arc("count", move |_ev: &Event| {
//!             counter.fetch_add(1, Ordering::Relaxed);
//!         }))
//!         .build()?;
//!
//!     for id in 0..10_u64 {
//!         bus.append("user.created", id).await;
//!     }
//!     bus.close().await;
//!
//!     assert_eq!(seen.load(Ordering::Relaxed), 10);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use crate::core::{Bus, BusBuilder, Config, DEFAULT_DRAIN_TIMEOUT};
pub use error::BusError;
pub use events::{Event, Payload};
pub use listeners::{Listener, ListenerFn, ListenerRef};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
