//! # Worker: one queue-draining loop of an asynchronous bus.
//!
//! Each worker pulls events from the shared queue and dispatches them until the bus is
//! closed and the queue stays empty for the drain timeout.
//!
//! ## State machine
//! ```text
//!            event ──► dispatch                 event ──► dispatch
//!              ▲          │                       ▲          │
//!              └──────────┘                       └──────────┘
//!   ┌─────────────────┐   closed-signal   ┌─────────────────┐  drain timeout  ┌────────┐
//!   │     Running     │ ────────────────► │    Draining     │ ──────────────► │ Exited │
//!   └─────────────────┘                   └─────────────────┘                 └────────┘
//!
//! listener panic (any state):
//!   log(bus, panic, backtrace) ──► spawn fresh worker (Running) ──► this worker ends
//! ```
//!
//! ## Rules
//! - Events a worker dequeues are dispatched in the order received (per-worker FIFO)
//! - The drain window restarts on every dispatched event
//! - A crashed worker hands its slot to the replacement: `active` is unchanged
//! - The event being dispatched when a listener panics is lost (at-most-once)

use std::backtrace::Backtrace;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::{select, time};

use crate::core::bus::Shared;
use crate::core::dispatcher::dispatch_isolated;
use crate::core::pool::Pool;
use crate::events::Event;

/// Lifecycle state of a worker loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkerState {
    /// Waiting for events or the closed-signal.
    Running,
    /// Bus closed; consuming what is left in the queue.
    Draining,
    /// Drain window elapsed with the queue empty.
    Exited,
}

/// Outcome of one wait.
enum Step {
    Dispatch(Event),
    Transition(WorkerState),
}

pub(crate) struct Worker {
    shared: Arc<Shared>,
    pool: Arc<Pool>,
}

impl Worker {
    /// Spawns a worker in `Running` state, tracked by the pool's completion barrier.
    pub(crate) fn spawn(shared: Arc<Shared>, pool: Arc<Pool>) {
        let tracker = pool.tracker.clone();
        let runtime = pool.runtime.clone();
        tracker.spawn_on(Self { shared, pool }.run(), &runtime);
    }

    async fn run(self) {
        let mut state = WorkerState::Running;

        loop {
            match self.step(state).await {
                Step::Dispatch(event) => {
                    if let Err(message) = dispatch_isolated(&self.shared.registry, &event).await {
                        self.respawn(&event, &message);
                        return;
                    }
                }
                Step::Transition(WorkerState::Exited) => break,
                Step::Transition(next) => {
                    tracing::trace!(bus = %self.shared.name, from = ?state, to = ?next, "worker state");
                    state = next;
                }
            }
        }

        self.pool.active.fetch_sub(1, Ordering::AcqRel);
        tracing::trace!(bus = %self.shared.name, "worker exited");
    }

    /// Waits for whatever the current state listens to.
    async fn step(&self, state: WorkerState) -> Step {
        match state {
            WorkerState::Running => {
                select! {
                    biased;
                    _ = self.shared.closed.cancelled() => Step::Transition(WorkerState::Draining),
                    res = self.pool.rx.recv_async() => match res {
                        Ok(event) => Step::Dispatch(event),
                        Err(_disconnected) => Step::Transition(WorkerState::Exited),
                    },
                }
            }
            WorkerState::Draining => {
                let window = self.shared.drain_timeout();
                match time::timeout(window, self.pool.rx.recv_async()).await {
                    Ok(Ok(event)) => Step::Dispatch(event),
                    Ok(Err(_)) | Err(_) => Step::Transition(WorkerState::Exited),
                }
            }
            WorkerState::Exited => Step::Transition(WorkerState::Exited),
        }
    }

    /// Logs the panic and replaces this worker with a fresh one.
    ///
    /// The unwind has already finished here, so `recovery_backtrace` shows the worker
    /// loop that caught the panic, not the listener frame that raised it. The panic
    /// message is the only trace of the panic site.
    fn respawn(&self, event: &Event, message: &str) {
        tracing::error!(
            bus = %self.shared.name,
            event = %event.name(),
            seq = event.seq(),
            panic = %message,
            recovery_backtrace = %Backtrace::force_capture(),
            "listener panicked; respawning worker"
        );
        self.pool.respawns.fetch_add(1, Ordering::Relaxed);
        Worker::spawn(Arc::clone(&self.shared), Arc::clone(&self.pool));
    }
}
