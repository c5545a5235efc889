//! # Worker pool: the bounded queue and the workers draining it.
//!
//! Created once, when a bus switches to asynchronous mode.
//!
//! ## Architecture
//! ```text
//! trigger() ──► tx ──► [bounded MPMC queue] ──► rx ──┬─► worker 1 ──► dispatch
//! trigger() ──┘                                      ├─► worker 2 ──► dispatch
//!                                                    └─► worker N ──► dispatch
//!
//! tracker (TaskTracker) ── counts live workers, respawns included
//! active  (AtomicUsize) ── decremented only on normal exit
//! exited  (CancellationToken) ── cancelled by close once the tracker is empty
//! ```
//!
//! ## Rules
//! - Queue capacity is fixed at creation (`0` = rendezvous)
//! - `active` never drops because of a listener panic: the replacement inherits the slot
//! - Workers are spawned on the runtime captured at creation
//! - A producer waiting on a full queue is only released by `exited`: while any worker
//!   drains, its send completes

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize};

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::core::bus::Shared;
use crate::core::worker::Worker;
use crate::events::Event;

/// Shared state of an asynchronous bus.
pub(crate) struct Pool {
    /// Producer side of the event queue.
    pub(crate) tx: flume::Sender<Event>,
    /// Consumer side, cloned by every worker.
    pub(crate) rx: flume::Receiver<Event>,
    /// Completion barrier: `close` waits on it.
    pub(crate) tracker: TaskTracker,
    /// Latched after every worker has exited.
    pub(crate) exited: CancellationToken,
    /// Runtime that owns the workers.
    pub(crate) runtime: Handle,
    /// Configured pool size.
    pub(crate) size: usize,
    /// Workers not yet exited.
    pub(crate) active: AtomicUsize,
    /// Workers replaced after a listener panic.
    pub(crate) respawns: AtomicU64,
}

impl Pool {
    /// Allocates the queue and starts `size` workers on `runtime`.
    pub(crate) fn start(
        shared: &Arc<Shared>,
        runtime: Handle,
        size: usize,
        capacity: usize,
    ) -> Arc<Self> {
        let (tx, rx) = flume::bounded(capacity);
        let pool = Arc::new(Self {
            tx,
            rx,
            tracker: TaskTracker::new(),
            exited: CancellationToken::new(),
            runtime,
            size,
            active: AtomicUsize::new(size),
            respawns: AtomicU64::new(0),
        });

        for _ in 0..size {
            Worker::spawn(Arc::clone(shared), Arc::clone(&pool));
        }
        pool
    }
}
