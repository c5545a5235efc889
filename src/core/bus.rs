//! # Bus: listener registration, triggering, and draining shutdown.
//!
//! The [`Bus`] owns the listener registry, the closed-signal, and (once asynchronous mode
//! is enabled) the worker pool. It is a cheap-to-clone handle; all clones share state.
//!
//! ## Key responsibilities
//! - register listeners at any time, including during dispatch
//! - dispatch synchronously on the caller's task, or enqueue for the worker pool
//! - apply backpressure: producers wait while the queue is full
//! - drop events triggered after close
//! - close once: latch the signal, wait for workers to drain, discard leftovers
//!
//! ## High-level architecture
//! ```text
//! synchronous:
//!   trigger(ev) ── closed? ──► drop
//!               └──────────► dispatch(ev) on the caller's task (panics propagate)
//!
//! asynchronous (after enable_async(workers, capacity)):
//!   trigger(ev) ── closed? ──► drop
//!               └──────────► tx.send_async(ev) (waits while full, until workers exit)
//!                                   │
//!                             [bounded queue] ──► workers ──► dispatch_isolated(ev)
//!
//! close():
//!   close_lock ──► already closed? ──► return
//!              └─► set drain timeout (override) ──► closed.cancel()
//!                    └─► workers: Running ─► Draining ─► Exited
//!                    └─► tracker.wait() ──► exited.cancel() ──► discard what is left
//! ```
//!
//! ## Example
//! ```rust
//! use eventvisor::{Bus, Event, ListenerFn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), eventvisor::BusError> {
//!     let bus = Bus::new("orders");
//!     bus.add_listener("order.placed", ListenerFn::arc("print", |ev: &Event| {
//!         println!("placed: {:?}", ev.payload::<u64>());
//!     }));
//!
//!     bus.enable_async(3, 25)?;
//!     for id in 0..50_u64 {
//!         bus.append("order.placed", id).await;
//!     }
//!     bus.close().await;
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, OnceLock, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::core::builder::BusBuilder;
use crate::core::config::DEFAULT_DRAIN_TIMEOUT;
use crate::core::dispatcher::dispatch;
use crate::core::pool::Pool;
use crate::error::BusError;
use crate::events::Event;
use crate::listeners::{ListenerRef, Registry};

/// State shared between the bus handle and its workers.
pub(crate) struct Shared {
    /// Bus name (diagnostics only).
    pub(crate) name: String,
    /// Listener registry.
    pub(crate) registry: Registry,
    /// Latched closed-signal.
    pub(crate) closed: CancellationToken,
    /// Drain window, in nanoseconds.
    drain_timeout_ns: AtomicU64,
}

impl Shared {
    fn new(name: String, drain_timeout: Duration) -> Self {
        Self {
            name,
            registry: Registry::new(),
            closed: CancellationToken::new(),
            drain_timeout_ns: AtomicU64::new(as_nanos(drain_timeout)),
        }
    }

    pub(crate) fn drain_timeout(&self) -> Duration {
        Duration::from_nanos(self.drain_timeout_ns.load(Ordering::Acquire))
    }

    fn set_drain_timeout(&self, timeout: Duration) {
        self.drain_timeout_ns
            .store(as_nanos(timeout), Ordering::Release);
    }
}

fn as_nanos(d: Duration) -> u64 {
    d.as_nanos().min(u128::from(u64::MAX)) as u64
}

struct Inner {
    shared: Arc<Shared>,
    /// Set at most once, by `enable_async`.
    pool: OnceLock<Arc<Pool>>,
    /// Serializes the close transition.
    close_lock: Mutex<()>,
    /// Orders pool creation against the closed-signal latch. Never held across `.await`.
    start_lock: StdMutex<()>,
}

impl Inner {
    fn lock_start(&self) -> std::sync::MutexGuard<'_, ()> {
        self.start_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Inner {
    // Detached workers drain and exit once the last handle is gone.
    fn drop(&mut self) {
        self.shared.closed.cancel();
    }
}

/// In-process named-event bus.
///
/// ### Properties
/// - **Cloneable**: cheap to clone (internally holds an `Arc`)
/// - **Best effort**: at-most-once delivery; events triggered after close are dropped
/// - **Idempotent**: `enable_async` and `close` may be called repeatedly
#[derive(Clone)]
pub struct Bus {
    inner: Arc<Inner>,
}

impl Bus {
    /// Creates a synchronous bus with the default drain timeout.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_drain_timeout(name, DEFAULT_DRAIN_TIMEOUT)
    }

    /// Creates a synchronous bus with the given drain timeout.
    pub fn with_drain_timeout(name: impl Into<String>, drain_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                shared: Arc::new(Shared::new(name.into(), drain_timeout)),
                pool: OnceLock::new(),
                close_lock: Mutex::new(()),
                start_lock: StdMutex::new(()),
            }),
        }
    }

    /// Returns a builder for a bus named `name`.
    pub fn builder(name: impl Into<String>) -> BusBuilder {
        BusBuilder::new(name)
    }

    /// Registers `listener` for events named `name`.
    ///
    /// Always succeeds. Listeners registered under one name run in registration order.
    pub fn add_listener(&self, name: impl Into<String>, listener: ListenerRef) {
        self.inner.shared.registry.register(name, listener);
    }

    /// Switches the bus to asynchronous dispatch.
    ///
    /// Allocates a queue of `capacity` events (`0` = rendezvous) and starts `workers`
    /// worker loops on the current Tokio runtime. A second call is a no-op: the queue
    /// and pool from the first call are kept.
    ///
    /// ### Errors
    /// - [`BusError::InvalidWorkers`] if `workers == 0`
    /// - [`BusError::Closed`] if the bus was already closed
    /// - [`BusError::NoRuntime`] if called outside a Tokio runtime
    pub fn enable_async(&self, workers: usize, capacity: usize) -> Result<(), BusError> {
        let shared = &self.inner.shared;
        let _start = self.inner.lock_start();
        if self.inner.pool.get().is_some() {
            return Ok(());
        }
        if workers == 0 {
            return Err(BusError::InvalidWorkers { workers });
        }
        if self.is_closed() {
            return Err(BusError::Closed {
                bus: shared.name.clone(),
            });
        }
        let runtime = Handle::try_current().map_err(|_| BusError::NoRuntime {
            bus: shared.name.clone(),
        })?;

        self.inner.pool.get_or_init(|| {
            tracing::debug!(bus = %shared.name, workers, capacity, "asynchronous dispatch enabled");
            Pool::start(shared, runtime, workers, capacity)
        });
        Ok(())
    }

    /// Delivers `event` to the listeners registered under its name.
    ///
    /// - Closed bus: the event is dropped.
    /// - Asynchronous bus: the event is queued; waits while the queue is full. Closing the
    ///   bus does not release a waiting producer while workers are still draining: the
    ///   event is delivered once one of them makes room. It is dropped only after every
    ///   worker has exited.
    /// - Synchronous bus: listeners run on the caller's task; a listener panic
    ///   propagates to the caller.
    pub async fn trigger(&self, event: Event) {
        let shared = &self.inner.shared;
        if shared.closed.is_cancelled() {
            tracing::trace!(bus = %shared.name, event = %event.name(), "bus closed; event dropped");
            return;
        }

        match self.inner.pool.get() {
            Some(pool) => {
                tokio::select! {
                    biased;
                    _ = pool.exited.cancelled() => {
                        tracing::trace!(bus = %shared.name, "workers exited while queue full; event dropped");
                    }
                    res = pool.tx.send_async(event) => {
                        if let Err(flume::SendError(event)) = res {
                            tracing::trace!(bus = %shared.name, event = %event.name(), "queue gone; event dropped");
                        }
                    }
                }
            }
            None => dispatch(&shared.registry, &event).await,
        }
    }

    /// Builds an [`Event`] from `name` and `payload` and triggers it.
    pub async fn append<T>(&self, name: impl Into<String>, payload: T)
    where
        T: std::any::Any + Send + Sync,
    {
        self.trigger(Event::new(name, payload)).await;
    }

    /// Closes the bus using the configured drain timeout.
    ///
    /// See [`Bus::close_with_timeout`].
    pub async fn close(&self) {
        self.shutdown(None).await;
    }

    /// Closes the bus, replacing the drain timeout with `timeout`.
    ///
    /// 1. Latches the closed-signal: later triggers are dropped
    /// 2. Workers move to draining and keep dispatching queued events
    /// 3. Each worker exits once the queue stays empty for the drain timeout
    /// 4. Returns after every worker has exited; producers still waiting on a full queue
    ///    are released and anything still queued is discarded
    ///
    /// Calling it again (or concurrently) returns once the first close has finished.
    pub async fn close_with_timeout(&self, timeout: Duration) {
        self.shutdown(Some(timeout)).await;
    }

    async fn shutdown(&self, timeout: Option<Duration>) {
        let shared = &self.inner.shared;
        let _guard = self.inner.close_lock.lock().await;
        if shared.closed.is_cancelled() {
            return;
        }

        if let Some(timeout) = timeout {
            shared.set_drain_timeout(timeout);
        }
        tracing::debug!(bus = %shared.name, drain_timeout = ?shared.drain_timeout(), "closing bus");
        let pool = {
            let _start = self.inner.lock_start();
            shared.closed.cancel();
            self.inner.pool.get().cloned()
        };

        if let Some(pool) = pool {
            pool.tracker.close();
            pool.tracker.wait().await;
            pool.exited.cancel();

            let discarded = pool.rx.drain().count();
            if discarded > 0 {
                tracing::warn!(bus = %shared.name, discarded, "queued events discarded at close");
            }
        }
        tracing::debug!(bus = %shared.name, "bus closed");
    }

    /// Bus name.
    pub fn name(&self) -> &str {
        &self.inner.shared.name
    }

    /// Returns true once `close` has latched the closed-signal.
    pub fn is_closed(&self) -> bool {
        self.inner.shared.closed.is_cancelled()
    }

    /// Returns true if asynchronous dispatch is enabled.
    pub fn is_async(&self) -> bool {
        self.inner.pool.get().is_some()
    }

    /// Configured worker pool size (`0` for a synchronous bus).
    pub fn worker_count(&self) -> usize {
        self.inner.pool.get().map_or(0, |p| p.size)
    }

    /// Workers that have not exited yet.
    pub fn active_workers(&self) -> usize {
        self.inner
            .pool
            .get()
            .map_or(0, |p| p.active.load(Ordering::Acquire))
    }

    /// Number of workers replaced after a listener panic.
    pub fn respawns(&self) -> u64 {
        self.inner
            .pool
            .get()
            .map_or(0, |p| p.respawns.load(Ordering::Relaxed))
    }

    /// Events currently waiting in the queue.
    pub fn queued(&self) -> usize {
        self.inner.pool.get().map_or(0, |p| p.rx.len())
    }

    /// Queue capacity, or `None` for a synchronous bus.
    pub fn queue_capacity(&self) -> Option<usize> {
        self.inner.pool.get().and_then(|p| p.tx.capacity())
    }

    /// Current drain timeout.
    pub fn drain_timeout(&self) -> Duration {
        self.inner.shared.drain_timeout()
    }

    /// Number of listeners registered under `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.inner.shared.registry.len(name)
    }

    /// Sorted names that have at least one listener.
    pub fn event_names(&self) -> Vec<String> {
        self.inner.shared.registry.names()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("name", &self.name())
            .field("closed", &self.is_closed())
            .field("workers", &self.worker_count())
            .field("queued", &self.queued())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use tokio::sync::Semaphore;
    use tokio::time::{Instant, sleep, timeout};

    use super::*;
    use crate::listeners::{Listener, ListenerFn};

    const GUARD: Duration = Duration::from_secs(10);

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> ListenerRef {
        let log = Arc::clone(log);
        ListenerFn::arc(tag, move |ev: &Event| {
            log.lock().unwrap().push(format!("{tag}:{}", ev.name()));
        })
    }

    fn counter(hits: &Arc<AtomicUsize>) -> ListenerRef {
        let hits = Arc::clone(hits);
        ListenerFn::arc("counter", move |_ev: &Event| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    struct Sleepy {
        delay: Duration,
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Listener for Sleepy {
        async fn handle(&self, _event: &Event) {
            sleep(self.delay).await;
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Blocks every dispatch until a permit is released.
    struct Gate {
        permits: Arc<Semaphore>,
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Listener for Gate {
        async fn handle(&self, _event: &Event) {
            if let Ok(permit) = self.permits.acquire().await {
                permit.forget();
            }
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn wait_until(mut cond: impl FnMut() -> bool) {
        timeout(GUARD, async {
            while !cond() {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn test_sync_dispatch_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bus = Bus::new("sync");
        bus.add_listener("a", recorder(&log, "l1"));
        bus.add_listener("b", recorder(&log, "other"));
        bus.add_listener("a", recorder(&log, "l2"));
        bus.add_listener("a", recorder(&log, "l3"));

        bus.append("a", ()).await;
        bus.append("a", ()).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["l1:a", "l2:a", "l3:a", "l1:a", "l2:a", "l3:a"]
        );
    }

    #[tokio::test]
    async fn test_unknown_event_is_noop() {
        let hits = Arc::new(AtomicUsize::new(0));
        let bus = Bus::new("sync");
        bus.add_listener("known", counter(&hits));

        bus.append("unknown", 1_u32).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_listener_registered_during_dispatch_applies_next_time() {
        let hits = Arc::new(AtomicUsize::new(0));
        let bus = Bus::new("sync");

        let handle = bus.clone();
        let late = counter(&hits);
        bus.add_listener(
            "grow",
            ListenerFn::arc("grower", move |_ev: &Event| {
                handle.add_listener("grow", Arc::clone(&late));
            }),
        );

        bus.append("grow", ()).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(bus.listener_count("grow"), 2);

        bus.append("grow", ()).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "sync boom")]
    async fn test_sync_listener_panic_propagates() {
        let bus = Bus::new("sync");
        bus.add_listener("boom", ListenerFn::arc("bomb", |_ev: &Event| panic!("sync boom")));
        bus.append("boom", ()).await;
    }

    #[tokio::test]
    async fn test_trigger_after_close_is_dropped_sync() {
        let hits = Arc::new(AtomicUsize::new(0));
        let bus = Bus::new("sync");
        bus.add_listener("a", counter(&hits));

        bus.close().await;
        assert!(bus.is_closed());

        bus.append("a", ()).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_trigger_after_close_is_dropped_async() {
        let hits = Arc::new(AtomicUsize::new(0));
        let bus = Bus::with_drain_timeout("async", Duration::from_millis(20));
        bus.add_listener("a", counter(&hits));
        bus.enable_async(2, 0).unwrap();

        bus.close().await;

        // Rendezvous queue with no workers left: would block forever if not dropped.
        timeout(GUARD, bus.append("a", ()))
            .await
            .expect("trigger after close must not block");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(bus.queued(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_close_sequential() {
        let bus = Bus::with_drain_timeout("twice", Duration::from_millis(10));
        bus.enable_async(1, 1).unwrap();

        bus.close().await;
        let started = Instant::now();
        bus.close().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(bus.active_workers(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_double_close_concurrent() {
        let bus = Bus::with_drain_timeout("race", Duration::from_millis(50));
        bus.enable_async(3, 4).unwrap();

        let a = tokio::spawn({
            let bus = bus.clone();
            async move { bus.close().await }
        });
        let b = tokio::spawn({
            let bus = bus.clone();
            async move { bus.close().await }
        });

        let (ra, rb) = timeout(GUARD, async { tokio::join!(a, b) })
            .await
            .expect("concurrent close deadlocked");
        ra.unwrap();
        rb.unwrap();
        assert!(bus.is_closed());
        assert_eq!(bus.active_workers(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_async_drains_all_queued_events() {
        let hits = Arc::new(AtomicUsize::new(0));
        let bus = Bus::new("drain");
        bus.add_listener(
            "work",
            Arc::new(Sleepy {
                delay: Duration::from_millis(1),
                hits: Arc::clone(&hits),
            }),
        );
        bus.enable_async(3, 25).unwrap();

        for i in 0..50_u32 {
            bus.append("work", i).await;
        }

        timeout(GUARD, bus.close())
            .await
            .expect("close deadlocked");
        assert_eq!(hits.load(Ordering::SeqCst), 50);
        assert_eq!(bus.active_workers(), 0);
        assert_eq!(bus.queued(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_panicking_listener_does_not_shrink_pool() {
        let hits = Arc::new(AtomicUsize::new(0));
        let bus = Bus::with_drain_timeout("panics", Duration::from_millis(50));
        bus.add_listener("boom", ListenerFn::arc("bomb", |_ev: &Event| panic!("async boom")));
        bus.add_listener("ok", counter(&hits));
        bus.enable_async(3, 16).unwrap();

        for _ in 0..3 {
            bus.append("boom", ()).await;
        }
        for _ in 0..10 {
            bus.append("ok", ()).await;
        }
        wait_until(|| hits.load(Ordering::SeqCst) == 10 && bus.respawns() == 3).await;
        assert_eq!(bus.active_workers(), 3);

        // The recovered pool still drains a fresh burst.
        for _ in 0..20 {
            bus.append("ok", ()).await;
        }
        timeout(GUARD, bus.close())
            .await
            .expect("close deadlocked");
        assert_eq!(hits.load(Ordering::SeqCst), 30);
        assert_eq!(bus.active_workers(), 0);
    }

    #[tokio::test]
    async fn test_enable_async_twice_is_noop() {
        let bus = Bus::with_drain_timeout("twice", Duration::from_millis(10));
        bus.enable_async(3, 25).unwrap();
        bus.enable_async(5, 100).unwrap();

        assert_eq!(bus.worker_count(), 3);
        assert_eq!(bus.active_workers(), 3);
        assert_eq!(bus.queue_capacity(), Some(25));
        bus.close().await;
    }

    #[tokio::test]
    async fn test_enable_async_rejects_empty_pool() {
        let bus = Bus::new("empty");
        assert_eq!(
            bus.enable_async(0, 10),
            Err(BusError::InvalidWorkers { workers: 0 })
        );
        assert!(!bus.is_async());
    }

    #[tokio::test]
    async fn test_enable_async_after_close_fails() {
        let bus = Bus::new("late");
        bus.close().await;
        assert_eq!(
            bus.enable_async(2, 2),
            Err(BusError::Closed { bus: "late".into() })
        );
        assert_eq!(bus.worker_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_waits_default_drain_timeout() {
        let bus = Bus::new("paused");
        bus.enable_async(2, 4).unwrap();

        let started = Instant::now();
        bus.close().await;
        assert!(started.elapsed() >= DEFAULT_DRAIN_TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_timeout_override() {
        let bus = Bus::new("paused");
        bus.enable_async(2, 4).unwrap();

        let started = Instant::now();
        bus.close_with_timeout(Duration::from_millis(100)).await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < DEFAULT_DRAIN_TIMEOUT);
        assert_eq!(bus.drain_timeout(), Duration::from_millis(100));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_blocked_producer_delivered_while_draining() {
        let hits = Arc::new(AtomicUsize::new(0));
        let permits = Arc::new(Semaphore::new(0));
        let bus = Bus::with_drain_timeout("gate", Duration::from_millis(20));
        bus.add_listener(
            "slow",
            Arc::new(Gate {
                permits: Arc::clone(&permits),
                hits: Arc::clone(&hits),
            }),
        );
        bus.enable_async(1, 1).unwrap();

        // First event occupies the worker, second fills the queue.
        bus.append("slow", 1_u8).await;
        wait_until(|| bus.queued() == 0).await;
        bus.append("slow", 2_u8).await;

        let producer = tokio::spawn({
            let bus = bus.clone();
            async move { bus.append("slow", 3_u8).await }
        });
        sleep(Duration::from_millis(20)).await;
        assert!(!producer.is_finished());

        let closer = tokio::spawn({
            let bus = bus.clone();
            async move { bus.close().await }
        });
        wait_until(|| bus.is_closed()).await;
        sleep(Duration::from_millis(20)).await;
        assert!(!producer.is_finished());

        permits.add_permits(10);
        timeout(GUARD, producer)
            .await
            .expect("blocked producer never delivered")
            .unwrap();
        timeout(GUARD, closer)
            .await
            .expect("close deadlocked")
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(bus.queued(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_enable_async_racing_close_leaves_no_workers() {
        for _ in 0..50 {
            let bus = Bus::with_drain_timeout("race", Duration::from_millis(1));
            let enabler = tokio::spawn({
                let bus = bus.clone();
                async move { bus.enable_async(2, 2) }
            });
            let closer = tokio::spawn({
                let bus = bus.clone();
                async move { bus.close().await }
            });

            let res = enabler.await.unwrap();
            timeout(GUARD, closer)
                .await
                .expect("close deadlocked")
                .unwrap();

            assert!(bus.is_closed());
            match res {
                Ok(()) => assert!(bus.is_async()),
                Err(err) => {
                    assert_eq!(err, BusError::Closed { bus: "race".into() });
                    assert!(!bus.is_async());
                }
            }
            assert_eq!(bus.active_workers(), 0);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_rendezvous_queue_delivers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let bus = Bus::with_drain_timeout("rendezvous", Duration::from_millis(20));
        bus.add_listener("a", counter(&hits));
        bus.enable_async(2, 0).unwrap();

        for _ in 0..10 {
            bus.append("a", ()).await;
        }
        bus.close().await;
        assert_eq!(hits.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_dropping_last_handle_stops_workers() {
        let bus = Bus::with_drain_timeout("dropped", Duration::from_millis(10));
        bus.enable_async(2, 2).unwrap();
        let pool = Arc::clone(bus.inner.pool.get().unwrap());

        drop(bus);
        pool.tracker.close();
        timeout(GUARD, pool.tracker.wait())
            .await
            .expect("workers outlived the bus");
        assert_eq!(pool.active.load(Ordering::Acquire), 0);
    }
}
