//! # Listener registry - name to ordered listeners.
//!
//! Maps an event name to the listeners registered under it, in registration order.
//!
//! ## Architecture
//! ```text
//! add_listener(name, l) ──► write lock ──► copy entry, push l, swap snapshot
//!
//! dispatch(ev) ──► read lock ──► clone Arc<[ListenerRef]> ──► unlock ──► iterate
//! ```
//!
//! ## Rules
//! - At most one entry per name, created lazily on first registration
//! - Append-only: listeners are never removed or reordered
//! - Lookups return an immutable snapshot; the lock is never held while a listener runs,
//!   so a listener may register other listeners without deadlocking
//! - A registration racing with a dispatch is seen by the next dispatch, not the current one

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::listeners::ListenerRef;

/// Immutable snapshot of the listeners registered under one name.
pub type Listeners = Arc<[ListenerRef]>;

/// Thread-safe, append-only registry of listeners.
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Listeners>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to the entry for `name`, creating the entry if absent.
    pub fn register(&self, name: impl Into<String>, listener: ListenerRef) {
        // Poisoning is recoverable: no listener code runs under this lock.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(name.into()).or_insert_with(|| Arc::from([]));

        let mut next = Vec::with_capacity(entry.len() + 1);
        next.extend(entry.iter().cloned());
        next.push(listener);
        *entry = Arc::from(next);
    }

    /// Returns the listeners for `name` in registration order (empty if none).
    pub fn lookup(&self, name: &str) -> Listeners {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .unwrap_or_else(|| Arc::from([]))
    }

    /// Number of listeners registered under `name`.
    pub fn len(&self, name: &str) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map_or(0, |l| l.len())
    }

    /// Returns sorted list of names that have at least one listener.
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
