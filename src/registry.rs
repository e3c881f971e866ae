//! Ordered adapter registry.
//!
//! # Data Flow
//! ```text
//! register / unregister (rare, any thread)
//!     → copy current snapshot, apply change
//!     → atomic swap of Arc<[AdapterEntry]>
//!
//! every log call
//!     → load snapshot (lock-free)
//!     → iterate in registration order
//! ```
//!
//! # Design Decisions
//! - Copy-on-write: readers never observe a half-applied registration
//! - One entry per name; re-registering replaces in place and keeps the
//!   original position
//! - Owned by a `LoggerFactory` and shared by `Arc`; there is no global

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::adapter::LogAdapter;

/// A named adapter inside a snapshot.
#[derive(Clone)]
pub struct AdapterEntry {
    pub name: Arc<str>,
    pub adapter: Arc<dyn LogAdapter>,
}

impl std::fmt::Debug for AdapterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterEntry")
            .field("name", &self.name)
            .field("threshold", &self.adapter.threshold())
            .finish()
    }
}

/// Immutable view of the registry at one point in time.
pub type Snapshot = Arc<[AdapterEntry]>;

/// Name-keyed, insertion-ordered set of adapters.
pub struct AdapterRegistry {
    entries: ArcSwap<Vec<AdapterEntry>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.load().iter()).finish()
    }
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Inserts `adapter` under `name`, replacing any adapter of that name.
    ///
    /// Returns the replaced adapter, if any.
    pub fn register(
        &self,
        name: impl Into<Arc<str>>,
        adapter: Arc<dyn LogAdapter>,
    ) -> Option<Arc<dyn LogAdapter>> {
        let name: Arc<str> = name.into();
        let mut replaced = None;

        self.entries.rcu(|current| {
            let mut next = Vec::clone(current);
            let entry = AdapterEntry {
                name: name.clone(),
                adapter: adapter.clone(),
            };
            match next.iter_mut().find(|e| e.name == name) {
                Some(existing) => {
                    replaced = Some(std::mem::replace(existing, entry).adapter);
                }
                None => {
                    replaced = None;
                    next.push(entry);
                }
            }
            next
        });

        tracing::debug!(adapter = %name, replaced = replaced.is_some(), "Adapter registered");
        replaced
    }

    /// Removes the adapter registered under `name`.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn LogAdapter>> {
        let mut removed = None;

        self.entries.rcu(|current| {
            let mut next = Vec::clone(current);
            removed = next
                .iter()
                .position(|e| &*e.name == name)
                .map(|pos| next.remove(pos).adapter);
            next
        });

        if removed.is_some() {
            tracing::debug!(adapter = %name, "Adapter unregistered");
        }
        removed
    }

    /// Ordered snapshot for fan-out.
    pub fn all(&self) -> Snapshot {
        Arc::from(self.entries.load().as_slice())
    }

    /// Calls `f` with the current entries without copying them.
    pub fn with_entries<R>(&self, f: impl FnOnce(&[AdapterEntry]) -> R) -> R {
        let guard = self.entries.load();
        f(guard.as_slice())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LogAdapter>> {
        self.entries
            .load()
            .iter()
            .find(|e| &*e.name == name)
            .map(|e| e.adapter.clone())
    }

    pub fn names(&self) -> Vec<Arc<str>> {
        self.entries.load().iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Replaces the whole adapter set in one swap.
    pub fn replace_all(&self, entries: Vec<AdapterEntry>) {
        let mut deduped: Vec<AdapterEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            match deduped.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => *existing = entry,
                None => deduped.push(entry),
            }
        }
        self.entries.store(Arc::new(deduped));
    }
}
