// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-level listener bookkeeping.
//!
//! Disclosures install document-wide listeners while they are open (a key listener for
//! focus containment, a pointer-down listener for outside dismissal) and must remove
//! them when they close. The registry stores *who* is listening for *what*, in
//! registration order; the host walks a snapshot and calls the owners.
//!
//! Every [`ListenerId`] is unique for the lifetime of the registry, so a stale id can
//! never remove somebody else's registration, and [`ListenerRegistry::remove`] reports
//! whether the id was still registered.
//!
//! ```rust
//! use vitrine_event_state::listeners::{ListenerKind, ListenerRegistry};
//!
//! let mut registry = ListenerRegistry::new();
//! let id = registry.register(ListenerKind::KeyDown, "dialog");
//! assert_eq!(registry.count(ListenerKind::KeyDown), 1);
//!
//! // Walk a snapshot, re-checking registration before each call, so a listener
//! // removed by an earlier handler is skipped.
//! for (listener, owner) in registry.snapshot(ListenerKind::KeyDown) {
//!     assert!(registry.is_registered(listener));
//!     assert_eq!(owner, "dialog");
//! }
//!
//! assert!(registry.remove(id));
//! assert!(!registry.remove(id));
//! assert!(registry.stats().is_balanced());
//! ```

use alloc::vec::Vec;
use smallvec::SmallVec;

/// What a listener listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Key presses anywhere in the document.
    KeyDown,
    /// Pointer presses anywhere in the document.
    PointerDown,
}

/// Identifier of one registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Lifetime counters of a registry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerStats {
    /// Registrations ever made.
    pub registered: u64,
    /// Registrations ever removed.
    pub removed: u64,
}

impl ListenerStats {
    /// Whether every registration has been removed.
    pub fn is_balanced(&self) -> bool {
        self.registered == self.removed
    }
}

#[derive(Clone, Debug)]
struct Entry<O> {
    id: ListenerId,
    kind: ListenerKind,
    owner: O,
}

/// Ordered registry of document-level listeners keyed by owner.
#[derive(Clone, Debug)]
pub struct ListenerRegistry<O> {
    entries: Vec<Entry<O>>,
    next_id: u64,
    stats: ListenerStats,
}

impl<O> Default for ListenerRegistry<O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            stats: ListenerStats::default(),
        }
    }
}

impl<O: Copy + PartialEq + core::fmt::Debug> ListenerRegistry<O> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner` for `kind` and return the registration id.
    pub fn register(&mut self, kind: ListenerKind, owner: O) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, kind, owner });
        self.stats.registered += 1;
        tracing::trace!(?kind, ?owner, listener = id.0, "listener registered");
        id
    }

    /// Remove a registration. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let entry = self.entries.remove(pos);
        self.stats.removed += 1;
        tracing::trace!(kind = ?entry.kind, owner = ?entry.owner, listener = id.0, "listener removed");
        true
    }

    /// Whether `id` is currently registered.
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Registrations for `kind` in registration order.
    pub fn snapshot(&self, kind: ListenerKind) -> SmallVec<[(ListenerId, O); 4]> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.id, e.owner))
            .collect()
    }

    /// Number of registrations for `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of registrations held by `owner`.
    pub fn count_for(&self, owner: O) -> usize {
        self.entries.iter().filter(|e| e.owner == owner).count()
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> ListenerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_registration_order_per_kind() {
        let mut registry = ListenerRegistry::new();
        let a = registry.register(ListenerKind::KeyDown, 1_u32);
        let _p = registry.register(ListenerKind::PointerDown, 2);
        let b = registry.register(ListenerKind::KeyDown, 3);

        let keys: Vec<_> = registry.snapshot(ListenerKind::KeyDown).into_iter().collect();
        assert_eq!(keys, [(a, 1), (b, 3)]);
        assert_eq!(registry.count(ListenerKind::PointerDown), 1);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = ListenerRegistry::new();
        let first = registry.register(ListenerKind::KeyDown, 1_u32);
        assert!(registry.remove(first));
        let second = registry.register(ListenerKind::KeyDown, 1);
        assert_ne!(first, second);
        // Removing the stale id leaves the live registration alone.
        assert!(!registry.remove(first));
        assert!(registry.is_registered(second));
    }

    #[test]
    fn stats_track_balance() {
        let mut registry = ListenerRegistry::new();
        for _ in 0..3 {
            let k = registry.register(ListenerKind::KeyDown, 7_u32);
            let p = registry.register(ListenerKind::PointerDown, 7);
            assert_eq!(registry.count_for(7), 2);
            assert!(!registry.stats().is_balanced());
            registry.remove(k);
            registry.remove(p);
        }
        assert!(registry.is_empty());
        assert_eq!(
            registry.stats(),
            ListenerStats {
                registered: 6,
                removed: 6
            }
        );
        assert!(registry.stats().is_balanced());
    }
}
