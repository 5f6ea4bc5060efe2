//! Stops currently shown on the map, keyed by stop id.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{Stop, StopId};

/// A displayed stop and the handle of its map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry<H> {
    pub stop: Stop,
    pub marker: H,
}

impl<H> PoolEntry<H> {
    #[must_use]
    pub const fn new(stop: Stop, marker: H) -> Self {
        Self { stop, marker }
    }

    #[must_use]
    pub const fn id(&self) -> &StopId {
        &self.stop.id
    }
}

/// Outcome of diffing a viewport response against the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation<H> {
    /// Stops not yet in the pool, unique by id, in response order.
    pub fresh: Vec<Stop>,

    /// Entries no longer reported, already removed from the pool. Their
    /// markers must be detached by the caller.
    pub evicted: Vec<PoolEntry<H>>,
}

/// In-memory pool of displayed stops.
///
/// Holds at most one entry per stop id. Membership mirrors "marker currently
/// on the map".
#[derive(Debug, Clone)]
pub struct StopsPool<H> {
    entries: HashMap<StopId, PoolEntry<H>>,
}

impl<H> Default for StopsPool<H> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<H> StopsPool<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry unless its id is already pooled. Returns the id either
    /// way; an existing entry keeps its original marker.
    pub fn add(&mut self, entry: PoolEntry<H>) -> StopId {
        let id = entry.id().clone();

        if self.entries.contains_key(&id) {
            debug!(stop_id = %id, "stop already pooled");
        } else {
            debug!(stop_id = %id, "stop pooled");
            self.entries.insert(id.clone(), entry);
        }

        id
    }

    /// Remove an entry, handing it back so its marker can be detached.
    pub fn remove(&mut self, id: &str) -> Option<PoolEntry<H>> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            debug!(stop_id = %id, "stop removed from pool");
        }
        removed
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PoolEntry<H>> {
        self.entries.get(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &PoolEntry<H>> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diff a viewport response against the pool.
    ///
    /// Every pooled stop missing from `stops` is removed and returned as
    /// evicted; stops not yet pooled are returned as fresh. Pooled stops that
    /// are still reported are left untouched.
    pub fn reconcile(&mut self, stops: Vec<Stop>) -> Reconciliation<H> {
        let mut present = HashSet::new();
        let mut seen = HashSet::new();
        let mut fresh = Vec::new();

        for stop in stops {
            if self.entries.contains_key(&stop.id) {
                present.insert(stop.id);
            } else if seen.insert(stop.id.clone()) {
                fresh.push(stop);
            }
        }

        let mut stale: Vec<StopId> =
            self.entries.keys().filter(|id| !present.contains(*id)).cloned().collect();
        stale.sort_unstable();

        let evicted = stale.iter().filter_map(|id| self.remove(id.as_str())).collect();

        Reconciliation { fresh, evicted }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn stop(id: &str) -> Stop {
        Stop { id: StopId::from(id), name: format!("Stop {id}"), lat: 51.5, lng: -0.1 }
    }

    fn pool_of(ids: &[&str]) -> StopsPool<String> {
        let mut pool = StopsPool::new();
        for id in ids {
            pool.add(PoolEntry::new(stop(id), format!("marker-{id}")));
        }
        pool
    }

    #[test]
    fn add_is_idempotent() {
        let mut pool = StopsPool::new();

        let first = pool.add(PoolEntry::new(stop("A"), "first".to_string()));
        let second = pool.add(PoolEntry::new(stop("A"), "second".to_string()));

        assert_eq!(first, second);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get("A").map(|e| e.marker.as_str()), Some("first"));
    }

    #[test]
    fn remove_absent() {
        let mut pool = pool_of(&["A", "B"]);

        assert!(pool.remove("Z").is_none());
        assert_eq!(pool.len(), 2);
        assert!(pool.has("A"));
        assert!(pool.has("B"));

        assert_eq!(pool.remove("A").map(|e| e.marker), Some("marker-A".to_string()));
        assert!(!pool.has("A"));
    }

    #[test]
    fn reconcile_viewport() {
        let mut pool = pool_of(&["A", "B", "C"]);

        let diff = pool.reconcile(vec![stop("B"), stop("C"), stop("D")]);

        assert_eq!(diff.fresh, vec![stop("D")]);
        assert_eq!(diff.evicted, vec![PoolEntry::new(stop("A"), "marker-A".to_string())]);
        assert_eq!(pool.get("B").map(|e| e.marker.as_str()), Some("marker-B"));
        assert_eq!(pool.get("C").map(|e| e.marker.as_str()), Some("marker-C"));
        assert!(!pool.has("D"));

        let mut pooled: Vec<&str> = pool.all().map(|e| e.id().as_str()).collect();
        pooled.sort_unstable();
        assert_eq!(pooled, vec!["B", "C"]);
    }

    #[test]
    fn duplicate_fresh_stops() {
        let mut pool = pool_of(&[]);

        let diff = pool.reconcile(vec![stop("D"), stop("E"), stop("D")]);

        assert_eq!(diff.fresh, vec![stop("D"), stop("E")]);
        assert!(diff.evicted.is_empty());
    }

    #[test]
    fn empty_response_evicts_all() {
        let mut pool = pool_of(&["B", "A"]);

        let diff = pool.reconcile(vec![]);

        let evicted: Vec<&str> = diff.evicted.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(evicted, vec!["A", "B"]);
        assert!(pool.is_empty());
    }
}
