//! The mempool's moving parts, one file per concern, each independently
//! testable against a bare `Queue`/`PoolState` rather than the whole
//! `Mempool` surface.

pub mod admission;
pub mod bundle;
pub mod expiry;
pub mod fill;
pub mod queue;
pub mod undo;
pub mod verify;

use queue::Queue;

use crate::transaction::Transaction;

/// Compaction cadence: admission triggers `reindex_queues` once `processed`
/// exceeds this many successful admissions, then resets to 1.
pub const COMPACTION_THRESHOLD: u64 = 1000;

/// The four named queues plus the bookkeeping counter the rest of the
/// component modules operate on. Held behind a single `tokio::sync::Mutex`
/// by the top-level `Mempool`.
#[derive(Default)]
pub struct PoolState {
    pub unconfirmed: Queue,
    pub queued: Queue,
    pub multisignature: Queue,
    pub bundled: Queue,
    /// Transactions routed through `queue_transaction` since the last
    /// `reindex_queues` call; triggers a compaction pass at 1000.
    pub processed: u64,
}

impl PoolState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any of the four queues already hold `id`. An id present in
    /// `unconfirmed` is never present in any other index.
    pub fn transaction_in_pool(&self, id: &str) -> bool {
        self.unconfirmed.contains(id)
            || self.queued.contains(id)
            || self.multisignature.contains(id)
            || self.bundled.contains(id)
    }

    /// Promotes `tx` into `unconfirmed`, clearing it out of `queued` and
    /// `multisignature` so it never appears in more than one queue.
    pub fn add_unconfirmed_transaction(&mut self, tx: Transaction) {
        self.queued.remove(&tx.id);
        self.multisignature.remove(&tx.id);
        self.unconfirmed.add(tx);
    }

    /// Removes `id` from `unconfirmed`, `queued` and `multisignature`.
    /// Idempotent; a missing id is a no-op in every queue.
    pub fn remove_unconfirmed_transaction(&mut self, id: &str) {
        self.unconfirmed.remove(id);
        self.queued.remove(id);
        self.multisignature.remove(id);
    }

    /// Compaction pass: rebuild every queue's map from its own live
    /// entries. With the ordered-map representation this is a no-op on
    /// content; it exists so `processed`'s cadence still drives a real,
    /// observable operation.
    pub fn reindex_queues(&mut self) {
        self.unconfirmed.reindex();
        self.queued.reindex();
        self.multisignature.reindex();
        self.bundled.reindex();
    }
}
