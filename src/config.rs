//! Static mempool configuration. Loading it from a file or CLI flags is the
//! host application's job; this type only needs to (de)serialize and to
//! validate the numbers it was handed.

use serde::{Deserialize, Serialize};

use crate::error::MempoolError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Bundle tick period, in seconds.
    pub broadcast_interval: u64,
    /// Max number of bundled transactions drained per bundle tick.
    pub release_limit: usize,
    /// Per-queue capacity.
    pub max_txs_per_queue: usize,
    /// Block-fill ceiling.
    pub max_txs_per_block: usize,
    /// Upper bound for merged listings.
    pub max_shared_txs: usize,
    /// Base TTL, in seconds, for plain unconfirmed/queued transactions.
    pub unconfirmed_transaction_timeout: u64,
    /// Expiry sweep period, in seconds. Fixed at 30 in the reference design.
    pub expiry_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broadcast_interval: 5,
            release_limit: 25,
            max_txs_per_queue: 1000,
            max_txs_per_block: 25,
            max_shared_txs: 100,
            unconfirmed_transaction_timeout: 10800,
            expiry_interval: 30,
        }
    }
}

impl Config {
    /// Rejects configurations that would make the pool unusable in a way no
    /// per-call error code could express: a zero-capacity queue admits
    /// nothing, and a merged-listing cap smaller than the block-fill
    /// ceiling can never satisfy `fill_pool`'s own consumers.
    pub fn validate(&self) -> Result<(), MempoolError> {
        if self.max_txs_per_queue == 0 {
            return Err(MempoolError::InvalidConfig("max_txs_per_queue must be non-zero".to_string()));
        }
        if self.max_shared_txs < self.max_txs_per_block {
            return Err(MempoolError::InvalidConfig(
                "max_shared_txs must be at least max_txs_per_block".to_string(),
            ));
        }
        Ok(())
    }
}
