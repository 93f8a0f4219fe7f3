//! Time-based expiry scan over `unconfirmed`, `queued` and `multisignature`.
//! `bundled` entries never expire; the bundle loop is responsible for
//! draining them first.

use crate::config::Config;
use crate::transaction::{Transaction, TransactionKind, TYPE_MULTI};

use super::PoolState;

const SECS_PER_HOUR: u64 = 3600;
const SIGNATURE_BEARING_MULTIPLIER: u64 = 8;

fn ttl_secs(tx: &Transaction, config: &Config) -> u64 {
    if tx.kind_tag == TYPE_MULTI {
        tx.asset.multisignature.as_ref().map(|m| m.lifetime).unwrap_or(0) * SECS_PER_HOUR
    } else if matches!(TransactionKind::classify(tx), TransactionKind::SignatureBearing) {
        config.unconfirmed_transaction_timeout * SIGNATURE_BEARING_MULTIPLIER
    } else {
        config.unconfirmed_transaction_timeout
    }
}

fn sweep_queue(state: &mut PoolState, config: &Config, queue: QueueName, now: u64, expired: &mut Vec<String>) {
    let snapshot = match queue {
        QueueName::Unconfirmed => state.unconfirmed.list(true, 0),
        QueueName::Queued => state.queued.list(true, 0),
        QueueName::Multisignature => state.multisignature.list(true, 0),
    };

    for tx in snapshot {
        // A concurrent tick may have already removed this id; re-check.
        let still_live = match queue {
            QueueName::Unconfirmed => state.unconfirmed.contains(&tx.id),
            QueueName::Queued => state.queued.contains(&tx.id),
            QueueName::Multisignature => state.multisignature.contains(&tx.id),
        };
        if !still_live {
            continue;
        }

        let ttl = ttl_secs(&tx, config);
        if now.saturating_sub(tx.received_at) > ttl {
            state.remove_unconfirmed_transaction(&tx.id);
            tracing::info!(tx_id = %tx.id, queue = queue.as_str(), "transaction expired");
            expired.push(tx.id);
        }
    }
}

#[derive(Clone, Copy)]
enum QueueName {
    Unconfirmed,
    Queued,
    Multisignature,
}

impl QueueName {
    fn as_str(self) -> &'static str {
        match self {
            QueueName::Unconfirmed => "unconfirmed",
            QueueName::Queued => "queued",
            QueueName::Multisignature => "multisignature",
        }
    }
}

/// One expiry-loop tick: walks the three sub-queues sequentially in reverse
/// order and returns the concatenated list of expired ids.
pub fn expire_transactions(state: &mut PoolState, config: &Config) -> Vec<String> {
    let now = crate::clock::unix_time_as_secs();
    let mut expired = Vec::new();
    sweep_queue(state, config, QueueName::Unconfirmed, now, &mut expired);
    sweep_queue(state, config, QueueName::Queued, now, &mut expired);
    sweep_queue(state, config, QueueName::Multisignature, now, &mut expired);
    expired
}

#[cfg(test)]
#[path = "tests/expiry.rs"]
mod tests;
