//! Dedup, capacity gate, and queue classification.

use crate::bus::EventBus;
use crate::collaborators::{Accounts, TransactionLogic};
use crate::config::Config;
use crate::error::{MempoolError, MempoolResult};
use crate::transaction::{Transaction, TransactionKind};

use super::verify::process_verify_transaction;
use super::{PoolState, COMPACTION_THRESHOLD};

/// `queue_transaction`: stamps `received_at`, classifies into the target
/// queue, and enforces the per-queue capacity gate.
pub fn queue_transaction(state: &mut PoolState, config: &Config, mut tx: Transaction) -> MempoolResult<()> {
    tx.received_at = crate::clock::unix_time_as_secs();

    let target_name;
    let at_capacity;
    if tx.bundled {
        target_name = "bundled";
        at_capacity = state.bundled.count() >= config.max_txs_per_queue;
    } else if TransactionKind::classify(&tx).is_multisignature() {
        target_name = "multisignature";
        at_capacity = state.multisignature.count() >= config.max_txs_per_queue;
    } else {
        target_name = "queued";
        at_capacity = state.queued.count() >= config.max_txs_per_queue;
    }

    if at_capacity {
        return Err(MempoolError::PoolFull { queue: target_name, limit: config.max_txs_per_queue });
    }

    match target_name {
        "bundled" => state.bundled.add(tx),
        "multisignature" => state.multisignature.add(tx),
        _ => state.queued.add(tx),
    }
    Ok(())
}

/// `process_unconfirmed_transaction`: the full ingress entry point.
#[allow(clippy::too_many_arguments)]
pub async fn process_unconfirmed_transaction(
    state: &mut PoolState,
    config: &Config,
    accounts: &dyn Accounts,
    logic: &dyn TransactionLogic,
    bus: &EventBus,
    mut tx: Transaction,
    broadcast: bool,
) -> MempoolResult<()> {
    if state.transaction_in_pool(&tx.id) {
        return Err(MempoolError::AlreadyInPool(tx.id));
    }

    state.processed += 1;
    if state.processed > COMPACTION_THRESHOLD {
        state.reindex_queues();
        state.processed = 1;
    }

    if tx.bundled {
        return queue_transaction(state, config, tx);
    }

    process_verify_transaction(&mut tx, broadcast, accounts, logic, bus).await?;
    queue_transaction(state, config, tx)
}

#[cfg(test)]
#[path = "tests/admission.rs"]
mod tests;
