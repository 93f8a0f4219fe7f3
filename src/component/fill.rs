//! Block-fill selection and the shared apply-unconfirmed routine.

use crate::bus::EventBus;
use crate::collaborators::{Accounts, Loader, TransactionLogic};
use crate::config::Config;
use crate::transaction::Transaction;

use super::verify::process_verify_transaction;
use super::PoolState;

const MULTISIG_QUOTA: usize = 5;

/// `fill_pool`: assembles up to `max_txs_per_block` transactions and
/// applies them as unconfirmed. Returns the ids actually applied.
#[allow(clippy::too_many_arguments)]
pub async fn fill_pool(
    state: &mut PoolState,
    config: &Config,
    loader: &dyn Loader,
    accounts: &dyn Accounts,
    logic: &dyn TransactionLogic,
    bus: &EventBus,
) -> Vec<String> {
    if loader.syncing().await {
        return Vec::new();
    }

    let unconfirmed_count = state.unconfirmed.count();
    if unconfirmed_count >= config.max_txs_per_block {
        return Vec::new();
    }

    let spare = config.max_txs_per_block - unconfirmed_count;
    let multisig_quota = if spare >= MULTISIG_QUOTA { MULTISIG_QUOTA } else { 0 };

    let chosen_multisig: Vec<Transaction> = state
        .multisignature
        .list(true, 0)
        .into_iter()
        .filter(|tx| tx.ready)
        .take(multisig_quota)
        .collect();

    // Absolute difference rather than a saturating subtraction: this can
    // never underflow given the quota above, but the arithmetic is kept
    // this way rather than clamped to zero.
    let remaining = (spare as i64 - chosen_multisig.len() as i64).unsigned_abs() as usize;

    let chosen_queued: Vec<Transaction> = state.queued.list(true, remaining).into_iter().collect();

    let mut selection = chosen_multisig;
    selection.extend(chosen_queued);

    apply_unconfirmed_list(state, accounts, logic, bus, selection).await
}

/// `apply_unconfirmed_list`: re-verify, then mutate in-memory unconfirmed
/// account state and promote on success. Never fails overall;
/// per-transaction failures are logged and the transaction is dropped.
pub async fn apply_unconfirmed_list(
    state: &mut PoolState,
    accounts: &dyn Accounts,
    logic: &dyn TransactionLogic,
    bus: &EventBus,
    transactions: Vec<Transaction>,
) -> Vec<String> {
    let mut applied = Vec::new();

    for mut tx in transactions {
        let id = tx.id.clone();
        let sender = match process_verify_transaction(&mut tx, false, accounts, logic, bus).await {
            Ok(sender) => sender,
            Err(err) => {
                tracing::warn!(tx_id = %id, error = %err, "re-verification failed while filling block");
                state.remove_unconfirmed_transaction(&id);
                continue;
            }
        };

        match logic.apply_unconfirmed(&tx, &sender).await {
            Ok(()) => {
                state.add_unconfirmed_transaction(tx);
                applied.push(id);
            }
            Err(err) => {
                tracing::warn!(tx_id = %id, error = %err, "apply_unconfirmed failed while filling block");
                state.remove_unconfirmed_transaction(&id);
            }
        }
    }

    applied
}

#[cfg(test)]
#[path = "tests/fill.rs"]
mod tests;
