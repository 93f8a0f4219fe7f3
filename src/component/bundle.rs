//! Periodic drain of the `bundled` queue into `queued`/`multisignature`.

use crate::bus::EventBus;
use crate::collaborators::{Accounts, TransactionLogic};
use crate::config::Config;

use super::admission::queue_transaction;
use super::verify::process_verify_transaction;
use super::PoolState;

/// One bundle-loop tick. Never fails: every per-transaction error is
/// logged and swallowed so a single bad transaction cannot abort the tick.
pub async fn tick(
    state: &mut PoolState,
    config: &Config,
    accounts: &dyn Accounts,
    logic: &dyn TransactionLogic,
    bus: &EventBus,
) {
    let snapshot = state.bundled.list(true, config.release_limit);

    for mut tx in snapshot {
        let id = tx.id.clone();
        if state.bundled.remove(&id).is_none() {
            // Already drained by a concurrent tick between snapshot and here.
            continue;
        }
        tx.bundled = false;

        match process_verify_transaction(&mut tx, true, accounts, logic, bus).await {
            Ok(_) => {
                if let Err(err) = queue_transaction(state, config, tx) {
                    tracing::warn!(tx_id = %id, queue = "bundle", error = %err, "failed to queue bundled transaction after verify");
                }
            }
            Err(err) => {
                // The bundle loop performs no defensive unconfirmed-removal
                // here: a transaction that fails verification during
                // bundling was never promoted to unconfirmed in the first
                // place, so there is nothing to remove.
                tracing::warn!(tx_id = %id, queue = "bundle", error = %err, "bundled transaction failed verification");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/bundle.rs"]
mod tests;
