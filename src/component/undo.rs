//! Chain-rewind handling: walk `unconfirmed`, undo, and re-queue.

use crate::collaborators::TransactionLogic;

use super::PoolState;

/// `undo_unconfirmed_list`: forward-order walk of `unconfirmed`. Every
/// entry is unconditionally removed from `unconfirmed`; only entries whose
/// undo succeeded are re-admitted to `queued`. Returns every id considered,
/// regardless of outcome.
pub async fn undo_unconfirmed_list(state: &mut PoolState, logic: &dyn TransactionLogic) -> Vec<String> {
    let snapshot = state.unconfirmed.list(false, 0);
    let mut considered = Vec::with_capacity(snapshot.len());

    for tx in snapshot {
        let id = tx.id.clone();
        let undo_result = logic.undo_unconfirmed(&tx).await;
        state.unconfirmed.remove(&id);

        match undo_result {
            Ok(()) => state.queued.add(tx),
            Err(err) => tracing::warn!(tx_id = %id, error = %err, "undo_unconfirmed failed, dropping transaction"),
        }

        considered.push(id);
    }

    considered
}

#[cfg(test)]
#[path = "tests/undo.rs"]
mod tests;
