//! The five-stage admission pipeline: sender/requester lookup,
//! collaborator preprocessing, normalization, verification, and — on
//! success — a single event-bus publish.

use crate::bus::{EventBus, MempoolEvent};
use crate::collaborators::{Account, Accounts, TransactionLogic};
use crate::error::{MempoolError, MempoolResult};
use crate::transaction::Transaction;

/// Runs every stage in order, short-circuiting on the first failure.
/// Returns the sender account snapshot on success so callers (fill-block,
/// in particular) can reuse it without a second lookup.
pub async fn process_verify_transaction(
    tx: &mut Transaction,
    broadcast: bool,
    accounts: &dyn Accounts,
    logic: &dyn TransactionLogic,
    bus: &EventBus,
) -> MempoolResult<Account> {
    let sender = accounts
        .set_account_and_get(&tx.sender_public_key)
        .await
        .ok_or_else(|| MempoolError::SenderMissing(tx.id.clone()))?;

    let requester: Option<Account> = if sender.is_multisignature() && tx.requester_public_key.is_some() {
        let requester_key = tx.requester_public_key.as_ref().unwrap();
        let requester = accounts
            .get_account(requester_key)
            .await
            .ok_or_else(|| MempoolError::RequesterMissing(tx.id.clone()))?;
        if tx.signatures.is_none() {
            tx.signatures = Some(Vec::new());
        }
        Some(requester)
    } else {
        None
    };

    logic
        .process(tx, &sender, requester.as_ref())
        .await
        .map_err(|reason| MempoolError::VerifyFailed { id: tx.id.clone(), reason })?;

    logic
        .object_normalize(tx)
        .map_err(|reason| MempoolError::VerifyFailed { id: tx.id.clone(), reason })?;

    logic
        .verify(tx, &sender)
        .await
        .map_err(|reason| MempoolError::VerifyFailed { id: tx.id.clone(), reason })?;

    bus.publish(MempoolEvent::UnconfirmedTransaction { tx: tx.clone(), broadcast });
    tracing::debug!(tx_id = %tx.id, broadcast, "transaction verified");

    Ok(sender)
}

#[cfg(test)]
#[path = "tests/verify.rs"]
mod tests;
