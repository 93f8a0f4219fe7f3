//! Abstract capabilities the mempool consumes from the rest of the node.
//! The mempool never constructs or inspects these implementations; it only
//! calls through the trait objects it was constructed with.

use async_trait::async_trait;

use crate::transaction::Transaction;

/// A snapshot of an account as the accounts collaborator understands it.
/// The mempool only needs to know whether the sender participates in a
/// multisignature group; everything else is opaque.
#[derive(Debug, Clone, Default)]
pub struct Account {
    pub public_key: Vec<u8>,
    /// Non-empty iff the account is a multisignature account.
    pub multisignature_members: Vec<Vec<u8>>,
}

impl Account {
    pub fn is_multisignature(&self) -> bool {
        !self.multisignature_members.is_empty()
    }
}

/// Account lookups backing the verify pipeline's sender/requester stages.
#[async_trait]
pub trait Accounts: Send + Sync {
    async fn set_account_and_get(&self, public_key: &[u8]) -> Option<Account>;
    async fn get_account(&self, public_key: &[u8]) -> Option<Account>;
}

/// Ecosystem-specific transaction preprocessing, canonicalization and
/// validation, plus the unconfirmed-ledger mutators used by fill-block and
/// undo.
#[async_trait]
pub trait TransactionLogic: Send + Sync {
    async fn process(
        &self,
        tx: &Transaction,
        sender: &Account,
        requester: Option<&Account>,
    ) -> Result<(), String>;

    fn object_normalize(&self, tx: &Transaction) -> Result<(), String>;

    async fn verify(&self, tx: &Transaction, sender: &Account) -> Result<(), String>;

    async fn apply_unconfirmed(&self, tx: &Transaction, sender: &Account) -> Result<(), String>;

    async fn undo_unconfirmed(&self, tx: &Transaction) -> Result<(), String>;
}

/// Whether the node is still catching up with the chain; blocks `fill_pool`
/// while true.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn syncing(&self) -> bool;
}
