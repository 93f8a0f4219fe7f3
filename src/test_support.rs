//! Mock collaborators shared by the component test suites. Not compiled
//! into non-test builds.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::collaborators::{Account, Accounts, Loader, TransactionLogic};
use crate::transaction::Transaction;

/// An in-memory account book. Accounts not pre-registered are created
/// on-the-fly by `set_account_and_get` as a plain (non-multisig) account,
/// mirroring "fetch-or-create" semantics.
#[derive(Default)]
pub struct MockAccounts {
    accounts: Mutex<HashMap<Vec<u8>, Account>>,
}

impl MockAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multisig(self, public_key: Vec<u8>, members: Vec<Vec<u8>>) -> Self {
        self.accounts.lock().unwrap().insert(
            public_key.clone(),
            Account { public_key, multisignature_members: members },
        );
        self
    }
}

#[async_trait]
impl Accounts for MockAccounts {
    async fn set_account_and_get(&self, public_key: &[u8]) -> Option<Account> {
        let mut accounts = self.accounts.lock().unwrap();
        Some(
            accounts
                .entry(public_key.to_vec())
                .or_insert_with(|| Account { public_key: public_key.to_vec(), multisignature_members: vec![] })
                .clone(),
        )
    }

    async fn get_account(&self, public_key: &[u8]) -> Option<Account> {
        self.accounts.lock().unwrap().get(public_key).cloned()
    }
}

/// `NoAccount` answers every lookup with `None`, for exercising
/// `SenderMissing`.
pub struct NoAccounts;

#[async_trait]
impl Accounts for NoAccounts {
    async fn set_account_and_get(&self, _public_key: &[u8]) -> Option<Account> {
        None
    }

    async fn get_account(&self, _public_key: &[u8]) -> Option<Account> {
        None
    }
}

/// Accepts everything unconditionally.
#[derive(Default)]
pub struct AcceptingLogic;

#[async_trait]
impl TransactionLogic for AcceptingLogic {
    async fn process(&self, _tx: &Transaction, _sender: &Account, _requester: Option<&Account>) -> Result<(), String> {
        Ok(())
    }

    fn object_normalize(&self, _tx: &Transaction) -> Result<(), String> {
        Ok(())
    }

    async fn verify(&self, _tx: &Transaction, _sender: &Account) -> Result<(), String> {
        Ok(())
    }

    async fn apply_unconfirmed(&self, _tx: &Transaction, _sender: &Account) -> Result<(), String> {
        Ok(())
    }

    async fn undo_unconfirmed(&self, _tx: &Transaction) -> Result<(), String> {
        Ok(())
    }
}

/// Rejects a fixed set of transaction ids at the `verify` stage; accepts
/// everything else.
#[derive(Default)]
pub struct RejectingLogic {
    pub reject_ids: Vec<String>,
}

impl RejectingLogic {
    pub fn rejecting(ids: impl IntoIterator<Item = &'static str>) -> Self {
        Self { reject_ids: ids.into_iter().map(String::from).collect() }
    }
}

#[async_trait]
impl TransactionLogic for RejectingLogic {
    async fn process(&self, _tx: &Transaction, _sender: &Account, _requester: Option<&Account>) -> Result<(), String> {
        Ok(())
    }

    fn object_normalize(&self, _tx: &Transaction) -> Result<(), String> {
        Ok(())
    }

    async fn verify(&self, tx: &Transaction, _sender: &Account) -> Result<(), String> {
        if self.reject_ids.contains(&tx.id) {
            Err("rejected by policy".to_string())
        } else {
            Ok(())
        }
    }

    async fn apply_unconfirmed(&self, _tx: &Transaction, _sender: &Account) -> Result<(), String> {
        Ok(())
    }

    async fn undo_unconfirmed(&self, tx: &Transaction) -> Result<(), String> {
        if self.reject_ids.contains(&tx.id) {
            Err("undo rejected by policy".to_string())
        } else {
            Ok(())
        }
    }
}

pub struct FixedLoader(pub bool);

#[async_trait]
impl Loader for FixedLoader {
    async fn syncing(&self) -> bool {
        self.0
    }
}
