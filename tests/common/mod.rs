//! Minimal collaborator stand-ins shared by the scenario tests. Kept
//! separate from the crate's own unit-test mocks since integration tests
//! link against the library as an external crate and cannot see its
//! `#[cfg(test)]`-only items.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chain_mempool::collaborators::{Account, Accounts, Loader, TransactionLogic};
use chain_mempool::transaction::Transaction;

#[derive(Default)]
pub struct InMemoryAccounts {
    accounts: Mutex<HashMap<Vec<u8>, Account>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Accounts for InMemoryAccounts {
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

#[derive(Default)]
pub struct PermissiveLogic;

#[async_trait]
impl TransactionLogic for PermissiveLogic {
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

    async fn undo_unconfirmed(&self, tx: &Transaction) -> Result<(), String> {
        if tx.id == "T2" {
            Err("undo rejected".to_string())
        } else {
            Ok(())
        }
    }
}

pub struct NotSyncing;

#[async_trait]
impl Loader for NotSyncing {
    async fn syncing(&self) -> bool {
        false
    }
}

pub fn plain(id: &str) -> Transaction {
    Transaction::new(id, vec![1, 2, 3])
}
