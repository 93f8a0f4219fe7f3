//! The node's transaction mempool: admission, verification, bundling,
//! expiry and block-fill selection, wired together behind a single
//! `tokio::sync::Mutex`-guarded pool state.
//!
//! `Mempool` is constructed with its collaborators (`Accounts`,
//! `TransactionLogic`, `Loader`, `EventBus`) rather than reaching for
//! module-level singletons, so one process can in principle host more than
//! one pool (e.g. under test).

pub mod bus;
pub mod clock;
pub mod collaborators;
pub mod component;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod transaction;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};

use bus::{EventBus, MempoolEvent};
use collaborators::{Accounts, Loader, TransactionLogic};
use component::PoolState;
use config::Config;
use error::MempoolResult;
use transaction::Transaction;

pub struct Mempool {
    config: Config,
    accounts: Arc<dyn Accounts>,
    transaction_logic: Arc<dyn TransactionLogic>,
    loader: Arc<dyn Loader>,
    bus: EventBus,
    state: Mutex<PoolState>,
}

impl std::fmt::Debug for Mempool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mempool").finish_non_exhaustive()
    }
}

impl Mempool {
    pub fn new(
        config: Config,
        accounts: Arc<dyn Accounts>,
        transaction_logic: Arc<dyn TransactionLogic>,
        loader: Arc<dyn Loader>,
        bus: EventBus,
    ) -> MempoolResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            accounts,
            transaction_logic,
            loader,
            bus,
            state: Mutex::new(PoolState::new()),
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MempoolEvent> {
        self.bus.subscribe()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // --- Inspection ---------------------------------------------------

    pub async fn transaction_in_pool(&self, id: &str) -> bool {
        self.state.lock().await.transaction_in_pool(id)
    }

    pub async fn get_unconfirmed_transaction(&self, id: &str) -> Option<Transaction> {
        self.state.lock().await.unconfirmed.get(id).cloned()
    }

    pub async fn get_queued_transaction(&self, id: &str) -> Option<Transaction> {
        self.state.lock().await.queued.get(id).cloned()
    }

    pub async fn get_multisignature_transaction(&self, id: &str) -> Option<Transaction> {
        self.state.lock().await.multisignature.get(id).cloned()
    }

    pub async fn get_bundled_transaction(&self, id: &str) -> Option<Transaction> {
        self.state.lock().await.bundled.get(id).cloned()
    }

    pub async fn get_unconfirmed_transaction_list(&self, reverse: bool, limit: usize) -> Vec<Transaction> {
        self.state.lock().await.unconfirmed.list(reverse, limit)
    }

    pub async fn get_queued_transaction_list(&self, reverse: bool, limit: usize) -> Vec<Transaction> {
        self.state.lock().await.queued.list(reverse, limit)
    }

    pub async fn get_bundled_transaction_list(&self, reverse: bool, limit: usize) -> Vec<Transaction> {
        self.state.lock().await.bundled.list(reverse, limit)
    }

    /// `ready = Some(true)` ignores the `limit` parameter and returns
    /// every ready entry. Any other `ready` value applies `limit`
    /// normally.
    pub async fn get_multisignature_transaction_list(
        &self,
        reverse: bool,
        limit: usize,
        ready: Option<bool>,
    ) -> Vec<Transaction> {
        let state = self.state.lock().await;
        match ready {
            Some(true) => state.multisignature.list(reverse, 0).into_iter().filter(|tx| tx.ready).collect(),
            Some(wanted) => state
                .multisignature
                .list(reverse, 0)
                .into_iter()
                .filter(|tx| tx.ready == wanted)
                .take(if limit == 0 { usize::MAX } else { limit })
                .collect(),
            None => state.multisignature.list(reverse, limit),
        }
    }

    /// `get_merged_transaction_list`: `unconfirmed ∥ multisignature ∥
    /// queued`, each of the first two capped at `max_txs_per_block`, the
    /// remainder spent on `queued`. `bundled` is never included.
    pub async fn get_merged_transaction_list(&self, reverse: bool, limit: usize) -> Vec<Transaction> {
        let effective_limit = if limit <= self.config.max_txs_per_block + 2 || limit > self.config.max_shared_txs {
            self.config.max_txs_per_block + 2
        } else {
            limit
        };

        let state = self.state.lock().await;
        let unconfirmed = state.unconfirmed.list(reverse, self.config.max_txs_per_block);
        let multisignature = state.multisignature.list(reverse, self.config.max_txs_per_block);

        let mut merged = unconfirmed;
        merged.extend(multisignature);

        let spent = merged.len();
        let queued_budget = effective_limit.saturating_sub(spent);
        let queued = state.queued.list(reverse, queued_budget);
        merged.extend(queued);

        if merged.len() > effective_limit {
            merged.truncate(effective_limit);
        }
        merged
    }

    // --- Counts ---------------------------------------------------------

    pub async fn count_unconfirmed(&self) -> usize {
        self.state.lock().await.unconfirmed.count()
    }

    pub async fn count_bundled(&self) -> usize {
        self.state.lock().await.bundled.count()
    }

    pub async fn count_queued(&self) -> usize {
        self.state.lock().await.queued.count()
    }

    pub async fn count_multisignature(&self) -> usize {
        self.state.lock().await.multisignature.count()
    }

    // --- Mutators ---------------------------------------------------------

    pub async fn add_unconfirmed_transaction(&self, tx: Transaction) {
        self.state.lock().await.add_unconfirmed_transaction(tx);
    }

    pub async fn remove_unconfirmed_transaction(&self, id: &str) {
        self.state.lock().await.remove_unconfirmed_transaction(id);
    }

    pub async fn add_queued_transaction(&self, tx: Transaction) {
        self.state.lock().await.queued.add(tx);
    }

    pub async fn remove_queued_transaction(&self, id: &str) {
        self.state.lock().await.queued.remove(id);
    }

    pub async fn add_multisignature_transaction(&self, tx: Transaction) {
        self.state.lock().await.multisignature.add(tx);
    }

    pub async fn remove_multisignature_transaction(&self, id: &str) {
        self.state.lock().await.multisignature.remove(id);
    }

    pub async fn add_bundled_transaction(&self, tx: Transaction) {
        self.state.lock().await.bundled.add(tx);
    }

    pub async fn remove_bundled_transaction(&self, id: &str) {
        self.state.lock().await.bundled.remove(id);
    }

    // --- Pipeline ---------------------------------------------------------

    /// `receive_transactions`: a batch ingress; per-transaction errors are
    /// logged and swallowed rather than aborting the batch.
    pub async fn receive_transactions(&self, transactions: Vec<Transaction>, broadcast: bool) {
        for tx in transactions {
            let id = tx.id.clone();
            if let Err(err) = self.process_unconfirmed_transaction(tx, broadcast).await {
                tracing::warn!(tx_id = %id, error = %err, "failed to admit transaction");
            }
        }
    }

    pub async fn process_unconfirmed_transaction(&self, tx: Transaction, broadcast: bool) -> MempoolResult<()> {
        let mut state = self.state.lock().await;
        component::admission::process_unconfirmed_transaction(
            &mut state,
            &self.config,
            self.accounts.as_ref(),
            self.transaction_logic.as_ref(),
            &self.bus,
            tx,
            broadcast,
        )
        .await
    }

    pub async fn queue_transaction(&self, tx: Transaction) -> MempoolResult<()> {
        let mut state = self.state.lock().await;
        component::admission::queue_transaction(&mut state, &self.config, tx)
    }

    /// Runs one bundle-loop tick on demand; the periodic job calls the
    /// same routine on a timer.
    pub async fn process_bundled(&self) {
        let mut state = self.state.lock().await;
        component::bundle::tick(
            &mut state,
            &self.config,
            self.accounts.as_ref(),
            self.transaction_logic.as_ref(),
            &self.bus,
        )
        .await;
    }

    // --- Block-producer hooks --------------------------------------------

    pub async fn fill_pool(&self) -> Vec<String> {
        let mut state = self.state.lock().await;
        component::fill::fill_pool(
            &mut state,
            &self.config,
            self.loader.as_ref(),
            self.accounts.as_ref(),
            self.transaction_logic.as_ref(),
            &self.bus,
        )
        .await
    }

    pub async fn undo_unconfirmed_list(&self) -> Vec<String> {
        let mut state = self.state.lock().await;
        component::undo::undo_unconfirmed_list(&mut state, self.transaction_logic.as_ref()).await
    }

    pub async fn expire_transactions(&self) -> Vec<String> {
        let mut state = self.state.lock().await;
        component::expiry::expire_transactions(&mut state, &self.config)
    }

    pub async fn reindex_queues(&self) {
        self.state.lock().await.reindex_queues();
    }

    /// Registers the bundle and expiry loops on the scheduler. Returns
    /// both job handles so the caller can shut them down.
    pub fn spawn_periodic_jobs(self: &Arc<Self>) -> (scheduler::JobHandle, scheduler::JobHandle) {
        let bundle_interval = Duration::from_secs(self.config.broadcast_interval);
        let expiry_interval = Duration::from_secs(self.config.expiry_interval);

        let bundle_pool = Arc::clone(self);
        let bundle_job = scheduler::spawn("next_bundle", bundle_interval, move || {
            let pool = Arc::clone(&bundle_pool);
            async move { pool.process_bundled().await }
        });

        let expiry_pool = Arc::clone(self);
        let expiry_job = scheduler::spawn("next_expiry", expiry_interval, move || {
            let pool = Arc::clone(&expiry_pool);
            async move {
                let expired = pool.expire_transactions().await;
                if !expired.is_empty() {
                    tracing::info!(count = expired.len(), "expiry tick removed stale transactions");
                }
            }
        });

        (bundle_job, expiry_job)
    }
}
