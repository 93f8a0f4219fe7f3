//! Error kinds the mempool produces or surfaces.
//!
//! One flat enum, derived with `thiserror` rather than hand-written
//! `Display`/`Error` impls.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MempoolError {
    /// `tx.id` already present in one of the four queues.
    #[error("transaction {0} is already in the pool")]
    AlreadyInPool(String),

    /// The target queue selected by classification is at `max_txs_per_queue`.
    #[error("queue {queue} is full ({limit} transactions)")]
    PoolFull { queue: &'static str, limit: usize },

    /// The accounts collaborator found no account for the sender's public key.
    #[error("no account found for sender of transaction {0}")]
    SenderMissing(String),

    /// The transaction carries a `requester_public_key` but the accounts
    /// collaborator found no account for it.
    #[error("no account found for requester of transaction {0}")]
    RequesterMissing(String),

    /// `process` / `object_normalize` / `verify` rejected the transaction.
    /// Carries the collaborator's own message.
    #[error("transaction {id} failed verification: {reason}")]
    VerifyFailed { id: String, reason: String },

    /// A defensively-rejected null/absent input.
    #[error("missing transaction")]
    MissingTransaction,

    /// The pool was constructed with a structurally invalid configuration
    /// (e.g. a zero-capacity queue, or a merged-listing cap smaller than
    /// the block-fill ceiling).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type MempoolResult<T> = Result<T, MempoolError>;
