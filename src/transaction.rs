//! The transaction shape the mempool actually looks at. Everything else
//! about a transaction (its payload, its signature bytes) is opaque and
//! lives behind `asset`/`signatures` as plain bytes the mempool never
//! interprets.

use serde::{Deserialize, Serialize};

/// The distinguished transaction type tag that marks a multisignature
/// registration.
pub const TYPE_MULTI: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MultisignatureAsset {
    /// Hours the transaction may sit unconfirmed before it expires.
    pub lifetime: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransactionAsset {
    pub multisignature: Option<MultisignatureAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind_tag: u32,
    pub sender_public_key: Vec<u8>,
    pub requester_public_key: Option<Vec<u8>>,
    /// Presence of this field (even `Some(vec![])`) marks the transaction as
    /// multisignature-bearing, independent of `kind_tag`.
    pub signatures: Option<Vec<u8>>,
    #[serde(default)]
    pub asset: TransactionAsset,
    /// Set by the caller on ingress; cleared when the transaction leaves the
    /// bundled queue.
    pub bundled: bool,
    /// Stamped by the mempool at admission time (`clock::unix_time_as_secs`).
    pub received_at: u64,
    /// Set by external collaborators once a multisignature transaction has
    /// collected enough signatures.
    pub ready: bool,
}

impl Transaction {
    pub fn new(id: impl Into<String>, sender_public_key: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            kind_tag: 0,
            sender_public_key,
            requester_public_key: None,
            signatures: None,
            asset: TransactionAsset::default(),
            bundled: false,
            received_at: 0,
            ready: false,
        }
    }
}

/// The `MULTI | has-signatures | plain` distinction that drives routing,
/// TTL and classification, computed once per transaction instead of
/// repeating the `type == MULTI || signatures.is_some()` predicate inline
/// at every call site that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Multisignature,
    SignatureBearing,
    Plain,
}

impl TransactionKind {
    pub fn classify(tx: &Transaction) -> Self {
        if tx.kind_tag == TYPE_MULTI {
            TransactionKind::Multisignature
        } else if tx.signatures.is_some() {
            TransactionKind::SignatureBearing
        } else {
            TransactionKind::Plain
        }
    }

    pub fn is_multisignature(self) -> bool {
        matches!(self, TransactionKind::Multisignature | TransactionKind::SignatureBearing)
    }
}
