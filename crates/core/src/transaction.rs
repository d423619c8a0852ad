//! Transaction types: pending, signed, and recorded.

use crate::address::Address;
use crate::hash::{hash, Hash};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pending transaction, as produced by `build_tx` and consumed by
/// `sign_tx`/`broadcast`. Immutable once signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tx {
    pub from: Address,
    pub to: Address,
    pub amount: u64,
    pub fee: u64,
    /// Sender's replay-protection counter. Unrelated to any proof-of-work
    /// search nonce.
    pub nonce: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

impl Tx {
    /// Deterministic content hash over the canonical byte encoding of
    /// `{from, to, amount, fee, nonce, timestamp}`.
    ///
    /// Integers are big-endian; the timestamp is its RFC 3339 rendering
    /// with nanosecond precision.
    pub fn content_hash(&self, timestamp: &DateTime<Utc>) -> Hash {
        let ts = canonical_timestamp(timestamp);
        let mut input = Vec::with_capacity(self.from.as_bytes().len() + self.to.as_bytes().len() + 24 + ts.len());
        input.extend_from_slice(self.from.as_bytes());
        input.extend_from_slice(self.to.as_bytes());
        input.extend_from_slice(&self.amount.to_be_bytes());
        input.extend_from_slice(&self.fee.to_be_bytes());
        input.extend_from_slice(&self.nonce.to_be_bytes());
        input.extend_from_slice(ts.as_bytes());
        hash(&input)
    }

    /// Total debit this transaction asks of the sender, or `None` on overflow.
    pub fn total_debit(&self) -> Option<u64> {
        self.amount.checked_add(self.fee)
    }
}

/// Canonical timestamp rendering used in hash inputs.
pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// A signed transaction: an opaque raw encoding plus a content-derived
/// identifier. Created by `sign_tx`; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTx {
    pub raw_hex: String,
    pub tx_id: String,
}

/// Fee hint supplied by callers when building a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeHint {
    pub max_fee_per_gas: u64,
    pub max_priority_fee: u64,
}

/// Lifecycle status of a recorded transaction. Transitions monotonically
/// from `Pending` to `Mined` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Mined,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Pending => write!(f, "pending"),
            TxStatus::Mined => write!(f, "mined"),
        }
    }
}

/// A transaction plus its post-application metadata, as stored in the
/// ledger's append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedTransaction {
    pub hash: Hash,
    pub from: Address,
    pub to: Address,
    pub amount: u64,
    pub fee: u64,
    pub nonce: u64,
    pub block_hash: Hash,
    pub block_height: u64,
    pub timestamp: DateTime<Utc>,
    pub status: TxStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Tx {
        Tx {
            from: Address::from_bytes(vec![1u8; 20]),
            to: Address::from_bytes(vec![2u8; 20]),
            amount: 30,
            fee: 1,
            nonce: 0,
            data: Vec::new(),
        }
    }

    #[test]
    fn test_content_hash_deterministic() {
        let tx = sample_tx();
        let ts = Utc::now();
        assert_eq!(tx.content_hash(&ts), tx.content_hash(&ts));
    }

    #[test]
    fn test_content_hash_depends_on_fields() {
        let ts = Utc::now();
        let tx = sample_tx();

        let mut other = tx.clone();
        other.amount = 31;
        assert_ne!(tx.content_hash(&ts), other.content_hash(&ts));

        let mut other = tx.clone();
        other.nonce = 1;
        assert_ne!(tx.content_hash(&ts), other.content_hash(&ts));
    }

    #[test]
    fn test_content_hash_depends_on_timestamp() {
        let tx = sample_tx();
        let ts1 = Utc::now();
        let ts2 = ts1 + chrono::Duration::nanoseconds(1);
        assert_ne!(tx.content_hash(&ts1), tx.content_hash(&ts2));
    }

    #[test]
    fn test_total_debit_overflow() {
        let mut tx = sample_tx();
        tx.amount = u64::MAX;
        tx.fee = 1;
        assert_eq!(tx.total_debit(), None);

        tx.fee = 0;
        assert_eq!(tx.total_debit(), Some(u64::MAX));
    }

    #[test]
    fn test_tx_json_field_names() {
        let tx = sample_tx();
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("from").is_some());
        assert!(json.get("to").is_some());
        assert!(json.get("amount").is_some());
        assert!(json.get("fee").is_some());
        assert!(json.get("nonce").is_some());
        // empty data is omitted
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_tx_json_roundtrip() {
        let tx = sample_tx();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Tx = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TxStatus::Mined).unwrap(), "\"mined\"");
        assert_eq!(
            serde_json::to_string(&TxStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_fee_hint_defaults() {
        let hint: FeeHint = serde_json::from_str("{}").unwrap();
        assert_eq!(hint.max_fee_per_gas, 0);
        assert_eq!(hint.max_priority_fee, 0);
    }
}
