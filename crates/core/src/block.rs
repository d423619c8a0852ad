//! Block structure for the simulated chain.

use crate::hash::Hash;
use crate::transaction::RecordedTransaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A block in the single linear chain. Append-only; no forks, no
/// reorganization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Consensus-produced digest. Before sealing this slot holds the seed
    /// material derived from the parent hash and the transaction hash.
    pub hash: Hash,
    /// Strictly increasing, 0 for genesis.
    pub height: u64,
    pub prev_hash: Hash,
    pub timestamp: DateTime<Utc>,
    pub transactions: Vec<RecordedTransaction>,
}

impl Block {
    /// The genesis block: height 0, literal `genesis` hash, empty parent.
    pub fn genesis() -> Self {
        Self {
            hash: Hash::from_bytes(b"genesis".to_vec()),
            height: 0,
            prev_hash: Hash::empty(),
            timestamp: Utc::now(),
            transactions: Vec::new(),
        }
    }

    /// An unsealed successor of `parent` carrying `seed` in the hash slot.
    pub fn unsealed(parent: &Block, seed: Hash, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: seed,
            height: parent.height + 1,
            prev_hash: parent.hash.clone(),
            timestamp,
            transactions: Vec::new(),
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.prev_hash.is_empty()
    }
}
