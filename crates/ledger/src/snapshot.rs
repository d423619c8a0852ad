//! Serializable full-state snapshot.
//!
//! The storage backend only ever holds a serialized snapshot, never the
//! ledger's live objects.

use ferrochain_core::{Address, Block, RecordedTransaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The ledger's full state: blocks, balances, transactions, and nonces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub blocks: Vec<Block>,
    pub balances: HashMap<Address, u64>,
    pub transactions: Vec<RecordedTransaction>,
    pub nonces: HashMap<Address, u64>,
}

impl LedgerSnapshot {
    /// A snapshot with no blocks; restoring it initializes a fresh genesis.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
