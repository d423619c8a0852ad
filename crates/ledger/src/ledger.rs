//! Ledger state machine and its operations.

use crate::snapshot::LedgerSnapshot;
use chrono::Utc;
use ferrochain_consensus::{ConsensusError, Engine};
use ferrochain_core::transaction::canonical_timestamp;
use ferrochain_core::{Address, Block, Hash, RecordedTransaction, Tx, TxStatus};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use tracing::info;

/// Errors reported by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("chain not initialised")]
    NotInitialised,

    #[error("amount must be positive")]
    ZeroAmount,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("invalid nonce")]
    InvalidNonce,

    #[error("block {0} not found")]
    BlockNotFound(u64),

    /// Sealing failed; the submission is aborted and state is untouched.
    #[error("sealing failed: {0}")]
    Consensus(#[from] ConsensusError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// The state behind the ledger's lock.
struct LedgerState {
    blocks: Vec<Block>,
    balances: HashMap<Address, u64>,
    transactions: Vec<RecordedTransaction>,
    nonces: HashMap<Address, u64>,
}

/// The simulated ledger.
///
/// Owns its blocks, balances, nonces, and transaction log exclusively for
/// its lifetime. Readers share the lock; `submit_tx` and `credit` take it
/// exclusively. The write lock is held across sealing, trading throughput
/// for a simple serializability argument.
pub struct Ledger {
    engine: Engine,
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// A fresh ledger with only a genesis block.
    pub fn new(engine: Engine) -> Self {
        Self::restore(engine, LedgerSnapshot::default())
    }

    /// Rebuild a ledger from a snapshot. A snapshot without blocks gets a
    /// genesis block at height 0 with an empty parent hash.
    pub fn restore(engine: Engine, snapshot: LedgerSnapshot) -> Self {
        let blocks = if snapshot.blocks.is_empty() {
            vec![Block::genesis()]
        } else {
            snapshot.blocks
        };

        Self {
            engine,
            state: RwLock::new(LedgerState {
                blocks,
                balances: snapshot.balances,
                transactions: snapshot.transactions,
                nonces: snapshot.nonces,
            }),
        }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Height of the newest block.
    pub fn height(&self) -> u64 {
        let state = self.state.read().expect("ledger lock poisoned");
        state.blocks.last().map(|b| b.height).unwrap_or(0)
    }

    pub fn get_block(&self, height: u64) -> Result<Block> {
        let state = self.state.read().expect("ledger lock poisoned");

        if height >= state.blocks.len() as u64 {
            return Err(LedgerError::BlockNotFound(height));
        }

        Ok(state.blocks[height as usize].clone())
    }

    /// The most recent `limit` blocks in ascending height order. A limit of
    /// 0, or one past the total, returns everything.
    pub fn list_blocks(&self, limit: u64) -> Vec<Block> {
        let state = self.state.read().expect("ledger lock poisoned");
        tail(&state.blocks, limit)
    }

    /// The most recent `limit` transactions in ascending time order. Same
    /// limit semantics as [`list_blocks`](Self::list_blocks).
    pub fn list_transactions(&self, limit: u64) -> Vec<RecordedTransaction> {
        let state = self.state.read().expect("ledger lock poisoned");
        tail(&state.transactions, limit)
    }

    pub fn get_balance(&self, address: &Address) -> u64 {
        let state = self.state.read().expect("ledger lock poisoned");
        state.balances.get(address).copied().unwrap_or(0)
    }

    pub fn current_nonce(&self, address: &Address) -> u64 {
        let state = self.state.read().expect("ledger lock poisoned");
        state.nonces.get(address).copied().unwrap_or(0)
    }

    /// Look up a recorded transaction by its content hash.
    pub fn find_transaction(&self, hash: &Hash) -> Option<RecordedTransaction> {
        let state = self.state.read().expect("ledger lock poisoned");
        state
            .transactions
            .iter()
            .rev()
            .find(|tx| &tx.hash == hash)
            .cloned()
    }

    /// Unconditional balance increase for test/demo funding. A zero amount
    /// is a no-op.
    pub fn credit(&self, address: &Address, amount: u64) {
        if amount == 0 {
            return;
        }

        let mut state = self.state.write().expect("ledger lock poisoned");
        let balance = state.balances.entry(address.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
        info!(address = %address, amount, "credited account");
    }

    /// Apply a transaction: validate, seal a new block, and append it.
    ///
    /// Preconditions are checked in order (initialised chain, positive
    /// amount, sufficient balance, exact nonce) and the first failure is
    /// returned. Balances and nonces are mutated only after the consensus
    /// engine sealed the block, so a sealing failure leaves the ledger
    /// exactly as it was.
    pub fn submit_tx(&self, tx: &Tx) -> Result<RecordedTransaction> {
        let mut state = self.state.write().expect("ledger lock poisoned");

        let previous = state.blocks.last().ok_or(LedgerError::NotInitialised)?;

        if tx.amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let total_debit = tx.total_debit().ok_or(LedgerError::InsufficientBalance)?;
        let balance = state.balances.get(&tx.from).copied().unwrap_or(0);

        if balance < total_debit {
            return Err(LedgerError::InsufficientBalance);
        }

        let nonce = state.nonces.get(&tx.from).copied().unwrap_or(0);

        if tx.nonce != nonce {
            return Err(LedgerError::InvalidNonce);
        }

        let timestamp = Utc::now();
        let tx_hash = tx.content_hash(&timestamp);
        let ts_bytes = canonical_timestamp(&timestamp).into_bytes();

        let mut seed =
            Vec::with_capacity(previous.hash.as_bytes().len() + tx_hash.as_bytes().len() + ts_bytes.len());
        seed.extend_from_slice(previous.hash.as_bytes());
        seed.extend_from_slice(tx_hash.as_bytes());
        seed.extend_from_slice(&ts_bytes);

        let unsealed = Block::unsealed(previous, Hash::from_bytes(seed), timestamp);
        let mut sealed = self.engine.seal(unsealed)?;

        let recorded = RecordedTransaction {
            hash: tx_hash,
            from: tx.from.clone(),
            to: tx.to.clone(),
            amount: tx.amount,
            fee: tx.fee,
            nonce,
            block_hash: sealed.hash.clone(),
            block_height: sealed.height,
            timestamp,
            status: TxStatus::Mined,
        };
        sealed.transactions = vec![recorded.clone()];

        // Debit amount + fee from the sender; the fee is burned.
        state.balances.insert(tx.from.clone(), balance - total_debit);
        *state.balances.entry(tx.to.clone()).or_insert(0) += tx.amount;
        state.nonces.insert(tx.from.clone(), nonce + 1);
        state.blocks.push(sealed);
        state.transactions.push(recorded.clone());

        info!(
            height = recorded.block_height,
            tx = %recorded.hash,
            engine = self.engine_name(),
            "sealed block"
        );

        Ok(recorded)
    }

    /// Clone the full state for persistence.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.state.read().expect("ledger lock poisoned");
        LedgerSnapshot {
            blocks: state.blocks.clone(),
            balances: state.balances.clone(),
            transactions: state.transactions.clone(),
            nonces: state.nonces.clone(),
        }
    }
}

/// The last `limit` entries, in original order.
fn tail<T: Clone>(entries: &[T], limit: u64) -> Vec<T> {
    let total = entries.len() as u64;
    let limit = if limit == 0 || limit > total { total } else { limit };
    let start = (total - limit) as usize;
    entries[start..].to_vec()
}
