//! The uniform chain adapter capability set.

use ferrochain_core::{FeeHint, KeyError, KeyMaterial, SignedTx, Tx, TxStatus};
use ferrochain_ledger::LedgerError;
use thiserror::Error;

/// Errors reported across the adapter boundary.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid {chain} address")]
    InvalidAddress { chain: &'static str },

    #[error("unknown chain: {0}")]
    UnknownChain(String),

    #[error("malformed transaction payload: {0}")]
    MalformedPayload(String),

    #[error("transaction {0} not found")]
    TxNotFound(String),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, AdapterError>;

/// One backend chain's operations behind a uniform interface.
///
/// Addresses, keys, and transaction identifiers cross this boundary as
/// strings so that backends with different native formats fit the same
/// shape.
pub trait ChainAdapter: Send + Sync {
    /// The network identifier this adapter serves.
    fn network(&self) -> &'static str;

    /// Derive a keypair from `seed` (a fresh random seed when empty).
    fn new_key(&self, seed: &[u8]) -> Result<KeyMaterial>;

    /// Validate and normalize an address string.
    fn parse_address(&self, address: &str) -> Result<String>;

    fn balance(&self, address: &str) -> Result<u64>;

    /// Assemble an unsigned transaction: fills in the sender's current
    /// nonce and a fee. Does not mutate chain state.
    fn build_tx(&self, from: &str, to: &str, amount: u64, fee_hint: FeeHint) -> Result<Tx>;

    /// Produce an opaque raw encoding and a stable transaction identifier.
    fn sign_tx(&self, private_key: &str, tx: &Tx) -> Result<SignedTx>;

    /// Decode the raw payload and submit it; returns the transaction id.
    /// Decode failures and chain rejections propagate with no state change.
    fn broadcast(&self, signed: &SignedTx) -> Result<String>;

    fn tx_status(&self, id: &str) -> Result<TxStatus>;
}

impl std::fmt::Debug for dyn ChainAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainAdapter")
            .field("network", &self.network())
            .finish()
    }
}
