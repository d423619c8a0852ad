//! Snapshot persistence backends for the simulated ledger.
//!
//! The ledger hands a [`LedgerSnapshot`](ferrochain_ledger::LedgerSnapshot)
//! to a [`SnapshotStore`]; the store only ever holds serialized bytes.
//! Persistence is best-effort: a failed save is surfaced to the caller, and
//! the in-memory ledger keeps operating.

pub mod memory;
pub mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

use ferrochain_ledger::LedgerSnapshot;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Encoding(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Pluggable snapshot persistence.
pub trait SnapshotStore: Send + Sync {
    /// Persist a full-state snapshot, replacing any previous one.
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;

    /// Load the last persisted snapshot, or `None` if nothing was saved.
    fn load(&self) -> Result<Option<LedgerSnapshot>>;
}
