//! sled-backed snapshot store.
//!
//! The snapshot is split over four keys, each a bincode blob, mirroring the
//! components of the ledger state.

use crate::{Result, SnapshotStore};
use ferrochain_ledger::LedgerSnapshot;
use sled::Db;
use std::path::Path;

const BLOCKS_KEY: &[u8] = b"blocks";
const BALANCES_KEY: &[u8] = b"balances";
const TRANSACTIONS_KEY: &[u8] = b"transactions";
const NONCES_KEY: &[u8] = b"nonces";

/// Snapshot persistence on top of a sled key-value store.
pub struct SledStore {
    db: Db,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Open an in-memory database (for testing).
    pub fn open_temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    fn put<V: serde::Serialize>(&self, key: &[u8], value: &V) -> Result<()> {
        let encoded = bincode::serialize(value)?;
        self.db.insert(key, encoded)?;
        Ok(())
    }

    fn get<V: serde::de::DeserializeOwned + Default>(&self, key: &[u8]) -> Result<V> {
        match self.db.get(key)? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Ok(V::default()),
        }
    }
}

impl SnapshotStore for SledStore {
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        self.put(BLOCKS_KEY, &snapshot.blocks)?;
        self.put(BALANCES_KEY, &snapshot.balances)?;
        self.put(TRANSACTIONS_KEY, &snapshot.transactions)?;
        self.put(NONCES_KEY, &snapshot.nonces)?;
        self.db.flush()?;
        Ok(())
    }

    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        if self.db.get(BLOCKS_KEY)?.is_none() {
            return Ok(None);
        }

        Ok(Some(LedgerSnapshot {
            blocks: self.get(BLOCKS_KEY)?,
            balances: self.get(BALANCES_KEY)?,
            transactions: self.get(TRANSACTIONS_KEY)?,
            nonces: self.get(NONCES_KEY)?,
        }))
    }
}
