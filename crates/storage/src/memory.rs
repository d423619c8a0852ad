//! In-memory snapshot store, for tests and ephemeral demo runs.

use crate::{Result, SnapshotStore};
use ferrochain_ledger::LedgerSnapshot;
use std::sync::Mutex;

/// Holds the serialized snapshot blob in memory.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let encoded = bincode::serialize(snapshot)?;
        *self.blob.lock().expect("store lock poisoned") = Some(encoded);
        Ok(())
    }

    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        let blob = self.blob.lock().expect("store lock poisoned");
        match blob.as_deref() {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }
}
