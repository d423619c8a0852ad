//! Proof-of-stake sealing: stake-weighted and deliberately trivial.
//!
//! Provides no Sybil resistance; it exists to exercise the engine seam.

use crate::{ConsensusError, Result};
use ferrochain_core::{hash_concat, Block};
use std::sync::Arc;

/// Oracle for the total stake currently bonded.
pub trait TotalStake: Send + Sync {
    fn total_stake(&self) -> u64;
}

/// A constant stake value, for demos and tests.
pub struct FixedStake(pub u64);

impl TotalStake for FixedStake {
    fn total_stake(&self) -> u64 {
        self.0
    }
}

/// Proof-of-stake engine.
pub struct ProofOfStake {
    stake: Arc<dyn TotalStake>,
}

impl ProofOfStake {
    pub fn new(stake: Arc<dyn TotalStake>) -> Self {
        Self { stake }
    }

    /// Derive the block hash deterministically from the seed and the total
    /// stake. Zero total stake is a sealing failure.
    pub fn seal(&self, mut block: Block) -> Result<Block> {
        let total_stake = self.stake.total_stake();

        if total_stake == 0 {
            return Err(ConsensusError::NoStake);
        }

        block.hash = hash_concat(&[block.hash.as_bytes(), &[(total_stake % 255) as u8]]);
        Ok(block)
    }

    pub fn validate(&self, block: &Block) -> Result<()> {
        if block.hash.is_empty() {
            return Err(ConsensusError::InvalidProofOfStake);
        }

        Ok(())
    }

    pub fn name(&self) -> &'static str {
        "proof_of_stake"
    }
}
