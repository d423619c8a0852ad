//! Pluggable block-sealing engines for ferrochain.
//!
//! An engine finalizes a block's hash (`seal`), checks a sealed block for
//! self-consistency (`validate`), and names itself. Two strategies are
//! provided:
//! - [`ProofOfWork`]: hash-based leading-zero-bit difficulty target
//! - [`ProofOfStake`]: stake-weighted and deliberately trivial
//!
//! The variant set is closed per deployment; [`Engine`] dispatches over it
//! without open-ended dynamic dispatch.

pub mod pos;
pub mod pow;

pub use pos::{FixedStake, ProofOfStake, TotalStake};
pub use pow::ProofOfWork;

use ferrochain_core::Block;
use thiserror::Error;

/// Errors that can occur while sealing or validating a block.
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// The proof-of-work search nonce wrapped before a valid hash was
    /// found. Practically unreachable at low difficulty, but handled.
    #[error("search nonce overflow")]
    NonceOverflow,

    #[error("no stake")]
    NoStake,

    #[error("invalid proof of work")]
    InvalidProofOfWork,

    #[error("invalid proof of stake")]
    InvalidProofOfStake,
}

pub type Result<T> = std::result::Result<T, ConsensusError>;

/// A consensus engine: one of the closed set of sealing strategies.
pub enum Engine {
    ProofOfWork(ProofOfWork),
    ProofOfStake(ProofOfStake),
}

impl Engine {
    pub fn proof_of_work(difficulty: u32) -> Self {
        Self::ProofOfWork(ProofOfWork::new(difficulty))
    }

    pub fn proof_of_stake(stake: std::sync::Arc<dyn TotalStake>) -> Self {
        Self::ProofOfStake(ProofOfStake::new(stake))
    }

    /// Finalize the block's hash. The input block carries its seed material
    /// in the hash slot; the sealed block carries the engine's digest.
    pub fn seal(&self, block: Block) -> Result<Block> {
        match self {
            Self::ProofOfWork(engine) => engine.seal(block),
            Self::ProofOfStake(engine) => engine.seal(block),
        }
    }

    /// Self-consistency check of a sealed block. This does not re-derive
    /// the hash from the original seed, so it cannot detect tampering of
    /// the seed data.
    pub fn validate(&self, block: &Block) -> Result<()> {
        match self {
            Self::ProofOfWork(engine) => engine.validate(block),
            Self::ProofOfStake(engine) => engine.validate(block),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ProofOfWork(engine) => engine.name(),
            Self::ProofOfStake(engine) => engine.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_engine_names() {
        assert_eq!(Engine::proof_of_work(4).name(), "proof_of_work");
        assert_eq!(
            Engine::proof_of_stake(Arc::new(FixedStake(10))).name(),
            "proof_of_stake"
        );
    }

    #[test]
    fn test_engine_dispatch_seal() {
        let engine = Engine::proof_of_work(0);
        let sealed = engine.seal(Block::genesis()).unwrap();
        assert!(engine.validate(&sealed).is_ok());
    }
}
