//! Proof-of-work sealing: hash-based leading-zero-bit difficulty target.

use crate::{ConsensusError, Result};
use ferrochain_core::{hash_concat, Block};

/// Proof-of-work engine.
///
/// `seal` searches for a digest of the block seed and a counter that meets
/// the configured number of leading zero bits.
pub struct ProofOfWork {
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn seal(&self, mut block: Block) -> Result<Block> {
        let mut nonce: u64 = 0;

        loop {
            let digest = hash_concat(&[block.hash.as_bytes(), &nonce.to_le_bytes()]);

            if leading_zero_bits(digest.as_bytes()) >= self.difficulty {
                block.hash = digest;
                return Ok(block);
            }

            nonce = nonce.wrapping_add(1);

            if nonce == 0 {
                return Err(ConsensusError::NonceOverflow);
            }
        }
    }

    /// Check the sealed hash against the difficulty target. Any block
    /// returned by [`seal`](Self::seal) passes.
    pub fn validate(&self, block: &Block) -> Result<()> {
        if leading_zero_bits(block.hash.as_bytes()) < self.difficulty {
            return Err(ConsensusError::InvalidProofOfWork);
        }

        Ok(())
    }

    pub fn name(&self) -> &'static str {
        "proof_of_work"
    }
}

/// Count leading zero bits: whole zero bytes add 8; the first non-zero byte
/// is scanned from its most significant bit and the scan stops at the first
/// one bit.
pub fn leading_zero_bits(bytes: &[u8]) -> u32 {
    let mut count = 0;

    for &byte in bytes {
        if byte == 0 {
            count += 8;
            continue;
        }

        count += byte.leading_zeros();
        break;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrochain_core::Hash;

    fn seeded_block(seed: &[u8]) -> Block {
        let mut block = Block::genesis();
        block.hash = Hash::from_bytes(seed.to_vec());
        block
    }

    #[test]
    fn test_leading_zero_bits() {
        assert_eq!(leading_zero_bits(&[]), 0);
        assert_eq!(leading_zero_bits(&[0xFF]), 0);
        assert_eq!(leading_zero_bits(&[0x80]), 0);
        assert_eq!(leading_zero_bits(&[0x40]), 1);
        assert_eq!(leading_zero_bits(&[0x01]), 7);
        assert_eq!(leading_zero_bits(&[0x00, 0xFF]), 8);
        assert_eq!(leading_zero_bits(&[0x00, 0x10]), 11);
        assert_eq!(leading_zero_bits(&[0x00, 0x00]), 16);
        // scan stops at the first one bit
        assert_eq!(leading_zero_bits(&[0x20, 0x00]), 2);
    }

    #[test]
    fn test_seal_meets_difficulty() {
        for difficulty in [0u32, 1, 4, 8, 12] {
            let engine = ProofOfWork::new(difficulty);
            let sealed = engine.seal(seeded_block(b"some seed material")).unwrap();
            assert!(leading_zero_bits(sealed.hash.as_bytes()) >= difficulty);
        }
    }

    #[test]
    fn test_sealed_blocks_always_validate() {
        for difficulty in [0u32, 4, 8, 12] {
            let engine = ProofOfWork::new(difficulty);
            let sealed = engine.seal(seeded_block(b"validate me")).unwrap();
            assert!(engine.validate(&sealed).is_ok());
        }
    }

    #[test]
    fn test_seal_replaces_seed() {
        let engine = ProofOfWork::new(4);
        let seed = b"seed bytes".to_vec();
        let sealed = engine.seal(seeded_block(&seed)).unwrap();
        assert_ne!(sealed.hash.as_bytes(), seed.as_slice());
        assert_eq!(sealed.hash.as_bytes().len(), 32);
    }

    #[test]
    fn test_seal_deterministic_for_same_seed() {
        let engine = ProofOfWork::new(8);
        let a = engine.seal(seeded_block(b"same seed")).unwrap();
        let b = engine.seal(seeded_block(b"same seed")).unwrap();
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_validate_rejects_weak_hash() {
        let engine = ProofOfWork::new(8);
        // 0xFF.. has zero leading zero bits
        let block = seeded_block(&[0xFF; 32]);
        assert!(matches!(
            engine.validate(&block),
            Err(ConsensusError::InvalidProofOfWork)
        ));
    }

    #[test]
    fn test_zero_difficulty_accepts_anything() {
        let engine = ProofOfWork::new(0);
        assert!(engine.validate(&seeded_block(&[0xFF; 32])).is_ok());
    }
}
