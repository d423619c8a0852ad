//! Core primitives for ferrochain.
//!
//! This crate provides the fundamental types used throughout the wallet
//! service:
//! - Opaque addresses and hashes with `0x`-hex boundary formatting
//! - Blake3 hashing helpers
//! - Key derivation (random or deterministic seed -> ed25519 keypair -> address)
//! - Pending and recorded transactions
//! - Blocks

pub mod address;
pub mod block;
pub mod hash;
pub mod keys;
pub mod transaction;

mod hexfmt;

// Re-export commonly used types at the crate root
pub use address::Address;
pub use block::Block;
pub use hash::{hash, hash_concat, Hash};
pub use keys::{random_seed, seed_from_passphrase, KeyError, KeyMaterial, Keypair};
pub use transaction::{FeeHint, RecordedTransaction, SignedTx, Tx, TxStatus};
