//! Key derivation: seed -> ed25519 keypair -> address.
//!
//! Seeds are either random or derived deterministically from a passphrase.
//! The keys exist to give wallets stable identities; the simulated chain
//! does not verify signatures, so this is illustrative, not hardened.

use crate::address::Address;
use crate::hash::hash;
use argon2::{Algorithm, Argon2, Params, Version};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Salt for deterministic passphrase stretching. Versioned so a future
/// parameter change can coexist with old derivations.
const PASSPHRASE_SALT: &[u8] = b"ferrochain.v1";

/// Errors that can occur during key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("seed derivation failed: {0}")]
    Derivation(String),

    #[error("invalid private key")]
    InvalidPrivateKey,
}

/// Generate a fresh 32-byte random seed.
pub fn random_seed() -> Vec<u8> {
    let mut seed = vec![0u8; 32];
    OsRng.fill_bytes(&mut seed);
    seed
}

/// Derive a 32-byte seed deterministically from a passphrase (argon2id).
pub fn seed_from_passphrase(passphrase: &str) -> Result<Vec<u8>, KeyError> {
    let params = Params::new(64 * 1024, 1, 2, Some(32))
        .map_err(|e| KeyError::Derivation(e.to_string()))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut seed = vec![0u8; 32];
    argon
        .hash_password_into(passphrase.as_bytes(), PASSPHRASE_SALT, &mut seed)
        .map_err(|e| KeyError::Derivation(e.to_string()))?;
    Ok(seed)
}

/// The exported form of a derived key: hex private and public keys plus the
/// `0x`-hex address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMaterial {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

/// An ed25519 keypair with a derived 20-byte address.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Derive a keypair from an arbitrary-length seed.
    ///
    /// The seed is hashed down to 32 bytes first, so callers may pass raw
    /// user input as well as proper random seeds.
    pub fn from_seed(seed: &[u8]) -> Self {
        let digest = hash(seed);
        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(digest.as_bytes());
        Self {
            signing_key: SigningKey::from_bytes(&key_bytes),
        }
    }

    /// Generate a keypair from a fresh random seed.
    pub fn generate() -> Self {
        Self::from_seed(&random_seed())
    }

    /// Restore a keypair from its exported private key hex.
    pub fn from_private_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        let key_bytes: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&key_bytes),
        })
    }

    pub fn private_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    /// The address: first 20 bytes of the Blake3 hash of the public key.
    pub fn address(&self) -> Address {
        let digest = hash(&self.signing_key.verifying_key().to_bytes());
        Address::from_bytes(digest.as_bytes()[..20].to_vec())
    }

    /// Export as boundary-facing key material.
    pub fn material(&self) -> KeyMaterial {
        KeyMaterial {
            private_key: self.private_key_hex(),
            public_key: self.public_key_hex(),
            address: self.address().to_hex(),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address())
            .finish()
    }
}
