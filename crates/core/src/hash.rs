//! Blake3 hashing utilities and the opaque `Hash` type.

use crate::hexfmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque digest.
///
/// Variable-length on purpose: the genesis block carries the literal bytes
/// `genesis`, and a block awaiting sealing carries its seed material in the
/// hash slot until the consensus engine replaces it with a real digest.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Hash(pub Vec<u8>);

impl Hash {
    /// The empty hash (no bytes). Serializes to the empty string.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Boundary form: `0x`-prefixed hex, or the empty string for no bytes.
    pub fn to_hex(&self) -> String {
        hexfmt::encode(&self.0)
    }

    /// Parse from a hex string, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self(hexfmt::decode(s)?))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Hash {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Hash arbitrary data using Blake3.
pub fn hash(data: &[u8]) -> Hash {
    Hash(blake3::hash(data).as_bytes().to_vec())
}

/// Hash multiple pieces of data by concatenating them.
pub fn hash_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    Hash(hasher.finalize().as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let h1 = hash(b"hello world");
        let h2 = hash(b"hello world");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_hash_different_inputs() {
        assert_ne!(hash(b"hello"), hash(b"world"));
    }

    #[test]
    fn test_hash_concat() {
        let h1 = hash_concat(&[b"hello", b"world"]);
        let h2 = hash(b"helloworld");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_hex_roundtrip() {
        let h = hash(b"test data");
        let parsed = Hash::from_hex(&h.to_hex()).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn test_hex_prefix() {
        let h = hash(b"test");
        assert!(h.to_hex().starts_with("0x"));
        assert_eq!(h.to_hex().len(), 66); // "0x" + 64 hex chars
    }

    #[test]
    fn test_empty_hash_is_empty_string() {
        assert_eq!(Hash::empty().to_hex(), "");
        assert_eq!(Hash::from_hex("").unwrap(), Hash::empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let h = hash(b"abc");
        let json = serde_json::to_string(&h).unwrap();
        assert!(json.starts_with("\"0x"));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn test_genesis_literal() {
        let h = Hash::from_bytes(b"genesis".to_vec());
        assert_eq!(h.to_hex(), format!("0x{}", hex::encode(b"genesis")));
    }
}
