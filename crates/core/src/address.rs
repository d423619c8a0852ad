//! Opaque account addresses.

use crate::hexfmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An account address: an opaque byte sequence.
///
/// The simulated chain derives 20-byte addresses from public keys, but the
/// ledger itself treats any byte sequence as a valid account identifier.
#[derive(Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub Vec<u8>);

impl Address {
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

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let addr = Address::from_bytes(vec![0xAA; 20]);
        let parsed = Address::from_hex(&addr.to_hex()).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_from_hex_no_prefix() {
        let addr = Address::from_bytes(vec![0x01, 0x02]);
        assert_eq!(Address::from_hex("0102").unwrap(), addr);
        assert_eq!(Address::from_hex("0x0102").unwrap(), addr);
    }

    #[test]
    fn test_empty_address_is_empty_string() {
        assert_eq!(Address::default().to_hex(), "");
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(Address::from_hex("zz").is_err());
    }
}
