//! Shared hex formatting for opaque byte newtypes.
//!
//! Addresses and hashes cross the service boundary as hex strings prefixed
//! with `0x`. Empty byte sequences map to the empty string, not `0x`.

use hex::FromHexError;

pub(crate) fn encode(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    format!("0x{}", hex::encode(bytes))
}

pub(crate) fn decode(s: &str) -> Result<Vec<u8>, FromHexError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s)
}
