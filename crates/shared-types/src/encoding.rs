//! # Encoding Helpers
//!
//! `0x`-hex conventions and the Keccak-256 helpers shared across subsystems.

use crate::errors::SharedError;
use crate::Hash;
use sha3::{Digest, Keccak256};

/// All-zero 32-byte value in `0x`-hex form.
pub const ZERO_BYTES_32: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Compute Keccak256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash of an address string as stored in attestation bodies.
///
/// `keccak256(utf8(address))`, rendered as `0x`-hex.
pub fn standard_address_hash(address: &str) -> String {
    prefix_0x(&hex::encode(keccak256(address.as_bytes())))
}

/// Strip a leading `0x`/`0X`, if any.
pub fn unprefix_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Add a `0x` prefix unless one is already present.
pub fn prefix_0x(value: &str) -> String {
    if value.starts_with("0x") || value.starts_with("0X") {
        value.to_string()
    } else {
        format!("0x{}", value)
    }
}

/// `true` if `value` is `0x` followed by exactly `digits` hex digits.
pub fn is_0x_hex_of_len(value: &str, digits: usize) -> bool {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(body) => body.len() == digits && body.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// `true` if `value` is `0x` followed by any even number of hex digits.
pub fn is_0x_hex(value: &str) -> bool {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(body) => body.len() % 2 == 0 && body.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Decode a `0x`-hex string into bytes.
pub fn decode_0x_hex(value: &str) -> Result<Vec<u8>, SharedError> {
    if !is_0x_hex(value) {
        return Err(SharedError::InvalidHex(value.to_string()));
    }
    hex::decode(unprefix_0x(value)).map_err(|_| SharedError::InvalidHex(value.to_string()))
}

/// Decode a `0x`-hex string holding exactly 32 bytes.
pub fn decode_hash(value: &str) -> Result<Hash, SharedError> {
    if !is_0x_hex_of_len(value, 64) {
        return Err(SharedError::InvalidHex(value.to_string()));
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(unprefix_0x(value), &mut out)
        .map_err(|_| SharedError::InvalidHex(value.to_string()))?;
    Ok(out)
}

/// Case-insensitive hex comparison ignoring an optional `0x` prefix.
pub fn same_hex(a: &str, b: &str) -> bool {
    unprefix_0x(a).eq_ignore_ascii_case(unprefix_0x(b))
}

/// Render bytes as lowercase `0x`-hex.
pub fn encode_0x_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
