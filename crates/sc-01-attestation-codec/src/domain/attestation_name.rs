//! # Attestation Names
//!
//! Short ASCII names (`"Payment"`, `"BTC"`) travel on the wire as 32-byte
//! identifiers: the UTF-8 bytes of the name, right-padded with zeros.

use super::errors::CodecError;
use shared_types::{encode_0x_hex, is_0x_hex_of_len};

/// Attestation ids are exactly one ABI word.
pub const ATTESTATION_ID_BYTES: usize = 32;

/// Encode a name into a `0x`-prefixed 32-byte attestation id.
///
/// Names starting with `0x`/`0X` are refused so an encoded name can never be
/// mistaken for a hex value.
pub fn encode_attestation_name(name: &str) -> Result<String, CodecError> {
    if name.starts_with("0x") || name.starts_with("0X") {
        return Err(CodecError::InvalidName(format!(
            "'{}' must not start with 0x",
            name
        )));
    }
    let bytes = name.as_bytes();
    if bytes.len() > ATTESTATION_ID_BYTES {
        return Err(CodecError::InvalidName(format!(
            "'{}' is {} bytes, at most {} allowed",
            name,
            bytes.len(),
            ATTESTATION_ID_BYTES
        )));
    }
    let mut padded = [0u8; ATTESTATION_ID_BYTES];
    padded[..bytes.len()].copy_from_slice(bytes);
    Ok(encode_0x_hex(&padded))
}

/// Decode a `0x`-prefixed 32-byte attestation id back into its name.
///
/// Trailing zero bytes are dropped; an all-zero id decodes to `""`.
pub fn decode_attestation_name(id: &str) -> Result<String, CodecError> {
    if !is_0x_hex_of_len(id, ATTESTATION_ID_BYTES * 2) {
        return Err(CodecError::InvalidFormat(id.to_string()));
    }
    let mut nibbles = id[2..].trim_end_matches('0').to_string();
    if nibbles.len() % 2 == 1 {
        nibbles.push('0');
    }
    let bytes = hex::decode(&nibbles).map_err(|_| CodecError::InvalidFormat(id.to_string()))?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidFormat(id.to_string()))
}
