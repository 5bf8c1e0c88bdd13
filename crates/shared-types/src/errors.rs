//! # Error Types
//!
//! Errors raised by the shared helpers.

use thiserror::Error;

/// Errors from chain-name parsing and hex helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SharedError {
    /// Chain name not recognised.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    /// Value is not a `0x`-prefixed hex string of the required shape.
    #[error("Invalid hex value: {0}")]
    InvalidHex(String),
}
