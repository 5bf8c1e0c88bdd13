//! # Domain Errors
//!
//! Error types for the Attestation Codec.
//!
//! Every variant here is a hard error: a malformed name, schema or struct.
//! None of them is ever degraded into a verification verdict.

use std::path::PathBuf;
use thiserror::Error;

/// Codec error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Name cannot be encoded as an attestation id.
    #[error("Invalid attestation name: {0}")]
    InvalidName(String),

    /// Value is not `0x` followed by 64 hex digits, or not UTF-8 once decoded.
    #[error("Invalid attestation id format: {0}")]
    InvalidFormat(String),

    /// ABI type string not supported by this coder.
    #[error("Unsupported ABI type: {0}")]
    UnsupportedAbiType(String),

    /// Struct is missing a field or has the wrong runtime shape for its schema.
    #[error("Malformed struct at '{path}': {reason}")]
    MalformedStruct {
        /// Dotted path to the offending field
        path: String,
        /// What was wrong
        reason: String,
    },

    /// Value cannot be converted to its ABI type.
    #[error("Invalid value for '{path}' ({abi_type}): {reason}")]
    InvalidValue {
        /// Dotted path to the offending field
        path: String,
        /// ABI type expected at this path
        abi_type: String,
        /// What was wrong
        reason: String,
    },

    /// ABI payload cannot be decoded.
    #[error("ABI decode error: {0}")]
    Decode(String),

    /// No definition registered for this attestation type.
    #[error("Unknown attestation type: {0}")]
    UnknownAttestationType(String),

    /// Request ABI of a definition has no `requestBody` component.
    #[error("Attestation type {0} has no requestBody in its request ABI")]
    MissingRequestBody(String),

    /// Encoded request is not `0x`-hex of at least the fixed prefix length.
    #[error("Invalid encoded request: {0}")]
    InvalidEncodedRequest(String),

    /// Serializing a typed struct to its runtime form failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CodecError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedStruct {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_value(path: &str, abi_type: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidValue {
            path: path.to_string(),
            abi_type: abi_type.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serialization(err.to_string())
    }
}

/// Startup errors while loading the attestation definitions directory.
///
/// All of these are fatal: the process must not serve requests without a
/// complete definition store.
#[derive(Debug, Error)]
pub enum DefinitionStoreError {
    /// Configuration directory missing or unreadable.
    #[error("Cannot read definitions directory {path}: {source}")]
    Directory {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Definition file unreadable.
    #[error("Cannot read definition file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Definition file is not a valid `{requestAbi, responseAbi, proofAbi}` document.
    #[error("Malformed definition file {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Definition file parsed but its ABI is unusable.
    #[error("Invalid schema in {path}: {source}")]
    Schema {
        /// File path
        path: PathBuf,
        /// Schema problem
        source: CodecError,
    },

    /// Two files define the same attestation type.
    #[error("Duplicate attestation definition: {0}")]
    Duplicate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_struct_display() {
        let err = CodecError::malformed("requestBody.utxo", "field is missing");
        assert!(err.to_string().contains("requestBody.utxo"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = CodecError::invalid_value("amount", "uint256", "negative");
        let message = err.to_string();
        assert!(message.contains("amount"));
        assert!(message.contains("uint256"));
    }

    #[test]
    fn test_duplicate_definition_display() {
        let err = DefinitionStoreError::Duplicate("Payment".to_string());
        assert!(err.to_string().contains("Payment"));
    }
}
