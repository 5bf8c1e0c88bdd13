//! # Domain Errors
//!
//! Hard errors of the verification boundary. Everything that describes the
//! truth of a claim is a `VerificationStatus`, never one of these.

use sc_01_attestation_codec::CodecError;
use thiserror::Error;

/// Verification errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Request names an attestation type this service does not verify.
    #[error("Attestation type mismatch: service verifies {expected}, request carries {actual}")]
    AttestationTypeMismatch {
        /// Type the service was configured for
        expected: String,
        /// Type found in the request
        actual: String,
    },

    /// Request names a source chain this service does not verify.
    #[error("Source mismatch: service verifies {expected}, request carries {actual}")]
    SourceMismatch {
        /// Source the service was configured for
        expected: String,
        /// Source found in the request
        actual: String,
    },

    /// Request body does not match its attestation type's shape.
    #[error("Invalid {attestation_type} request body: {reason}")]
    InvalidRequestBody {
        /// Attestation type name
        attestation_type: String,
        /// Deserialization failure
        reason: String,
    },

    /// Attestation type name is not one of the supported workflows.
    #[error("Unsupported attestation type: {0}")]
    UnsupportedAttestationType(String),

    /// Schema, encoding or hashing failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
