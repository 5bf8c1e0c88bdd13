//! Response shapes of the boundary operations.

use super::status::VerificationResponseStatus;
use sc_01_attestation_codec::AttestationResponse;
use serde::{Deserialize, Serialize};

/// Verdict with the JSON response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponseDto {
    /// Response class.
    pub status: VerificationResponseStatus,
    /// Present when `VALID`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AttestationResponse>,
}

/// Verdict with the message integrity code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicResponse {
    /// Response class.
    pub status: VerificationResponseStatus,
    /// Present when `VALID`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_integrity_code: Option<String>,
}

/// Verdict with the ABI-encoded request carrying its MIC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedRequestResponse {
    /// Response class.
    pub status: VerificationResponseStatus,
    /// Present when `VALID`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_encoded_request: Option<String>,
}

/// Verdict with the ABI-encoded response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedResponse {
    /// Response class.
    pub status: VerificationResponseStatus,
    /// Present when `VALID`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_encoded_response: Option<String>,
}
