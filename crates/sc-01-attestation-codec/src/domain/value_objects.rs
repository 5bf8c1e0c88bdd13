//! # Attestation Envelopes
//!
//! Requests and responses with runtime-typed bodies. The shape of
//! `request_body`/`response_body` is fixed by the attestation type's ABI
//! schema, looked up in the definition store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Attestation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRequest {
    /// Encoded attestation type name.
    pub attestation_type: String,
    /// Encoded source (chain) name.
    pub source_id: String,
    /// Message integrity code; the all-zero hash when not yet computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_integrity_code: Option<String>,
    /// Type-specific request body.
    pub request_body: Value,
}

/// Attestation response.
///
/// `request_body` echoes the request exactly (without the MIC); the MIC is a
/// hash over this whole struct.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponse {
    /// Encoded attestation type name.
    pub attestation_type: String,
    /// Encoded source (chain) name.
    pub source_id: String,
    /// Voting round; verifiers always answer with `0`.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub voting_round: u64,
    /// Earliest timestamp whose indexer state the verdict depends on.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub lowest_used_timestamp: u64,
    /// Echoed request body.
    pub request_body: Value,
    /// Type-specific response body.
    pub response_body: Value,
}
