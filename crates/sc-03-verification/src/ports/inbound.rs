//! # Inbound Ports
//!
//! Operations the HTTP layer calls on a verifier.

use crate::domain::{
    AttestationResponseDto, EncodedRequestResponse, EncodedResponse, MicResponse,
    VerificationError,
};
use async_trait::async_trait;
use sc_01_attestation_codec::AttestationRequest;

/// Verifier for one `(attestation type, chain)` pair.
///
/// Every operation first rejects requests addressed to another type or
/// source, then verifies. Verdicts are returned in the DTO; `Err` is reserved
/// for hard errors.
#[async_trait]
pub trait AttestationVerifier: Send + Sync {
    /// Verify and return the JSON response.
    async fn verify(
        &self,
        request: &AttestationRequest,
    ) -> Result<AttestationResponseDto, VerificationError>;

    /// Same as [`verify`](Self::verify); kept as the name clients use when
    /// assembling a request.
    async fn prepare_response(
        &self,
        request: &AttestationRequest,
    ) -> Result<AttestationResponseDto, VerificationError>;

    /// Verify and return only the message integrity code.
    async fn mic(&self, request: &AttestationRequest) -> Result<MicResponse, VerificationError>;

    /// Verify and return the request ABI-encoded with the computed MIC.
    async fn prepare_request(
        &self,
        request: &AttestationRequest,
    ) -> Result<EncodedRequestResponse, VerificationError>;

    /// Verify an ABI-encoded request and return the ABI-encoded response.
    async fn verify_fdc(&self, abi_encoded_request: &str)
        -> Result<EncodedResponse, VerificationError>;
}
