//! # Verifier Service
//!
//! One service instance verifies one `(attestation type, chain)` pair. It
//! owns no mutable state: the definition store is shared read-only and each
//! request re-reads the indexer's sync rows.
//!
//! ## Flow
//!
//! 1. Reject requests addressed to another type or source (hard error)
//! 2. Deserialize the typed request body (hard error on mismatch)
//! 3. Run the workflow (verdict)
//! 4. On `OK`, assemble the `AttestationResponse` echoing the request body

use crate::domain::{
    typed_body, AttestationResponseDto, AttestationType, BalanceDecreasingTransactionRequestBody,
    ConfirmedBlockHeightExistsRequestBody, EncodedRequestResponse, EncodedResponse, MicResponse,
    PaymentRequestBody, ReferencedPaymentNonexistenceRequestBody, Verification, VerificationError,
};
use crate::ports::{AttestationVerifier, TransactionParser};
use crate::workflows::{
    verify_balance_decreasing_transaction, verify_confirmed_block_height_exists, verify_payment,
    verify_referenced_payment_nonexistence, WorkflowResult,
};
use async_trait::async_trait;
use sc_01_attestation_codec::{
    decode_attestation_name, encode_attestation_name, AttestationDefinitionStore,
    AttestationRequest, AttestationResponse, CodecError, MIC_SALT,
};
use sc_02_indexed_query::IndexedQueryManager;
use serde::Serialize;
use shared_types::ChainType;
use std::sync::Arc;
use tracing::{error, info};

/// Verifier for one attestation type on one chain.
pub struct VerifierService {
    attestation_type: AttestationType,
    chain: ChainType,
    attestation_type_id: String,
    source_id: String,
    definitions: Arc<AttestationDefinitionStore>,
    indexer: Arc<dyn IndexedQueryManager>,
    parser: Arc<dyn TransactionParser>,
}

impl VerifierService {
    /// Create a verifier for `attestation_type` on the indexer's chain.
    ///
    /// ## Errors
    ///
    /// - `Codec(UnknownAttestationType)`: no definition is loaded for the type
    pub fn new(
        attestation_type: AttestationType,
        definitions: Arc<AttestationDefinitionStore>,
        indexer: Arc<dyn IndexedQueryManager>,
        parser: Arc<dyn TransactionParser>,
    ) -> Result<Self, VerificationError> {
        let name = attestation_type.name();
        if definitions.get_definition(name).is_none() {
            return Err(CodecError::UnknownAttestationType(name.to_string()).into());
        }
        let chain = indexer.chain_type();
        Ok(Self {
            attestation_type,
            chain,
            attestation_type_id: encode_attestation_name(name)?,
            source_id: encode_attestation_name(chain.source_name())?,
            definitions,
            indexer,
            parser,
        })
    }

    /// Attestation type this service verifies.
    pub fn attestation_type(&self) -> AttestationType {
        self.attestation_type
    }

    /// Chain this service verifies.
    pub fn chain(&self) -> ChainType {
        self.chain
    }

    /// Encoded attestation type id.
    pub fn attestation_type_id(&self) -> &str {
        &self.attestation_type_id
    }

    /// Encoded source id.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    fn check_addressee(&self, request: &AttestationRequest) -> Result<(), VerificationError> {
        let actual_type = decode_attestation_name(&request.attestation_type)?;
        if actual_type != self.attestation_type.name() {
            return Err(VerificationError::AttestationTypeMismatch {
                expected: self.attestation_type.name().to_string(),
                actual: actual_type,
            });
        }
        let actual_source = decode_attestation_name(&request.source_id)?;
        if actual_source != self.chain.source_name() {
            return Err(VerificationError::SourceMismatch {
                expected: self.chain.source_name().to_string(),
                actual: actual_source,
            });
        }
        Ok(())
    }

    /// Verify a request and assemble the full response on success.
    ///
    /// ## Errors
    ///
    /// Hard errors only: wrong addressee, malformed body, unencodable response.
    pub async fn verify_request(
        &self,
        request: &AttestationRequest,
    ) -> Result<Verification<AttestationResponse>, VerificationError> {
        self.check_addressee(request)?;
        let body = &request.request_body;
        let indexer = self.indexer.as_ref();
        let parser = self.parser.as_ref();

        let verification = match self.attestation_type {
            AttestationType::Payment => {
                let typed: PaymentRequestBody = typed_body(self.attestation_type, body)?;
                self.assemble(request, verify_payment(indexer, parser, &typed).await)?
            }
            AttestationType::BalanceDecreasingTransaction => {
                let typed: BalanceDecreasingTransactionRequestBody =
                    typed_body(self.attestation_type, body)?;
                let result = verify_balance_decreasing_transaction(indexer, parser, &typed).await;
                self.assemble(request, result)?
            }
            AttestationType::ConfirmedBlockHeightExists => {
                let typed: ConfirmedBlockHeightExistsRequestBody =
                    typed_body(self.attestation_type, body)?;
                let result = verify_confirmed_block_height_exists(indexer, &typed).await;
                self.assemble(request, result)?
            }
            AttestationType::ReferencedPaymentNonexistence => {
                let typed: ReferencedPaymentNonexistenceRequestBody =
                    typed_body(self.attestation_type, body)?;
                let result = verify_referenced_payment_nonexistence(indexer, parser, &typed).await;
                self.assemble(request, result)?
            }
        };

        info!(
            "[sc-03] {} on {}: {} ({})",
            self.attestation_type,
            self.chain,
            verification.response_status(),
            verification.status
        );
        Ok(verification)
    }

    fn assemble<B: Serialize>(
        &self,
        request: &AttestationRequest,
        result: WorkflowResult<B>,
    ) -> Result<Verification<AttestationResponse>, VerificationError> {
        let Some(verified) = result.response else {
            return Ok(Verification::rejected(result.status));
        };
        let response_body =
            serde_json::to_value(&verified.response_body).map_err(CodecError::from)?;
        Ok(Verification::ok(AttestationResponse {
            attestation_type: self.attestation_type_id.clone(),
            source_id: self.source_id.clone(),
            voting_round: 0,
            lowest_used_timestamp: verified.lowest_used_timestamp,
            request_body: request.request_body.clone(),
            response_body,
        }))
    }

    fn hard_error(&self, operation: &str, e: VerificationError) -> VerificationError {
        error!(
            "[sc-03] {} {} on {} failed: {}",
            self.attestation_type, operation, self.chain, e
        );
        e
    }
}

#[async_trait]
impl AttestationVerifier for VerifierService {
    async fn verify(
        &self,
        request: &AttestationRequest,
    ) -> Result<AttestationResponseDto, VerificationError> {
        let verification = self
            .verify_request(request)
            .await
            .map_err(|e| self.hard_error("verify", e))?;
        Ok(AttestationResponseDto {
            status: verification.response_status(),
            response: verification.response,
        })
    }

    async fn prepare_response(
        &self,
        request: &AttestationRequest,
    ) -> Result<AttestationResponseDto, VerificationError> {
        self.verify(request).await
    }

    async fn mic(&self, request: &AttestationRequest) -> Result<MicResponse, VerificationError> {
        let verification = self
            .verify_request(request)
            .await
            .map_err(|e| self.hard_error("mic", e))?;
        let message_integrity_code = verification
            .response
            .as_ref()
            .map(|response| {
                self.definitions
                    .attestation_response_hash(response, Some(MIC_SALT))
            })
            .transpose()
            .map_err(|e| self.hard_error("mic", e.into()))?;
        Ok(MicResponse {
            status: verification.response_status(),
            message_integrity_code,
        })
    }

    async fn prepare_request(
        &self,
        request: &AttestationRequest,
    ) -> Result<EncodedRequestResponse, VerificationError> {
        let mic = self.mic(request).await?;
        let abi_encoded_request = mic
            .message_integrity_code
            .map(|code| {
                let with_mic = AttestationRequest {
                    message_integrity_code: Some(code),
                    ..request.clone()
                };
                self.definitions.encode_request(&with_mic)
            })
            .transpose()
            .map_err(|e| self.hard_error("prepare_request", e.into()))?;
        Ok(EncodedRequestResponse {
            status: mic.status,
            abi_encoded_request,
        })
    }

    async fn verify_fdc(
        &self,
        abi_encoded_request: &str,
    ) -> Result<EncodedResponse, VerificationError> {
        let request = self
            .definitions
            .parse_request(abi_encoded_request)
            .map_err(|e| self.hard_error("verify_fdc", e.into()))?;
        let verification = self
            .verify_request(&request)
            .await
            .map_err(|e| self.hard_error("verify_fdc", e))?;
        let abi_encoded_response = verification
            .response
            .as_ref()
            .map(|response| self.definitions.encode_response(response))
            .transpose()
            .map_err(|e| self.hard_error("verify_fdc", e.into()))?;
        Ok(EncodedResponse {
            status: verification.response_status(),
            abi_encoded_response,
        })
    }
}
