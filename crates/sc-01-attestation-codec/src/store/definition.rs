//! # Attestation Definitions
//!
//! One definition per attestation type, parsed from a configuration file of
//! the form `{ "requestAbi": .., "responseAbi": .., "proofAbi": .. }`.

use crate::domain::{AbiParam, CodecError};
use alloy_dyn_abi::DynSolType;
use serde::Deserialize;

/// Member of the request ABI holding the type-specific body.
pub const REQUEST_BODY_FIELD: &str = "requestBody";

/// Member of the response ABI holding the type-specific result.
pub const RESPONSE_BODY_FIELD: &str = "responseBody";

/// On-disk shape of a definition file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiConfig {
    /// Full request struct.
    pub request_abi: AbiParam,
    /// Full response struct.
    pub response_abi: AbiParam,
    /// Full proof struct (`{merkleProof, data}`).
    pub proof_abi: AbiParam,
}

/// Immutable attestation definition with its ABI types pre-parsed.
#[derive(Clone, Debug)]
pub struct AttestationDefinition {
    name: String,
    request_abi: AbiParam,
    response_abi: AbiParam,
    proof_abi: AbiParam,
    request_body_type: Option<DynSolType>,
    response_type: DynSolType,
    proof_type: DynSolType,
}

impl AttestationDefinition {
    /// Build a definition, parsing every ABI fragment up front.
    pub fn new(name: &str, config: AbiConfig) -> Result<Self, CodecError> {
        let request_body_type = config
            .request_abi
            .component(REQUEST_BODY_FIELD)
            .map(AbiParam::sol_type)
            .transpose()?;
        // Validate the full request shape even though only the body is coded.
        config.request_abi.sol_type()?;
        let response_type = config.response_abi.sol_type()?;
        let proof_type = config.proof_abi.sol_type()?;

        Ok(Self {
            name: name.to_string(),
            request_abi: config.request_abi,
            response_abi: config.response_abi,
            proof_abi: config.proof_abi,
            request_body_type,
            response_type,
            proof_type,
        })
    }

    /// Attestation type name (`"Payment"`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full request ABI.
    pub fn request_abi(&self) -> &AbiParam {
        &self.request_abi
    }

    /// Full response ABI.
    pub fn response_abi(&self) -> &AbiParam {
        &self.response_abi
    }

    /// Full proof ABI.
    pub fn proof_abi(&self) -> &AbiParam {
        &self.proof_abi
    }

    /// `requestBody` sub-schema.
    pub fn request_body_abi(&self) -> Result<&AbiParam, CodecError> {
        self.request_abi
            .component(REQUEST_BODY_FIELD)
            .ok_or_else(|| CodecError::MissingRequestBody(self.name.clone()))
    }

    /// `responseBody` sub-schema, if declared.
    pub fn response_body_abi(&self) -> Option<&AbiParam> {
        self.response_abi.component(RESPONSE_BODY_FIELD)
    }

    pub(crate) fn request_body_type(&self) -> Result<&DynSolType, CodecError> {
        self.request_body_type
            .as_ref()
            .ok_or_else(|| CodecError::MissingRequestBody(self.name.clone()))
    }

    pub(crate) fn response_type(&self) -> &DynSolType {
        &self.response_type
    }

    pub(crate) fn proof_type(&self) -> &DynSolType {
        &self.proof_type
    }
}
