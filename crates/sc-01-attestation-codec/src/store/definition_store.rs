//! # Attestation Definition Store
//!
//! Process-wide registry of attestation definitions keyed by type name.
//! Loaded once at startup; read-only afterwards and safe to share across any
//! number of concurrent readers.

use super::definition::{AbiConfig, AttestationDefinition};
use crate::domain::abi;
use crate::domain::{
    decode_attestation_name, structs_deep_equal, AttestationRequest, AttestationResponse,
    CodecError, DefinitionStoreError,
};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use serde_json::json;
use shared_types::{decode_0x_hex, encode_0x_hex, is_0x_hex, keccak256, ZERO_BYTES_32};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Salt appended to the response when computing a message integrity code.
pub const MIC_SALT: &str = "Flare";

/// Hex length of `0x` + attestationType + sourceId + messageIntegrityCode.
const REQUEST_PREFIX_HEX_LEN: usize = 2 + 3 * 64;

/// Registry of attestation definitions.
#[derive(Debug, Default)]
pub struct AttestationDefinitionStore {
    definitions: HashMap<String, AttestationDefinition>,
}

impl AttestationDefinitionStore {
    /// Load every `*.json` file in `dir`; the file stem is the type name.
    ///
    /// Any unreadable or malformed file aborts loading.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DefinitionStoreError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|source| DefinitionStoreError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DefinitionStoreError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut definitions = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = std::fs::read_to_string(&path).map_err(|source| DefinitionStoreError::Io {
                path: path.clone(),
                source,
            })?;
            let config: AbiConfig =
                serde_json::from_str(&raw).map_err(|source| DefinitionStoreError::Parse {
                    path: path.clone(),
                    source,
                })?;
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let definition = AttestationDefinition::new(&name, config)
                .map_err(|source| DefinitionStoreError::Schema {
                    path: path.clone(),
                    source,
                })?;
            debug!("[sc-01] Parsed attestation definition {} from {}", name, path.display());
            definitions.push(definition);
        }

        let store = Self::from_definitions(definitions)?;
        info!(
            "[sc-01] Loaded {} attestation definitions from {}",
            store.definitions.len(),
            dir.display()
        );
        Ok(store)
    }

    /// Build a store from already-parsed definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = AttestationDefinition>,
    ) -> Result<Self, DefinitionStoreError> {
        let mut map = HashMap::new();
        for definition in definitions {
            let name = definition.name().to_string();
            if map.insert(name.clone(), definition).is_some() {
                return Err(DefinitionStoreError::Duplicate(name));
            }
        }
        Ok(Self { definitions: map })
    }

    /// Definition by type name.
    pub fn get_definition(&self, name: &str) -> Option<&AttestationDefinition> {
        self.definitions.get(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Definition for an encoded attestation type id.
    pub fn definition_for(&self, attestation_type: &str) -> Result<&AttestationDefinition, CodecError> {
        let name = decode_attestation_name(attestation_type)?;
        self.definitions
            .get(&name)
            .ok_or(CodecError::UnknownAttestationType(name))
    }

    /// ABI-encode a request: the fixed 3-word prefix followed by the body.
    pub fn encode_request(&self, request: &AttestationRequest) -> Result<String, CodecError> {
        let definition = self.definition_for(&request.attestation_type)?;
        let body_type = definition.request_body_type()?;
        let body_abi = definition.request_body_abi()?;

        let word = DynSolType::FixedBytes(32);
        let mic = request
            .message_integrity_code
            .as_deref()
            .unwrap_or(ZERO_BYTES_32);
        let prefix = abi::encode(vec![
            abi::tokenize(&word, &[], &json!(request.attestation_type), "attestationType")?,
            abi::tokenize(&word, &[], &json!(request.source_id), "sourceId")?,
            abi::tokenize(&word, &[], &json!(mic), "messageIntegrityCode")?,
        ]);
        let body = abi::encode(vec![abi::tokenize(
            body_type,
            &body_abi.components,
            &request.request_body,
            "requestBody",
        )?]);

        let mut encoded = prefix;
        encoded.extend(body);
        Ok(encode_0x_hex(&encoded))
    }

    /// Parse an ABI-encoded request back into its runtime form.
    pub fn parse_request(&self, encoded: &str) -> Result<AttestationRequest, CodecError> {
        if !is_0x_hex(encoded) || encoded.len() < REQUEST_PREFIX_HEX_LEN {
            return Err(CodecError::InvalidEncodedRequest(format!(
                "expected 0x-hex of at least {} characters, got {}",
                REQUEST_PREFIX_HEX_LEN,
                encoded.len()
            )));
        }
        let attestation_type = format!("0x{}", &encoded[2..66]);
        let source_id = format!("0x{}", &encoded[66..130]);
        let message_integrity_code = format!("0x{}", &encoded[130..194]);

        let definition = self.definition_for(&attestation_type)?;
        let body_type = definition.request_body_type()?;
        let body_abi = definition.request_body_abi()?;
        let body_bytes = decode_0x_hex(&format!("0x{}", &encoded[REQUEST_PREFIX_HEX_LEN..]))
            .map_err(|e| CodecError::InvalidEncodedRequest(e.to_string()))?;

        let decoded = abi::decode(body_type, &body_bytes)?;
        let request_body =
            abi::detokenize(body_type, &body_abi.components, decoded, "requestBody")?;

        Ok(AttestationRequest {
            attestation_type,
            source_id,
            message_integrity_code: Some(message_integrity_code),
            request_body,
        })
    }

    fn response_value(&self, response: &AttestationResponse) -> Result<DynSolValue, CodecError> {
        let definition = self.definition_for(&response.attestation_type)?;
        let value = serde_json::to_value(response)?;
        abi::tokenize(
            definition.response_type(),
            &definition.response_abi().components,
            &value,
            "response",
        )
    }

    /// ABI-encode a full response (`abi.encode(response)`).
    pub fn encode_response(&self, response: &AttestationResponse) -> Result<String, CodecError> {
        let value = self.response_value(response)?;
        Ok(encode_0x_hex(&abi::encode(vec![value])))
    }

    /// Keccak-256 over `abi.encode(response)` or `abi.encode(response, salt)`.
    ///
    /// With [`MIC_SALT`] this is the message integrity code.
    pub fn attestation_response_hash(
        &self,
        response: &AttestationResponse,
        salt: Option<&str>,
    ) -> Result<String, CodecError> {
        let value = self.response_value(response)?;
        let encoded = match salt {
            Some(salt) => abi::encode(vec![value, DynSolValue::String(salt.to_string())]),
            None => abi::encode(vec![value]),
        };
        Ok(encode_0x_hex(&keccak256(&encoded)))
    }

    /// ABI-encode a proof (`{merkleProof, data}`) for a response.
    pub fn encode_proof(
        &self,
        response: &AttestationResponse,
        merkle_proof: &[String],
    ) -> Result<String, CodecError> {
        let definition = self.definition_for(&response.attestation_type)?;
        let value = json!({
            "merkleProof": merkle_proof,
            "data": serde_json::to_value(response)?,
        });
        let proof = abi::tokenize(
            definition.proof_type(),
            &definition.proof_abi().components,
            &value,
            "proof",
        )?;
        Ok(encode_0x_hex(&abi::encode(vec![proof])))
    }

    /// Compare two requests: ids literally, bodies by schema.
    pub fn equals_request(
        &self,
        a: &AttestationRequest,
        b: &AttestationRequest,
    ) -> Result<bool, CodecError> {
        if a.attestation_type != b.attestation_type || a.source_id != b.source_id {
            return Ok(false);
        }
        let definition = self.definition_for(&a.attestation_type)?;
        let schema = &definition.request_body_abi()?.components;
        structs_deep_equal(&a.request_body, &b.request_body, schema)
    }
}
