//! # SC-01 Attestation Codec
//!
//! Deterministic, bit-exact encoding of attestation requests and responses.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (pure domain + configuration-backed store)
//!
//! ## Purpose
//!
//! - Attestation names ↔ 32-byte ids (`"Payment"` → `0x5061796d656e7400..`)
//! - ABI encoding/decoding of requests and responses against per-type schemas
//!   (`alloy-dyn-abi` underneath)
//! - Message integrity code: Keccak-256 over `abi.encode(response, "Flare")`
//! - Schema-driven deep equality of runtime-typed structs
//!
//! ## Module Structure
//!
//! ```text
//! sc-01-attestation-codec/
//! ├── domain/          # names, ABI coder, integers, struct equality, envelopes
//! └── store/           # AttestationDefinition, AttestationDefinitionStore
//! ```
//!
//! ## Error Classes
//!
//! Everything this crate returns as `Err` is a hard error: a schema or
//! configuration bug, or a malformed payload. Verdicts are produced elsewhere.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod store;

// Re-exports
pub use domain::{
    decode_attestation_name, encode_attestation_name, structs_deep_equal, AbiParam,
    AttestationRequest, AttestationResponse, CodecError, DefinitionStoreError, Integer,
    ATTESTATION_ID_BYTES,
};
pub use store::{
    AbiConfig, AttestationDefinition, AttestationDefinitionStore, MIC_SALT, REQUEST_BODY_FIELD,
    RESPONSE_BODY_FIELD,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
