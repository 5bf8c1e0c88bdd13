//! # Store Module
//!
//! Attestation definitions loaded from configuration and the operations that
//! need a schema: request/response encoding, parsing, hashing and equality.

pub mod definition;
pub mod definition_store;

pub use definition::{AbiConfig, AttestationDefinition, REQUEST_BODY_FIELD, RESPONSE_BODY_FIELD};
pub use definition_store::{AttestationDefinitionStore, MIC_SALT};
