//! # Domain Module
//!
//! Pure codec logic: attestation names, the ABI coder, integer parsing,
//! schema-driven struct equality and the request/response envelopes.

pub mod abi;
pub mod attestation_name;
pub mod errors;
pub mod numeric;
pub mod struct_equality;
pub mod value_objects;

pub use abi::AbiParam;
pub use attestation_name::*;
pub use errors::*;
pub use numeric::Integer;
pub use struct_equality::structs_deep_equal;
pub use value_objects::*;
