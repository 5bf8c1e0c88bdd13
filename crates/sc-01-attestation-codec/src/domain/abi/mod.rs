//! # ABI Coder
//!
//! Attestation schemas on top of `alloy-dyn-abi`: JSON ABI fragments resolve
//! to [`alloy_dyn_abi::DynSolType`], runtime JSON structs map to and from
//! [`alloy_dyn_abi::DynSolValue`], and the byte-level coding is alloy's.

pub mod param;
pub mod token;

pub use param::AbiParam;
pub use token::{decode, detokenize, encode, tokenize};
