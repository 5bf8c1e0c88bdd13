//! # ABI Parameters
//!
//! JSON ABI fragments (`{name, type, components}`) as they appear in the
//! attestation-type configuration files. A fragment resolves to a
//! [`DynSolType`] through its canonical type string; member names stay on the
//! fragment and are paired back up when values are mapped to and from JSON.

use crate::domain::errors::CodecError;
use alloy_dyn_abi::DynSolType;
use serde::{Deserialize, Serialize};

/// One JSON ABI parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Field name (empty for anonymous parameters).
    #[serde(default)]
    pub name: String,
    /// Solidity type string, e.g. `uint64`, `bytes32[]`, `tuple`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Tuple members for `tuple`/`tuple[]` types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
    /// Solidity internal type, informational only.
    #[serde(
        default,
        rename = "internalType",
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_type: Option<String>,
}

impl AbiParam {
    /// Create a parameter without components.
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
            components: Vec::new(),
            internal_type: None,
        }
    }

    /// Create a `tuple` parameter.
    pub fn tuple(name: &str, components: Vec<AbiParam>) -> Self {
        Self {
            name: name.to_string(),
            ty: "tuple".to_string(),
            components,
            internal_type: None,
        }
    }

    /// Find a direct component by name.
    pub fn component(&self, name: &str) -> Option<&AbiParam> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Canonical Solidity type string, with `tuple` expanded to its members
    /// (`(uint64,bytes32)[]`).
    pub fn canonical_type(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => {
                let members: Vec<String> =
                    self.components.iter().map(AbiParam::canonical_type).collect();
                format!("({}){}", members.join(","), suffix)
            }
            None => self.ty.clone(),
        }
    }

    /// Resolve the fragment into a dynamic Solidity type.
    ///
    /// Function pointers are rejected; every other valid Solidity type parses.
    pub fn sol_type(&self) -> Result<DynSolType, CodecError> {
        let canonical = self.canonical_type();
        let ty = DynSolType::parse(&canonical)
            .map_err(|e| CodecError::UnsupportedAbiType(format!("{} ({})", canonical, e)))?;
        if contains_function(&ty) {
            return Err(CodecError::UnsupportedAbiType(canonical));
        }
        Ok(ty)
    }
}

fn contains_function(ty: &DynSolType) -> bool {
    match ty {
        DynSolType::Function => true,
        DynSolType::Array(inner) | DynSolType::FixedArray(inner, _) => contains_function(inner),
        DynSolType::Tuple(members) => members.iter().any(contains_function),
        _ => false,
    }
}
