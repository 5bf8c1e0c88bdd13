//! # Struct Equality
//!
//! Schema-driven deep comparison of runtime-typed structs.
//!
//! `Ok(false)` means the structs are well-formed and differ. `Err(_)` means at
//! least one of them does not conform to the schema (missing field, wrong
//! runtime shape, unparsable integer, unsupported type). The two outcomes are
//! never conflated.

use super::abi::AbiParam;
use super::errors::CodecError;
use super::numeric::Integer;
use serde_json::{Map, Value};
use shared_types::is_0x_hex;

/// Compare two structs field by field according to `schema`.
pub fn structs_deep_equal(a: &Value, b: &Value, schema: &[AbiParam]) -> Result<bool, CodecError> {
    compare_structs(a, b, schema, "")
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, CodecError> {
    value
        .as_object()
        .ok_or_else(|| CodecError::malformed(path, "expected a struct"))
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, CodecError> {
    value
        .as_array()
        .ok_or_else(|| CodecError::malformed(path, "expected an array"))
}

fn field<'a>(object: &'a Map<String, Value>, name: &str, path: &str) -> Result<&'a Value, CodecError> {
    match object.get(name) {
        Some(Value::Null) | None => Err(CodecError::malformed(path, "field is missing")),
        Some(value) => Ok(value),
    }
}

fn compare_structs(a: &Value, b: &Value, schema: &[AbiParam], path: &str) -> Result<bool, CodecError> {
    let left = as_object(a, path)?;
    let right = as_object(b, path)?;

    // Every field is visited so a malformed struct is reported even after a difference.
    let mut equal = true;
    for param in schema {
        let field_path = if path.is_empty() {
            param.name.clone()
        } else {
            format!("{}.{}", path, param.name)
        };
        let x = field(left, &param.name, &field_path)?;
        let y = field(right, &param.name, &field_path)?;
        equal &= compare_field(x, y, param, &field_path)?;
    }
    Ok(equal)
}

fn compare_field(a: &Value, b: &Value, param: &AbiParam, path: &str) -> Result<bool, CodecError> {
    if param.ty == "tuple" {
        return compare_structs(a, b, &param.components, path);
    }
    if param.ty == "tuple[]" {
        let (left, right) = (as_array(a, path)?, as_array(b, path)?);
        if left.len() != right.len() {
            return Ok(false);
        }
        let mut equal = true;
        for (i, (x, y)) in left.iter().zip(right).enumerate() {
            equal &= compare_structs(x, y, &param.components, &format!("{}[{}]", path, i))?;
        }
        return Ok(equal);
    }
    if let Some(element_ty) = param.ty.strip_suffix("[]") {
        let (left, right) = (as_array(a, path)?, as_array(b, path)?);
        if left.len() != right.len() {
            return Ok(false);
        }
        let mut equal = true;
        for (i, (x, y)) in left.iter().zip(right).enumerate() {
            equal &= compare_elementary(x, y, element_ty, &format!("{}[{}]", path, i))?;
        }
        return Ok(equal);
    }
    compare_elementary(a, b, &param.ty, path)
}

fn compare_elementary(a: &Value, b: &Value, ty: &str, path: &str) -> Result<bool, CodecError> {
    if ty.starts_with("uint") || ty.starts_with("int") {
        let parse = |v: &Value| {
            Integer::from_value(v)
                .ok_or_else(|| CodecError::invalid_value(path, ty, format!("not an integer: {}", v)))
        };
        return Ok(parse(a)? == parse(b)?);
    }
    if ty == "bool" {
        return match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
            _ => Err(CodecError::invalid_value(path, ty, "not a boolean")),
        };
    }
    if ty.starts_with("bytes") || ty == "address" {
        return match (a.as_str(), b.as_str()) {
            (Some(x), Some(y)) if is_0x_hex(x) && is_0x_hex(y) => Ok(x.eq_ignore_ascii_case(y)),
            _ => Err(CodecError::invalid_value(path, ty, "not a 0x-hex string")),
        };
    }
    if ty == "string" {
        return match (a.as_str(), b.as_str()) {
            (Some(x), Some(y)) => Ok(x == y),
            _ => Err(CodecError::invalid_value(path, ty, "not a string")),
        };
    }
    Err(CodecError::UnsupportedAbiType(format!("{} at '{}'", ty, path)))
}
