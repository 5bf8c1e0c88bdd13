//! # ABI Values
//!
//! Mapping between runtime JSON structs and [`DynSolValue`]. `tokenize`
//! walks a JSON value against its resolved type; `detokenize` remaps a
//! decoded value back into plain keyed JSON. Tuple member names come from the
//! ABI fragment's `components`, which apply element-wise below arrays.

use super::param::AbiParam;
use crate::domain::errors::CodecError;
use crate::domain::numeric::Integer;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, B256, I256};
use serde_json::{Map, Value};
use shared_types::{decode_0x_hex, encode_0x_hex, is_0x_hex};

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

/// Convert a runtime JSON value into a value of type `ty`.
///
/// `components` names the members of `ty` if it is a tuple or an array of
/// tuples; it is ignored for elementary types.
pub fn tokenize(
    ty: &DynSolType,
    components: &[AbiParam],
    value: &Value,
    path: &str,
) -> Result<DynSolValue, CodecError> {
    let abi_type = ty.sol_type_name().into_owned();
    match ty {
        DynSolType::Uint(bits) => {
            let parsed = integer(value, path, &abi_type)?;
            parsed
                .to_uint_word(*bits)
                .map(|word| DynSolValue::Uint(word, *bits))
                .ok_or_else(|| CodecError::invalid_value(path, &abi_type, "out of range"))
        }
        DynSolType::Int(bits) => {
            let parsed = integer(value, path, &abi_type)?;
            parsed
                .to_int_word(*bits)
                .map(|word| DynSolValue::Int(I256::from_raw(word), *bits))
                .ok_or_else(|| CodecError::invalid_value(path, &abi_type, "out of range"))
        }
        DynSolType::Bool => value
            .as_bool()
            .map(DynSolValue::Bool)
            .ok_or_else(|| CodecError::invalid_value(path, &abi_type, "not a boolean")),
        DynSolType::Address => {
            let bytes = hex_bytes(value, path, &abi_type)?;
            let address: [u8; 20] = bytes
                .try_into()
                .map_err(|_| CodecError::invalid_value(path, &abi_type, "expected 20 bytes"))?;
            Ok(DynSolValue::Address(Address::from(address)))
        }
        DynSolType::FixedBytes(len) => {
            let bytes = hex_bytes(value, path, &abi_type)?;
            if bytes.len() != *len {
                return Err(CodecError::invalid_value(
                    path,
                    &abi_type,
                    format!("expected {} bytes, got {}", len, bytes.len()),
                ));
            }
            let mut word = B256::ZERO;
            word[..*len].copy_from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(word, *len))
        }
        DynSolType::Bytes => hex_bytes(value, path, &abi_type).map(DynSolValue::Bytes),
        DynSolType::String => value
            .as_str()
            .map(|s| DynSolValue::String(s.to_string()))
            .ok_or_else(|| CodecError::invalid_value(path, &abi_type, "not a string")),
        DynSolType::Array(inner) => {
            elements(inner, components, value, path, None).map(DynSolValue::Array)
        }
        DynSolType::FixedArray(inner, len) => {
            elements(inner, components, value, path, Some(*len)).map(DynSolValue::FixedArray)
        }
        DynSolType::Tuple(members) => {
            if members.len() != components.len() {
                return Err(CodecError::malformed(path, "tuple members are unnamed"));
            }
            let object = value
                .as_object()
                .ok_or_else(|| CodecError::malformed(path, "expected a struct"))?;
            members
                .iter()
                .zip(components)
                .map(|(member_ty, member)| {
                    let field_path = join(path, &member.name);
                    match object.get(&member.name) {
                        Some(Value::Null) | None => {
                            Err(CodecError::malformed(&field_path, "field is missing"))
                        }
                        Some(field) => {
                            tokenize(member_ty, &member.components, field, &field_path)
                        }
                    }
                })
                .collect::<Result<Vec<_>, _>>()
                .map(DynSolValue::Tuple)
        }
        _ => Err(CodecError::UnsupportedAbiType(abi_type)),
    }
}

fn elements(
    inner: &DynSolType,
    components: &[AbiParam],
    value: &Value,
    path: &str,
    len: Option<usize>,
) -> Result<Vec<DynSolValue>, CodecError> {
    let items = value
        .as_array()
        .ok_or_else(|| CodecError::malformed(path, "expected an array"))?;
    if let Some(len) = len {
        if items.len() != len {
            return Err(CodecError::malformed(
                path,
                format!("expected {} elements, got {}", len, items.len()),
            ));
        }
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| tokenize(inner, components, item, &format!("{}[{}]", path, i)))
        .collect()
}

fn integer(value: &Value, path: &str, abi_type: &str) -> Result<Integer, CodecError> {
    Integer::from_value(value)
        .ok_or_else(|| CodecError::invalid_value(path, abi_type, "not an integer"))
}

fn hex_bytes(value: &Value, path: &str, abi_type: &str) -> Result<Vec<u8>, CodecError> {
    let text = value
        .as_str()
        .filter(|s| is_0x_hex(s))
        .ok_or_else(|| CodecError::invalid_value(path, abi_type, "not a 0x-hex string"))?;
    decode_0x_hex(text).map_err(|e| CodecError::invalid_value(path, abi_type, e.to_string()))
}

/// Remap a decoded value into plain JSON.
///
/// Tuples become objects keyed by member name and integers become decimal
/// strings. Nested arrays and fixed-length arrays are not supported, and an
/// integer word outside its declared width is rejected.
pub fn detokenize(
    ty: &DynSolType,
    components: &[AbiParam],
    value: DynSolValue,
    path: &str,
) -> Result<Value, CodecError> {
    match (ty, value) {
        (DynSolType::Uint(bits), DynSolValue::Uint(word, _)) => {
            if word.bit_len() > *bits {
                return Err(CodecError::invalid_value(path, &ty.sol_type_name(), "out of range"));
            }
            Ok(Value::String(word.to_string()))
        }
        (DynSolType::Int(bits), DynSolValue::Int(word, _)) => {
            let parsed = Integer::from_twos_complement(word.into_raw());
            if parsed.to_int_word(*bits).is_none() {
                return Err(CodecError::invalid_value(path, &ty.sol_type_name(), "out of range"));
            }
            Ok(Value::String(parsed.to_string()))
        }
        (DynSolType::Bool, DynSolValue::Bool(b)) => Ok(Value::Bool(b)),
        (DynSolType::Address, DynSolValue::Address(address)) => {
            Ok(Value::String(encode_0x_hex(address.as_slice())))
        }
        (DynSolType::FixedBytes(len), DynSolValue::FixedBytes(word, _)) => {
            Ok(Value::String(encode_0x_hex(&word[..*len])))
        }
        (DynSolType::Bytes, DynSolValue::Bytes(bytes)) => Ok(Value::String(encode_0x_hex(&bytes))),
        (DynSolType::String, DynSolValue::String(s)) => Ok(Value::String(s)),
        (DynSolType::Array(inner), DynSolValue::Array(items)) => {
            if matches!(**inner, DynSolType::Array(_) | DynSolType::FixedArray(_, _)) {
                return Err(CodecError::UnsupportedAbiType(format!(
                    "{} (nested arrays) at '{}'",
                    ty.sol_type_name(),
                    path
                )));
            }
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| detokenize(inner, components, item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        (DynSolType::FixedArray(_, _), _) => Err(CodecError::UnsupportedAbiType(format!(
            "{} (fixed-length arrays) at '{}'",
            ty.sol_type_name(),
            path
        ))),
        (DynSolType::Tuple(members), DynSolValue::Tuple(items)) => {
            if members.len() != items.len() || members.len() != components.len() {
                return Err(CodecError::malformed(path, "tuple arity mismatch"));
            }
            let mut object = Map::new();
            for ((member_ty, member), item) in members.iter().zip(components).zip(items) {
                let field_path = join(path, &member.name);
                object.insert(
                    member.name.clone(),
                    detokenize(member_ty, &member.components, item, &field_path)?,
                );
            }
            Ok(Value::Object(object))
        }
        (ty, value) => Err(CodecError::malformed(
            path,
            format!("value {:?} does not match type {}", value, ty.sol_type_name()),
        )),
    }
}

/// `abi.encode(values...)`: the values encoded as one parameter list.
pub fn encode(values: Vec<DynSolValue>) -> Vec<u8> {
    DynSolValue::Tuple(values).abi_encode_params()
}

/// `abi.decode(data, (ty))`: a single value of type `ty`.
pub fn decode(ty: &DynSolType, data: &[u8]) -> Result<DynSolValue, CodecError> {
    let decoded = DynSolType::Tuple(vec![ty.clone()])
        .abi_decode_params(data)
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    match decoded {
        DynSolValue::Tuple(mut values) if values.len() == 1 => Ok(values.remove(0)),
        other => Err(CodecError::Decode(format!(
            "expected one {} value, got {:?}",
            ty.sol_type_name(),
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use serde_json::json;

    fn body() -> AbiParam {
        AbiParam::tuple(
            "requestBody",
            vec![
                AbiParam::new("transactionId", "bytes32"),
                AbiParam::new("inUtxo", "uint256"),
                AbiParam::new("flag", "bool"),
            ],
        )
    }

    fn tokenize_body(value: &Value, path: &str) -> Result<DynSolValue, CodecError> {
        let param = body();
        tokenize(&param.sol_type().unwrap(), &param.components, value, path)
    }

    #[test]
    fn test_tokenize_tuple() {
        let value = json!({
            "transactionId": format!("0x{}", "ab".repeat(32)),
            "inUtxo": "7",
            "flag": true,
        });
        let token = tokenize_body(&value, "").unwrap();
        assert_eq!(
            token,
            DynSolValue::Tuple(vec![
                DynSolValue::FixedBytes(B256::repeat_byte(0xab), 32),
                DynSolValue::Uint(U256::from(7), 256),
                DynSolValue::Bool(true),
            ])
        );
    }

    #[test]
    fn test_tokenize_missing_field_is_malformed() {
        let value = json!({ "transactionId": format!("0x{}", "ab".repeat(32)), "flag": true });
        let err = tokenize_body(&value, "requestBody").unwrap_err();
        assert!(matches!(err, CodecError::MalformedStruct { ref path, .. } if path == "requestBody.inUtxo"));
    }

    #[test]
    fn test_tokenize_rejects_short_fixed_bytes() {
        let value = json!({ "transactionId": "0xabcd", "inUtxo": "0", "flag": false });
        assert!(matches!(
            tokenize_body(&value, ""),
            Err(CodecError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_tokenize_negative_uint_rejected() {
        let value = json!({
            "transactionId": format!("0x{}", "00".repeat(32)),
            "inUtxo": "-1",
            "flag": false,
        });
        assert!(tokenize_body(&value, "").is_err());
    }

    #[test]
    fn test_encode_matches_solidity_layout() {
        // abi.encode(uint64(1), "ab"): head word, offset 0x40, length 2, padded data.
        let encoded = encode(vec![
            DynSolValue::Uint(U256::from(1), 64),
            DynSolValue::String("ab".to_string()),
        ]);
        let expected = [
            format!("{:064x}", 1),
            format!("{:064x}", 0x40),
            format!("{:064x}", 2),
            format!("6162{}", "0".repeat(60)),
        ]
        .concat();
        assert_eq!(hex::encode(encoded), expected);
    }

    #[test]
    fn test_decode_detokenize_roundtrip() {
        let param = AbiParam::tuple(
            "body",
            vec![
                AbiParam::new("delta", "int64"),
                AbiParam::new("note", "string"),
                AbiParam::new("hashes", "bytes32[]"),
            ],
        );
        let ty = param.sol_type().unwrap();
        let value = json!({
            "delta": "-5",
            "note": "hello",
            "hashes": [format!("0x{}", "cd".repeat(32))],
        });
        let encoded = encode(vec![tokenize(&ty, &param.components, &value, "").unwrap()]);
        let decoded = decode(&ty, &encoded).unwrap();
        assert_eq!(detokenize(&ty, &param.components, decoded, "").unwrap(), value);
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let ty = DynSolType::Tuple(vec![DynSolType::Uint(64), DynSolType::Uint(64)]);
        let encoded = encode(vec![DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(1), 64),
            DynSolValue::Uint(U256::from(2), 64),
        ])]);
        assert!(matches!(
            decode(&ty, &encoded[..32]),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn test_detokenize_integers_as_decimal_strings() {
        let minus_one = DynSolValue::Int(I256::MINUS_ONE, 256);
        assert_eq!(
            detokenize(&DynSolType::Int(256), &[], minus_one, "x").unwrap(),
            json!("-1")
        );
        let ninety_nine = DynSolValue::Uint(U256::from(99u64), 64);
        assert_eq!(
            detokenize(&DynSolType::Uint(64), &[], ninety_nine, "x").unwrap(),
            json!("99")
        );
    }

    #[test]
    fn test_detokenize_rejects_words_wider_than_declared() {
        // An int8 word holding 300 is not sign-extended from 8 bits.
        let word = I256::from_raw(U256::from(300));
        assert!(matches!(
            detokenize(&DynSolType::Int(8), &[], DynSolValue::Int(word, 8), "x"),
            Err(CodecError::InvalidValue { .. })
        ));
        let minus_128 = I256::from_raw(U256::from(128).wrapping_neg());
        assert_eq!(
            detokenize(&DynSolType::Int(8), &[], DynSolValue::Int(minus_128, 8), "x").unwrap(),
            json!("-128")
        );
        assert!(matches!(
            detokenize(&DynSolType::Uint(8), &[], DynSolValue::Uint(U256::from(256), 8), "x"),
            Err(CodecError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_decoded_int8_out_of_range_rejected() {
        let mut word = [0u8; 32];
        word[30] = 0x01;
        word[31] = 0x2c;
        let ty = DynSolType::Int(8);
        let result = decode(&ty, &word).and_then(|value| detokenize(&ty, &[], value, "x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_detokenize_rejects_nested_and_fixed_arrays() {
        let nested = DynSolType::Array(Box::new(DynSolType::Array(Box::new(DynSolType::Bool))));
        assert!(matches!(
            detokenize(&nested, &[], DynSolValue::Array(vec![]), "x"),
            Err(CodecError::UnsupportedAbiType(_))
        ));
        let fixed = DynSolType::FixedArray(Box::new(DynSolType::Bool), 1);
        assert!(matches!(
            detokenize(&fixed, &[], DynSolValue::FixedArray(vec![DynSolValue::Bool(true)]), "x"),
            Err(CodecError::UnsupportedAbiType(_))
        ));
    }
}
