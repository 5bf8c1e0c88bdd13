//! # Integers
//!
//! Runtime-typed structs carry integers as decimal strings, `0x`-hex strings
//! or JSON numbers. [`Integer`] is their common parsed form: a sign plus a
//! 256-bit magnitude, enough for every `uintN`/`intN` ABI type.

use alloy_primitives::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Signed integer with a 256-bit magnitude.
#[derive(Clone, Copy, Debug)]
pub struct Integer {
    negative: bool,
    magnitude: U256,
}

impl Integer {
    /// Non-negative integer from a magnitude.
    pub fn from_u256(magnitude: U256) -> Self {
        Self {
            negative: false,
            magnitude,
        }
    }

    /// Parse a JSON value holding an integer.
    ///
    /// Accepts decimal strings (optionally signed), `0x`-hex strings and
    /// integral JSON numbers.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Some(Self::from_u256(U256::from(u)))
                } else {
                    n.as_i64().map(|i| Self {
                        negative: i < 0,
                        magnitude: U256::from(i.unsigned_abs()),
                    })
                }
            }
            _ => None,
        }
    }

    /// Parse a decimal or `0x`-hex string.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let magnitude = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            Some(hex_digits) => {
                if hex_digits.is_empty() || !hex_digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return None;
                }
                U256::from_str_radix(hex_digits, 16).ok()?
            }
            None => {
                if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                U256::from_str_radix(body, 10).ok()?
            }
        };
        Some(Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        })
    }

    /// Interpret a 256-bit word as a two's-complement signed integer.
    pub fn from_twos_complement(word: U256) -> Self {
        if word.bit(255) {
            Self {
                negative: true,
                magnitude: word.wrapping_neg(),
            }
        } else {
            Self::from_u256(word)
        }
    }

    /// `true` for values below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Magnitude, ignoring the sign.
    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }

    /// The value as `u64`, if it is non-negative and fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative {
            return None;
        }
        u64::try_from(self.magnitude).ok()
    }

    /// The value as an unsigned word, if it fits in `bits` bits.
    pub fn to_uint_word(&self, bits: usize) -> Option<U256> {
        if self.negative || self.magnitude.bit_len() > bits {
            return None;
        }
        Some(self.magnitude)
    }

    /// The value as a two's-complement word, if it fits in a signed `bits`-bit integer.
    pub fn to_int_word(&self, bits: usize) -> Option<U256> {
        let limit = U256::ONE << (bits - 1);
        if self.negative {
            if self.magnitude > limit {
                return None;
            }
            Some(self.magnitude.wrapping_neg())
        } else {
            if self.magnitude >= limit {
                return None;
            }
            Some(self.magnitude)
        }
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self::from_u256(U256::from(value))
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self {
            negative: value < 0,
            magnitude: U256::from(value.unsigned_abs()),
        }
    }
}

impl FromStr for Integer {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text).ok_or_else(|| format!("not an integer: {:?}", text))
    }
}

// Integers travel as decimal strings; numbers and 0x-hex are accepted on input.
impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| de::Error::custom(format!("not an integer: {}", value)))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_forms_agree() {
        let dec = Integer::from_value(&json!("255")).unwrap();
        let hex = Integer::from_value(&json!("0xff")).unwrap();
        let num = Integer::from_value(&json!(255)).unwrap();
        assert_eq!(dec, hex);
        assert_eq!(dec, num);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Integer::from_value(&json!("12a")).is_none());
        assert!(Integer::from_value(&json!("0x")).is_none());
        assert!(Integer::from_value(&json!("")).is_none());
        assert!(Integer::from_value(&json!(1.5)).is_none());
        assert!(Integer::from_value(&json!(true)).is_none());
    }

    #[test]
    fn test_negative_ordering() {
        let minus_one = Integer::parse("-1").unwrap();
        let zero = Integer::parse("0").unwrap();
        let minus_two = Integer::parse("-2").unwrap();
        assert!(minus_one < zero);
        assert!(minus_two < minus_one);
        assert_eq!(Integer::parse("-0").unwrap(), zero);
    }

    #[test]
    fn test_twos_complement_roundtrip() {
        let value = Integer::parse("-12345").unwrap();
        let word = value.to_int_word(256).unwrap();
        assert_eq!(Integer::from_twos_complement(word), value);
        assert_eq!(Integer::from_twos_complement(word).to_string(), "-12345");
    }

    #[test]
    fn test_int_word_bounds() {
        assert!(Integer::parse("127").unwrap().to_int_word(8).is_some());
        assert!(Integer::parse("128").unwrap().to_int_word(8).is_none());
        assert!(Integer::parse("-128").unwrap().to_int_word(8).is_some());
        assert!(Integer::parse("-129").unwrap().to_int_word(8).is_none());
    }

    #[test]
    fn test_uint_word_bounds() {
        assert!(Integer::parse("255").unwrap().to_uint_word(8).is_some());
        assert!(Integer::parse("256").unwrap().to_uint_word(8).is_none());
        assert!(Integer::parse("-1").unwrap().to_uint_word(256).is_none());
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Integer::parse("42").unwrap().to_u64(), Some(42));
        assert_eq!(Integer::parse("-1").unwrap().to_u64(), None);
        assert_eq!(Integer::parse("18446744073709551616").unwrap().to_u64(), None);
    }

    #[test]
    fn test_serde_uses_decimal_strings() {
        let value: Integer = serde_json::from_value(json!("0x10")).unwrap();
        assert_eq!(serde_json::to_value(value).unwrap(), json!("16"));
        let negative: Integer = serde_json::from_value(json!(-5)).unwrap();
        assert_eq!(negative, Integer::from(-5i64));
        assert!(serde_json::from_value::<Integer>(json!(true)).is_err());
        assert_eq!("42".parse::<Integer>().unwrap(), Integer::from(42u64));
    }
}
