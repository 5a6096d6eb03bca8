use std::fmt;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Amount must be a non-negative integer, got {0:?}")]
    NotAnInteger(String),

    #[error("Amount {0} does not fit in 128 bits")]
    Overflow(String),
}

/// Parses a decimal-string-encoded base-unit amount ("1000000").
///
/// Only ASCII digits are accepted so that signs, exponents and fractional
/// parts are rejected instead of silently truncated.
pub fn parse_amount(input: &str) -> Result<u128, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotAnInteger(trimmed.to_string()));
    }
    trimmed
        .parse::<u128>()
        .map_err(|_| AmountError::Overflow(trimmed.to_string()))
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = u128;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
        parse_amount(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
        Ok(u128::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
        u128::try_from(v).map_err(|_| E::custom(format!("amount cannot be negative: {}", v)))
    }
}

/// `#[serde(with = "string_amount")]`: written as a decimal string, read from
/// either a string or a JSON integer.
pub mod string_amount {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapped {
        #[serde(with = "string_amount")]
        amount: u128,
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000000"), Ok(1_000_000));
        assert_eq!(parse_amount(" 42 "), Ok(42));
        assert_eq!(parse_amount("0"), Ok(0));
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        assert!(matches!(parse_amount("-5"), Err(AmountError::NotAnInteger(_))));
        assert!(matches!(parse_amount("+5"), Err(AmountError::NotAnInteger(_))));
        assert!(matches!(parse_amount("1.5"), Err(AmountError::NotAnInteger(_))));
        assert!(matches!(parse_amount("1e9"), Err(AmountError::NotAnInteger(_))));
    }

    #[test]
    fn test_parse_amount_beyond_u64() {
        let big = "340282366920938463463374607431768211455";
        assert_eq!(parse_amount(big), Ok(u128::MAX));
        assert!(matches!(
            parse_amount("340282366920938463463374607431768211456"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn test_string_amount_accepts_string_and_number() {
        let from_str: Wrapped = serde_json::from_str(r#"{"amount":"18446744073709551616"}"#).unwrap();
        assert_eq!(from_str.amount, 18_446_744_073_709_551_616);

        let from_num: Wrapped = serde_json::from_str(r#"{"amount":1500}"#).unwrap();
        assert_eq!(from_num.amount, 1500);

        assert!(serde_json::from_str::<Wrapped>(r#"{"amount":-1}"#).is_err());
        assert!(serde_json::from_str::<Wrapped>(r#"{"amount":"abc"}"#).is_err());
    }

    #[test]
    fn test_string_amount_serializes_as_string() {
        let json = serde_json::to_value(Wrapped { amount: 7 }).unwrap();
        assert_eq!(json["amount"], "7");
    }
}
