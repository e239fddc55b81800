//! Parse utilities for venue payloads and persisted lists

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{BaseError, BaseResult};

/// Parse Decimal from string with fallback
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

/// Parse Decimal with default value
pub fn parse_decimal_or(value: &str, default: Decimal) -> Decimal {
    parse_decimal(value).unwrap_or(default)
}

/// Parse Decimal, failing with a ParseError naming the field
pub fn require_decimal(field: &str, value: &str) -> BaseResult<Decimal> {
    parse_decimal(value).ok_or_else(|| BaseError::ParseError {
        data_type: field.to_string(),
        message: format!("invalid decimal {value:?}"),
    })
}

/// Decimal from a JSON float (venues that send numbers instead of strings)
pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::from_str(&value.to_string()).unwrap_or_default()
}

/// Decimal from a JSON string or number
pub fn decimal_from_value(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::String(s) => parse_decimal(s),
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}

/// 콤마 구분 문자열을 목록으로, 빈 항목은 제외
pub fn split_list(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("123.45"), Some(dec!(123.45)));
        assert_eq!(parse_decimal(" 1e-3 "), Some(dec!(0.001)));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal_or("abc", Decimal::ZERO), Decimal::ZERO);
        assert!(require_decimal("closing_price", "x").is_err());
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(decimal_from_f64(0.25), dec!(0.25));
        assert_eq!(decimal_from_f64(6500.0), dec!(6500));
    }

    #[test]
    fn test_decimal_from_value() {
        assert_eq!(decimal_from_value(&serde_json::json!("0.5")), Some(dec!(0.5)));
        assert_eq!(decimal_from_value(&serde_json::json!(12)), Some(dec!(12)));
        assert_eq!(decimal_from_value(&serde_json::json!(null)), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("BTC-USDT, ETH-USDT,,"), vec!["BTC-USDT", "ETH-USDT"]);
        assert!(split_list("").is_empty());
    }
}
