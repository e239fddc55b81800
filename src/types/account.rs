//! Account types - 계정 잔고

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 통화별 잔고
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCurrencyInfo {
    /// 통화 코드
    pub currency_name: String,
    /// 총액 (사용 가능 + 동결)
    pub total_value: Decimal,
    /// 동결 금액
    pub hold: Decimal,
}

impl AccountCurrencyInfo {
    /// 사용 가능 금액
    pub fn available(&self) -> Decimal {
        self.total_value - self.hold
    }
}

/// 계정 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub exchange_name: String,
    pub currencies: Vec<AccountCurrencyInfo>,
}

impl AccountInfo {
    pub fn currency(&self, code: &str) -> Option<&AccountCurrencyInfo> {
        self.currencies
            .iter()
            .find(|c| c.currency_name.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_lookup() {
        let info = AccountInfo {
            exchange_name: "Huobi".into(),
            currencies: vec![AccountCurrencyInfo {
                currency_name: "usdt".into(),
                total_value: dec!(10),
                hold: dec!(4),
            }],
        };
        let usdt = info.currency("USDT").unwrap();
        assert_eq!(usdt.available(), dec!(6));
        assert!(info.currency("BTC").is_none());
    }
}
