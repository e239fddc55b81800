//! Ticker type - 시세 정보

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyPair;

/// 시세 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    /// 통화 페어
    pub pair: CurrencyPair,
    /// 최고 매수호가
    #[serde(default)]
    pub bid: Decimal,
    /// 최저 매도호가
    #[serde(default)]
    pub ask: Decimal,
    /// 최종 거래가
    #[serde(default)]
    pub last: Decimal,
    /// 고가
    #[serde(default)]
    pub high: Decimal,
    /// 저가
    #[serde(default)]
    pub low: Decimal,
    /// 거래량
    #[serde(default)]
    pub volume: Decimal,
    /// 캐시에 기록된 시각
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Ticker {
    /// 새 Ticker 생성
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            pair,
            bid: Decimal::ZERO,
            ask: Decimal::ZERO,
            last: Decimal::ZERO,
            high: Decimal::ZERO,
            low: Decimal::ZERO,
            volume: Decimal::ZERO,
            last_updated: None,
        }
    }

    /// 스프레드 (ask - bid)
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// 중간가
    pub fn mid_price(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_spread_and_mid() {
        let mut ticker = Ticker::new(CurrencyPair::new("BTC", "KRW"));
        ticker.bid = dec!(100);
        ticker.ask = dec!(102);
        assert_eq!(ticker.spread(), dec!(2));
        assert_eq!(ticker.mid_price(), dec!(101));
        assert!(ticker.last_updated.is_none());
    }
}
