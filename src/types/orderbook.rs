//! OrderBook type - 호가창

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyPair;

/// 호가 항목
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookEntry {
    /// 가격
    pub price: Decimal,
    /// 수량
    pub amount: Decimal,
}

impl OrderBookEntry {
    pub fn new(price: Decimal, amount: Decimal) -> Self {
        Self { price, amount }
    }
}

/// 호가창 스냅샷
///
/// 레벨 순서는 거래소 응답 순서를 그대로 유지한다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    /// 통화 페어
    pub pair: CurrencyPair,
    /// 매수호가
    #[serde(default)]
    pub bids: Vec<OrderBookEntry>,
    /// 매도호가
    #[serde(default)]
    pub asks: Vec<OrderBookEntry>,
    /// 캐시에 기록된 시각
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl OrderBook {
    /// 빈 호가창 생성
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            pair,
            bids: Vec::new(),
            asks: Vec::new(),
            last_updated: None,
        }
    }

    /// 첫 번째 매수호가
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.bids.first()
    }

    /// 첫 번째 매도호가
    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.asks.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_best_levels_follow_venue_order() {
        let mut ob = OrderBook::new(CurrencyPair::new("BTC", "USDT"));
        assert!(ob.best_bid().is_none());

        ob.bids.push(OrderBookEntry::new(dec!(99), dec!(1)));
        ob.bids.push(OrderBookEntry::new(dec!(100), dec!(2)));
        ob.asks.push(OrderBookEntry::new(dec!(101), dec!(3)));

        assert_eq!(ob.best_bid().map(|e| e.price), Some(dec!(99)));
        assert_eq!(ob.best_ask().map(|e| e.amount), Some(dec!(3)));
    }
}
