//! Funding and trade history types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyPair, OrderSide};

/// 입출금 내역
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundHistory {
    pub exchange_name: String,
    pub status: String,
    pub transfer_id: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub currency: String,
    pub amount: Decimal,
    pub fee: Decimal,
    /// "deposit" 또는 "withdrawal"
    pub transfer_type: String,
    pub crypto_to_address: Option<String>,
    pub crypto_from_address: Option<String>,
    pub crypto_tx_id: Option<String>,
}

/// 거래소 체결 내역
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistory {
    pub timestamp: DateTime<Utc>,
    pub trade_id: String,
    pub pair: CurrencyPair,
    pub price: Decimal,
    pub amount: Decimal,
    pub side: OrderSide,
}
