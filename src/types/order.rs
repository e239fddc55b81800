//! Order type - 주문 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CurrencyPair;

/// 주문 측면
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

/// 주문 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

/// 신규 주문 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub pair: CurrencyPair,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub amount: Decimal,
    /// 지정가 주문 가격
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<Decimal>,
    /// 클라이언트 주문 ID
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub client_id: Option<String>,
}

impl OrderSubmission {
    pub fn market(pair: CurrencyPair, side: OrderSide, amount: Decimal) -> Self {
        Self {
            pair,
            side,
            order_type: OrderType::Market,
            amount,
            price: None,
            client_id: None,
        }
    }

    pub fn limit(pair: CurrencyPair, side: OrderSide, amount: Decimal, price: Decimal) -> Self {
        Self {
            pair,
            side,
            order_type: OrderType::Limit,
            amount,
            price: Some(price),
            client_id: None,
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

/// 주문 제출 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOrderResponse {
    pub order_id: String,
    pub is_order_placed: bool,
}

/// 주문 수정 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyOrder {
    pub order_id: String,
    pub pair: CurrencyPair,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub amount: Decimal,
    pub price: Decimal,
}

/// 주문 취소 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCancellation {
    pub order_id: String,
    pub pair: CurrencyPair,
    pub side: OrderSide,
    /// 계정 ID (필요한 거래소만)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub account_id: Option<String>,
}

impl OrderCancellation {
    pub fn new(order_id: impl Into<String>, pair: CurrencyPair, side: OrderSide) -> Self {
        Self {
            order_id: order_id.into(),
            pair,
            side,
            account_id: None,
        }
    }
}

/// 미체결 주문
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub order_id: String,
    pub pair: CurrencyPair,
    pub side: OrderSide,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub amount: Decimal,
    /// 미체결 잔량
    #[serde(default)]
    pub remaining: Decimal,
}

/// 전체 취소 결과, 실패한 주문 ID -> 오류 메시지
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelAllOrdersResponse {
    pub order_status: HashMap<String, String>,
}

impl CancelAllOrdersResponse {
    pub fn is_complete(&self) -> bool {
        self.order_status.is_empty()
    }
}
