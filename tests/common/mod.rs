//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use exchange_base::client::{KeyHeaderSigner, MarketDataCache, MockTransport, SharedMarketCache};
use exchange_base::{Bithumb, Exchange, Huobi};
use serde_json::{json, Value};

pub fn transport() -> Arc<MockTransport> {
    Arc::new(MockTransport::new())
}

pub fn bithumb(transport: &Arc<MockTransport>, cache: SharedMarketCache) -> Bithumb {
    Bithumb::with_transport(transport.clone(), cache)
}

pub fn huobi(transport: &Arc<MockTransport>) -> Huobi {
    Huobi::with_transport(transport.clone(), MarketDataCache::shared())
}

/// 서명기와 유효한 키가 설정된 Huobi
pub fn authed_huobi(transport: &Arc<MockTransport>) -> Huobi {
    let mut exchange = huobi(transport);
    exchange.base_mut().requester.set_signer(Arc::new(KeyHeaderSigner));
    exchange.base_mut().set_api_keys("key", "secret", "");
    exchange
}

pub fn huobi_symbols(pairs: &[(&str, &str)]) -> Value {
    let data: Vec<Value> = pairs
        .iter()
        .map(|(base, quote)| json!({"base-currency": base, "quote-currency": quote}))
        .collect();
    json!({"status": "ok", "data": data})
}

pub fn huobi_merged_tick(close: f64) -> Value {
    json!({"status": "ok", "tick": {
        "close": close, "high": close + 10.0, "low": close - 10.0, "vol": 42.0,
        "bid": [close - 0.5, 1.0], "ask": [close + 0.5, 1.0]
    }})
}
