//! Exchange Implementations
//!
//! 거래소별 구현체

pub mod base;
pub mod foreign;
pub mod korean;

pub use base::{ApiSettings, CurrencyPairs, Endpoints, ExchangeBase, PairRole, PairStore};
pub use foreign::Huobi;
pub use korean::Bithumb;

use std::sync::Arc;

use crate::client::{SharedMarketCache, Transport};
use crate::errors::BaseResult;
use crate::types::{Exchange, ExchangeId};

/// ID로 어댑터 생성 (HTTP 클라이언트 포함)
pub fn create_exchange(id: ExchangeId, cache: SharedMarketCache) -> BaseResult<Box<dyn Exchange>> {
    Ok(match id {
        ExchangeId::Bithumb => Box::new(Bithumb::new(cache)?),
        ExchangeId::Huobi => Box::new(Huobi::new(cache)?),
    })
}

/// 전송 계층을 지정하여 어댑터 생성
pub fn create_exchange_with_transport(
    id: ExchangeId,
    transport: Arc<dyn Transport>,
    cache: SharedMarketCache,
) -> Box<dyn Exchange> {
    match id {
        ExchangeId::Bithumb => Box::new(Bithumb::with_transport(transport, cache)),
        ExchangeId::Huobi => Box::new(Huobi::with_transport(transport, cache)),
    }
}
