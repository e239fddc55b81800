//! exchange-base: shared exchange base for cryptocurrency venue adapters
//!
//! 설정 병합, 페어 동기화, 시세 캐시와 Bithumb / Huobi 어댑터

#[macro_use]
mod macros;

pub mod client;
pub mod engine;
pub mod errors;
pub mod exchanges;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{ConfigStore, ExchangeConfig, MarketDataCache, SharedMarketCache, TomlConfigStore};
pub use engine::Engine;
pub use errors::{BaseError, BaseResult};
pub use exchanges::{create_exchange, Bithumb, ExchangeBase, Huobi};
pub use types::{AssetType, CurrencyPair, Exchange, ExchangeId};
