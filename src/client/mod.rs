//! HTTP client, config persistence and market data cache

mod cache;
mod config;
mod http;
mod mock;
mod rate_limiter;
mod store;
mod websocket;

pub use cache::{CacheStats, MarketDataCache, SharedMarketCache, SnapshotKey};
pub use config::{
    ApiConfig, ConfigFile, CredentialsValidator, Credentials, CurrencyPairConfig,
    CurrencyPairsConfig, EndpointsConfig, ExchangeConfig, HttpRateLimitConfig, RateLimitConfig,
    API_URL_NON_DEFAULT_MESSAGE, DEFAULT_API_CLIENT_ID, DEFAULT_API_KEY, DEFAULT_API_SECRET,
    DEFAULT_HTTP_TIMEOUT_MS, DUMMY_PEM_MARKER,
};
pub use http::{HttpClient, HttpMethod, HttpSettings, Request, RequestSigner, Requester, Transport};
pub use mock::{KeyHeaderSigner, MockTransport};
pub use rate_limiter::{RateLimit, RateLimiter};
pub use store::{ConfigStore, MemoryConfigStore, TomlConfigStore};
pub use websocket::{ConnectionState, Websocket};
