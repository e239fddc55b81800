//! Market data caching system
//!
//! Latest ticker and order book per (venue, pair, asset class). A snapshot is
//! only ever written by `process_ticker` / `process_orderbook` after a
//! successful fetch, so a failed refresh never clobbers the previous value.
//! Entries are never evicted.

use chrono::Utc;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{BaseError, BaseResult};
use crate::types::{AssetType, CurrencyPair, OrderBook, Ticker};

/// 캐시 키
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub exchange: String,
    pub base: String,
    pub quote: String,
    pub asset: AssetType,
}

impl SnapshotKey {
    pub fn new(exchange: &str, pair: &CurrencyPair, asset: AssetType) -> Self {
        Self {
            exchange: exchange.to_uppercase(),
            base: pair.base.to_uppercase(),
            quote: pair.quote.to_uppercase(),
            asset,
        }
    }
}

/// 캐시 통계
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 캐시 히트 수
    pub hits: u64,
    /// 캐시 미스 수
    pub misses: u64,
    /// 현재 캐시 항목 수
    pub entries: usize,
}

impl CacheStats {
    /// 캐시 히트율 계산
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// 스냅샷 저장소 (종류별 하나)
struct SnapshotStore<T> {
    kind: &'static str,
    entries: RwLock<HashMap<SnapshotKey, T>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Clone> SnapshotStore<T> {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    async fn get(&self, exchange: &str, pair: &CurrencyPair, asset: AssetType) -> BaseResult<T> {
        let key = SnapshotKey::new(exchange, pair, asset);
        let entries = self.entries.read().await;
        match entries.get(&key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Err(BaseError::CacheMiss {
                    kind: self.kind,
                    exchange: exchange.to_string(),
                    pair: pair.to_string(),
                    asset: asset.to_string(),
                })
            }
        }
    }

    async fn set(&self, key: SnapshotKey, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(key, value);
    }

    async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().await.len(),
        }
    }
}

/// 시세/호가창 캐시
pub struct MarketDataCache {
    tickers: SnapshotStore<Ticker>,
    orderbooks: SnapshotStore<OrderBook>,
}

impl MarketDataCache {
    /// 새로운 캐시 생성
    pub fn new() -> Self {
        Self {
            tickers: SnapshotStore::new("ticker"),
            orderbooks: SnapshotStore::new("orderbook"),
        }
    }

    /// 공유 캐시 생성
    pub fn shared() -> SharedMarketCache {
        Arc::new(Self::new())
    }

    /// Ticker 조회, 없으면 CacheMiss
    pub async fn get_ticker(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset: AssetType,
    ) -> BaseResult<Ticker> {
        self.tickers.get(exchange, pair, asset).await
    }

    /// OrderBook 조회, 없으면 CacheMiss
    pub async fn get_orderbook(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset: AssetType,
    ) -> BaseResult<OrderBook> {
        self.orderbooks.get(exchange, pair, asset).await
    }

    /// Ticker 저장, 갱신 시각 기록
    pub async fn process_ticker(&self, exchange: &str, mut ticker: Ticker, asset: AssetType) {
        ticker.last_updated = Some(Utc::now());
        let key = SnapshotKey::new(exchange, &ticker.pair, asset);
        self.tickers.set(key, ticker).await;
    }

    /// OrderBook 저장, 갱신 시각 기록
    pub async fn process_orderbook(&self, exchange: &str, mut orderbook: OrderBook, asset: AssetType) {
        orderbook.last_updated = Some(Utc::now());
        let key = SnapshotKey::new(exchange, &orderbook.pair, asset);
        self.orderbooks.set(key, orderbook).await;
    }

    /// 캐시에 있으면 반환, 없으면 refresh를 한 번 실행
    pub async fn ticker_or_refresh<F, Fut>(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset: AssetType,
        refresh: F,
    ) -> BaseResult<Ticker>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = BaseResult<Ticker>>,
    {
        match self.get_ticker(exchange, pair, asset).await {
            Ok(ticker) => Ok(ticker),
            Err(BaseError::CacheMiss { .. }) => refresh().await,
            Err(e) => Err(e),
        }
    }

    /// 캐시에 있으면 반환, 없으면 refresh를 한 번 실행
    pub async fn orderbook_or_refresh<F, Fut>(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset: AssetType,
        refresh: F,
    ) -> BaseResult<OrderBook>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = BaseResult<OrderBook>>,
    {
        match self.get_orderbook(exchange, pair, asset).await {
            Ok(orderbook) => Ok(orderbook),
            Err(BaseError::CacheMiss { .. }) => refresh().await,
            Err(e) => Err(e),
        }
    }

    /// Ticker 캐시 통계
    pub async fn ticker_stats(&self) -> CacheStats {
        self.tickers.stats().await
    }

    /// OrderBook 캐시 통계
    pub async fn orderbook_stats(&self) -> CacheStats {
        self.orderbooks.stats().await
    }
}

impl Default for MarketDataCache {
    fn default() -> Self {
        Self::new()
    }
}

/// 스레드 안전한 공유 캐시
pub type SharedMarketCache = Arc<MarketDataCache>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::AtomicUsize;

    fn btc_krw() -> CurrencyPair {
        CurrencyPair::new("BTC", "KRW")
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = MarketDataCache::new();
        let err = cache
            .get_ticker("Bithumb", &btc_krw(), AssetType::Spot)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CACHE_MISS");

        let mut ticker = Ticker::new(btc_krw());
        ticker.last = dec!(100);
        cache.process_ticker("Bithumb", ticker, AssetType::Spot).await;

        let cached = cache
            .get_ticker("bithumb", &CurrencyPair::new("btc", "krw"), AssetType::Spot)
            .await
            .unwrap();
        assert_eq!(cached.last, dec!(100));
        assert!(cached.last_updated.is_some());

        let stats = cache.ticker_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[tokio::test]
    async fn test_keys_are_per_asset_and_venue() {
        let cache = MarketDataCache::new();
        cache
            .process_orderbook("Huobi", OrderBook::new(btc_krw()), AssetType::Spot)
            .await;

        assert!(cache
            .get_orderbook("Huobi", &btc_krw(), AssetType::Futures)
            .await
            .is_err());
        assert!(cache
            .get_orderbook("Bithumb", &btc_krw(), AssetType::Spot)
            .await
            .is_err());
        assert!(cache
            .get_orderbook("Huobi", &btc_krw(), AssetType::Spot)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_or_refresh_skips_refresh_on_hit() {
        let cache = MarketDataCache::new();
        cache
            .process_ticker("Huobi", Ticker::new(btc_krw()), AssetType::Spot)
            .await;

        let calls = AtomicUsize::new(0);
        let result = cache
            .ticker_or_refresh("Huobi", &btc_krw(), AssetType::Spot, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BaseError::NotSupported {
                    feature: "refresh".into(),
                })
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
