//! Bithumb Exchange Implementation
//!
//! KRW 마켓 전용. 티커는 ALL 엔드포인트 한 번으로 활성 페어 전체를 갱신한다.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::client::{RateLimit, Request, Requester, SharedMarketCache, Transport};
use crate::errors::{BaseError, BaseResult};
use crate::exchanges::base::{CurrencyPairs, ExchangeBase, PairRole};
use crate::types::{
    AccountCurrencyInfo, AccountInfo, AssetType, AssetTypes, CurrencyPair, Exchange, ExchangeId,
    FeaturesEnabled, FeaturesSupported, OpenOrder, OrderBook, OrderBookEntry, OrderCancellation,
    OrderSide, OrderSubmission, OrderType, PairFormat, ProtocolFeatures, SubmitOrderResponse,
    Ticker, TradingSupported, WithdrawPermissions,
};
use crate::utils::{decimal_from_value, parse_decimal, parse_decimal_or, require_decimal};

/// Bithumb 거래소
pub struct Bithumb {
    base: ExchangeBase,
}

impl Bithumb {
    const NAME: &'static str = "Bithumb";
    const API_URL: &'static str = "https://api.bithumb.com";
    const QUOTE: &'static str = "KRW";
    const AUTH_RATE: u32 = 15;
    const UNAUTH_RATE: u32 = 20;
    const SUCCESS: &'static str = "0000";

    /// 새 Bithumb 인스턴스 생성
    pub fn new(cache: SharedMarketCache) -> BaseResult<Self> {
        let requester = Requester::new(Self::NAME, Self::auth_limit(), Self::unauth_limit())?;
        Ok(Self::with_requester(requester, cache))
    }

    /// 전송 계층을 지정하여 생성
    pub fn with_transport(transport: Arc<dyn Transport>, cache: SharedMarketCache) -> Self {
        let requester = Requester::with_transport(
            Self::NAME,
            Self::auth_limit(),
            Self::unauth_limit(),
            transport,
        );
        Self::with_requester(requester, cache)
    }

    fn with_requester(requester: Requester, cache: SharedMarketCache) -> Self {
        let mut exchange = Self {
            base: ExchangeBase::new(Self::NAME, requester, cache),
        };
        exchange.set_defaults();
        exchange
    }

    fn auth_limit() -> RateLimit {
        RateLimit::new(Duration::from_secs(1), Self::AUTH_RATE)
    }

    fn unauth_limit() -> RateLimit {
        RateLimit::new(Duration::from_secs(1), Self::UNAUTH_RATE)
    }

    /// 공개 API 호출
    async fn public_get<T: serde::de::DeserializeOwned>(&self, path: &str) -> BaseResult<T> {
        let response: BithumbResponse<T> = self
            .base
            .send_public(Request::get(self.base.endpoint(path)))
            .await?;
        response.into_data(Self::NAME)
    }

    /// 비공개 API 호출
    async fn private_post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> BaseResult<BithumbResponse<T>> {
        let mut request = Request::post(self.base.endpoint(path));
        for (key, value) in params {
            request = request.param(*key, value.clone());
        }
        self.base.send_authenticated(request).await
    }

    /// 전체 티커 (통화 코드 -> 티커)
    async fn get_all_tickers(&self) -> BaseResult<HashMap<String, BithumbTickerData>> {
        let data: serde_json::Map<String, serde_json::Value> =
            self.public_get("/public/ticker/ALL").await?;

        let mut tickers = HashMap::new();
        for (currency, value) in data {
            if currency == "date" {
                continue;
            }
            match serde_json::from_value::<BithumbTickerData>(value) {
                Ok(ticker) => {
                    tickers.insert(currency.to_uppercase(), ticker);
                }
                Err(e) => {
                    warn!(exchange = Self::NAME, currency = %currency, error = %e, "skipping malformed ticker");
                }
            }
        }
        Ok(tickers)
    }

    /// 주문 방향 -> Bithumb type 파라미터
    /// 원화 마켓만 취급
    fn ensure_krw_pair(pair: &CurrencyPair) -> BaseResult<()> {
        if pair.quote.eq_ignore_ascii_case(Self::QUOTE) {
            return Ok(());
        }
        Err(BaseError::BadSymbol {
            symbol: pair.to_string(),
        })
    }

    fn side_type(side: OrderSide) -> &'static str {
        match side {
            OrderSide::Buy => "bid",
            OrderSide::Sell => "ask",
        }
    }

    fn parse_side(side: &str) -> Option<OrderSide> {
        match side {
            "bid" => Some(OrderSide::Buy),
            "ask" => Some(OrderSide::Sell),
            _ => None,
        }
    }

    /// 잔고 응답 파싱, total_X마다 in_use_X가 있어야 한다
    fn parse_balances(
        data: &serde_json::Map<String, serde_json::Value>,
    ) -> BaseResult<Vec<AccountCurrencyInfo>> {
        let mut currencies = Vec::new();
        for (key, value) in data {
            let Some(code) = key.strip_prefix("total_") else {
                continue;
            };
            let total = decimal_from_value(value).ok_or_else(|| BaseError::ParseError {
                data_type: key.clone(),
                message: format!("invalid balance {value}"),
            })?;
            let hold = data
                .get(&format!("in_use_{code}"))
                .and_then(decimal_from_value)
                .ok_or_else(|| {
                    BaseError::BadResponse {
                        message: format!("in use item not found for currency {code}"),
                    }
                })?;

            currencies.push(AccountCurrencyInfo {
                currency_name: code.to_uppercase(),
                total_value: total,
                hold,
            });
        }
        Ok(currencies)
    }
}

#[async_trait]
impl Exchange for Bithumb {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bithumb
    }

    fn base(&self) -> &ExchangeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExchangeBase {
        &mut self.base
    }

    fn set_defaults(&mut self) {
        let base = &mut self.base;
        base.name = Self::NAME.into();
        base.enabled = true;
        base.verbose = true;
        base.withdraw_permissions =
            WithdrawPermissions::AUTO_WITHDRAW_CRYPTO | WithdrawPermissions::AUTO_WITHDRAW_FIAT;
        base.api.credentials_validator.requires_key = true;
        base.api.credentials_validator.requires_secret = true;

        base.set_currency_pairs(CurrencyPairs {
            asset_types: AssetTypes::new(vec![AssetType::Spot]),
            use_global_format: true,
            request_format: Some(PairFormat::new("", true)),
            display_format: Some(PairFormat::new("", true).with_index(Self::QUOTE)),
            ..Default::default()
        });

        base.features.supports = FeaturesSupported {
            rest: true,
            websocket: false,
            rest_capabilities: ProtocolFeatures {
                auto_pair_updates: true,
                ticker_batching: true,
            },
            trading: TradingSupported {
                spot: true,
                ..Default::default()
            },
            ..Default::default()
        };
        base.features.enabled = FeaturesEnabled {
            auto_pair_updates: true,
            websocket: false,
        };

        base.requester.set_rate_limit(true, Self::auth_limit());
        base.requester.set_rate_limit(false, Self::unauth_limit());
        base.set_default_endpoints(Self::API_URL, "");
        base.set_default_base_currencies(&[Self::QUOTE]);
    }

    async fn run(&self) {
        let base = &self.base;
        if base.verbose {
            let enabled = base.pair_strings(AssetType::Spot, PairRole::Enabled);
            info!(
                exchange = %base.name(),
                count = enabled.len(),
                pairs = %enabled.join(","),
                "currencies enabled"
            );
        }

        if !base.enabled_features().auto_pair_updates {
            return;
        }

        if let Err(e) = self.update_tradable_pairs(false).await {
            error!(exchange = %base.name(), error = %e, "failed to update tradable pairs");
        }
    }

    async fn fetch_tradable_pairs(&self, asset: AssetType) -> BaseResult<Vec<String>> {
        let _ = asset;
        let tickers = self.get_all_tickers().await?;
        let mut pairs: Vec<String> = tickers
            .keys()
            .map(|currency| format!("{currency}{}", Self::QUOTE))
            .collect();
        pairs.sort();
        Ok(pairs)
    }

    async fn update_tradable_pairs(&self, force: bool) -> BaseResult<()> {
        let pairs = self.fetch_tradable_pairs(AssetType::Spot).await?;
        self.base.update_pairs(
            &pairs,
            AssetType::Spot,
            PairRole::Available,
            force,
        )
    }

    async fn update_ticker(&self, pair: &CurrencyPair, asset: AssetType) -> BaseResult<Ticker> {
        Self::ensure_krw_pair(pair)?;
        let tickers = self.get_all_tickers().await?;

        let mut pairs = self.base.get_enabled_pairs(asset)?;
        if !pairs.contains(pair) {
            pairs.push(pair.clone());
        }

        let snapshots: Vec<Ticker> = pairs
            .into_iter()
            .filter_map(|p| {
                let data = tickers.get(&p.base.to_uppercase())?;
                Some(data.to_ticker(p))
            })
            .collect();

        let cache = self.base.cache();
        for ticker in snapshots {
            cache.process_ticker(self.base.name(), ticker, asset).await;
        }
        cache.get_ticker(self.base.name(), pair, asset).await
    }

    async fn update_orderbook(
        &self,
        pair: &CurrencyPair,
        asset: AssetType,
    ) -> BaseResult<OrderBook> {
        Self::ensure_krw_pair(pair)?;
        let path = format!("/public/orderbook/{}", pair.base.to_uppercase());
        let data: BithumbOrderBookData = self.public_get(&path).await?;

        let mut orderbook = OrderBook::new(pair.clone());
        orderbook.bids = data
            .bids
            .iter()
            .map(BithumbOrderBookEntry::to_entry)
            .collect::<BaseResult<_>>()?;
        orderbook.asks = data
            .asks
            .iter()
            .map(BithumbOrderBookEntry::to_entry)
            .collect::<BaseResult<_>>()?;

        let cache = self.base.cache();
        cache.process_orderbook(self.base.name(), orderbook, asset).await;
        cache.get_orderbook(self.base.name(), pair, asset).await
    }

    async fn submit_order(&self, order: &OrderSubmission) -> BaseResult<SubmitOrderResponse> {
        let currency = order.pair.base.to_uppercase();
        let units = order.amount.to_string();

        let response: BithumbResponse<BithumbCreateOrderData> = match order.order_type {
            OrderType::Market => {
                let path = match order.side {
                    OrderSide::Buy => "/trade/market_buy",
                    OrderSide::Sell => "/trade/market_sell",
                };
                self.private_post(path, &[("currency", currency), ("units", units)])
                    .await?
            }
            OrderType::Limit => {
                let price = order.price.ok_or_else(|| BaseError::InvalidOrder {
                    message: "limit order requires price".into(),
                })?;
                self.private_post(
                    "/trade/place",
                    &[
                        ("order_currency", currency),
                        ("payment_currency", Self::QUOTE.to_string()),
                        ("units", units),
                        ("price", price.to_string()),
                        ("type", Self::side_type(order.side).to_string()),
                    ],
                )
                .await?
            }
        };

        response.check(Self::NAME)?;
        let order_id = response
            .order_id
            .or_else(|| response.data.map(|d| d.order_id))
            .ok_or_else(|| BaseError::BadResponse {
                message: "order placed without order id".into(),
            })?;
        Ok(SubmitOrderResponse {
            order_id,
            is_order_placed: true,
        })
    }

    async fn cancel_order(&self, cancel: &OrderCancellation) -> BaseResult<()> {
        let response: BithumbResponse<serde_json::Value> = self
            .private_post(
                "/trade/cancel",
                &[
                    ("type", Self::side_type(cancel.side).to_string()),
                    ("order_id", cancel.order_id.clone()),
                    ("currency", cancel.pair.base.to_uppercase()),
                ],
            )
            .await?;
        response.check(Self::NAME)
    }

    async fn get_open_orders(
        &self,
        pair: &CurrencyPair,
        side: Option<OrderSide>,
    ) -> BaseResult<Vec<OpenOrder>> {
        let mut params = vec![
            ("currency", pair.base.to_uppercase()),
            ("count", "100".to_string()),
        ];
        if let Some(side) = side {
            params.push(("type", Self::side_type(side).to_string()));
        }

        let response: BithumbResponse<Vec<BithumbOrderData>> =
            self.private_post("/info/orders", &params).await?;

        if response.status != Self::SUCCESS && response.is_no_orders() {
            return Ok(Vec::new());
        }
        let data = response.into_data(Self::NAME)?;

        Ok(data
            .into_iter()
            .filter_map(|o| {
                let side = Self::parse_side(&o.order_type)?;
                let quote = if o.payment_currency.is_empty() {
                    Self::QUOTE.to_string()
                } else {
                    o.payment_currency.clone()
                };
                let base = if o.order_currency.is_empty() {
                    pair.base.clone()
                } else {
                    o.order_currency.clone()
                };
                let amount = parse_decimal_or(&o.units, Decimal::ZERO);
                Some(OpenOrder {
                    order_id: o.order_id,
                    pair: CurrencyPair::new(base, quote),
                    side,
                    order_type: Some(OrderType::Limit),
                    price: parse_decimal_or(&o.price, Decimal::ZERO),
                    amount,
                    remaining: o
                        .units_remaining
                        .as_deref()
                        .and_then(parse_decimal)
                        .unwrap_or(amount),
                })
            })
            .collect())
    }

    async fn get_account_info(&self) -> BaseResult<AccountInfo> {
        let response: BithumbResponse<serde_json::Map<String, serde_json::Value>> = self
            .private_post("/info/balance", &[("currency", "ALL".to_string())])
            .await?;
        let data = response.into_data(Self::NAME)?;

        Ok(AccountInfo {
            exchange_name: self.base.name().to_string(),
            currencies: Self::parse_balances(&data)?,
        })
    }
}

// === Bithumb API Response Types ===

#[derive(Debug, Deserialize)]
struct BithumbResponse<T> {
    status: String,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
    /// 주문 API는 order_id를 data 밖에 둔다
    #[serde(default)]
    order_id: Option<String>,
}

impl<T> BithumbResponse<T> {
    fn check(&self, exchange: &str) -> BaseResult<()> {
        if self.status != Bithumb::SUCCESS {
            return Err(BaseError::exchange(
                exchange,
                format!(
                    "status {}: {}",
                    self.status,
                    self.message.as_deref().unwrap_or_default()
                ),
            ));
        }
        Ok(())
    }

    fn into_data(self, exchange: &str) -> BaseResult<T> {
        self.check(exchange)?;
        self.data.ok_or_else(|| BaseError::BadResponse {
            message: "No data in response".into(),
        })
    }

    fn is_no_orders(&self) -> bool {
        self.message
            .as_deref()
            .map(|m| m.contains("존재하지 않습니다"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Deserialize, Default)]
struct BithumbTickerData {
    #[serde(default)]
    closing_price: String,
    #[serde(default)]
    min_price: String,
    #[serde(default)]
    max_price: String,
    #[serde(default, alias = "units_traded_24h")]
    volume_1day: String,
    #[serde(default)]
    buy_price: String,
    #[serde(default)]
    sell_price: String,
}

impl BithumbTickerData {
    fn to_ticker(&self, pair: CurrencyPair) -> Ticker {
        let mut ticker = Ticker::new(pair);
        ticker.ask = parse_decimal_or(&self.sell_price, Decimal::ZERO);
        ticker.bid = parse_decimal_or(&self.buy_price, Decimal::ZERO);
        ticker.low = parse_decimal_or(&self.min_price, Decimal::ZERO);
        ticker.last = parse_decimal_or(&self.closing_price, Decimal::ZERO);
        ticker.volume = parse_decimal_or(&self.volume_1day, Decimal::ZERO);
        ticker.high = parse_decimal_or(&self.max_price, Decimal::ZERO);
        ticker
    }
}

#[derive(Debug, Deserialize)]
struct BithumbOrderBookData {
    #[serde(default)]
    bids: Vec<BithumbOrderBookEntry>,
    #[serde(default)]
    asks: Vec<BithumbOrderBookEntry>,
}

#[derive(Debug, Deserialize)]
struct BithumbOrderBookEntry {
    price: String,
    quantity: String,
}

impl BithumbOrderBookEntry {
    fn to_entry(&self) -> BaseResult<OrderBookEntry> {
        Ok(OrderBookEntry::new(
            require_decimal("price", &self.price)?,
            require_decimal("quantity", &self.quantity)?,
        ))
    }
}

#[derive(Debug, Deserialize, Default)]
struct BithumbOrderData {
    #[serde(default)]
    order_id: String,
    #[serde(default, rename = "type")]
    order_type: String,
    #[serde(default)]
    order_currency: String,
    #[serde(default)]
    payment_currency: String,
    #[serde(default, alias = "order_price")]
    price: String,
    #[serde(default, alias = "order_qty")]
    units: String,
    #[serde(default)]
    units_remaining: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BithumbCreateOrderData {
    #[serde(default)]
    order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{KeyHeaderSigner, MarketDataCache, MockTransport};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn bithumb(transport: Arc<MockTransport>) -> Bithumb {
        Bithumb::with_transport(transport, MarketDataCache::shared())
    }

    fn all_tickers() -> serde_json::Value {
        json!({
            "status": "0000",
            "data": {
                "BTC": {
                    "opening_price": "50000000",
                    "closing_price": "51000000",
                    "min_price": "49000000",
                    "max_price": "52000000",
                    "volume_1day": "120.5",
                    "buy_price": "50990000",
                    "sell_price": "51010000"
                },
                "ETH": {
                    "closing_price": "3000000",
                    "buy_price": "2999000",
                    "sell_price": "3001000"
                },
                "date": "1561000000000"
            }
        })
    }

    #[test]
    fn test_defaults() {
        let exchange = bithumb(Arc::new(MockTransport::new()));
        let base = exchange.base();

        assert_eq!(exchange.id(), ExchangeId::Bithumb);
        assert_eq!(exchange.name(), "Bithumb");
        assert!(base.supports_rest_ticker_batch_updates());
        assert!(!base.supports_websocket());
        assert_eq!(
            exchange.format_withdraw_permissions(),
            "AUTO WITHDRAW CRYPTO & AUTO WITHDRAW FIAT"
        );
        assert_eq!(
            base.format_exchange_currency(&CurrencyPair::new("btc", "krw"), AssetType::Spot)
                .unwrap(),
            "BTCKRW"
        );
    }

    #[tokio::test]
    async fn test_fetch_tradable_pairs_appends_krw() {
        let transport = Arc::new(MockTransport::new());
        transport.on_get("/public/ticker/ALL", all_tickers());

        let pairs = bithumb(transport)
            .fetch_tradable_pairs(AssetType::Spot)
            .await
            .unwrap();
        assert_eq!(pairs, vec!["BTCKRW", "ETHKRW"]);
    }

    #[tokio::test]
    async fn test_update_ticker_maps_all_enabled_pairs() {
        let transport = Arc::new(MockTransport::new());
        transport.on_get("/public/ticker/ALL", all_tickers());
        let exchange = bithumb(transport.clone());
        exchange
            .base()
            .update_pairs(&["BTCKRW".into(), "ETHKRW".into()], AssetType::Spot, PairRole::Enabled, false)
            .unwrap();

        let btc = CurrencyPair::new("BTC", "KRW");
        let ticker = exchange.update_ticker(&btc, AssetType::Spot).await.unwrap();
        assert_eq!(ticker.ask, dec!(51010000));
        assert_eq!(ticker.bid, dec!(50990000));
        assert_eq!(ticker.last, dec!(51000000));
        assert_eq!(ticker.volume, dec!(120.5));
        assert!(ticker.last_updated.is_some());

        let eth = exchange
            .base()
            .cache()
            .get_ticker("Bithumb", &CurrencyPair::new("ETH", "KRW"), AssetType::Spot)
            .await
            .unwrap();
        assert_eq!(eth.last, dec!(3000000));
        assert_eq!(transport.calls("/public/ticker/ALL"), 1);
    }

    #[tokio::test]
    async fn test_update_orderbook_keeps_venue_order() {
        let transport = Arc::new(MockTransport::new());
        transport.on_get(
            "/public/orderbook/BTC",
            json!({
                "status": "0000",
                "data": {
                    "timestamp": "1561000000000",
                    "bids": [
                        {"price": "50990000", "quantity": "0.5"},
                        {"price": "50980000", "quantity": "1.0"}
                    ],
                    "asks": [{"price": "51010000", "quantity": "0.2"}]
                }
            }),
        );

        let exchange = bithumb(transport);
        let pair = CurrencyPair::new("BTC", "KRW");
        let book = exchange.update_orderbook(&pair, AssetType::Spot).await.unwrap();
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.bids[0].price, dec!(50990000));
        assert_eq!(book.asks[0].amount, dec!(0.2));
    }

    #[tokio::test]
    async fn test_exchange_error_status() {
        let transport = Arc::new(MockTransport::new());
        transport.on_get(
            "/public/orderbook/XYZ",
            json!({"status": "5500", "message": "Invalid Parameter"}),
        );

        let err = bithumb(transport)
            .update_orderbook(&CurrencyPair::new("XYZ", "KRW"), AssetType::Spot)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EXCHANGE_ERROR");
        assert!(err.to_string().contains("Invalid Parameter"));
    }

    #[tokio::test]
    async fn test_non_krw_pair_rejected_before_request() {
        let transport = Arc::new(MockTransport::new());
        transport.on_get("/public/ticker/ALL", all_tickers());
        transport.on_get(
            "/public/orderbook/BTC",
            json!({"status": "0000", "data": {"bids": [], "asks": []}}),
        );
        let exchange = bithumb(transport.clone());
        let usdt = CurrencyPair::new("BTC", "USDT");

        let err = exchange.update_ticker(&usdt, AssetType::Spot).await.unwrap_err();
        assert_eq!(err.code(), "BAD_SYMBOL");
        let err = exchange.update_orderbook(&usdt, AssetType::Spot).await.unwrap_err();
        assert_eq!(err.code(), "BAD_SYMBOL");
        assert!(transport.requests().is_empty());

        let cached = exchange
            .base()
            .cache()
            .get_ticker("Bithumb", &usdt, AssetType::Spot)
            .await;
        assert!(cached.is_err());
    }

    #[test]
    fn test_response_without_data_field() {
        let response: BithumbResponse<BithumbOrderBookData> =
            serde_json::from_str(r#"{"status": "0000", "order_id": "C1"}"#).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.order_id.as_deref(), Some("C1"));
        assert!(response.into_data("Bithumb").is_err());
    }

    #[test]
    fn test_parse_balances_requires_in_use() {
        let data = json!({
            "total_btc": "1.5",
            "in_use_btc": "0.5",
            "available_btc": "1.0",
            "total_krw": 1000000,
            "in_use_krw": 0
        });
        let balances = Bithumb::parse_balances(data.as_object().unwrap()).unwrap();
        assert_eq!(balances.len(), 2);
        let btc = balances.iter().find(|b| b.currency_name == "BTC").unwrap();
        assert_eq!(btc.total_value, dec!(1.5));
        assert_eq!(btc.available(), dec!(1.0));

        let missing = json!({"total_eth": "2"});
        let err = Bithumb::parse_balances(missing.as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("in use item not found for currency eth"));
    }

    #[tokio::test]
    async fn test_submit_market_order() {
        let transport = Arc::new(MockTransport::new());
        transport.on_post(
            "/trade/market_buy",
            json!({"status": "0000", "order_id": "C0101000000001"}),
        );
        let mut exchange = bithumb(transport.clone());
        exchange.base_mut().requester.set_signer(Arc::new(KeyHeaderSigner));
        exchange.base_mut().set_api_keys("key", "secret", "");

        let order = OrderSubmission::market(CurrencyPair::new("BTC", "KRW"), OrderSide::Buy, dec!(0.01));
        let response = exchange.submit_order(&order).await.unwrap();
        assert!(response.is_order_placed);
        assert_eq!(response.order_id, "C0101000000001");

        let request = &transport.requests()[0];
        assert!(request.authenticated);
        assert_eq!(request.param_value("currency"), Some("BTC"));
        assert_eq!(request.param_value("units"), Some("0.01"));
    }

    #[tokio::test]
    async fn test_authenticated_call_rejected_without_credentials() {
        let transport = Arc::new(MockTransport::new());
        let exchange = bithumb(transport.clone());

        let err = exchange.get_account_info().await.unwrap_err();
        assert!(err.is_auth_error());
        assert!(transport.requests().is_empty());
    }
}
