//! Exchange trait and related types

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::client::{ExchangeConfig, Websocket, DEFAULT_HTTP_TIMEOUT_MS};
use crate::errors::{BaseError, BaseResult};
use crate::exchanges::ExchangeBase;

use super::{
    AccountInfo, AssetType, CancelAllOrdersResponse, CurrencyPair, FundHistory, ModifyOrder,
    OpenOrder, OrderBook, OrderCancellation, OrderSide, OrderSubmission, SubmitOrderResponse,
    Ticker, TradeHistory, WithdrawPermissions,
};

/// 지원 거래소
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeId {
    Bithumb,
    Huobi,
}

impl ExchangeId {
    pub const ALL: [ExchangeId; 2] = [ExchangeId::Bithumb, ExchangeId::Huobi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Bithumb => "Bithumb",
            ExchangeId::Huobi => "Huobi",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExchangeId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BaseError::configuration(s, "unknown exchange"))
    }
}

/// 거래소 통합 인터페이스
///
/// 모든 거래소 구현체가 구현해야 하는 trait. 공통 상태는 [`ExchangeBase`]에 있다.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// 거래소 ID 반환
    fn id(&self) -> ExchangeId;

    /// 공통 상태
    fn base(&self) -> &ExchangeBase;

    /// 공통 상태 (수정용)
    fn base_mut(&mut self) -> &mut ExchangeBase;

    /// 거래소 이름 반환
    fn name(&self) -> &str {
        self.base().name()
    }

    // === Lifecycle ===

    /// 어댑터 기본값으로 초기화
    fn set_defaults(&mut self);

    /// 설정 적용, 비활성 설정이면 비활성화만 한다
    fn setup(&mut self, cfg: ExchangeConfig) -> BaseResult<()> {
        if !cfg.enabled {
            self.base_mut().set_enabled(false);
            return Ok(());
        }
        self.base_mut().setup_defaults(cfg)
    }

    /// 시작 시 한 번 실행 (페어 자동 갱신 등)
    async fn run(&self);

    /// 기본 설정 생성
    async fn get_default_config(&mut self) -> BaseResult<ExchangeConfig> {
        self.set_defaults();

        let base = self.base();
        let cfg = ExchangeConfig::new(base.name())
            .with_timeout(DEFAULT_HTTP_TIMEOUT_MS)
            .with_base_currencies(base.base_currencies().join(","));
        self.base_mut().setup_defaults(cfg)?;

        if self.base().supports_auto_pair_updates() {
            self.update_tradable_pairs(true).await?;
        }

        Ok(self.base().config_snapshot())
    }

    // === Pairs ===

    /// 거래 가능 페어 조회
    async fn fetch_tradable_pairs(&self, asset: AssetType) -> BaseResult<Vec<String>>;

    /// 거래 가능 페어 갱신
    async fn update_tradable_pairs(&self, force: bool) -> BaseResult<()>;

    /// 활성 페어
    fn get_enabled_pairs(&self, asset: AssetType) -> BaseResult<Vec<CurrencyPair>> {
        self.base().get_enabled_pairs(asset)
    }

    fn is_asset_type_supported(&self, asset: AssetType) -> bool {
        self.base().is_asset_type_supported(asset)
    }

    // === Market Data ===

    /// 거래소에서 시세를 가져와 캐시에 기록
    async fn update_ticker(&self, pair: &CurrencyPair, asset: AssetType) -> BaseResult<Ticker>;

    /// 캐시된 시세, 없으면 갱신
    async fn fetch_ticker(&self, pair: &CurrencyPair, asset: AssetType) -> BaseResult<Ticker> {
        let base = self.base();
        base.cache()
            .ticker_or_refresh(base.name(), pair, asset, || self.update_ticker(pair, asset))
            .await
    }

    /// 거래소에서 호가창을 가져와 캐시에 기록
    async fn update_orderbook(&self, pair: &CurrencyPair, asset: AssetType)
        -> BaseResult<OrderBook>;

    /// 캐시된 호가창, 없으면 갱신
    async fn fetch_orderbook(&self, pair: &CurrencyPair, asset: AssetType) -> BaseResult<OrderBook> {
        let base = self.base();
        base.cache()
            .orderbook_or_refresh(base.name(), pair, asset, || self.update_orderbook(pair, asset))
            .await
    }

    // === Trading ===

    /// 주문 생성
    async fn submit_order(&self, order: &OrderSubmission) -> BaseResult<SubmitOrderResponse>;

    /// 주문 취소
    async fn cancel_order(&self, cancel: &OrderCancellation) -> BaseResult<()>;

    /// 미체결 주문 목록
    async fn get_open_orders(
        &self,
        pair: &CurrencyPair,
        side: Option<OrderSide>,
    ) -> BaseResult<Vec<OpenOrder>>;

    /// 활성 페어의 미체결 주문 전체 취소
    ///
    /// 목록 조회 실패는 오류로 반환하고, 개별 취소 실패는 결과 맵에 기록한다
    async fn cancel_all_orders(&self, side: Option<OrderSide>) -> BaseResult<CancelAllOrdersResponse> {
        let mut orders = Vec::new();
        for pair in self.get_enabled_pairs(AssetType::Spot)? {
            orders.extend(self.get_open_orders(&pair, side).await?);
        }

        let mut response = CancelAllOrdersResponse::default();
        for order in orders {
            let cancel = OrderCancellation::new(order.order_id.clone(), order.pair, order.side);
            if let Err(e) = self.cancel_order(&cancel).await {
                response.order_status.insert(order.order_id, e.to_string());
            }
        }

        if !response.is_complete() {
            tracing::warn!(
                exchange = %self.name(),
                failed = response.order_status.len(),
                "some orders failed to cancel"
            );
        }
        Ok(response)
    }

    // === Account ===

    /// 잔고 조회
    async fn get_account_info(&self) -> BaseResult<AccountInfo>;

    // === Withdrawals ===

    fn supports_withdraw_permissions(&self, permissions: WithdrawPermissions) -> bool {
        self.base().supports_withdraw_permissions(permissions)
    }

    fn format_withdraw_permissions(&self) -> String {
        self.base().format_withdraw_permissions()
    }

    fn get_withdraw_capabilities(&self) -> WithdrawPermissions {
        self.base().withdraw_permissions()
    }

    fn get_websocket(&self) -> BaseResult<&Websocket> {
        self.base()
            .websocket
            .as_ref()
            .ok_or_else(|| BaseError::NotSupported {
                feature: "websocket".into(),
            })
    }

    // === Not supported by default ===

    async fn get_funding_history(&self) -> BaseResult<Vec<FundHistory>> {
        not_supported!("getFundingHistory")
    }

    async fn get_exchange_history(
        &self,
        pair: &CurrencyPair,
        asset: AssetType,
    ) -> BaseResult<Vec<TradeHistory>> {
        let _ = (pair, asset);
        not_supported!("getExchangeHistory")
    }

    async fn get_deposit_address(&self, currency: &str) -> BaseResult<String> {
        let _ = currency;
        not_supported!("getDepositAddress")
    }

    async fn withdraw_crypto(
        &self,
        address: &str,
        currency: &str,
        amount: Decimal,
    ) -> BaseResult<String> {
        let _ = (address, currency, amount);
        not_supported!("withdrawCryptocurrencyFunds")
    }

    async fn withdraw_fiat(&self, currency: &str, amount: Decimal) -> BaseResult<String> {
        let _ = (currency, amount);
        not_supported!("withdrawFiatFunds")
    }

    async fn withdraw_fiat_international(
        &self,
        currency: &str,
        amount: Decimal,
    ) -> BaseResult<String> {
        let _ = (currency, amount);
        not_supported!("withdrawFiatFundsToInternationalBank")
    }

    async fn get_order_info(&self, order_id: &str) -> BaseResult<OpenOrder> {
        let _ = order_id;
        not_supported!("getOrderInfo")
    }

    async fn modify_order(&self, action: &ModifyOrder) -> BaseResult<String> {
        let _ = action;
        not_supported!("modifyOrder")
    }
}
