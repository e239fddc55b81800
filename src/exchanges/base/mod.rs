//! Shared exchange base
//!
//! Every venue adapter embeds an [`ExchangeBase`]. It owns the adapter's
//! capability defaults, the reconciled [`ExchangeConfig`], the pair sets and
//! the HTTP requester. Pair sets and the config record sit behind
//! `parking_lot` locks so the synchronizer can run from `&self`; guards are
//! never held across an `.await`.

mod credentials;
mod pairs;
mod setup;

pub use pairs::PairRole;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::{
    Credentials, CredentialsValidator, ExchangeConfig, Request, Requester, SharedMarketCache,
    Transport, Websocket,
};
use crate::errors::{BaseError, BaseResult};
use crate::types::{
    AssetType, AssetTypes, Features, FeaturesEnabled, FeaturesSupported, PairFormat,
    WithdrawPermissions,
};

/// API 엔드포인트 (기본값 + 실제 사용값)
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    pub url: String,
    pub url_default: String,
    pub url_secondary: String,
    pub url_secondary_default: String,
    pub websocket_url: String,
}

/// API 설정
#[derive(Debug, Clone, Default)]
pub struct ApiSettings {
    pub authenticated_support: bool,
    pub pem_key_support: bool,
    pub credentials: Credentials,
    pub credentials_validator: CredentialsValidator,
    pub endpoints: Endpoints,
}

/// 자산 클래스별 페어 목록과 포맷
#[derive(Debug, Clone, Default)]
pub struct PairStore {
    pub request_format: Option<PairFormat>,
    pub display_format: Option<PairFormat>,
    pub enabled: Vec<String>,
    pub available: Vec<String>,
}

/// 페어 포맷 규칙과 페어 목록
#[derive(Debug, Clone, Default)]
pub struct CurrencyPairs {
    pub asset_types: AssetTypes,
    /// true면 모든 자산 클래스에 전역 포맷 하나를 사용
    pub use_global_format: bool,
    pub request_format: Option<PairFormat>,
    pub display_format: Option<PairFormat>,
    pub spot: Option<PairStore>,
    pub futures: Option<PairStore>,
    /// 마지막 페어 갱신 시각 (unix 초)
    pub last_updated: i64,
}

impl CurrencyPairs {
    pub fn store(&self, asset: AssetType) -> Option<&PairStore> {
        match asset {
            AssetType::Spot => self.spot.as_ref(),
            AssetType::Futures => self.futures.as_ref(),
        }
    }

    pub fn store_mut(&mut self, asset: AssetType) -> &mut PairStore {
        match asset {
            AssetType::Spot => self.spot.get_or_insert_with(Default::default),
            AssetType::Futures => self.futures.get_or_insert_with(Default::default),
        }
    }
}

/// 거래소 공통 상태
pub struct ExchangeBase {
    pub name: String,
    pub enabled: bool,
    pub verbose: bool,
    pub loaded_by_config: bool,
    pub http_user_agent: String,
    pub api: ApiSettings,
    pub features: Features,
    pub withdraw_permissions: WithdrawPermissions,
    pub requester: Requester,
    pub websocket: Option<Websocket>,
    base_currencies: RwLock<Vec<String>>,
    currency_pairs: RwLock<CurrencyPairs>,
    config: RwLock<ExchangeConfig>,
    dirty: AtomicBool,
    cache: SharedMarketCache,
}

impl ExchangeBase {
    /// 새 베이스 생성, 기능 기본값은 어댑터가 채운다
    pub fn new(name: impl Into<String>, requester: Requester, cache: SharedMarketCache) -> Self {
        let name = name.into();
        Self {
            config: RwLock::new(ExchangeConfig::new(name.clone())),
            name,
            enabled: false,
            verbose: false,
            loaded_by_config: false,
            http_user_agent: String::new(),
            api: ApiSettings::default(),
            features: Features::default(),
            withdraw_permissions: WithdrawPermissions::NONE,
            requester,
            websocket: None,
            base_currencies: RwLock::new(Vec::new()),
            currency_pairs: RwLock::new(CurrencyPairs::default()),
            dirty: AtomicBool::new(false),
            cache,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 공유 캐시
    pub fn cache(&self) -> &SharedMarketCache {
        &self.cache
    }

    /// 전송 계층 교체
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.requester.set_transport(transport);
    }

    // === Capability defaults ===

    /// 어댑터 기본 페어 포맷/자산 클래스 설정
    pub fn set_currency_pairs(&mut self, pairs: CurrencyPairs) {
        *self.currency_pairs.get_mut() = pairs;
    }

    /// 현재 페어 상태 복사본
    pub fn currency_pairs(&self) -> CurrencyPairs {
        self.currency_pairs.read().clone()
    }

    /// 기준 URL 기본값 설정
    pub fn set_default_endpoints(&mut self, url: &str, url_secondary: &str) {
        self.api.endpoints.url_default = url.to_string();
        self.api.endpoints.url = url.to_string();
        self.api.endpoints.url_secondary_default = url_secondary.to_string();
        self.api.endpoints.url_secondary = url_secondary.to_string();
    }

    // === Config record ===

    /// 조정된 설정 복사본
    pub fn config_snapshot(&self) -> ExchangeConfig {
        self.config.read().clone()
    }

    /// 설정을 수정하고 저장 대상으로 표시
    pub fn update_config<F>(&self, f: F)
    where
        F: FnOnce(&mut ExchangeConfig),
    {
        let mut config = self.config.write();
        f(&mut config);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// 저장이 필요한지 확인하고 플래그 초기화
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub(crate) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // === Base currencies ===

    pub fn base_currencies(&self) -> Vec<String> {
        self.base_currencies.read().clone()
    }

    /// 어댑터 기본 기준 통화
    pub fn set_default_base_currencies(&mut self, currencies: &[&str]) {
        *self.base_currencies.get_mut() = currencies.iter().map(|c| c.to_string()).collect();
    }

    /// 기준 통화 변경 (설정에도 반영)
    pub fn set_base_currencies(&self, currencies: Vec<String>) {
        let joined = currencies.join(",");
        *self.base_currencies.write() = currencies;
        self.update_config(|cfg| cfg.base_currencies = joined);
    }

    // === Features ===

    pub fn supported_features(&self) -> FeaturesSupported {
        self.features.supports
    }

    pub fn enabled_features(&self) -> FeaturesEnabled {
        self.features.enabled
    }

    pub fn supports_rest(&self) -> bool {
        self.features.supports.rest
    }

    pub fn supports_websocket(&self) -> bool {
        self.features.supports.websocket
    }

    pub fn supports_auto_pair_updates(&self) -> bool {
        self.features.supports.auto_pair_updates()
    }

    pub fn supports_rest_ticker_batch_updates(&self) -> bool {
        self.features.supports.rest_capabilities.ticker_batching
    }

    pub fn is_websocket_enabled(&self) -> bool {
        self.websocket.as_ref().map(Websocket::is_enabled).unwrap_or(false)
    }

    pub fn last_pairs_update_time(&self) -> i64 {
        self.currency_pairs.read().last_updated
    }

    // === Assets ===

    pub fn asset_types(&self) -> AssetTypes {
        self.currency_pairs.read().asset_types.clone()
    }

    pub fn is_asset_type_supported(&self, asset: AssetType) -> bool {
        self.currency_pairs.read().asset_types.contains(asset)
    }

    // === Endpoints ===

    pub fn api_url(&self) -> &str {
        &self.api.endpoints.url
    }

    /// 기본 URL + path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api.endpoints.url, path)
    }

    // === Withdraw permissions ===

    pub fn withdraw_permissions(&self) -> WithdrawPermissions {
        self.withdraw_permissions
    }

    /// 요청한 출금 방식을 모두 지원하는지
    pub fn supports_withdraw_permissions(&self, permissions: WithdrawPermissions) -> bool {
        self.withdraw_permissions.contains(permissions)
    }

    /// 출금 방식 텍스트
    pub fn format_withdraw_permissions(&self) -> String {
        self.withdraw_permissions.to_string()
    }

    // === Requests ===

    /// 공개 API 호출
    pub async fn send_public<T: DeserializeOwned>(&self, request: Request) -> BaseResult<T> {
        self.requester
            .send_json(request, &self.api.credentials)
            .await
    }

    /// 인증 API 호출, 인증 정보가 유효하지 않으면 전송하지 않는다
    pub async fn send_authenticated<T: DeserializeOwned>(&self, request: Request) -> BaseResult<T> {
        if !self.allow_authenticated_request() {
            return Err(BaseError::CredentialError {
                exchange: self.name.clone(),
                message: "authenticated requests are not allowed with the current credentials"
                    .into(),
            });
        }
        self.requester
            .send_json(request.authenticated(), &self.api.credentials)
            .await
    }
}

impl std::fmt::Debug for ExchangeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeBase")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("loaded_by_config", &self.loaded_by_config)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::client::{MarketDataCache, RateLimit};
    use crate::types::{ProtocolFeatures, TradingSupported};
    use async_trait::async_trait;

    pub(crate) struct NoopTransport;

    #[async_trait]
    impl Transport for NoopTransport {
        async fn send(&self, _request: Request) -> BaseResult<serde_json::Value> {
            Ok(serde_json::Value::Null)
        }
    }

    /// 스팟 전용, 전역 포맷 "-" 대문자 베이스
    pub(crate) fn spot_base() -> ExchangeBase {
        let requester = Requester::with_transport(
            "TestEx",
            RateLimit::new(std::time::Duration::from_secs(1), 10),
            RateLimit::new(std::time::Duration::from_secs(1), 20),
            Arc::new(NoopTransport),
        );
        let mut base = ExchangeBase::new("TestEx", requester, MarketDataCache::shared());
        base.api.credentials_validator.requires_key = true;
        base.api.credentials_validator.requires_secret = true;
        base.set_default_endpoints("https://api.test.example", "");
        base.features.supports = FeaturesSupported {
            rest: true,
            rest_capabilities: ProtocolFeatures {
                auto_pair_updates: true,
                ticker_batching: false,
            },
            trading: TradingSupported {
                spot: true,
                ..Default::default()
            },
            ..Default::default()
        };
        base.features.enabled.auto_pair_updates = true;
        base.set_currency_pairs(CurrencyPairs {
            asset_types: AssetTypes::new(vec![AssetType::Spot]),
            use_global_format: true,
            request_format: Some(PairFormat::new("", false)),
            display_format: Some(PairFormat::new("-", true)),
            ..Default::default()
        });
        base
    }
}
