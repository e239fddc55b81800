//! Persisted exchange configuration
//!
//! Every section derives `serde` with `#[serde(default)]` so partially filled
//! TOML files load; missing optional sections are filled in by the reconciler
//! in `exchanges::base::setup` and written back.

use serde::{Deserialize, Serialize};

use crate::errors::{BaseError, BaseResult};
use crate::types::{AssetType, Features, PairFormat};
use crate::utils::LoggingConfig;

/// 미설정 API 키 기본값
pub const DEFAULT_API_KEY: &str = "Key";
/// 미설정 API 시크릿 기본값
pub const DEFAULT_API_SECRET: &str = "Secret";
/// 미설정 클라이언트 ID 기본값
pub const DEFAULT_API_CLIENT_ID: &str = "ClientID";
/// 더미 PEM 키 표식
pub const DUMMY_PEM_MARKER: &str = "JUSTADUMMY";
/// 어댑터 기본 URL을 사용하라는 표식
pub const API_URL_NON_DEFAULT_MESSAGE: &str = "NON_DEFAULT_HTTP_LINK_TO_EXCHANGE_API";
/// 기본 HTTP 타임아웃 (밀리초)
pub const DEFAULT_HTTP_TIMEOUT_MS: i64 = 15_000;

/// API 인증 정보
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
    pub client_id: String,
    pub pem_key: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// 기본값(미설정 표식)으로 채운 인증 정보
    pub fn placeholder() -> Self {
        Self {
            key: DEFAULT_API_KEY.into(),
            secret: DEFAULT_API_SECRET.into(),
            client_id: DEFAULT_API_CLIENT_ID.into(),
            pem_key: String::new(),
        }
    }
}

/// 인증 정보 요구 조건 (어댑터가 결정)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsValidator {
    pub requires_key: bool,
    pub requires_secret: bool,
    pub requires_client_id: bool,
    pub requires_pem: bool,
    pub requires_base64_decode_secret: bool,
}

/// API 엔드포인트
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub url: String,
    pub url_secondary: String,
    pub websocket_url: String,
}

/// API 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub authenticated_support: bool,
    pub pem_key_support: bool,
    pub credentials: Credentials,
    pub credentials_validator: CredentialsValidator,
    pub endpoints: EndpointsConfig,
}

/// 레이트 리밋 (duration 동안 rate 회)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub duration_ms: u64,
    pub rate: u32,
}

/// 인증/비인증 요청별 레이트 리밋
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpRateLimitConfig {
    pub authenticated: RateLimitConfig,
    pub unauthenticated: RateLimitConfig,
}

/// 자산 클래스별 페어 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyPairConfig {
    /// 활성 페어 (콤마 구분)
    pub enabled: String,
    /// 거래 가능 페어 (콤마 구분)
    pub available: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_format: Option<PairFormat>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "config_format")]
    pub display_format: Option<PairFormat>,
}

/// 페어 설정 전체
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyPairsConfig {
    /// 지원 자산 클래스 (콤마 구분)
    pub asset_types: String,
    /// 마지막 페어 갱신 시각 (unix 초)
    pub last_updated: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_format: Option<PairFormat>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "config_format")]
    pub display_format: Option<PairFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<CurrencyPairConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub futures: Option<CurrencyPairConfig>,
}

impl CurrencyPairsConfig {
    pub fn asset(&self, asset: AssetType) -> Option<&CurrencyPairConfig> {
        match asset {
            AssetType::Spot => self.spot.as_ref(),
            AssetType::Futures => self.futures.as_ref(),
        }
    }

    /// 자산 클래스 설정, 없으면 생성
    pub fn asset_mut(&mut self, asset: AssetType) -> &mut CurrencyPairConfig {
        match asset {
            AssetType::Spot => self.spot.get_or_insert_with(Default::default),
            AssetType::Futures => self.futures.get_or_insert_with(Default::default),
        }
    }
}

/// 거래소 설정 (영속 레코드)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub name: String,
    pub enabled: bool,
    pub verbose: bool,
    /// HTTP 타임아웃 (밀리초), 0 이하는 미설정
    pub http_timeout_ms: i64,
    pub http_user_agent: String,
    pub proxy_address: String,
    /// 기준 통화 (콤마 구분)
    pub base_currencies: String,
    /// 구버전 설정의 자동 페어 갱신 플래그
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_auto_pair_updates: Option<bool>,
    pub api: ApiConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_pairs: Option<CurrencyPairsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_rate_limiter: Option<HttpRateLimitConfig>,
}

impl ExchangeConfig {
    /// 새 설정 생성 (활성 상태)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            ..Default::default()
        }
    }

    /// 활성 여부 설정
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// 상세 로그 설정
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 타임아웃 설정 (밀리초)
    pub fn with_timeout(mut self, timeout_ms: i64) -> Self {
        self.http_timeout_ms = timeout_ms;
        self
    }

    /// User-Agent 설정
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_user_agent = user_agent.into();
        self
    }

    /// 프록시 설정
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy_address = proxy.into();
        self
    }

    /// 기준 통화 설정
    pub fn with_base_currencies(mut self, currencies: impl Into<String>) -> Self {
        self.base_currencies = currencies.into();
        self
    }

    /// 인증 정보로 설정
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api.authenticated_support = true;
        self.api.credentials.key = api_key.into();
        self.api.credentials.secret = api_secret.into();
        self
    }

    /// 기본 URL 덮어쓰기
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api.endpoints.url = url.into();
        self
    }

    /// 페어 목록 설정 (콤마 구분 문자열로 저장)
    pub fn with_pairs(mut self, asset: AssetType, enabled: &[&str], available: &[&str]) -> Self {
        let pairs = self
            .currency_pairs
            .get_or_insert_with(Default::default)
            .asset_mut(asset);
        pairs.enabled = enabled.join(",");
        pairs.available = available.join(",");
        self
    }

    /// 페어 설정, 없으면 생성
    pub fn currency_pairs_mut(&mut self) -> &mut CurrencyPairsConfig {
        self.currency_pairs.get_or_insert_with(Default::default)
    }

    /// 기능 설정 (없으면 오류)
    pub fn features(&self) -> BaseResult<&Features> {
        self.features
            .as_ref()
            .ok_or_else(|| BaseError::configuration(&self.name, "features section is not set"))
    }
}

/// 설정 파일 루트
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub logging: LoggingConfig,
    pub exchanges: Vec<ExchangeConfig>,
}

impl ConfigFile {
    /// 이름으로 거래소 설정 조회 (대소문자 무시)
    pub fn get_exchange_config(&self, name: &str) -> BaseResult<&ExchangeConfig> {
        self.exchanges
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| BaseError::configuration(name, "exchange config not found"))
    }

    /// 이름이 같은 설정을 교체하고, 없으면 추가
    pub fn update_exchange_config(&mut self, config: ExchangeConfig) {
        match self
            .exchanges
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(&config.name))
        {
            Some(existing) => *existing = config,
            None => self.exchanges.push(config),
        }
    }
}
