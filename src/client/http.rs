//! HTTP client for API requests
//!
//! Adapters never talk to `reqwest` directly. They build a [`Request`] and hand
//! it to the [`Requester`], which applies the per-class rate limit, signs
//! authenticated calls through the optional [`RequestSigner`] and forwards the
//! request to a [`Transport`]. Tests swap the transport for a scripted one.

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::config::{Credentials, DEFAULT_HTTP_TIMEOUT_MS};
use super::rate_limiter::{RateLimit, RateLimiter};
use crate::errors::{BaseError, BaseResult};

/// HTTP 메서드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 거래소 API 요청
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    /// GET/DELETE는 쿼리 문자열, POST는 form body
    pub params: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    /// JSON body (설정 시 params 대신 사용)
    pub body: Option<serde_json::Value>,
    pub authenticated: bool,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            headers: HashMap::new(),
            body: None,
            authenticated: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    /// url + 인코딩된 쿼리 문자열
    pub fn full_url(&self) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.url, query)
    }

    /// params 조회
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP 클라이언트 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS as u64),
            user_agent: String::new(),
            proxy: None,
        }
    }
}

/// 요청 전송 계층
#[async_trait]
pub trait Transport: Send + Sync {
    /// 요청을 보내고 JSON 응답을 반환
    async fn send(&self, request: Request) -> BaseResult<serde_json::Value>;

    /// 타임아웃/UA/프록시 변경 적용
    fn configure(&self, settings: &HttpSettings) -> BaseResult<()> {
        let _ = settings;
        Ok(())
    }
}

/// 인증 요청 서명
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: &mut Request, credentials: &Credentials) -> BaseResult<()>;
}

/// HTTP 클라이언트 (reqwest)
pub struct HttpClient {
    client: RwLock<Client>,
}

impl HttpClient {
    /// 새로운 HTTP 클라이언트 생성
    pub fn new(settings: &HttpSettings) -> BaseResult<Self> {
        Ok(Self {
            client: RwLock::new(Self::build(settings)?),
        })
    }

    fn build(settings: &HttpSettings) -> BaseResult<Client> {
        let mut builder = Client::builder().timeout(settings.timeout);

        if !settings.user_agent.is_empty() {
            builder = builder.user_agent(settings.user_agent.clone());
        }

        if let Some(proxy) = settings.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| BaseError::ConfigurationError {
                exchange: String::new(),
                message: format!("setting proxy address error {e}"),
            })?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(|e| BaseError::ConfigurationError {
            exchange: String::new(),
            message: format!("failed to build http client: {e}"),
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: Request) -> BaseResult<serde_json::Value> {
        let client = self.client.read().clone();

        let mut builder = match request.method {
            HttpMethod::Get => client.get(&request.url).query(&request.params),
            HttpMethod::Post => {
                let builder = client.post(&request.url);
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder.form(&request.params),
                }
            }
        };

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BaseError::ExchangeError {
                exchange: String::new(),
                message: format!("HTTP {}: {} {}", status, request.url, text),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| BaseError::ParseError {
                data_type: "json".into(),
                message: e.to_string(),
            })
    }

    fn configure(&self, settings: &HttpSettings) -> BaseResult<()> {
        let client = Self::build(settings)?;
        *self.client.write() = client;
        Ok(())
    }
}

/// 레이트 리밋 + 서명 + 전송
pub struct Requester {
    name: String,
    transport: Arc<dyn Transport>,
    signer: Option<Arc<dyn RequestSigner>>,
    settings: HttpSettings,
    authenticated: RateLimiter,
    unauthenticated: RateLimiter,
}

impl Requester {
    /// reqwest 기반 Requester 생성
    pub fn new(name: impl Into<String>, auth: RateLimit, unauth: RateLimit) -> BaseResult<Self> {
        let settings = HttpSettings::default();
        let transport = Arc::new(HttpClient::new(&settings)?);
        Ok(Self::with_transport(name, auth, unauth, transport))
    }

    /// 전송 계층을 지정하여 생성
    pub fn with_transport(
        name: impl Into<String>,
        auth: RateLimit,
        unauth: RateLimit,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            name: name.into(),
            transport,
            signer: None,
            settings: HttpSettings::default(),
            authenticated: RateLimiter::new(auth),
            unauthenticated: RateLimiter::new(unauth),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    pub fn set_signer(&mut self, signer: Arc<dyn RequestSigner>) {
        self.signer = Some(signer);
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    fn apply(&mut self, settings: HttpSettings) -> BaseResult<()> {
        self.transport.configure(&settings).map_err(|e| match e {
            BaseError::ConfigurationError { message, .. } => BaseError::ConfigurationError {
                exchange: self.name.clone(),
                message,
            },
            other => other,
        })?;
        self.settings = settings;
        Ok(())
    }

    /// 타임아웃 설정
    pub fn set_timeout(&mut self, timeout: Duration) -> BaseResult<()> {
        let settings = HttpSettings {
            timeout,
            ..self.settings.clone()
        };
        self.apply(settings)
    }

    /// User-Agent 설정
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) -> BaseResult<()> {
        let settings = HttpSettings {
            user_agent: user_agent.into(),
            ..self.settings.clone()
        };
        self.apply(settings)
    }

    /// 프록시 설정
    pub fn set_proxy(&mut self, proxy: impl Into<String>) -> BaseResult<()> {
        let settings = HttpSettings {
            proxy: Some(proxy.into()),
            ..self.settings.clone()
        };
        self.apply(settings)
    }

    /// 요청 종류별 현재 제한값
    pub fn rate_limit(&self, authenticated: bool) -> RateLimit {
        if authenticated {
            self.authenticated.limit()
        } else {
            self.unauthenticated.limit()
        }
    }

    /// 요청 종류별 제한값 변경
    pub fn set_rate_limit(&self, authenticated: bool, limit: RateLimit) {
        if authenticated {
            self.authenticated.set_limit(limit);
        } else {
            self.unauthenticated.set_limit(limit);
        }
    }

    /// 요청 전송
    pub async fn send(
        &self,
        mut request: Request,
        credentials: &Credentials,
    ) -> BaseResult<serde_json::Value> {
        if request.authenticated {
            let signer = self.signer.as_ref().ok_or_else(|| BaseError::CredentialError {
                exchange: self.name.clone(),
                message: "no request signer configured".into(),
            })?;
            signer.sign(&mut request, credentials)?;
            self.authenticated.acquire().await;
        } else {
            self.unauthenticated.acquire().await;
        }

        tracing::debug!(
            exchange = %self.name,
            url = %request.url,
            authenticated = request.authenticated,
            "sending request"
        );

        self.transport.send(request).await
    }

    /// 요청 전송 후 타입으로 디코딩
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: Request,
        credentials: &Credentials,
    ) -> BaseResult<T> {
        let value = self.send(request, credentials).await?;
        serde_json::from_value(value).map_err(|e| BaseError::ParseError {
            data_type: std::any::type_name::<T>().to_string(),
            message: e.to_string(),
        })
    }
}
