//! WebSocket settings
//!
//! Streaming itself lives outside this crate. The base only tracks whether the
//! feed is enabled, which URL and proxy it should use, and the last known
//! connection state so adapters can report it.

use crate::client::config::API_URL_NON_DEFAULT_MESSAGE;
use crate::errors::{BaseError, BaseResult};

/// 연결 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// 연결 안됨
    #[default]
    Disconnected,
    /// 연결 중
    Connecting,
    /// 연결됨
    Connected,
    /// 재연결 중
    Reconnecting,
}

/// 거래소 websocket 설정
#[derive(Debug, Clone, Default)]
pub struct Websocket {
    enabled: bool,
    default_url: String,
    running_url: String,
    proxy_address: Option<String>,
    state: ConnectionState,
}

impl Websocket {
    /// 기본 URL로 생성 (비활성)
    pub fn new(default_url: impl Into<String>) -> Self {
        let default_url = default_url.into();
        Self {
            running_url: default_url.clone(),
            default_url,
            ..Default::default()
        }
    }

    /// 설정 적용, 비어있거나 표식 값인 URL은 기본 URL 사용
    pub fn setup(&mut self, enabled: bool, running_url: &str) {
        self.enabled = enabled;
        self.running_url = if running_url.is_empty() || running_url == API_URL_NON_DEFAULT_MESSAGE
        {
            self.default_url.clone()
        } else {
            running_url.to_string()
        };
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn url(&self) -> &str {
        &self.running_url
    }

    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// 프록시 주소 설정
    pub fn set_proxy_address(&mut self, proxy: &str) -> BaseResult<()> {
        reqwest::Url::parse(proxy).map_err(|e| BaseError::ConfigurationError {
            exchange: String::new(),
            message: format!("websocket proxy address error {e}"),
        })?;
        self.proxy_address = Some(proxy.to_string());
        Ok(())
    }

    pub fn proxy_address(&self) -> Option<&str> {
        self.proxy_address.as_deref()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn set_state(&mut self, state: ConnectionState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_falls_back_to_default_url() {
        let mut ws = Websocket::new("wss://api.huobi.pro/ws");
        ws.setup(true, API_URL_NON_DEFAULT_MESSAGE);
        assert!(ws.is_enabled());
        assert_eq!(ws.url(), "wss://api.huobi.pro/ws");

        ws.setup(false, "wss://custom.example/ws");
        assert!(!ws.is_enabled());
        assert_eq!(ws.url(), "wss://custom.example/ws");
        assert_eq!(ws.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_proxy_validation() {
        let mut ws = Websocket::new("wss://example/ws");
        assert!(ws.set_proxy_address("socks5://127.0.0.1:1080").is_ok());
        assert_eq!(ws.proxy_address(), Some("socks5://127.0.0.1:1080"));
        assert!(ws.set_proxy_address("::not a url::").is_err());
    }
}
