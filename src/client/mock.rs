//! Scripted transport
//!
//! Answers requests from canned JSON keyed by method and URL fragment. Used by
//! the adapter tests and for running the engine offline.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::config::Credentials;
use super::http::{HttpMethod, Request, RequestSigner, Transport};
use crate::errors::{BaseError, BaseResult};

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Route {
    method: HttpMethod,
    fragment: String,
    reply: Reply,
}

/// 미리 정해둔 응답을 돌려주는 전송 계층
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL에 fragment가 포함된 요청에 value로 응답 (나중에 등록한 것이 우선)
    pub fn on(&self, method: HttpMethod, fragment: impl Into<String>, value: Value) -> &Self {
        self.routes.lock().push(Route {
            method,
            fragment: fragment.into(),
            reply: Reply::Json(value),
        });
        self
    }

    /// GET 응답 등록
    pub fn on_get(&self, fragment: impl Into<String>, value: Value) -> &Self {
        self.on(HttpMethod::Get, fragment, value)
    }

    /// POST 응답 등록
    pub fn on_post(&self, fragment: impl Into<String>, value: Value) -> &Self {
        self.on(HttpMethod::Post, fragment, value)
    }

    /// 네트워크 오류로 응답
    pub fn fail(&self, method: HttpMethod, fragment: impl Into<String>, message: impl Into<String>) -> &Self {
        self.routes.lock().push(Route {
            method,
            fragment: fragment.into(),
            reply: Reply::Fail(message.into()),
        });
        self
    }

    /// 보낸 요청 목록
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// URL에 fragment가 포함된 요청 수
    pub fn calls(&self, fragment: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> BaseResult<Value> {
        let reply = self
            .routes
            .lock()
            .iter()
            .rev()
            .find(|r| r.method == request.method && request.url.contains(&r.fragment))
            .map(|r| r.reply.clone());
        let url = request.url.clone();
        self.requests.lock().push(request);

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Fail(message)) => Err(BaseError::NetworkError { url, message }),
            None => Err(BaseError::NetworkError {
                url,
                message: "no scripted response".into(),
            }),
        }
    }
}

/// API 키를 헤더로만 붙이는 서명기 (서명 없는 환경용)
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyHeaderSigner;

impl RequestSigner for KeyHeaderSigner {
    fn sign(&self, request: &mut Request, credentials: &Credentials) -> BaseResult<()> {
        request
            .headers
            .insert("X-API-KEY".into(), credentials.key.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_latest_route_wins() {
        let transport = MockTransport::new();
        transport.on_get("/ticker", json!({"v": 1}));
        transport.on_get("/ticker", json!({"v": 2}));

        let value = transport
            .send(Request::get("https://x/ticker/ALL"))
            .await
            .unwrap();
        assert_eq!(value["v"], 2);
        assert_eq!(transport.calls("/ticker"), 1);
    }

    #[tokio::test]
    async fn test_unscripted_and_failing_routes() {
        let transport = MockTransport::new();
        transport.fail(HttpMethod::Get, "/depth", "connection reset");

        let err = transport.send(Request::get("https://x/depth")).await.unwrap_err();
        assert!(err.is_network_error());
        assert!(transport.send(Request::post("https://x/depth")).await.is_err());
    }
}
