//! Engine
//!
//! 설정 저장소에서 거래소 설정을 읽어 어댑터를 만들고, 각 어댑터의 시작
//! 작업을 tokio 태스크로 실행한 뒤 변경된 설정을 저장한다.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::client::{ConfigStore, SharedMarketCache, Transport};
use crate::errors::BaseResult;
use crate::exchanges::{create_exchange, create_exchange_with_transport};
use crate::types::{Exchange, ExchangeId};

/// 어댑터 구성 루트
pub struct Engine {
    store: Arc<dyn ConfigStore>,
    cache: SharedMarketCache,
    transport: Option<Arc<dyn Transport>>,
    exchanges: Vec<Arc<dyn Exchange>>,
}

impl Engine {
    pub fn new(store: Arc<dyn ConfigStore>, cache: SharedMarketCache) -> Self {
        Self {
            store,
            cache,
            transport: None,
            exchanges: Vec::new(),
        }
    }

    /// 모든 어댑터가 사용할 전송 계층 지정 (기본값은 reqwest 클라이언트)
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn cache(&self) -> &SharedMarketCache {
        &self.cache
    }

    /// 저장소의 거래소 설정으로 어댑터 생성 및 설정 적용
    ///
    /// 알 수 없는 이름과 설정 실패는 로그만 남기고 건너뛴다.
    /// 반환값은 로드된 어댑터 수.
    pub fn load(&mut self) -> BaseResult<usize> {
        for name in self.store.exchange_names() {
            let id = match name.parse::<ExchangeId>() {
                Ok(id) => id,
                Err(_) => {
                    warn!(exchange = %name, "unknown exchange in config, skipping");
                    continue;
                }
            };

            let cfg = self.store.load_exchange_config(&name)?;
            let mut exchange = match &self.transport {
                Some(transport) => {
                    create_exchange_with_transport(id, transport.clone(), self.cache.clone())
                }
                None => create_exchange(id, self.cache.clone())?,
            };

            if let Err(e) = exchange.setup(cfg) {
                error!(exchange = %name, error = %e, "exchange failed to load");
                continue;
            }
            if !exchange.base().is_enabled() {
                info!(exchange = %name, "exchange disabled");
                continue;
            }

            info!(exchange = %name, "exchange loaded");
            self.exchanges.push(Arc::from(exchange));
        }

        Ok(self.exchanges.len())
    }

    /// 모든 어댑터의 시작 작업 실행 후 변경된 설정 저장
    pub async fn run(&self) -> BaseResult<usize> {
        let mut tasks = JoinSet::new();
        for exchange in &self.exchanges {
            let exchange = Arc::clone(exchange);
            tasks.spawn(async move { exchange.run().await });
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "exchange task failed");
            }
        }

        self.save_dirty()
    }

    /// 변경 표시된 설정만 저장, 저장한 수 반환
    pub fn save_dirty(&self) -> BaseResult<usize> {
        let mut saved = 0;
        for exchange in &self.exchanges {
            let base = exchange.base();
            if !base.take_dirty() {
                continue;
            }
            self.store.save_exchange_config(&base.config_snapshot())?;
            info!(exchange = %base.name(), "config saved");
            saved += 1;
        }
        Ok(saved)
    }

    /// 이름으로 어댑터 조회 (대소문자 무시)
    pub fn exchange(&self, name: &str) -> Option<Arc<dyn Exchange>> {
        self.exchanges
            .iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn exchanges(&self) -> &[Arc<dyn Exchange>] {
        &self.exchanges
    }
}
