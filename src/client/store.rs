//! Exchange config persistence

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::config::{ConfigFile, ExchangeConfig};
use crate::errors::{BaseError, BaseResult};
use crate::utils::LoggingConfig;

/// 거래소 설정 저장소
pub trait ConfigStore: Send + Sync {
    /// 이름으로 설정 조회
    fn load_exchange_config(&self, name: &str) -> BaseResult<ExchangeConfig>;

    /// 설정 저장 (같은 이름은 교체)
    fn save_exchange_config(&self, config: &ExchangeConfig) -> BaseResult<()>;

    /// 저장된 모든 거래소 이름
    fn exchange_names(&self) -> Vec<String>;
}

/// 메모리 저장소 (테스트, 임베딩용)
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    file: Mutex<ConfigFile>,
}

impl MemoryConfigStore {
    pub fn new(exchanges: Vec<ExchangeConfig>) -> Self {
        Self {
            file: Mutex::new(ConfigFile {
                exchanges,
                ..Default::default()
            }),
        }
    }

    /// 현재 내용 스냅샷
    pub fn snapshot(&self) -> ConfigFile {
        self.file.lock().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_exchange_config(&self, name: &str) -> BaseResult<ExchangeConfig> {
        self.file.lock().get_exchange_config(name).cloned()
    }

    fn save_exchange_config(&self, config: &ExchangeConfig) -> BaseResult<()> {
        self.file.lock().update_exchange_config(config.clone());
        Ok(())
    }

    fn exchange_names(&self) -> Vec<String> {
        self.file
            .lock()
            .exchanges
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }
}

/// TOML 파일 저장소
///
/// `[[exchanges]]` 배열 하나로 구성된 파일을 읽고, 저장할 때마다 전체를 다시 쓴다
#[derive(Debug)]
pub struct TomlConfigStore {
    path: PathBuf,
    file: Mutex<ConfigFile>,
}

impl TomlConfigStore {
    /// 파일에서 로드
    pub fn open(path: impl AsRef<Path>) -> BaseResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            BaseError::configuration(
                path.display().to_string(),
                format!("failed to read config file: {e}"),
            )
        })?;
        let file: ConfigFile = toml::from_str(&content)?;

        info!(
            path = %path.display(),
            exchanges = file.exchanges.len(),
            "Configuration loaded"
        );

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// 빈 저장소 생성 (첫 저장 시 파일 생성)
    pub fn create(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(ConfigFile::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일의 로그 설정
    pub fn logging(&self) -> LoggingConfig {
        self.file.lock().logging.clone()
    }

    fn write(&self, file: &ConfigFile) -> BaseResult<()> {
        let content = toml::to_string_pretty(file)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }
}

impl ConfigStore for TomlConfigStore {
    fn load_exchange_config(&self, name: &str) -> BaseResult<ExchangeConfig> {
        self.file.lock().get_exchange_config(name).cloned()
    }

    fn save_exchange_config(&self, config: &ExchangeConfig) -> BaseResult<()> {
        let mut file = self.file.lock();
        file.update_exchange_config(config.clone());
        self.write(&file)
    }

    fn exchange_names(&self) -> Vec<String> {
        self.file
            .lock()
            .exchanges
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }
}
