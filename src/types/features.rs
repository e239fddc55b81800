//! Exchange capability flags
//!
//! The same shape is used for the adapter's hardcoded capabilities and for the
//! persisted `features` section of the exchange config.

use serde::{Deserialize, Serialize};

/// 프로토콜별 부가 기능
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolFeatures {
    /// 거래 가능 페어 자동 갱신
    pub auto_pair_updates: bool,
    /// 단일 호출로 여러 페어 시세 조회
    pub ticker_batching: bool,
}

/// 거래 종류 지원
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingSupported {
    pub spot: bool,
    pub futures: bool,
    pub margin: bool,
    pub perpetual_swaps: bool,
    pub index: bool,
}

/// 거래소가 지원하는 기능 (어댑터 소유, 설정으로 덮어쓰지 않음)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesSupported {
    pub rest: bool,
    pub websocket: bool,
    pub rest_capabilities: ProtocolFeatures,
    pub websocket_capabilities: ProtocolFeatures,
    pub trading: TradingSupported,
}

/// 사용자가 켠 기능
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesEnabled {
    pub auto_pair_updates: bool,
    pub websocket: bool,
}

/// 지원 기능 + 활성 기능
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub supports: FeaturesSupported,
    pub enabled: FeaturesEnabled,
}

impl FeaturesSupported {
    /// REST 또는 websocket 중 하나라도 자동 페어 갱신을 지원하는지
    pub fn auto_pair_updates(&self) -> bool {
        self.rest_capabilities.auto_pair_updates || self.websocket_capabilities.auto_pair_updates
    }
}

impl FeaturesEnabled {
    /// 지원하지 않는 기능은 켤 수 없다
    pub fn clamp_to(self, supports: &FeaturesSupported) -> Self {
        Self {
            auto_pair_updates: self.auto_pair_updates && supports.auto_pair_updates(),
            websocket: self.websocket && supports.websocket,
        }
    }
}
