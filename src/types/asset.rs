//! Asset class types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::BaseError;

/// 자산 클래스
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Spot,
    Futures,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Spot => "spot",
            AssetType::Futures => "futures",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spot" => Ok(AssetType::Spot),
            "futures" => Ok(AssetType::Futures),
            other => Err(BaseError::ParseError {
                data_type: "AssetType".into(),
                message: format!("unknown asset type {other}"),
            }),
        }
    }
}

/// 거래소가 지원하는 자산 클래스 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetTypes(Vec<AssetType>);

impl AssetTypes {
    pub fn new(assets: Vec<AssetType>) -> Self {
        Self(assets)
    }

    pub fn contains(&self, asset: AssetType) -> bool {
        self.0.contains(&asset)
    }

    /// 구분자로 연결된 문자열 (설정 저장 형식)
    pub fn join(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(AssetType::as_str)
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// 설정에 저장된 문자열 파싱, 알 수 없는 항목은 무시
    pub fn parse(joined: &str, sep: &str) -> Self {
        Self(
            joined
                .split(sep)
                .filter_map(|s| s.parse::<AssetType>().ok())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetType> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<AssetType>> for AssetTypes {
    fn from(assets: Vec<AssetType>) -> Self {
        Self(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_types_join_and_parse() {
        let assets = AssetTypes::new(vec![AssetType::Spot, AssetType::Futures]);
        assert_eq!(assets.join(","), "spot,futures");

        let parsed = AssetTypes::parse("spot,futures,binary", ",");
        assert_eq!(parsed, assets);
        assert!(parsed.contains(AssetType::Futures));
    }

    #[test]
    fn test_asset_type_from_str() {
        assert_eq!("SPOT".parse::<AssetType>().unwrap(), AssetType::Spot);
        assert!("options".parse::<AssetType>().is_err());
    }
}
