//! Pair formats and pair synchronization

use chrono::Utc;
use tracing::{debug, info, warn};

use super::ExchangeBase;
use crate::errors::{BaseError, BaseResult};
use crate::types::{find_pair_differences, AssetType, CurrencyPair, PairFormat};

/// 페어 목록 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairRole {
    /// 거래소에서 거래 가능한 페어
    Available,
    /// 사용자가 활성화한 페어
    Enabled,
}

impl PairRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairRole::Available => "available",
            PairRole::Enabled => "enabled",
        }
    }
}

impl ExchangeBase {
    /// 자산 클래스와 방향(요청/표시)에 맞는 페어 포맷
    pub fn get_pair_format(&self, asset: AssetType, request: bool) -> BaseResult<PairFormat> {
        let pairs = self.currency_pairs.read();
        let format = if pairs.use_global_format {
            if request {
                pairs.request_format.clone()
            } else {
                pairs.display_format.clone()
            }
        } else {
            pairs.store(asset).and_then(|store| {
                if request {
                    store.request_format.clone()
                } else {
                    store.display_format.clone()
                }
            })
        };

        format.ok_or_else(|| {
            BaseError::configuration(
                &self.name,
                format!(
                    "no {} pair format configured for asset type {}",
                    if request { "request" } else { "display" },
                    asset
                ),
            )
        })
    }

    /// 요청 포맷으로 페어 렌더링
    pub fn format_exchange_currency(
        &self,
        pair: &CurrencyPair,
        asset: AssetType,
    ) -> BaseResult<String> {
        let format = self.get_pair_format(asset, true)?;
        Ok(pair.format(&format))
    }

    /// 여러 페어를 요청 포맷 separator로 연결
    pub fn format_exchange_currencies(
        &self,
        pairs: &[CurrencyPair],
        asset: AssetType,
    ) -> BaseResult<String> {
        let format = self.get_pair_format(asset, true)?;
        let joined = pairs
            .iter()
            .map(|p| p.format(&format))
            .collect::<Vec<_>>()
            .join(&format.separator);

        if joined.is_empty() {
            return Err(BaseError::configuration(
                &self.name,
                "returned empty string",
            ));
        }
        Ok(joined)
    }

    /// 저장된 페어 문자열 목록
    pub fn pair_strings(&self, asset: AssetType, role: PairRole) -> Vec<String> {
        let pairs = self.currency_pairs.read();
        pairs
            .store(asset)
            .map(|store| match role {
                PairRole::Available => store.available.clone(),
                PairRole::Enabled => store.enabled.clone(),
            })
            .unwrap_or_default()
    }

    fn parse_pairs(&self, asset: AssetType, role: PairRole) -> BaseResult<Vec<CurrencyPair>> {
        let format = self.get_pair_format(asset, false)?;
        let pairs = self
            .pair_strings(asset, role)
            .into_iter()
            .filter_map(|s| match CurrencyPair::parse(&s, &format) {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!(exchange = %self.name, pair = %s, error = %e, "skipping unparsable pair");
                    None
                }
            })
            .collect();
        Ok(pairs)
    }

    /// 활성 페어
    pub fn get_enabled_pairs(&self, asset: AssetType) -> BaseResult<Vec<CurrencyPair>> {
        self.parse_pairs(asset, PairRole::Enabled)
    }

    /// 거래 가능 페어
    pub fn get_available_pairs(&self, asset: AssetType) -> BaseResult<Vec<CurrencyPair>> {
        self.parse_pairs(asset, PairRole::Available)
    }

    /// 페어가 활성(또는 거래 가능) 목록에 있는지, 역순 페어 포함
    pub fn supports_pair(&self, pair: &CurrencyPair, enabled: bool, asset: AssetType) -> bool {
        let role = if enabled {
            PairRole::Enabled
        } else {
            PairRole::Available
        };
        match self.parse_pairs(asset, role) {
            Ok(pairs) => pairs.iter().any(|p| p.equal_include_reciprocal(pair)),
            Err(_) => false,
        }
    }

    /// 페어 목록을 표시 포맷으로 직접 설정
    pub fn set_pairs(
        &self,
        pairs: &[CurrencyPair],
        asset: AssetType,
        role: PairRole,
    ) -> BaseResult<()> {
        if pairs.is_empty() {
            return Err(BaseError::configuration(
                &self.name,
                format!("{} {} pairs is empty", asset, role.as_str()),
            ));
        }
        let format = self.get_pair_format(asset, false)?;
        let strings: Vec<String> = pairs.iter().map(|p| p.format(&format)).collect();
        self.store_pairs(strings, asset, role);
        Ok(())
    }

    /// 새 페어 목록과 저장된 목록을 동기화
    ///
    /// 변경이 있거나 force면 저장된 목록을 통째로 교체하고 설정에 반영한다
    pub fn update_pairs(
        &self,
        products: &[String],
        asset: AssetType,
        role: PairRole,
        force: bool,
    ) -> BaseResult<()> {
        let fresh: Vec<String> = products
            .iter()
            .map(|p| p.trim().to_uppercase())
            .filter(|p| !p.is_empty())
            .collect();

        if fresh.is_empty() {
            return Err(BaseError::configuration(
                &self.name,
                format!("{} {} empty product list", asset, role.as_str()),
            ));
        }

        if !self.is_asset_type_supported(asset) {
            return Err(BaseError::configuration(
                &self.name,
                format!("asset type {asset} is not supported"),
            ));
        }

        let duplicates = fresh.len() - {
            let mut unique = fresh.clone();
            unique.sort();
            unique.dedup();
            unique.len()
        };
        if duplicates > 0 {
            warn!(
                exchange = %self.name,
                asset = %asset,
                role = role.as_str(),
                duplicates,
                "product list contains duplicate pairs"
            );
        }

        let stored = self.pair_strings(asset, role);
        let (added, removed) = find_pair_differences(&stored, &fresh);

        if !force && added.is_empty() && removed.is_empty() {
            debug!(exchange = %self.name, asset = %asset, role = role.as_str(), "no pair changes");
            return Ok(());
        }

        if force {
            info!(
                exchange = %self.name,
                asset = %asset,
                role = role.as_str(),
                pairs = fresh.len(),
                "forced update of pairs"
            );
        } else {
            if !added.is_empty() {
                info!(
                    exchange = %self.name,
                    asset = %asset,
                    role = role.as_str(),
                    new = %added.join(","),
                    "new pairs"
                );
            }
            if !removed.is_empty() {
                info!(
                    exchange = %self.name,
                    asset = %asset,
                    role = role.as_str(),
                    removed = %removed.join(","),
                    "removed pairs"
                );
            }
        }

        self.store_pairs(fresh, asset, role);
        Ok(())
    }

    /// 런타임 목록과 설정 레코드를 함께 교체
    fn store_pairs(&self, pairs: Vec<String>, asset: AssetType, role: PairRole) {
        let joined = pairs.join(",");
        let now = Utc::now().timestamp();

        let mut currency_pairs = self.currency_pairs.write();
        let store = currency_pairs.store_mut(asset);
        match role {
            PairRole::Available => store.available = pairs,
            PairRole::Enabled => store.enabled = pairs,
        }
        if role == PairRole::Available {
            currency_pairs.last_updated = now;
        }

        let mut config = self.config.write();
        let pairs_config = config.currency_pairs_mut();
        if role == PairRole::Available {
            pairs_config.last_updated = now;
        }
        let asset_config = pairs_config.asset_mut(asset);
        match role {
            PairRole::Available => asset_config.available = joined,
            PairRole::Enabled => asset_config.enabled = joined,
        }
        drop(config);
        drop(currency_pairs);

        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchanges::base::test_support::spot_base;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_global_format_renders_pair() {
        let base = spot_base();
        let pair = CurrencyPair::new("btc", "usdt");

        let display = base.get_pair_format(AssetType::Spot, false).unwrap();
        assert_eq!(pair.format(&display), "BTC-USDT");
        assert_eq!(
            base.format_exchange_currency(&pair, AssetType::Spot).unwrap(),
            "btcusdt"
        );
    }

    #[test]
    fn test_missing_format_is_error() {
        let mut base = spot_base();
        let mut pairs = base.currency_pairs();
        pairs.use_global_format = false;
        base.set_currency_pairs(pairs);

        let err = base.get_pair_format(AssetType::Futures, true).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_format_exchange_currencies_empty() {
        let base = spot_base();
        assert!(base
            .format_exchange_currencies(&[], AssetType::Spot)
            .is_err());
    }

    #[test]
    fn test_format_exchange_currencies_joins_with_separator() {
        let mut base = spot_base();
        let mut pairs = base.currency_pairs();
        pairs.request_format = Some(PairFormat::new("_", false).with_separator(","));
        base.set_currency_pairs(pairs);

        let joined = base
            .format_exchange_currencies(
                &[CurrencyPair::new("BTC", "USDT"), CurrencyPair::new("ETH", "USDT")],
                AssetType::Spot,
            )
            .unwrap();
        assert_eq!(joined, "btc_usdt,eth_usdt");
    }

    #[test]
    fn test_update_pairs_adds_and_removes() {
        let base = spot_base();
        base.update_pairs(&strings(&["btc-usdt", "eth-usdt"]), AssetType::Spot, PairRole::Available, false)
            .unwrap();
        assert!(base.take_dirty());

        base.update_pairs(&strings(&["BTC-USDT", "XRP-USDT"]), AssetType::Spot, PairRole::Available, false)
            .unwrap();
        assert_eq!(
            base.pair_strings(AssetType::Spot, PairRole::Available),
            strings(&["BTC-USDT", "XRP-USDT"])
        );
        assert_eq!(
            base.get_available_pairs(AssetType::Spot).unwrap(),
            vec![CurrencyPair::new("BTC", "USDT"), CurrencyPair::new("XRP", "USDT")]
        );

        let config = base.config_snapshot();
        let spot = config.currency_pairs.unwrap().spot.unwrap();
        assert_eq!(spot.available, "BTC-USDT,XRP-USDT");
        assert!(spot.enabled.is_empty());
    }

    #[test]
    fn test_update_pairs_unchanged_is_noop() {
        let base = spot_base();
        let products = strings(&["BTC-USDT"]);
        base.update_pairs(&products, AssetType::Spot, PairRole::Enabled, false)
            .unwrap();
        assert!(base.take_dirty());

        base.update_pairs(&products, AssetType::Spot, PairRole::Enabled, false)
            .unwrap();
        assert!(!base.is_dirty());

        base.update_pairs(&products, AssetType::Spot, PairRole::Enabled, true)
            .unwrap();
        assert!(base.is_dirty());
    }

    #[test]
    fn test_update_pairs_rejects_empty() {
        let base = spot_base();
        let err = base
            .update_pairs(&strings(&["", " "]), AssetType::Spot, PairRole::Enabled, false)
            .unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("empty product list"));
    }

    #[test]
    fn test_update_pairs_keeps_duplicates() {
        let base = spot_base();
        base.update_pairs(&strings(&["BTC-USDT", "btc-usdt"]), AssetType::Spot, PairRole::Enabled, false)
            .unwrap();
        assert_eq!(base.pair_strings(AssetType::Spot, PairRole::Enabled).len(), 2);
    }

    #[test]
    fn test_update_pairs_unsupported_asset() {
        let base = spot_base();
        assert!(base
            .update_pairs(&strings(&["BTC-USDT"]), AssetType::Futures, PairRole::Enabled, false)
            .is_err());
    }

    #[test]
    fn test_enabled_pairs_and_supports_pair() {
        let base = spot_base();
        base.update_pairs(&strings(&["BTC-USDT", "garbage"]), AssetType::Spot, PairRole::Enabled, false)
            .unwrap();

        let pairs = base.get_enabled_pairs(AssetType::Spot).unwrap();
        assert_eq!(pairs, vec![CurrencyPair::new("BTC", "USDT")]);
        assert!(base.supports_pair(&CurrencyPair::new("usdt", "btc"), true, AssetType::Spot));
        assert!(!base.supports_pair(&CurrencyPair::new("ETH", "USDT"), true, AssetType::Spot));
    }

    #[test]
    fn test_set_pairs_uses_display_format() {
        let base = spot_base();
        base.set_pairs(&[CurrencyPair::new("eth", "btc")], AssetType::Spot, PairRole::Enabled)
            .unwrap();
        assert_eq!(
            base.pair_strings(AssetType::Spot, PairRole::Enabled),
            strings(&["ETH-BTC"])
        );
        assert!(base
            .set_pairs(&[], AssetType::Spot, PairRole::Enabled)
            .is_err());
    }
}
