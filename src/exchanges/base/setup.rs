//! Config reconciliation
//!
//! Merges the persisted [`ExchangeConfig`] with the adapter's capability
//! defaults. Support flags always come from the adapter; enabled flags and
//! tunables come from the config. Unset config slots are filled in so the
//! reconciled record can be written back.

use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::ExchangeBase;
use crate::client::{
    ExchangeConfig, HttpRateLimitConfig, API_URL_NON_DEFAULT_MESSAGE, DEFAULT_HTTP_TIMEOUT_MS,
};
use crate::errors::{BaseError, BaseResult};
use crate::types::{AssetTypes, Features, FeaturesEnabled};
use crate::utils::split_list;

impl ExchangeBase {
    /// 설정과 기본값을 병합하여 런타임 상태 구성
    pub fn setup_defaults(&mut self, mut cfg: ExchangeConfig) -> BaseResult<()> {
        let input = cfg.clone();

        self.enabled = true;
        self.loaded_by_config = true;
        self.verbose = cfg.verbose;
        if cfg.name.is_empty() {
            cfg.name = self.name.clone();
        }

        self.api.authenticated_support = cfg.api.authenticated_support;
        if self.api.authenticated_support {
            let creds = cfg.api.credentials.clone();
            self.set_api_keys(creds.key, creds.secret, creds.client_id);
            self.api.credentials.pem_key = creds.pem_key;
        }

        self.setup_http(&mut cfg)?;
        self.setup_rate_limits(&mut cfg);
        self.setup_currency_pairs(&mut cfg);
        self.setup_features(&mut cfg);
        self.setup_endpoints(&mut cfg)?;
        cfg.api.credentials_validator = self.api.credentials_validator;
        self.setup_proxy(&cfg)?;
        self.load_pairs_from_config(&mut cfg);

        if let Some(ws) = self.websocket.as_mut() {
            let enabled = self.features.supports.websocket && self.features.enabled.websocket;
            ws.setup(enabled, &cfg.api.endpoints.websocket_url);
        }

        if self.api.authenticated_support && !self.validate_api_credentials() {
            warn!(
                exchange = %self.name,
                "invalid API credentials, authenticated requests disabled"
            );
            self.api.authenticated_support = false;
        }

        let changed = cfg != input;
        *self.config.get_mut() = cfg;
        if changed {
            self.mark_dirty();
        }

        debug!(
            exchange = %self.name,
            changed,
            authenticated = self.api.authenticated_support,
            "setup defaults applied"
        );
        Ok(())
    }

    fn setup_http(&mut self, cfg: &mut ExchangeConfig) -> BaseResult<()> {
        if cfg.http_timeout_ms <= 0 {
            warn!(
                exchange = %self.name,
                timeout_ms = DEFAULT_HTTP_TIMEOUT_MS,
                "HTTP timeout not set, using default"
            );
            cfg.http_timeout_ms = DEFAULT_HTTP_TIMEOUT_MS;
        }
        self.requester
            .set_timeout(Duration::from_millis(cfg.http_timeout_ms as u64))?;

        if !cfg.http_user_agent.is_empty() {
            self.requester.set_user_agent(cfg.http_user_agent.clone())?;
        }
        self.http_user_agent = cfg.http_user_agent.clone();
        Ok(())
    }

    /// 설정에 없으면 어댑터 기본값을 기록하고, 있으면 설정값을 적용
    fn setup_rate_limits(&mut self, cfg: &mut ExchangeConfig) {
        match cfg.http_rate_limiter {
            None => {
                cfg.http_rate_limiter = Some(HttpRateLimitConfig {
                    authenticated: self.requester.rate_limit(true).into(),
                    unauthenticated: self.requester.rate_limit(false).into(),
                });
            }
            Some(limits) => {
                self.requester
                    .set_rate_limit(true, limits.authenticated.into());
                self.requester
                    .set_rate_limit(false, limits.unauthenticated.into());
            }
        }
    }

    fn setup_currency_pairs(&mut self, cfg: &mut ExchangeConfig) {
        let name = self.name.clone();
        let futures_supported = self.features.supports.trading.futures;
        let caps = self.currency_pairs.get_mut();
        let supported = caps.asset_types.clone();
        let pairs_cfg = cfg.currency_pairs_mut();

        let persisted = AssetTypes::parse(&pairs_cfg.asset_types, ",");
        if persisted != supported {
            let was_set = !pairs_cfg.asset_types.is_empty();
            if was_set {
                info!(
                    exchange = %name,
                    from = %pairs_cfg.asset_types,
                    to = %supported.join(","),
                    "asset types changed"
                );
            }
            pairs_cfg.asset_types = supported.join(",");
            if was_set && futures_supported && pairs_cfg.futures.is_none() {
                pairs_cfg.futures = Some(Default::default());
            }
        }

        if caps.use_global_format {
            if pairs_cfg.request_format.is_none() {
                pairs_cfg.request_format = caps.request_format.clone();
            }
            if pairs_cfg.display_format.is_none() {
                pairs_cfg.display_format = caps.display_format.clone();
            }
            caps.request_format = pairs_cfg.request_format.clone();
            caps.display_format = pairs_cfg.display_format.clone();

            for asset in supported.iter() {
                pairs_cfg.asset_mut(*asset);
            }
        } else {
            for asset in supported.iter() {
                let store = caps.store_mut(*asset);
                let asset_cfg = pairs_cfg.asset_mut(*asset);
                if asset_cfg.request_format.is_none() {
                    asset_cfg.request_format = store.request_format.clone();
                }
                if asset_cfg.display_format.is_none() {
                    asset_cfg.display_format = store.display_format.clone();
                }
                store.request_format = asset_cfg.request_format.clone();
                store.display_format = asset_cfg.display_format.clone();
            }
        }

        if pairs_cfg.last_updated > caps.last_updated {
            caps.last_updated = pairs_cfg.last_updated;
        }
    }

    fn setup_features(&mut self, cfg: &mut ExchangeConfig) {
        let supports = self.features.supports;

        let persisted = cfg.features;
        let enabled = match persisted {
            None => {
                let auto = cfg
                    .supports_auto_pair_updates
                    .take()
                    .unwrap_or(supports.auto_pair_updates());
                if !supports.auto_pair_updates() {
                    self.stamp_pairs_update(cfg);
                }
                FeaturesEnabled {
                    auto_pair_updates: auto,
                    websocket: false,
                }
                .clamp_to(&supports)
            }
            Some(persisted) => {
                cfg.supports_auto_pair_updates = None;
                if persisted.supports.auto_pair_updates() && !supports.auto_pair_updates() {
                    self.stamp_pairs_update(cfg);
                }
                persisted.enabled.clamp_to(&supports)
            }
        };

        cfg.features = Some(Features { supports, enabled });
        self.features.enabled = enabled;
    }

    fn stamp_pairs_update(&mut self, cfg: &mut ExchangeConfig) {
        let now = Utc::now().timestamp();
        cfg.currency_pairs_mut().last_updated = now;
        self.currency_pairs.get_mut().last_updated = now;
    }

    fn setup_endpoints(&mut self, cfg: &mut ExchangeConfig) -> BaseResult<()> {
        let endpoints = &mut cfg.api.endpoints;
        for slot in [
            &mut endpoints.url,
            &mut endpoints.url_secondary,
            &mut endpoints.websocket_url,
        ] {
            if slot.is_empty() {
                *slot = API_URL_NON_DEFAULT_MESSAGE.to_string();
            }
        }

        let api = &mut self.api.endpoints;
        api.url = resolve_url(&endpoints.url, &api.url_default);
        api.url_secondary = resolve_url(&endpoints.url_secondary, &api.url_secondary_default);
        api.websocket_url = endpoints.websocket_url.clone();

        if api.url.is_empty() {
            return Err(BaseError::configuration(
                &self.name,
                "no API URL configured",
            ));
        }
        Ok(())
    }

    fn setup_proxy(&mut self, cfg: &ExchangeConfig) -> BaseResult<()> {
        if cfg.proxy_address.is_empty() {
            return Ok(());
        }

        if self.verbose {
            info!(exchange = %self.name, proxy = %cfg.proxy_address, "setting proxy");
        }
        self.requester.set_proxy(cfg.proxy_address.clone())?;
        if let Some(ws) = self.websocket.as_mut() {
            ws.set_proxy_address(&cfg.proxy_address)
                .map_err(|e| match e {
                    BaseError::ConfigurationError { message, .. } => {
                        BaseError::configuration(&self.name, message)
                    }
                    other => other,
                })?;
        }
        Ok(())
    }

    fn load_pairs_from_config(&mut self, cfg: &mut ExchangeConfig) {
        let configured = split_list(&cfg.base_currencies);
        if configured.is_empty() {
            cfg.base_currencies = self.base_currencies.get_mut().join(",");
        } else {
            *self.base_currencies.get_mut() = configured;
        }

        let Some(pairs_cfg) = cfg.currency_pairs.as_ref() else {
            return;
        };
        let caps = self.currency_pairs.get_mut();
        for asset in caps.asset_types.clone().iter() {
            let Some(asset_cfg) = pairs_cfg.asset(*asset) else {
                continue;
            };
            let store = caps.store_mut(*asset);
            store.available = split_list(&asset_cfg.available);
            store.enabled = split_list(&asset_cfg.enabled);
        }
    }
}

/// 표식 값이거나 비어있으면 기본 URL
fn resolve_url(configured: &str, default: &str) -> String {
    if configured.is_empty() || configured == API_URL_NON_DEFAULT_MESSAGE {
        default.to_string()
    } else {
        configured.to_string()
    }
}
