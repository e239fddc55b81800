//! Config reconciliation and pair synchronization across real adapters

mod common;

use exchange_base::client::{ExchangeConfig, DEFAULT_HTTP_TIMEOUT_MS};
use exchange_base::exchanges::PairRole;
use exchange_base::types::{AssetType, CurrencyPair};
use exchange_base::Exchange;

use common::{huobi, huobi_symbols, transport};

#[test]
fn test_reconciliation_is_idempotent() {
    let transport = transport();
    let mut first = huobi(&transport);
    first.setup(ExchangeConfig::new("Huobi")).unwrap();
    let reconciled = first.base().config_snapshot();
    assert!(first.base().is_dirty());
    assert_eq!(reconciled.http_timeout_ms, DEFAULT_HTTP_TIMEOUT_MS);
    assert_eq!(reconciled.base_currencies, "USD");

    let mut second = huobi(&transport);
    second.setup(reconciled.clone()).unwrap();
    assert_eq!(second.base().config_snapshot(), reconciled);
    assert!(!second.base().is_dirty());
}

#[test]
fn test_disabled_config_only_disables() {
    let mut exchange = huobi(&transport());
    exchange
        .setup(ExchangeConfig::new("Huobi").with_enabled(false))
        .unwrap();

    assert!(!exchange.base().is_enabled());
    assert!(!exchange.base().is_dirty());
}

#[test]
fn test_persisted_pairs_are_restored() {
    let mut exchange = huobi(&transport());
    let cfg = ExchangeConfig::new("Huobi").with_pairs(
        AssetType::Spot,
        &["BTC-USDT"],
        &["BTC-USDT", "ETH-BTC"],
    );
    exchange.setup(cfg).unwrap();

    let enabled = exchange.get_enabled_pairs(AssetType::Spot).unwrap();
    assert_eq!(enabled, vec![CurrencyPair::new("BTC", "USDT")]);
    assert_eq!(
        exchange.base().pair_strings(AssetType::Spot, PairRole::Available),
        vec!["BTC-USDT", "ETH-BTC"]
    );
}

#[test]
fn test_global_format_renders_display_and_request() {
    let exchange = huobi(&transport());
    let base = exchange.base();
    let pair = CurrencyPair::new("btc", "usdt");

    let display = base.get_pair_format(AssetType::Spot, false).unwrap();
    assert_eq!(pair.format(&display), "BTC-USDT");
    assert_eq!(
        base.format_exchange_currency(&pair, AssetType::Spot).unwrap(),
        "btcusdt"
    );
}

#[tokio::test]
async fn test_pair_sync_converges() {
    let transport = transport();
    transport.on_get("/v1/common/symbols", huobi_symbols(&[("btc", "usdt"), ("eth", "btc")]));
    let exchange = huobi(&transport);
    let base = exchange.base();

    exchange.update_tradable_pairs(false).await.unwrap();
    assert!(base.take_dirty());
    let stamped = base.last_pairs_update_time();
    assert!(stamped > 0);

    // 같은 목록이면 변경 없음
    exchange.update_tradable_pairs(false).await.unwrap();
    assert!(!base.is_dirty());

    // 강제 갱신은 같은 목록도 다시 기록
    exchange.update_tradable_pairs(true).await.unwrap();
    assert!(base.take_dirty());

    transport.on_get("/v1/common/symbols", huobi_symbols(&[("btc", "usdt"), ("ltc", "btc")]));
    exchange.update_tradable_pairs(false).await.unwrap();
    assert!(base.is_dirty());
    assert_eq!(
        base.pair_strings(AssetType::Spot, PairRole::Available),
        vec!["BTC-USDT", "LTC-BTC"]
    );
    assert_eq!(
        base.config_snapshot()
            .currency_pairs
            .unwrap()
            .spot
            .unwrap()
            .available,
        "BTC-USDT,LTC-BTC"
    );
}

#[tokio::test]
async fn test_empty_product_list_is_rejected() {
    let transport = transport();
    transport.on_get("/v1/common/symbols", huobi_symbols(&[]));
    let exchange = huobi(&transport);

    let err = exchange.update_tradable_pairs(true).await.unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("empty product list"));
}

#[test]
fn test_invalid_credentials_degrade_to_public_only() {
    let mut exchange = huobi(&transport());
    exchange
        .setup(ExchangeConfig::new("Huobi").with_credentials("", ""))
        .unwrap();

    assert!(!exchange.base().api.authenticated_support);
    assert!(!exchange.base().allow_authenticated_request());
    assert!(exchange.base().config_snapshot().api.authenticated_support);
}

#[test]
fn test_valid_credentials_allow_private_calls() {
    let mut exchange = huobi(&transport());
    exchange
        .setup(ExchangeConfig::new("Huobi").with_credentials("key", "secret"))
        .unwrap();

    assert!(exchange.base().allow_authenticated_request());
}
