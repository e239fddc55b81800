//! exchange-base binary
//!
//! 사용법: `exchange-base [config.toml]`

use std::sync::Arc;
use tracing::{error, info};

use exchange_base::types::AssetType;
use exchange_base::utils::init_tracing;
use exchange_base::{BaseResult, Engine, MarketDataCache, TomlConfigStore};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    if let Err(e) = run(&path).await {
        init_tracing("info", false);
        error!(error = %e, code = e.code(), "exiting");
        std::process::exit(1);
    }
}

async fn run(path: &str) -> BaseResult<()> {
    let store = TomlConfigStore::open(path)?;
    store.logging().init();
    info!(path, "config loaded");

    let mut engine = Engine::new(Arc::new(store), MarketDataCache::shared());
    let loaded = engine.load()?;
    info!(count = loaded, "exchanges loaded");

    let saved = engine.run().await?;
    if saved > 0 {
        info!(count = saved, "configs updated");
    }

    for exchange in engine.exchanges() {
        let pairs = exchange.get_enabled_pairs(AssetType::Spot)?;
        info!(
            exchange = %exchange.name(),
            count = pairs.len(),
            pairs = ?pairs.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            "enabled pairs"
        );
    }
    Ok(())
}
