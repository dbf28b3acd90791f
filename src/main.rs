use anyhow::Context;
use mudrex::api::types::AssetQuery;
use mudrex::{MudrexClient, MudrexConfig, Pagination};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Reads MUDREX_API_SECRET (and optional overrides) from .env or the environment
    #[cfg(feature = "env-file")]
    let config = MudrexConfig::from_env_file("MUDREX");
    #[cfg(not(feature = "env-file"))]
    let config = MudrexConfig::from_env("MUDREX");
    let config = config.context("loading Mudrex configuration")?;

    let client = MudrexClient::with_config(config).context("building client")?;

    let assets = client
        .assets
        .list(&AssetQuery::new().page(1, 5))
        .await
        .context("listing assets")?;
    for asset in &assets {
        info!("{}", asset);
    }

    match client.wallet.futures_balance().await {
        Ok(balance) => info!("{}", balance),
        Err(e) => warn!(kind = ?e.kind(), code = e.code(), "futures balance unavailable: {}", e),
    }

    for position in client.positions.list_open().await? {
        let pnl = position
            .pnl_percentage()
            .map_or_else(|| "n/a".to_string(), |p| format!("{}%", p.round_dp(2)));
        info!("{} ({})", position, pnl);
    }

    for fee in client.fees.history(Pagination::new(1, 10)).await? {
        info!("{}", fee);
    }

    client.close();
    Ok(())
}
