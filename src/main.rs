use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pogoda_bot::{BotConfig, bot};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::load()?;
    info!(version = env!("CARGO_PKG_VERSION"), "pogoda-bot starting");

    bot::run(config).await
}
