use anyhow::Result;
use tracing::{info, warn};
use unnexted::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to read .env: {}", e);
        }
    }

    let config = Config::from_env().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });

    info!(
        "unnexted starting ({:?}) - port: {}, pages: {}",
        config.mode, config.server.port, config.routing.pages_dir
    );

    unnexted_server::serve(config).await
}
