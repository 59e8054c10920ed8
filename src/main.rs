use anyhow::Result;
use phakkay_camping::{config::Config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (absent in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("phakkay_camping=info".parse()?),
        )
        .init();

    info!("Starting Phakkay Camping site server");

    let config = Config::from_env()?;
    info!(
        "Environment: {:?}, site URL: {}",
        config.environment, config.site_url
    );

    server::serve(config).await
}
