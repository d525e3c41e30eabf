//! Entry point: load configuration and serve the site.

use anyhow::Context;
use apa_stats::{
    apa::StatsApi,
    cli::ApaStats,
    web::{router, AppState},
    Config,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run the server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_from(ApaStats::parse()).context("invalid configuration")?;
    let api = StatsApi::from_config(&config)?;

    info!(endpoint = %config.endpoint.url(), "using APA GraphQL endpoint");

    let app = router(AppState::new(api));
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
