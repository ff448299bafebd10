use anyhow::Context;
use tracing_subscriber::EnvFilter;

use streamfinder::{
    api::{create_router, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Loaded once; read-only for the life of the process
    let config = Config::from_env()?;
    tracing::info!(config = ?config, "Configuration loaded");

    let state = AppState::from_config(&config).context("failed to build API clients")?;
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Bridge listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
