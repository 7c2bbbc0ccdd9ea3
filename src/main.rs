//! Shop Admin - dashboard server for the shop backend

use anyhow::Result;
use shop_admin::{build_router, AdminConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdminConfig::from_env()?;
    let port = config.port;
    tracing::info!(backend = %config.backend_url, cache_keep_secs = config.cache_keep_for.as_secs(), "configuration loaded");

    let state = AppState::new(config)?;
    let app = build_router(state);

    tracing::info!("🚀 Shop admin listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}
