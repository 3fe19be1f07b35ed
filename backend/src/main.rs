use std::sync::Arc;

use anyhow::Context;
use expense_tracker::config::{EnvConfigSource, ServerConfig};
use expense_tracker::{create_router, initialize_backend};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may be set directly
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_config = ServerConfig::from_env().context("Invalid server configuration")?;

    info!("Setting up expense service");
    let app_state = initialize_backend(Arc::new(EnvConfigSource));
    let app = create_router(app_state, server_config.cors_origin.clone());

    let listener = TcpListener::bind(server_config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_addr))?;
    info!("Listening on {}", server_config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
