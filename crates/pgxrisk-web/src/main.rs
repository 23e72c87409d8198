//! PGx Risk Web Server
//!
//! Run with: cargo run -p pgxrisk-web

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pgxrisk_llm::GroqBackend;
use pgxrisk_web::config::Config;
use pgxrisk_web::router::build_router;
use pgxrisk_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    // Missing credentials are fatal at startup, not per-request
    let api_key = config.api_key()?;

    let backend = GroqBackend::new(api_key.expose_secret(), config.llm.model.as_str())
        .with_base_url(config.llm.base_url.as_str())
        .with_timeout(Duration::from_secs(config.llm.request_timeout_secs));

    info!(model = %config.llm.model, "text-generation backend configured");

    let state = AppState::new(Arc::new(backend), config.server.max_upload_bytes);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
