mod allocator;
mod backend_client;
mod catalog;
mod config;
mod errors;
mod models;
mod results;
mod routes;
mod sessions;
mod state;
mod submission;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::HttpBackend;
use crate::config::Config;
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CEVEAI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize analysis backend client
    let backend = HttpBackend::new(&config.backend_url, config.backend_timeout)
        .context("Failed to build analysis backend client")?;
    info!(
        "Analysis backend: {} (timeout {}s)",
        backend.base_url(),
        config.backend_timeout.as_secs()
    );

    let sessions = SessionStore::new(config.session_ttl);
    info!(
        "Criteria sessions expire after {} idle minutes",
        config.session_ttl.num_minutes()
    );

    // Build app state
    let state = AppState {
        backend: Arc::new(backend),
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the front-end host once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
