mod config;
mod document;
mod errors;
mod imaging;
mod layout;
mod render;
mod routes;
mod state;
mod style;
mod units;
mod viewport;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::render::assets::HttpAssetResolver;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed env vars fail startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvrender v{}", env!("CARGO_PKG_VERSION"));
    info!(
        locale = config.default_locale.as_str(),
        debounce_ms = config.resize_debounce.as_millis() as u64,
        threshold = config.transparency_threshold,
        max_image_bytes = config.max_image_bytes,
        "Configuration loaded"
    );

    // Remote portraits are fetched with a bounded timeout and size
    let assets = HttpAssetResolver::new(config.image_fetch_timeout, config.max_image_bytes)?;
    info!("Image asset resolver initialized");

    let state = AppState::new(config.clone(), Arc::new(assets));
    state.sessions.spawn_sweeper();
    info!(
        idle_ttl_secs = config.session_idle_ttl.as_secs(),
        "View session sweeper started"
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the host UI domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
