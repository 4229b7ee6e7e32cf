//! Cardex Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Forwards browser calls to the marketplace upstreams on /gateway/*
//! - Serves the built SPA as static files
//! - Exposes health/version endpoints for operations
//!
//! The browser only ever talks to this process on its own origin; upstream
//! network locations stay behind the gateway.

use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod router;

use cardex_gateway::state::GatewayState;
use cardex_gateway::upstream::Upstream;

const DEFAULT_PORT: u16 = 8762;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("CARDEX_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    info!("🚀 Cardex Server starting on port {}...", port);

    let state = GatewayState::from_env().map_err(|e| anyhow::anyhow!(e))?;
    for upstream in
        [Upstream::Auth, Upstream::Sync, Upstream::SearchIndex, Upstream::SearchAdmin]
    {
        match state.registry.resolve(upstream).base_url {
            Some(url) => info!("🔗 {} -> {}", upstream, url),
            None => tracing::warn!("⚠️ {} is not configured", upstream),
        }
    }

    let app = router::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("🔀 Gateway endpoints at http://localhost:{}/gateway/", port);

    axum::serve(listener, app).await?;

    Ok(())
}
