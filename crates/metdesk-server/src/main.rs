use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Observability
    metdesk_obs::init("metdesk");

    // Config
    let cfg = metdesk_config::AppConfig::load().context("failed to load configuration")?;
    let http_bind = cfg.http_bind();

    // Build app and state
    let (app, state) = metdesk_server::build_app(&cfg)?;

    // Start HTTP server
    let addr: SocketAddr = http_bind
        .parse()
        .with_context(|| format!("Invalid HTTP bind address {http_bind}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;

    // Mark ready just before serving
    metdesk_server::set_ready(&state, true);

    tracing::info!(%addr, station = %cfg.station_id(), "HTTP server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
