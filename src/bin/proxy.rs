//! Reverse proxy front door: CORS in front of a catch-all forward to the
//! configured upstream.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use cors_gateway::Cors;
use cors_gateway::server::proxy::ProxyState;
use cors_gateway::server::settings::{Component, Settings};
use cors_gateway::server::{proxy_router, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let settings = Settings::load(Component::Proxy).context("loading proxy settings")?;
    let cors = Cors::new(settings.cors.to_options()).context("invalid CORS configuration")?;
    let proxy = ProxyState::new(
        &settings.proxy.upstream,
        Duration::from_secs(settings.proxy.timeout_secs),
    )?;

    let addr = settings.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, upstream = proxy.upstream(), "proxy listening");

    let app = proxy_router(Arc::new(cors), proxy);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
