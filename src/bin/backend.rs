//! Demo backend the proxy forwards to.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use cors_gateway::Cors;
use cors_gateway::server::settings::{Component, Settings};
use cors_gateway::server::{backend_router, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let settings = Settings::load(Component::Backend).context("loading backend settings")?;
    let cors = Cors::new(settings.cors.to_options()).context("invalid CORS configuration")?;

    let addr = settings.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "backend listening");

    axum::serve(listener, backend_router(Arc::new(cors))).await?;

    Ok(())
}
