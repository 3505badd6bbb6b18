//! HTTP front door: CORS middleware, reverse proxy, and the demo backend.

pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod settings;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get};

use crate::Cors;
use middleware::cors_middleware;
use proxy::{ProxyState, proxy_handler};

pub type SharedCors = Arc<Cors>;

/// Router that forwards every path to the upstream behind the CORS layer.
pub fn proxy_router(cors: SharedCors, proxy: ProxyState) -> Router {
    Router::new()
        .route("/", any(proxy_handler))
        .route("/{*path}", any(proxy_handler))
        .with_state(proxy)
        .layer(axum::middleware::from_fn_with_state(cors, cors_middleware))
}

/// The demo backend: `GET /dummy` behind the CORS layer.
pub fn backend_router(cors: SharedCors) -> Router {
    Router::new()
        .route("/dummy", get(routes::dummy))
        .layer(axum::middleware::from_fn_with_state(cors, cors_middleware))
}
