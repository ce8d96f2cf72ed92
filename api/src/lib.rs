//! HTTP presentation layer over the retrieval pipeline.
//!
//! Routes:
//! - `POST /search`
//! - `GET /languages`
//! - `GET /health`

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::{env, sync::Arc};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        health_route::health_route, languages_route::languages_route,
        search::search_route::search_route,
    },
};

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";

/// Builds the router around `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", post(search_route))
        .route("/languages", get(languages_route))
        .route("/health", get(health_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Builds the backends from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let addr = env::var("API_ADDRESS")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(target: "api::server", %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!(target: "api::server", "stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(target: "api::server", error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target: "api::server", "shutdown requested");
}
