//! HTTP API server module
//!
//! Serves the calendar and cron-table views as JSON for the browser frontend.
//! Every request re-reads the job list from the gateway; nothing is cached.

pub mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::calendar::CronProjectionEngine;
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::gateway::JobSource;

/// Shared application state for HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Arc<CronProjectionEngine>,
    pub source: JobSource,
}

impl AppState {
    pub fn new(engine: CronProjectionEngine, source: JobSource) -> Self {
        Self {
            engine: Arc::new(engine),
            source,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, AppError> {
        let engine = CronProjectionEngine::new(config.palette.clone());
        let source = JobSource::from_config(config)?;
        Ok(Self::new(engine, source))
    }
}

/// Start the HTTP API server
///
/// SECURITY: binding to 0.0.0.0 exposes the dashboard (and the gateway data
/// behind it) to the network.
pub async fn start_server(config: &DashboardConfig) -> Result<(), AppError> {
    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!(source = %state.source.describe(), "Job source configured");

    // Configure CORS for cross-origin requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.api.host, config.api.port)
        .parse()
        .map_err(|e| AppError::config_error(format!("Invalid API address: {}", e)))?;

    if config.api.host == "0.0.0.0" {
        tracing::warn!("Server binding to 0.0.0.0 - accessible from network");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP API server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::unknown(format!("HTTP server error: {}", e)))
}
