//! HTTP API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::AppState;

/// Create the main API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health))
        // Weekly calendar
        .route("/api/calendar", get(handlers::calendar::get_calendar))
        .route("/api/calendar/slots", get(handlers::calendar::get_slots))
        .route("/api/calendar/legend", get(handlers::calendar::get_legend))
        .route("/api/calendar/project", post(handlers::calendar::project))
        // Cron table
        .route("/api/crons", get(handlers::crons::list))
        .route("/api/crons/stats", get(handlers::crons::stats))
        .route("/api/crons/describe", get(handlers::crons::describe))
        .with_state(state)
}
