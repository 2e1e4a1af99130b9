//! Weekly calendar HTTP handlers

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use super::error_response;
use crate::api::AppState;
use crate::calendar::{CalendarSlot, CalendarView, LegendEntry};
use crate::error::AppError;
use crate::gateway::parse_jobs_payload;

/// Weekly grid for the current gateway job list
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CalendarView>, impl IntoResponse> {
    match state.source.fetch_jobs().await {
        Ok(jobs) => Ok(Json(state.engine.build_calendar(&jobs))),
        Err(e) => Err(error_response(e)),
    }
}

/// Flat slot list for the current gateway job list
pub async fn get_slots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CalendarSlot>>, impl IntoResponse> {
    match state.source.fetch_jobs().await {
        Ok(jobs) => Ok(Json(state.engine.project_all(&jobs))),
        Err(e) => Err(error_response(e)),
    }
}

/// Palette legend
pub async fn get_legend(State(state): State<Arc<AppState>>) -> Json<Vec<LegendEntry>> {
    Json(state.engine.palette().legend())
}

/// Project a posted job list without contacting the gateway
pub async fn project(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<CalendarView>, impl IntoResponse> {
    match parse_jobs_payload(&body) {
        Ok(jobs) => Ok(Json(state.engine.build_calendar(&jobs))),
        Err(e) => Err(error_response(
            AppError::invalid_params(e.message).with_details(e.details.unwrap_or_default()),
        )),
    }
}
