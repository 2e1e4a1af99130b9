//! Cron table HTTP handlers

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error_response;
use crate::api::AppState;
use crate::crons::format::{cron_to_human, is_valid_expression, next_runs};
use crate::crons::{compute_stats, list_crons, CronListPage, CronListQuery, CronStats};

/// Filtered, sorted and paginated cron table
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CronListQuery>,
) -> Result<Json<CronListPage>, impl IntoResponse> {
    match state.source.fetch_jobs().await {
        Ok(jobs) => Ok(Json(list_crons(&jobs, &query, Utc::now().timestamp_millis()))),
        Err(e) => Err(error_response(e)),
    }
}

/// Summary counts
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CronStats>, impl IntoResponse> {
    match state.source.fetch_jobs().await {
        Ok(jobs) => Ok(Json(compute_stats(&jobs))),
        Err(e) => Err(error_response(e)),
    }
}

#[derive(Deserialize)]
pub struct DescribeQuery {
    expr: String,
    #[serde(default = "default_count")]
    count: usize,
}

fn default_count() -> usize {
    5
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CronDescription {
    pub expression: String,
    pub human_readable: String,
    pub valid: bool,
    /// RFC 3339, UTC
    pub next_runs: Vec<String>,
}

/// Describe a cron expression in human-readable form with its next runs
pub async fn describe(Query(query): Query<DescribeQuery>) -> Json<CronDescription> {
    let runs = next_runs(&query.expr, Utc::now(), query.count)
        .into_iter()
        .map(|dt| dt.to_rfc3339())
        .collect();

    Json(CronDescription {
        human_readable: cron_to_human(&query.expr),
        valid: is_valid_expression(&query.expr),
        next_runs: runs,
        expression: query.expr,
    })
}
