//! HTTP request handlers

pub mod calendar;
pub mod crons;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::{AppError, ErrorCode};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::GatewayUnavailable
        | ErrorCode::GatewayError
        | ErrorCode::CliError
        | ErrorCode::ParseError => StatusCode::BAD_GATEWAY,
        ErrorCode::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::InvalidParams => StatusCode::BAD_REQUEST,
        ErrorCode::FileNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ConfigError | ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(err: AppError) -> (StatusCode, Json<ErrorResponse>) {
    (
        status_for(err.code),
        Json(ErrorResponse {
            error: err.message,
            code: err.code,
            details: err.details,
        }),
    )
}
