// Shared HTTP response types for consistent API error payloads.

use crate::domain::errors::SimulationError;
use axum::{Json, http::StatusCode};

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// Invalid arguments and unknown pairs are caller mistakes, never server faults.
pub fn map_simulation_error(err: SimulationError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        SimulationError::InvalidArgument(reason) => error_response(StatusCode::BAD_REQUEST, reason),
        SimulationError::NotFound => error_response(StatusCode::NOT_FOUND, "pair not found"),
    }
}
