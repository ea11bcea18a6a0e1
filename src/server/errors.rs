use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use std::fmt;

use crate::errors::FinancingError;

/// HTTP-facing error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// One or more request fields out of bounds; comma-joined `field: message` list.
    Validation(String),
    /// Body could not be parsed into the expected shape.
    BadRequest(String),
    /// Unexpected failure while computing a quote.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(details) => write!(f, "Validation failed: {}", details),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to a status code and JSON body, logging by severity.
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(details) => {
                tracing::warn!("Rejected financing request: {}", details);
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "success": false,
                        "error": "Validation failed",
                        "details": details,
                    }),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Malformed request body: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "success": false,
                        "error": msg,
                    }),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Financing calculation failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "error": msg,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<FinancingError> for AppError {
    fn from(err: FinancingError) -> Self {
        match err {
            FinancingError::Validation { .. } => AppError::Validation(err.to_string()),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Turns a panicking handler into a 500 instead of a dropped connection.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::InternalError(format!("unexpected failure: {}", detail)).into_response()
}
