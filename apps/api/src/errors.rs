#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    EmptyDocument(String),

    #[error("The model returned invalid JSON. Please try again with a clearer resume.")]
    UnparseableOutput { raw_output: String },

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Schema validation failed: {0}")]
    SchemaViolation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::EmptyDocument(msg) => (StatusCode::BAD_REQUEST, "EMPTY_DOCUMENT", msg.clone()),
            AppError::UnparseableOutput { raw_output } => {
                tracing::warn!(raw_output = %raw_output, "Unparseable model output");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPARSEABLE_MODEL_OUTPUT",
                    self.to_string(),
                )
            }
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_UNAVAILABLE",
                    "The AI service could not be reached. Please try again later.".to_string(),
                )
            }
            AppError::SchemaViolation(msg) => {
                tracing::error!("Schema violation after sanitization: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SCHEMA_VIOLATION",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
