use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Infrastructure failure raised by a backing store.
///
/// Lookup misses are never errors; they are modeled as `None` or an empty map.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, details, validation_errors) = match self {
            ApiError::NotFound(msg) => ("Resource not found".to_string(), msg, Vec::new()),
            ApiError::BadRequest(msg) => ("Bad request".to_string(), msg, Vec::new()),
            ApiError::Validation(errors) => (
                "Validation failed".to_string(),
                "Please check the input fields.".to_string(),
                errors,
            ),
            ApiError::Unauthorized => (
                "Unauthorized".to_string(),
                "A valid admin API key is required.".to_string(),
                Vec::new(),
            ),
            ApiError::Store(e) => {
                // Store details stay in the logs, not in the response
                error!("Store failure while serving request: {}", e);
                (
                    "Internal server error".to_string(),
                    "An unexpected error occurred.".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            message,
            details,
            timestamp: Utc::now(),
            validation_errors,
        };

        (status, Json(body)).into_response()
    }
}
