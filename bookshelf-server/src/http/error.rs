//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookshelf_core::{RepoError, ServiceError, ValidationError};
use serde_json::json;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Book failed its invariants (400)
    Validation(ValidationError),

    /// Malformed request input, e.g. a non-UUID id (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Repository or store failure (500, logged)
    Repository(RepoError),
}

impl ApiError {
    pub fn book_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "book",
            id: id.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => {
                let violations: Vec<_> = e
                    .violations
                    .iter()
                    .map(|v| json!({ "field": v.field(), "message": v.to_string() }))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "validation_error",
                        "message": e.to_string(),
                        "violations": violations
                    }),
                )
            }
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Repository(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "repository error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => Self::Validation(v),
            ServiceError::NotFound(id) => Self::book_not_found(id),
            ServiceError::Repository(r) => Self::Repository(r),
        }
    }
}
