pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every error leaves the service in this shape:
/// - `error`: human-readable message
/// - `code`: integer error code for logging/monitoring (e.g., 1001)
/// - `details`: optional structured details (e.g., per-field validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Validation error",
///   "code": 1001,
///   "details": {
///     "validation_errors": [
///       { "field": "price", "code": "range", "message": "price must be greater than 0" }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.code(),
            details: None,
        }
    }
}

/// One violated field constraint, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: String,
    /// Machine-readable constraint identifier (e.g., "length", "range")
    pub code: String,
    /// Human-readable reason
    pub message: String,
}

/// Flatten [`ValidationErrors`] into a list ordered by field name.
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldViolation {
                field: field.to_string(),
                code: err.code.to_string(),
                message: err
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            })
        })
        .collect()
}

/// Application error type that can be converted to HTTP responses.
///
/// This is the single place where outcomes become status codes; each variant
/// maps to exactly one status.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Body could not be parsed as a JSON object
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// Body parsed but violates field constraints
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),

    /// Detail is logged, never returned to the caller
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedJson(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) | AppError::UnprocessableEntity(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::MalformedJson(details) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "Malformed request body: {}",
                    details
                );
                ErrorResponse::new(
                    ErrorCode::InvalidJson,
                    format!("{}: {}", ErrorCode::InvalidJson.default_message(), details),
                )
            }
            AppError::ValidationError(errors) => {
                let violations = field_violations(&errors);
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    violations = violations.len(),
                    "Validation error: {}",
                    errors
                );
                ErrorResponse {
                    details: Some(json!({ "validation_errors": violations })),
                    ..ErrorResponse::new(
                        ErrorCode::ValidationError,
                        ErrorCode::ValidationError.default_message(),
                    )
                }
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                ErrorResponse::new(ErrorCode::BadRequest, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                ErrorResponse::new(ErrorCode::NotFound, msg)
            }
            AppError::UnprocessableEntity(msg) => {
                tracing::info!(
                    error_code = ErrorCode::UnprocessableEntity.code(),
                    "Unprocessable entity: {}",
                    msg
                );
                ErrorResponse::new(ErrorCode::UnprocessableEntity, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                ErrorResponse::new(
                    ErrorCode::InternalError,
                    ErrorCode::InternalError.default_message(),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                ErrorResponse::new(ErrorCode::ServiceUnavailable, msg)
            }
        };

        (status, Json(body)).into_response()
    }
}
