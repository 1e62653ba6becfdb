//! API error type and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recap_types::{EmailResult, ErrorResponse, ValidationError};

pub const SUMMARY_FAILED: &str = "Failed to generate summary";
pub const SEND_FAILED: &str = "Failed to send some emails";
pub const MAIL_DISABLED: &str = "Email delivery is not configured";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing fields or an undecodable body.
    #[error("{0}")]
    BadRequest(String),
    /// Provider failure; the cause is logged, the client sees only this text.
    #[error("{0}")]
    Upstream(&'static str),
    /// At least one recipient failed; carries exactly the failed results.
    #[error("Failed to send some emails")]
    Delivery(Vec<EmailResult>),
    #[error("{0}")]
    Unavailable(&'static str),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg)),
            ApiError::Delivery(failed) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: SEND_FAILED.to_string(),
                    details: Some(failed),
                },
            ),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(msg)),
        };
        (status, Json(body)).into_response()
    }
}
