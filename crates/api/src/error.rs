//! HTTP error type.
//!
//! Handlers log each failure where it happens (with the request ID) and then
//! return an `ApiError`, which only renders the response. Every error body is
//! `{"error": "<message>"}`; the status code is the machine-readable signal.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every store failure. Internal detail stays in the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when a request runs past its deadline.
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body or path parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Addressed user does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Store failure; rendered with an opaque message.
    #[error("Internal error")]
    Internal,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// The HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
            Self::Timeout => TIMEOUT_MESSAGE.to_string(),
            Self::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");

        let err = ApiError::BadRequest("Invalid JSON".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid JSON");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(ApiError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_client_errors_render_their_message() {
        let (status, body) = body_of(ApiError::NotFound("User not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "User not found"}));
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let (status, body) = body_of(ApiError::Internal).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": INTERNAL_ERROR_MESSAGE}));
    }
}
