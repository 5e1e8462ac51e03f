//! Error handling for the backend API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flashdeck_core::{ConfigError, LayoutError};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Nothing to render: add at least one card")]
    NothingToRender,

    #[error("Invalid print options: {0}")]
    Config(#[from] ConfigError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl From<LayoutError> for ApiError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::EmptyDeck => ApiError::NothingToRender,
            LayoutError::Config(e) => ApiError::Config(e),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NothingToRender => (StatusCode::UNPROCESSABLE_ENTITY, "nothing_to_render"),
            ApiError::Config(_) => (StatusCode::BAD_REQUEST, "config_error"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_render_status() {
        let error = ApiError::from(LayoutError::EmptyDeck);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_config_error_status() {
        let error = ApiError::from(LayoutError::Config(ConfigError::MissingDuplexMode));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_payload_too_large_status() {
        let error = ApiError::PayloadTooLarge("length limit exceeded".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_error_display_config() {
        let error = ApiError::Config(ConfigError::UnknownDuplexMode("sideways".to_string()));
        assert_eq!(
            error.to_string(),
            "Invalid print options: unknown duplex mode: sideways"
        );
    }

    #[test]
    fn test_error_display_nothing_to_render() {
        let error = ApiError::NothingToRender;
        assert_eq!(error.to_string(), "Nothing to render: add at least one card");
    }
}
