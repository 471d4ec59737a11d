//! Unified error handling for spectryd.
//!
//! The registry operations themselves are total; errors arise only at the
//! HTTP boundary (malformed input) or from a capture backend. Absence of a
//! best channel is `None`/`null`, never an error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::capture::CaptureError;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required field missing or wrong type in a request body.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The capture backend failed.
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),
}

impl ApiError {
    /// Static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Capture(_) => "capture_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Capture(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        crate::metrics::inc_api_error(self.error_code());
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(
            ApiError::InvalidInput("x".into()).error_code(),
            "invalid_input"
        );
        assert_eq!(
            ApiError::Capture(CaptureError::Unsupported("none".into())).error_code(),
            "capture_error"
        );
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let response = ApiError::InvalidInput("missing field `band`".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn capture_error_maps_to_502() {
        let response =
            ApiError::Capture(CaptureError::Unsupported("none".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
