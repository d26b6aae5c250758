//! HTTP error responses
//!
//! The JSON endpoint reports `{"error": "..."}`; the expiry endpoint reports
//! plain text lines.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::common::InspectorError;

/// Plain text message for a missing `url` parameter
pub const MISSING_URL_MESSAGE: &str = "Missing 'url' query parameter";

/// Plain text message for an unusable `url` parameter
pub const INVALID_URL_MESSAGE: &str = "Invalid 'url' format. Example: https://example.com:8443";

/// Plain text message when the server could not be reached
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to the server";

/// Plain text message when the peer presented no certificate
pub const NO_CERTIFICATES_MESSAGE: &str = "No certificates found";

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Error returned by the JSON endpoint
#[derive(Debug)]
pub struct ApiError(pub InspectorError);

impl From<InspectorError> for ApiError {
    fn from(err: InspectorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = ErrorResponse {
            error: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Error returned by the plain text endpoint
#[derive(Debug)]
pub struct TextError {
    status: StatusCode,
    message: &'static str,
}

impl TextError {
    /// HTTP status of the response
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body text without the trailing newline
    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl From<&InspectorError> for TextError {
    fn from(err: &InspectorError) -> Self {
        let (status, message) = match err {
            InspectorError::MissingInput(_) => (StatusCode::BAD_REQUEST, MISSING_URL_MESSAGE),
            InspectorError::MalformedInput(_) => (StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE),
            InspectorError::NoCertificates => {
                (StatusCode::INTERNAL_SERVER_ERROR, NO_CERTIFICATES_MESSAGE)
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, CONNECT_FAILED_MESSAGE),
        };

        Self { status, message }
    }
}

impl IntoResponse for TextError {
    fn into_response(self) -> Response {
        (self.status, format!("{}\n", self.message)).into_response()
    }
}
