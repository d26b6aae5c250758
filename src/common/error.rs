//! Error handling module
//!
//! This module defines the error types and result type aliases used in the application.

use axum::http::StatusCode;
use thiserror::Error;
use std::io;

/// Certificate chain inspector error type
///
/// A failed chain verification is not represented here: it is a successful
/// inspection whose validation message carries the reason.
#[derive(Error, Debug)]
pub enum InspectorError {
    /// Address or server name absent
    #[error("{0}")]
    MissingInput(String),

    /// URL parse failure, wrong scheme or missing host
    #[error("{0}")]
    MalformedInput(String),

    /// Dial or handshake failure
    #[error("Failed to connect via TLS: {0}")]
    Connection(String),

    /// Handshake succeeded but the peer sent no certificate
    #[error("Server did not provide any certificates.")]
    NoCertificates,

    /// A presented certificate could not be summarized
    #[error("Certificate error: {0}")]
    Certificate(String),

    /// OpenSSL error while preparing a connection
    #[error("OpenSSL error: {0}")]
    Ssl(#[from] openssl::error::ErrorStack),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InspectorError {
    /// Whether the caller supplied insufficient or unusable input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingInput(_) | Self::MalformedInput(_))
    }

    /// HTTP status reported for this error
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `InspectorError`.
pub type Result<T> = std::result::Result<T, InspectorError>;
