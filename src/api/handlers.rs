//! HTTP request handlers

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use log::{debug, info, log, warn, Level};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::{ApiError, TextError};
use crate::common::InspectorError;
use crate::inspector::{ChainResult, Inspector, Target};

/// Query of the chain inspection endpoint
#[derive(Debug, Default, Deserialize)]
pub struct CheckSslQuery {
    /// Address to dial
    pub ip: Option<String>,
    /// URL or host whose name is validated
    pub url: Option<String>,
}

/// Query of the expiry endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ExpiryQuery {
    /// `https` URL to check
    pub url: Option<String>,
    /// `true` to log each step
    pub debug: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Inspect the chain served at `ip` for the host named by `url`
pub async fn check_ssl(
    State(inspector): State<Arc<Inspector>>,
    Query(query): Query<CheckSslQuery>,
) -> Result<Json<ChainResult>, ApiError> {
    let target = Target::from_ip_and_url(
        query.ip.as_deref().unwrap_or_default(),
        query.url.as_deref().unwrap_or_default(),
    )?;

    debug!("Inspecting {}", target);
    let result = inspector.inspect(&target).await.map_err(|e| {
        warn!("Inspection of {} failed: {}", target, e);
        ApiError(e)
    })?;

    Ok(Json(result))
}

/// Report when the leaf certificate served for `url` expires
///
/// A chain that does not verify is answered with a 500, as is a failed
/// connection. With `debug=true` each step is logged at `warn`, so it shows
/// up under the default log level.
pub async fn certificate_expiry(
    State(inspector): State<Arc<Inspector>>,
    Query(query): Query<ExpiryQuery>,
) -> Result<String, TextError> {
    let verbose = query.debug.as_deref() == Some("true");
    let raw_url = query.url.unwrap_or_default();

    let target = Target::from_https_url(&raw_url).map_err(|e| {
        trace_step(verbose, &format!("rejected url '{}': {}", raw_url, e));
        TextError::from(&e)
    })?;
    trace_step(verbose, &format!("dialing {}", target.dial_address()));

    let result = inspector.inspect(&target).await.map_err(|e| {
        trace_step(verbose, &format!("inspection of {} failed: {}", target, e));
        TextError::from(&e)
    })?;
    trace_step(
        verbose,
        &format!("received {} certificate(s), {}", result.certificates.len(), result.validation),
    );

    // An unverified chain is reported like a failed connection
    if !result.validation.is_valid() {
        trace_step(verbose, &format!("rejecting {}: {}", target, result.validation));
        return Err(TextError::from(&InspectorError::Connection(result.validation.message())));
    }

    let leaf = result
        .leaf()
        .ok_or_else(|| TextError::from(&InspectorError::NoCertificates))?;
    let expiry = leaf.not_after.to_rfc3339_opts(SecondsFormat::Secs, true);

    info!("Certificate for {} expires on {}", raw_url, expiry);
    Ok(format!("SSL certificate for {} expires on {}\n", raw_url, expiry))
}

fn trace_step(verbose: bool, message: &str) {
    let level = if verbose { Level::Warn } else { Level::Debug };
    log!(level, "Debug: {}", message);
}
