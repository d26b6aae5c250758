//! Certificate chain inspection
//!
//! Dials a target, collects the chain the peer presents and verifies it
//! against the configured trust anchors.

mod types;

use log::{info, warn};
use openssl::ssl::SslConnector;
use std::time::Duration;

use crate::common::Result;
use crate::config::defaults::DIAL_TIMEOUT_SECS;
use crate::config::ServerConfig;
use crate::tls::{create_tls_connector, fetch_peer_chain, summarize_chain, verify_chain, TrustAnchors};

pub use types::{
    CertificateSummary, ChainResult, ChainValidation, Target, CHAIN_INVALID_PREFIX,
    CHAIN_VALID_MESSAGE,
};

/// Default bound on connect plus handshake
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(DIAL_TIMEOUT_SECS);

/// Shared inspection state
///
/// Immutable once built, so one instance can serve concurrent requests
/// behind an `Arc`.
pub struct Inspector {
    connector: SslConnector,
    trust: TrustAnchors,
    dial_timeout: Duration,
}

impl Inspector {
    /// Create an inspector
    pub fn new(trust: TrustAnchors, dial_timeout: Duration) -> Result<Self> {
        Ok(Self {
            connector: create_tls_connector()?,
            trust,
            dial_timeout,
        })
    }

    /// Create an inspector from server configuration
    ///
    /// Loads the configured CA bundles.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let trust = TrustAnchors::from_pem_files(config.use_system_roots, &config.extra_ca_files)?;
        Self::new(trust, config.dial_timeout())
    }

    /// Bound on connect plus handshake
    pub fn dial_timeout(&self) -> Duration {
        self.dial_timeout
    }

    /// Trust anchors used for verification
    pub fn trust_anchors(&self) -> &TrustAnchors {
        &self.trust
    }

    /// Inspect the chain presented by `target`
    ///
    /// # Errors
    ///
    /// * `Connection` - the target could not be reached or the handshake failed
    /// * `NoCertificates` - the peer presented no certificate
    ///
    /// A chain that fails verification is returned as `Ok` with an
    /// [`ChainValidation::Invalid`] verdict.
    pub async fn inspect(&self, target: &Target) -> Result<ChainResult> {
        let chain = fetch_peer_chain(&self.connector, target, self.dial_timeout).await?;
        let certificates = summarize_chain(&chain)?;
        let validation = verify_chain(&chain, target.server_name(), &self.trust);

        if validation.is_valid() {
            info!("Chain from {} is valid", target);
        } else {
            warn!("Chain from {} did not verify: {}", target, validation);
        }

        Ok(ChainResult {
            target_url: target.target_url(),
            certificates,
            validation,
        })
    }
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector")
            .field("trust", &self.trust)
            .field("dial_timeout", &self.dial_timeout)
            .finish()
    }
}
