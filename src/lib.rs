//! Certificate chain inspector
//!
//! Connects to a TLS endpoint, captures the certificate chain it presents
//! and reports a summary of every certificate together with a chain
//! validation verdict. The handshake itself never verifies the peer, so
//! untrusted, expired or mismatched chains can still be inspected.
//!
//! # Example
//!
//! ```no_run
//! use cert_chain_inspector::inspector::DEFAULT_DIAL_TIMEOUT;
//! use cert_chain_inspector::{Inspector, Target, TrustAnchors, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let inspector = Inspector::new(TrustAnchors::system(), DEFAULT_DIAL_TIMEOUT)?;
//!
//!     // Dial an IP but validate against a hostname
//!     let target = Target::from_ip_and_url("93.184.216.34", "https://example.com")?;
//!     let result = inspector.inspect(&target).await?;
//!
//!     println!("{}", result.validation);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod common;
pub mod config;
pub mod inspector;
pub mod tls;

pub use common::{InspectorError, Result};
pub use config::ServerConfig;
pub use inspector::{CertificateSummary, ChainResult, ChainValidation, Inspector, Target};
pub use tls::TrustAnchors;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
