//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults;

/// Configuration values from one source
///
/// Every field is optional so that sources can be layered; see
/// [`ConfigValues::merge`](crate::config::ConfigValues::merge).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigValues {
    /// Host or IP the HTTP server binds to
    #[serde(default)]
    pub listen_host: Option<String>,

    /// Port the HTTP server binds to
    #[serde(default)]
    pub port: Option<u16>,

    /// Bound on connect plus handshake, in seconds
    #[serde(default)]
    pub dial_timeout_secs: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default)]
    pub log_level: Option<String>,

    /// Whether the host's root certificates are trusted
    #[serde(default)]
    pub use_system_roots: Option<bool>,

    /// Additional PEM bundles of trusted roots
    #[serde(default)]
    pub extra_ca_files: Option<Vec<PathBuf>>,
}

/// Resolved server configuration
///
/// Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// Host or IP the HTTP server binds to
    pub listen_host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Bound on connect plus handshake, in seconds
    pub dial_timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Whether the host's root certificates are trusted
    pub use_system_roots: bool,
    /// Additional PEM bundles of trusted roots
    pub extra_ca_files: Vec<PathBuf>,
}

impl ServerConfig {
    /// Fill unset values with defaults
    pub fn from_values(values: ConfigValues) -> Self {
        Self {
            listen_host: values.listen_host.unwrap_or_else(defaults::listen_host),
            port: values.port.unwrap_or(defaults::PORT),
            dial_timeout_secs: values.dial_timeout_secs.unwrap_or(defaults::DIAL_TIMEOUT_SECS),
            log_level: values.log_level.unwrap_or_else(defaults::log_level),
            use_system_roots: values.use_system_roots.unwrap_or(true),
            extra_ca_files: values.extra_ca_files.unwrap_or_default(),
        }
    }

    /// Bound on connect plus handshake
    pub fn dial_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_secs)
    }

    /// `host:port` the HTTP server binds to, bracketing IPv6 literals
    pub fn listen_addr(&self) -> String {
        if self.listen_host.contains(':') {
            format!("[{}]:{}", self.listen_host, self.port)
        } else {
            format!("{}:{}", self.listen_host, self.port)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_values(ConfigValues::default())
    }
}
