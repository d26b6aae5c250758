//! Inspection request and result types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::common::{
    parse_loose_authority, parse_url_authority, strip_brackets, InspectorError, Result,
};

/// Message reported when the chain verifies
pub const CHAIN_VALID_MESSAGE: &str = "Certificate chain is valid.";

/// Prefix of the message reported when the chain does not verify
pub const CHAIN_INVALID_PREFIX: &str = "Certificate chain verification failed: ";

/// What to dial and which name to check the certificate against
///
/// The dial address and the server name may differ, e.g. dial an IP and
/// validate against a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    address: String,
    port: u16,
    server_name: String,
}

impl Target {
    /// Create a target
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` when `address` or `server_name` is empty.
    pub fn new(address: &str, port: u16, server_name: &str) -> Result<Self> {
        let address = strip_brackets(address);
        let server_name = server_name.trim();

        if address.is_empty() {
            return Err(InspectorError::MissingInput("A dial address is required.".to_string()));
        }
        if server_name.is_empty() {
            return Err(InspectorError::MissingInput("A server name is required.".to_string()));
        }

        Ok(Self {
            address: address.to_string(),
            port,
            server_name: server_name.to_string(),
        })
    }

    /// Dial `ip` and validate against the host named by `url`
    ///
    /// `url` may be a full URL or a bare host; its scheme, path and port are
    /// stripped from the server name. An explicit URL port is dialed, otherwise 443.
    pub fn from_ip_and_url(ip: &str, url: &str) -> Result<Self> {
        if ip.trim().is_empty() || url.trim().is_empty() {
            return Err(InspectorError::MissingInput(
                "Query parameters 'ip' and 'url' are required.".to_string(),
            ));
        }

        let authority = parse_loose_authority(url)?;
        Self::new(ip, authority.port_or_default(), &authority.host)
    }

    /// Dial and validate the host of an `https` URL
    ///
    /// # Errors
    ///
    /// * `MissingInput` - `url` is empty
    /// * `MalformedInput` - `url` does not parse, is not `https` or has no host
    pub fn from_https_url(url: &str) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(InspectorError::MissingInput("Missing 'url' query parameter".to_string()));
        }

        let authority = parse_url_authority(url)?;
        if authority.scheme != "https" {
            return Err(InspectorError::MalformedInput(format!(
                "Unsupported scheme '{}', expected https",
                authority.scheme
            )));
        }

        Self::new(&authority.host, authority.port_or_default(), &authority.host)
    }

    /// Host or IP literal to dial
    pub fn address(&self) -> &str {
        &self.address
    }

    /// TCP port to dial
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Name sent as SNI and checked against the leaf certificate
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// `host:port` form of the dial address, bracketing IPv6 literals
    pub fn dial_address(&self) -> String {
        if self.address.contains(':') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }

    /// URL reported back to the caller
    pub fn target_url(&self) -> String {
        format!("https://{}", self.server_name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (server name {})", self.dial_address(), self.server_name)
    }
}

/// One certificate of the presented chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSummary {
    /// Subject distinguished name
    pub subject: String,
    /// Issuer distinguished name
    pub issuer: String,
    /// Start of the validity window
    #[serde(serialize_with = "serialize_rfc3339")]
    pub not_before: DateTime<Utc>,
    /// End of the validity window
    #[serde(serialize_with = "serialize_rfc3339")]
    pub not_after: DateTime<Utc>,
    /// DNS subject alternative names; only ever filled for the leaf
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns_names: Vec<String>,
    /// basicConstraints CA flag
    pub is_ca: bool,
    /// Signature algorithm name, e.g. `sha256WithRSAEncryption`
    pub signature_algorithm: String,
}

fn serialize_rfc3339<S>(time: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Outcome of the chain verification pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainValidation {
    /// The leaf chains to a trusted root and matches the server name
    Valid,
    /// Verifier diagnostic explaining why the chain was rejected
    Invalid(String),
}

impl ChainValidation {
    /// Whether the chain verified
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Human-readable verdict
    pub fn message(&self) -> String {
        match self {
            Self::Valid => CHAIN_VALID_MESSAGE.to_string(),
            Self::Invalid(reason) => format!("{}{}", CHAIN_INVALID_PREFIX, reason),
        }
    }
}

impl fmt::Display for ChainValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl Serialize for ChainValidation {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.message())
    }
}

/// Result of one inspection
#[derive(Debug, Clone, Serialize)]
pub struct ChainResult {
    /// `https://` followed by the validated server name
    pub target_url: String,
    /// Presented chain, leaf first
    pub certificates: Vec<CertificateSummary>,
    /// Verification verdict
    #[serde(rename = "chain_validation_message")]
    pub validation: ChainValidation,
}

impl ChainResult {
    /// The leaf certificate
    pub fn leaf(&self) -> Option<&CertificateSummary> {
        self.certificates.first()
    }
}
