//! Network utility functions
//!
//! This module extracts dial hosts and ports from the loosely formatted
//! strings that arrive in query parameters.

use url::{Host, Url};

use super::error::{InspectorError, Result};

/// Port dialed when a target carries no explicit port
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Scheme, host and explicit port of a parsed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlAuthority {
    /// Lowercase scheme, e.g. `https`
    pub scheme: String,
    /// Host without brackets; domains are lowercased and IDNA encoded
    pub host: String,
    /// Port written in the URL, `None` when omitted or equal to the scheme default
    pub port: Option<u16>,
}

impl UrlAuthority {
    /// Explicit port, falling back to 443
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_TLS_PORT)
    }
}

/// Parse a URL that must carry a scheme and a host
///
/// # Errors
///
/// Returns `MalformedInput` when the string is not an absolute URL or has no host.
pub fn parse_url_authority(raw: &str) -> Result<UrlAuthority> {
    let url = Url::parse(raw.trim())
        .map_err(|e| InspectorError::MalformedInput(format!("Invalid URL '{}': {}", raw, e)))?;

    authority_of(&url)
        .ok_or_else(|| InspectorError::MalformedInput(format!("URL '{}' has no host", raw)))
}

/// Parse a URL or bare host, stripping scheme, port, path and credentials
///
/// `example.com`, `example.com:8443/path` and `https://example.com` are all
/// accepted. Bare input is read as if it were prefixed with `https://`.
pub fn parse_loose_authority(raw: &str) -> Result<UrlAuthority> {
    let raw = raw.trim();

    if let Ok(url) = Url::parse(raw) {
        if let Some(authority) = authority_of(&url) {
            return Ok(authority);
        }
    }

    parse_url_authority(&format!("https://{}", raw))
}

/// Remove the brackets around an IPv6 literal, e.g. `[::1]` becomes `::1`
pub fn strip_brackets(addr: &str) -> &str {
    addr.trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or_else(|| addr.trim())
}

fn authority_of(url: &Url) -> Option<UrlAuthority> {
    let host = match url.host()? {
        Host::Domain(domain) if domain.is_empty() => return None,
        Host::Domain(domain) => domain.to_string(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };

    Some(UrlAuthority {
        scheme: url.scheme().to_string(),
        host,
        port: url.port(),
    })
}
