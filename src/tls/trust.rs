//! Trust anchors used by the verification pass

use log::{debug, info};
use openssl::error::ErrorStack;
use openssl::x509::store::{X509Store, X509StoreBuilder};
use openssl::x509::verify::{X509CheckFlags, X509VerifyParam};
use openssl::x509::{X509PurposeId, X509};
use std::net::IpAddr;
use std::path::Path;

use crate::common::{read_file, InspectorError, Result};

/// Root certificates a chain may terminate in
///
/// Combines the host's default root set with any extra PEM bundles.
#[derive(Clone)]
pub struct TrustAnchors {
    use_system_roots: bool,
    extra_roots: Vec<X509>,
}

impl TrustAnchors {
    /// The host's root set only
    pub fn system() -> Self {
        Self {
            use_system_roots: true,
            extra_roots: Vec::new(),
        }
    }

    /// Explicit roots, optionally together with the host's root set
    pub fn new(use_system_roots: bool, extra_roots: Vec<X509>) -> Self {
        Self {
            use_system_roots,
            extra_roots,
        }
    }

    /// Load extra roots from PEM bundles
    ///
    /// # Errors
    ///
    /// Returns `Config` when a file is missing, unreadable or holds no certificate.
    pub fn from_pem_files<P: AsRef<Path>>(use_system_roots: bool, paths: &[P]) -> Result<Self> {
        let mut extra_roots = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let pem = read_file(path)?;
            let certs = X509::stack_from_pem(&pem).map_err(|e| {
                InspectorError::Config(format!("Failed to parse PEM bundle {}: {}", path.display(), e))
            })?;

            if certs.is_empty() {
                return Err(InspectorError::Config(format!(
                    "No certificates found in {}",
                    path.display()
                )));
            }

            info!("Loaded {} trust anchor(s) from {}", certs.len(), path.display());
            extra_roots.extend(certs);
        }

        Ok(Self::new(use_system_roots, extra_roots))
    }

    /// Whether the host's root set is consulted
    pub fn uses_system_roots(&self) -> bool {
        self.use_system_roots
    }

    /// Number of roots loaded on top of the host's root set
    pub fn extra_root_count(&self) -> usize {
        self.extra_roots.len()
    }

    /// Build a store that checks `server_name`, the TLS server purpose and the current time
    ///
    /// An IP literal is matched against IP address SANs, anything else as a
    /// DNS name without partial wildcards.
    pub fn build_store(&self, server_name: &str) -> std::result::Result<X509Store, ErrorStack> {
        let mut builder = X509StoreBuilder::new()?;

        if self.use_system_roots {
            builder.set_default_paths()?;
        }
        for root in &self.extra_roots {
            builder.add_cert(root.clone())?;
        }

        let mut param = X509VerifyParam::new()?;
        match server_name.parse::<IpAddr>() {
            Ok(ip) => param.set_ip(ip)?,
            Err(_) => {
                param.set_hostflags(X509CheckFlags::NO_PARTIAL_WILDCARDS);
                param.set_host(server_name)?;
            }
        }
        builder.set_param(&param)?;
        builder.set_purpose(X509PurposeId::SSL_SERVER)?;

        debug!(
            "Built trust store for {} (system roots: {}, extra roots: {})",
            server_name,
            self.use_system_roots,
            self.extra_roots.len()
        );

        Ok(builder.build())
    }
}

impl Default for TrustAnchors {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for TrustAnchors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustAnchors")
            .field("use_system_roots", &self.use_system_roots)
            .field("extra_roots", &self.extra_roots.len())
            .finish()
    }
}
