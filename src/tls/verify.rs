//! Chain verification against a trust store
//!
//! Runs after the handshake on the certificates the peer presented. The
//! leaf is checked with every other presented certificate offered as an
//! untrusted intermediate. A verification failure is a verdict, not an
//! error, so nothing here returns `Err` to the caller.

use log::{debug, warn};
use openssl::error::ErrorStack;
use openssl::stack::Stack;
use openssl::x509::{X509StoreContext, X509};

use crate::inspector::ChainValidation;
use crate::tls::TrustAnchors;

/// Intermediate pool for a presented chain
///
/// Every certificate after the first, in presentation order.
pub fn intermediate_pool(chain: &[X509]) -> Result<Stack<X509>, ErrorStack> {
    let mut pool = Stack::new()?;
    for cert in chain.iter().skip(1) {
        pool.push(cert.clone())?;
    }
    Ok(pool)
}

/// Verify the leaf of `chain` for `server_name`
///
/// Checks that the leaf chains to one of `anchors`, is within its validity
/// window, is usable for TLS server authentication and matches `server_name`.
pub fn verify_chain(chain: &[X509], server_name: &str, anchors: &TrustAnchors) -> ChainValidation {
    let Some(leaf) = chain.first() else {
        return ChainValidation::Invalid("no certificate to verify".to_string());
    };

    match run_verification(leaf, chain, server_name, anchors) {
        Ok(None) => {
            debug!("Chain for {} verified", server_name);
            ChainValidation::Valid
        }
        Ok(Some(reason)) => {
            debug!("Chain for {} rejected: {}", server_name, reason);
            ChainValidation::Invalid(reason)
        }
        Err(e) => {
            warn!("Could not set up verification for {}: {}", server_name, e);
            ChainValidation::Invalid(format!("verifier setup failed: {}", e))
        }
    }
}

fn run_verification(
    leaf: &X509,
    chain: &[X509],
    server_name: &str,
    anchors: &TrustAnchors,
) -> Result<Option<String>, ErrorStack> {
    let store = anchors.build_store(server_name)?;
    let intermediates = intermediate_pool(chain)?;

    let mut context = X509StoreContext::new()?;
    // The error is only readable while the context is initialised
    context.init(&store, leaf, &intermediates, |ctx| {
        if ctx.verify_cert()? {
            Ok(None)
        } else {
            Ok(Some(format!(
                "{} (depth {})",
                ctx.error().error_string(),
                ctx.error_depth()
            )))
        }
    })
}
