//! Client side TLS handshake without peer verification
//!
//! The handshake only collects what the peer presents. Trust is decided
//! afterwards by [`crate::tls::verify`], so an untrusted chain can still be
//! inspected and the verdict can name the exact verifier error.

use log::{debug, info};
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use openssl::x509::X509;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};
use tokio_openssl::SslStream;

use crate::common::{InspectorError, Result};
use crate::inspector::Target;

/// Create the TLS connector shared by all inspections
///
/// Peer verification is switched off on the connector itself; see the module docs.
pub fn create_tls_connector() -> Result<SslConnector> {
    let mut builder = SslConnector::builder(SslMethod::tls_client())?;
    builder.set_verify(SslVerifyMode::NONE);

    Ok(builder.build())
}

/// Dial `target`, complete a handshake and return the peer chain, leaf first
///
/// `dial_timeout` is a single deadline covering both the TCP connect and the
/// TLS handshake. The stream is dropped, closing the socket, before this
/// function returns on every path.
///
/// # Errors
///
/// * `Connection` - resolution, connect or handshake failure, or the deadline passed
/// * `NoCertificates` - the handshake completed without a peer certificate
pub async fn fetch_peer_chain(
    connector: &SslConnector,
    target: &Target,
    dial_timeout: Duration,
) -> Result<Vec<X509>> {
    let deadline = Instant::now() + dial_timeout;
    let dial_address = target.dial_address();

    debug!("Dialing {} (server name {})", dial_address, target.server_name());

    let tcp = match timeout_at(deadline, TcpStream::connect((target.address(), target.port()))).await {
        Ok(Ok(tcp)) => tcp,
        Ok(Err(e)) => {
            return Err(InspectorError::Connection(format!(
                "dial tcp {}: {}",
                dial_address, e
            )));
        }
        Err(_) => {
            return Err(InspectorError::Connection(format!(
                "dial tcp {}: timed out after {:?}",
                dial_address, dial_timeout
            )));
        }
    };

    // SNI carries the server name; into_ssl leaves it out for IP literals
    let mut config = connector.configure()?;
    config.set_verify_hostname(false);
    let ssl = config.into_ssl(target.server_name())?;

    let mut stream = Box::pin(SslStream::new(ssl, tcp)?);

    match timeout_at(deadline, stream.as_mut().connect()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(InspectorError::Connection(format!(
                "TLS handshake with {} failed: {}",
                dial_address, e
            )));
        }
        Err(_) => {
            return Err(InspectorError::Connection(format!(
                "TLS handshake with {} timed out after {:?}",
                dial_address, dial_timeout
            )));
        }
    }

    let ssl = stream.ssl();
    info!(
        "Handshake with {} complete ({}, {})",
        dial_address,
        ssl.version_str(),
        ssl.current_cipher().map(|c| c.name()).unwrap_or("unknown cipher")
    );

    // On the client side the peer chain includes the leaf
    let chain: Vec<X509> = ssl
        .peer_cert_chain()
        .map(|stack| stack.iter().map(|cert| cert.to_owned()).collect())
        .unwrap_or_default();

    drop(stream);

    if chain.is_empty() {
        return Err(InspectorError::NoCertificates);
    }

    debug!("Peer {} presented {} certificate(s)", dial_address, chain.len());
    Ok(chain)
}
