//! TLS handling module
//!
//! Collects the peer chain over an unverified handshake, summarizes it and
//! verifies it against the configured trust anchors.

mod cert;
mod connector;
mod trust;
mod verify;

pub use cert::{asn1_time_to_utc, format_name, summarize_certificate, summarize_chain};
pub use connector::{create_tls_connector, fetch_peer_chain};
pub use trust::TrustAnchors;
pub use verify::{intermediate_pool, verify_chain};
