//! Shared fixtures for integration tests
//!
//! Generates a small PKI with the `openssl` crate and serves it from a
//! local `tokio-openssl` listener.

#![allow(dead_code)]

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::ssl::{NameType, Ssl, SslAcceptor, SslAcceptorBuilder, SslMethod};
use openssl::x509::extension::{
    BasicConstraints, ExtendedKeyUsage, KeyUsage, SubjectAlternativeName,
};
use openssl::x509::{X509NameBuilder, X509};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio_openssl::SslStream;

const DAY: i64 = 86_400;

/// A certificate together with its private key
pub struct Issued {
    pub cert: X509,
    pub key: PKey<Private>,
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn new_key() -> PKey<Private> {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
    PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
}

struct Profile<'a> {
    cn: &'a str,
    is_ca: bool,
    dns: &'a [&'a str],
    ips: &'a [&'a str],
    not_before: i64,
    not_after: i64,
}

fn issue(profile: Profile<'_>, issuer: Option<&Issued>) -> Issued {
    let key = new_key();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COUNTRYNAME, "US").unwrap();
    name.append_entry_by_nid(Nid::ORGANIZATIONNAME, "Inspector Test").unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, profile.cn).unwrap();
    let name = name.build();

    let mut serial = BigNum::new().unwrap();
    serial.rand(96, MsbOption::MAYBE_ZERO, false).unwrap();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder.set_serial_number(&serial.to_asn1_integer().unwrap()).unwrap();
    builder.set_subject_name(&name).unwrap();
    match issuer {
        Some(issuer) => builder.set_issuer_name(issuer.cert.subject_name()).unwrap(),
        None => builder.set_issuer_name(&name).unwrap(),
    }
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::from_unix(profile.not_before).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::from_unix(profile.not_after).unwrap())
        .unwrap();

    if profile.is_ca {
        builder
            .append_extension(BasicConstraints::new().critical().ca().build().unwrap())
            .unwrap();
        builder
            .append_extension(
                KeyUsage::new()
                    .critical()
                    .key_cert_sign()
                    .crl_sign()
                    .build()
                    .unwrap(),
            )
            .unwrap();
    } else {
        builder
            .append_extension(BasicConstraints::new().build().unwrap())
            .unwrap();
        builder
            .append_extension(ExtendedKeyUsage::new().server_auth().build().unwrap())
            .unwrap();
    }

    if !profile.dns.is_empty() || !profile.ips.is_empty() {
        let mut san = SubjectAlternativeName::new();
        for dns in profile.dns {
            san.dns(dns);
        }
        for ip in profile.ips {
            san.ip(ip);
        }
        let san = san
            .build(&builder.x509v3_context(issuer.map(|i| &*i.cert), None))
            .unwrap();
        builder.append_extension(san).unwrap();
    }

    let signing_key = issuer.map(|i| &i.key).unwrap_or(&key);
    builder.sign(signing_key, MessageDigest::sha256()).unwrap();

    Issued {
        cert: builder.build(),
        key,
    }
}

/// Self-signed root CA valid for a year
pub fn root_ca(cn: &str) -> Issued {
    let now = now_unix();
    issue(
        Profile {
            cn,
            is_ca: true,
            dns: &[],
            ips: &[],
            not_before: now - DAY,
            not_after: now + 365 * DAY,
        },
        None,
    )
}

/// Intermediate CA signed by `issuer`
pub fn intermediate_ca(issuer: &Issued, cn: &str) -> Issued {
    let now = now_unix();
    issue(
        Profile {
            cn,
            is_ca: true,
            dns: &[],
            ips: &[],
            not_before: now - DAY,
            not_after: now + 180 * DAY,
        },
        Some(issuer),
    )
}

/// Server certificate for `localhost` and `127.0.0.1`
pub fn server_cert(issuer: &Issued) -> Issued {
    let now = now_unix();
    issue(
        Profile {
            cn: "localhost",
            is_ca: false,
            dns: &["localhost", "www.localhost"],
            ips: &["127.0.0.1"],
            not_before: now - DAY,
            not_after: now + 90 * DAY,
        },
        Some(issuer),
    )
}

/// Server certificate for `localhost` that expired yesterday
pub fn expired_server_cert(issuer: &Issued) -> Issued {
    let now = now_unix();
    issue(
        Profile {
            cn: "localhost",
            is_ca: false,
            dns: &["localhost"],
            ips: &["127.0.0.1"],
            not_before: now - 30 * DAY,
            not_after: now - DAY,
        },
        Some(issuer),
    )
}

fn acceptor_builder(identity: &Issued, extra_chain: &[&X509]) -> SslAcceptorBuilder {
    let mut acceptor = SslAcceptor::mozilla_intermediate_v5(SslMethod::tls()).unwrap();
    acceptor.set_private_key(&identity.key).unwrap();
    acceptor.set_certificate(&identity.cert).unwrap();
    for cert in extra_chain {
        acceptor.add_extra_chain_cert((*cert).clone()).unwrap();
    }
    acceptor.check_private_key().unwrap();
    acceptor
}

/// Serve `identity` plus `extra_chain` over TLS on a loopback port
///
/// Each connection is held open until the client closes it.
pub async fn spawn_tls_server(identity: &Issued, extra_chain: &[&X509]) -> SocketAddr {
    serve_tls(acceptor_builder(identity, extra_chain).build()).await
}

/// Like [`spawn_tls_server`], also recording the SNI host name of every handshake
pub async fn spawn_sni_recording_server(
    identity: &Issued,
    extra_chain: &[&X509],
) -> (SocketAddr, Arc<Mutex<Vec<Option<String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut acceptor = acceptor_builder(identity, extra_chain);
    let record = seen.clone();
    acceptor.set_servername_callback(move |ssl, _alert| {
        let name = ssl.servername(NameType::HOST_NAME).map(str::to_string);
        record.lock().unwrap().push(name);
        Ok(())
    });

    (serve_tls(acceptor.build()).await, seen)
}

async fn serve_tls(acceptor: SslAcceptor) -> SocketAddr {
    let acceptor = Arc::new(acceptor);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((tcp, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let Ok(ssl) = Ssl::new(acceptor.context()) else {
                    return;
                };
                let Ok(stream) = SslStream::new(ssl, tcp) else {
                    return;
                };
                let mut stream = Box::pin(stream);
                if stream.as_mut().accept().await.is_err() {
                    return;
                }

                let mut buf = [0u8; 1024];
                while let Ok(n) = stream.read(&mut buf).await {
                    if n == 0 {
                        break;
                    }
                }
            });
        }
    });

    addr
}

/// Accept TCP connections and never answer the handshake
pub async fn spawn_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((tcp, _)) = listener.accept().await {
            held.push(tcp);
        }
    });

    addr
}

/// A loopback port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Dial timeout used by tests that expect a handshake to complete
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);
