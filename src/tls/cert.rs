//! Certificate summaries
//!
//! Converts the presented X.509 chain into [`CertificateSummary`] values.

use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use openssl::asn1::{Asn1Time, Asn1TimeRef};
use openssl::nid::Nid;
use openssl::x509::{X509, X509NameRef, X509Ref};

use crate::common::{InspectorError, Result};
use crate::inspector::CertificateSummary;

/// Summarize a chain in presentation order
///
/// Subject alternative names are only collected for the first certificate.
///
/// # Errors
///
/// Returns `NoCertificates` for an empty chain and `Certificate` when a
/// validity timestamp cannot be represented.
pub fn summarize_chain(chain: &[X509]) -> Result<Vec<CertificateSummary>> {
    if chain.is_empty() {
        return Err(InspectorError::NoCertificates);
    }

    chain
        .iter()
        .enumerate()
        .map(|(index, cert)| summarize_certificate(cert, index == 0))
        .collect()
}

/// Summarize one certificate
///
/// # Parameters
///
/// * `cert` - Certificate to describe
/// * `is_leaf` - Whether to collect DNS subject alternative names
pub fn summarize_certificate(cert: &X509Ref, is_leaf: bool) -> Result<CertificateSummary> {
    let dns_names = if is_leaf { dns_names(cert) } else { Vec::new() };

    Ok(CertificateSummary {
        subject: format_name(cert.subject_name()),
        issuer: format_name(cert.issuer_name()),
        not_before: asn1_time_to_utc(cert.not_before())?,
        not_after: asn1_time_to_utc(cert.not_after())?,
        dns_names,
        is_ca: is_certificate_authority(cert),
        signature_algorithm: signature_algorithm_name(cert),
    })
}

/// Render a distinguished name, most specific attribute first
///
/// Produces `CN=www.example.org,O=Example,C=US` for a name encoded as
/// `C, O, CN`. Values are escaped as in RFC 2253.
pub fn format_name(name: &X509NameRef) -> String {
    let mut parts: Vec<String> = name
        .entries()
        .map(|entry| {
            let object = entry.object();
            let nid = object.nid();
            let key = if nid == Nid::UNDEF {
                object.to_string()
            } else {
                nid.short_name().map(str::to_string).unwrap_or_else(|_| object.to_string())
            };

            let value = entry
                .data()
                .to_string()
                .unwrap_or_else(|_| String::from_utf8_lossy(entry.data().as_slice()).into_owned());

            format!("{}={}", key, escape_dn_value(&value))
        })
        .collect();

    parts.reverse();
    parts.join(",")
}

/// Convert an ASN.1 time to UTC
pub fn asn1_time_to_utc(time: &Asn1TimeRef) -> Result<DateTime<Utc>> {
    let epoch = Asn1Time::from_unix(0)?;
    let diff = epoch.diff(time)?;
    let seconds = i64::from(diff.days) * 86_400 + i64::from(diff.secs);

    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| InspectorError::Certificate(format!("timestamp out of range: {}", time)))
}

fn escape_dn_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let last = value.chars().count().saturating_sub(1);

    for (index, c) in value.chars().enumerate() {
        let needs_escape = matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';')
            || (index == 0 && (c == '#' || c == ' '))
            || (index == last && c == ' ');

        if needs_escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

fn dns_names(cert: &X509Ref) -> Vec<String> {
    cert.subject_alt_names()
        .map(|names| {
            names
                .iter()
                .filter_map(|name| name.dnsname().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn signature_algorithm_name(cert: &X509Ref) -> String {
    let object = cert.signature_algorithm().object();

    let nid = object.nid();
    if nid == Nid::UNDEF {
        return object.to_string();
    }

    nid.long_name().map(str::to_string).unwrap_or_else(|_| object.to_string())
}

// OpenSSL does not expose basicConstraints, so read it from the DER encoding
fn is_certificate_authority(cert: &X509Ref) -> bool {
    let der = match cert.to_der() {
        Ok(der) => der,
        Err(e) => {
            debug!("Could not encode certificate to DER: {}", e);
            return false;
        }
    };

    match x509_parser::parse_x509_certificate(&der) {
        Ok((_, parsed)) => parsed.is_ca(),
        Err(e) => {
            debug!("Could not parse basicConstraints: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain() {
        let result = summarize_chain(&[]);
        assert!(matches!(result, Err(InspectorError::NoCertificates)));
    }

    #[test]
    fn test_asn1_time_to_utc() {
        let time = Asn1Time::from_unix(1_700_000_000).unwrap();
        let converted = asn1_time_to_utc(&time).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
        assert_eq!(converted.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_format_name_keeps_interior_nul() {
        let mut name = openssl::x509::X509NameBuilder::new().unwrap();
        name.append_entry_by_nid(Nid::COUNTRYNAME, "US").unwrap();
        name.append_entry_by_nid(Nid::COMMONNAME, "good.example\0evil").unwrap();
        let name = name.build();

        assert_eq!(format_name(&name), "CN=good.example\0evil,C=US");
    }

    #[test]
    fn test_escape_dn_value() {
        assert_eq!(escape_dn_value("Example, Inc."), "Example\\, Inc.");
        assert_eq!(escape_dn_value("#hash"), "\\#hash");
        assert_eq!(escape_dn_value(" padded "), "\\ padded\\ ");
        assert_eq!(escape_dn_value("plain"), "plain");
        assert_eq!(escape_dn_value(""), "");
    }
}
