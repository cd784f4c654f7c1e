//! Certificate name extraction utilities.

use log::debug;
use rustls::pki_types::CertificateDer;
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{GeneralName, ParsedExtension};

/// Returns the first usable DNS name from a presented certificate chain.
///
/// Certificates are scanned leaf-first, and within each certificate the
/// Subject Alternative Name DNS entries are scanned in the order they appear.
/// Certificates that fail to parse are skipped.
pub(crate) fn first_certificate_name(chain: &[CertificateDer<'_>]) -> Option<String> {
    chain
        .iter()
        .enumerate()
        .find_map(|(position, der)| match x509_parser::parse_x509_certificate(der.as_ref()) {
            Ok((_, cert)) => first_usable_name(extract_certificate_sans(&cert)),
            Err(e) => {
                debug!("Skipping unparseable certificate at chain position {position}: {e}");
                None
            }
        })
}

/// Picks the first name that is not blank after trimming.
///
/// The name is returned as presented.
pub(crate) fn first_usable_name(names: Vec<String>) -> Option<String> {
    names.into_iter().find(|name| !name.trim().is_empty())
}

/// Extracts Subject Alternative Names (SANs) from an X.509 certificate.
///
/// Only DNS names are extracted; IP addresses, e-mail addresses and other
/// general name types are ignored.
pub(crate) fn extract_certificate_sans(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }

    sans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_first_non_blank_name_wins() {
        assert_eq!(
            first_usable_name(names(&["", "  ", "example.org"])),
            Some("example.org".to_string())
        );
    }

    #[test]
    fn test_order_is_preserved() {
        assert_eq!(
            first_usable_name(names(&["www.example.org", "example.org"])),
            Some("www.example.org".to_string())
        );
    }

    #[test]
    fn test_all_blank_yields_none() {
        assert_eq!(first_usable_name(names(&["", " ", "\t"])), None);
        assert_eq!(first_usable_name(Vec::new()), None);
    }

    #[test]
    fn test_empty_chain_yields_none() {
        assert_eq!(first_certificate_name(&[]), None);
    }

    #[test]
    fn test_unparseable_certificates_are_skipped() {
        let chain = vec![
            CertificateDer::from(vec![0x30, 0x03, 0x02, 0x01]),
            CertificateDer::from(b"not a certificate".to_vec()),
        ];
        assert_eq!(first_certificate_name(&chain), None);
    }
}
