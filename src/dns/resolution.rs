//! Reverse DNS lookups (PTR and reverse-zone SOA).
//!
//! Both lookups are single shots: failures and empty answers are logged and
//! reported as `None`, never retried.

use std::net::IpAddr;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::rdata::SOA;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use log::debug;

use super::zone::reverse_zone_name;

/// Performs a reverse DNS lookup (PTR record) for an IP address.
///
/// # Arguments
///
/// * `ip` - The IP address to look up
/// * `resolver` - The DNS resolver instance
///
/// # Returns
///
/// The first PTR name with the trailing root dot stripped, or `None` if the
/// lookup fails or returns no usable name.
pub async fn reverse_dns_lookup(ip: IpAddr, resolver: &TokioAsyncResolver) -> Option<String> {
    match resolver.reverse_lookup(ip).await {
        Ok(response) => {
            let name = response
                .iter()
                .next()
                .map(|name| strip_root(&name.to_utf8()).to_string())
                .filter(|name| !name.is_empty());
            if name.is_none() {
                debug!("PTR lookup for {ip} returned no names");
            }
            name
        }
        Err(e) => {
            debug!("PTR lookup failed for {ip}: {e}");
            None
        }
    }
}

/// Queries the SOA record of an address's reverse zone.
///
/// The SOA is taken from the answer section when present, otherwise from the
/// authority section of a no-data or NXDOMAIN response (the usual case for a
/// host-level reverse name).
///
/// # Arguments
///
/// * `ip` - The IP address whose reverse zone is queried
/// * `resolver` - A resolver pointed at the fixed upstream
///
/// # Returns
///
/// `"<primary nameserver> <responsible mailbox>"`, or `None` on transport
/// error or when no SOA record is present.
pub async fn lookup_reverse_soa(ip: IpAddr, resolver: &TokioAsyncResolver) -> Option<String> {
    let zone = reverse_zone_name(ip);
    match resolver.lookup(zone.as_str(), RecordType::SOA).await {
        Ok(lookup) => {
            let soa = lookup.iter().find_map(|rdata| match rdata {
                RData::SOA(soa) => Some(format_soa(soa)),
                _ => None,
            });
            if soa.is_none() {
                debug!("SOA answer for {zone} carried no SOA record");
            }
            soa
        }
        Err(e) => {
            let soa = soa_from_error(&e);
            if soa.is_none() {
                debug!("SOA lookup failed for {zone}: {e}");
            }
            soa
        }
    }
}

/// Pulls the authority-section SOA out of a negative response.
fn soa_from_error(error: &ResolveError) -> Option<String> {
    if let ResolveErrorKind::NoRecordsFound { soa: Some(record), .. } = error.kind() {
        return record.data().map(format_soa);
    }
    None
}

/// Formats an SOA record as `"<mname> <rname>"`.
pub(crate) fn format_soa(soa: &SOA) -> String {
    format!("{} {}", soa.mname().to_utf8(), soa.rname().to_utf8())
}

fn strip_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
