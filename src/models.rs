//! Data model shared by the engine, enrichment and export layers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::UNRESOLVED_HOST;

/// One `address[:port]` input line after parsing.
///
/// The address is kept as written; the engine checks whether it is a valid IP
/// before attempting reverse DNS. The port stays textual so the emitted record
/// echoes the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// IP literal (brackets removed for IPv6)
    pub address: String,
    /// Port as given, or the default TLS port
    pub port: String,
}

impl Target {
    /// Socket-style `address:port`, bracketing IPv6 literals.
    pub fn authority(&self) -> String {
        if self.address.contains(':') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority())
    }
}

/// Which step of the identification pipeline produced the hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Subject alternative DNS name from the presented certificate chain
    Certificate,
    /// Reverse DNS PTR record
    Ptr,
    /// SOA record of the reverse zone
    Soa,
    /// Nothing matched; hostname is the sentinel
    None,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Certificate => "certificate",
            Strategy::Ptr => "ptr",
            Strategy::Soa => "soa",
            Strategy::None => "none",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the identification engine on one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Resolved name, or [`UNRESOLVED_HOST`]; never empty
    pub hostname: String,
    /// Step that produced `hostname`
    pub strategy: Strategy,
}

impl ResolutionOutcome {
    pub(crate) fn resolved(hostname: String, strategy: Strategy) -> Self {
        debug_assert!(!hostname.is_empty());
        debug_assert_ne!(strategy, Strategy::None);
        Self { hostname, strategy }
    }

    pub(crate) fn unresolved() -> Self {
        Self {
            hostname: UNRESOLVED_HOST.to_string(),
            strategy: Strategy::None,
        }
    }

    /// True when some strategy produced a name.
    pub fn is_resolved(&self) -> bool {
        self.strategy != Strategy::None
    }
}

/// Handshake summaries from the external fingerprinting utilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fingerprints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ztls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openssl: Option<String>,
}

/// Geolocation metadata for an IP address.
///
/// Field names follow the geolocation API's JSON, so the same type parses the
/// API response and serializes into the output record. An all-`None` value is
/// what a failed lookup returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
}

impl GeoRecord {
    /// Drops empty strings so they are omitted like missing fields.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Self {
            network: keep(self.network),
            version: keep(self.version),
            city: keep(self.city),
            region: keep(self.region),
            region_code: keep(self.region_code),
            country: keep(self.country),
            country_name: keep(self.country_name),
            country_code: keep(self.country_code),
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: keep(self.timezone),
            org: keep(self.org),
        }
    }

    /// True when the lookup produced nothing.
    pub fn is_empty(&self) -> bool {
        *self == GeoRecord::default()
    }
}

/// Optional sidecar data attached to a record when enrichment is on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub fingerprints: Fingerprints,
    pub geo: GeoRecord,
}

/// One emitted result line.
///
/// Enrichment fields are flattened into the top-level object and omitted
/// entirely (not null) when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub ip: String,
    pub port: String,
    pub host: String,
    #[serde(flatten)]
    pub fingerprints: Fingerprints,
    #[serde(flatten)]
    pub geo: GeoRecord,
}

impl HostRecord {
    /// Merges a target, its outcome and optional enrichment into a record.
    pub fn new(target: &Target, outcome: ResolutionOutcome, enrichment: Option<Enrichment>) -> Self {
        let enrichment = enrichment.unwrap_or_default();
        Self {
            ip: target.address.clone(),
            port: target.port.clone(),
            host: outcome.hostname,
            fingerprints: enrichment.fingerprints,
            geo: enrichment.geo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(address: &str, port: &str) -> Target {
        Target {
            address: address.to_string(),
            port: port.to_string(),
        }
    }

    #[test]
    fn test_authority_ipv4() {
        assert_eq!(target("93.184.216.34", "443").authority(), "93.184.216.34:443");
    }

    #[test]
    fn test_authority_brackets_ipv6() {
        assert_eq!(target("2001:db8::1", "8443").authority(), "[2001:db8::1]:8443");
    }

    #[test]
    fn test_unresolved_outcome_uses_sentinel() {
        let outcome = ResolutionOutcome::unresolved();
        assert_eq!(outcome.hostname, UNRESOLVED_HOST);
        assert!(!outcome.hostname.is_empty());
        assert!(!outcome.is_resolved());
    }

    #[test]
    fn test_geo_normalized_drops_blank_strings() {
        let geo = GeoRecord {
            city: Some("Norwell".to_string()),
            region_code: Some(String::new()),
            org: Some("  ".to_string()),
            latitude: Some(42.16),
            ..Default::default()
        }
        .normalized();
        assert_eq!(geo.city.as_deref(), Some("Norwell"));
        assert!(geo.region_code.is_none());
        assert!(geo.org.is_none());
        assert_eq!(geo.latitude, Some(42.16));
    }

    #[test]
    fn test_record_without_enrichment_has_only_core_fields() {
        let record = HostRecord::new(
            &target("1.1.1.1", "443"),
            ResolutionOutcome::resolved("one.one.one.one".to_string(), Strategy::Certificate),
            None,
        );
        let value = serde_json::to_value(&record).expect("record should serialize");
        let object = value.as_object().expect("record should be an object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["host", "ip", "port"]);
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Certificate.to_string(), "certificate");
        assert_eq!(Strategy::Ptr.to_string(), "ptr");
        assert_eq!(Strategy::Soa.to_string(), "soa");
        assert_eq!(Strategy::None.to_string(), "none");
    }
}
