//! Configuration constants.
//!
//! This module defines the defaults and fixed operational parameters used
//! throughout the application: probe timeouts, retry budget, DNS upstreams
//! and the geolocation endpoint.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Hostname reported when no strategy could determine a name.
pub const UNRESOLVED_HOST: &str = "unknown";

/// Port assumed when an input line carries only an address.
pub const DEFAULT_PORT: &str = "443";

// Host identification defaults
/// Per-attempt TLS connect + handshake timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Number of TLS probe attempts before falling back to reverse DNS
pub const DEFAULT_RETRY_ATTEMPTS: usize = 3;
/// Time allowed for sending close_notify after a successful probe
pub const TLS_SHUTDOWN_GRACE_MS: u64 = 500;

// DNS
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Resolver-level attempts per DNS query
/// PTR and SOA are single shots: a query that times out or fails is not
/// resent, and the engine moves on to the next strategy.
pub const DNS_ATTEMPTS: usize = 1;
/// Upstream queried directly for reverse-zone SOA records
pub const SOA_UPSTREAM: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);

// Enrichment
/// Base URL of the geolocation API (`{base}/{ip}/json/`)
pub const GEOIP_API_BASE: &str = "https://ipapi.co";
/// Geolocation HTTP request timeout in seconds
pub const GEOIP_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent with geolocation requests.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
