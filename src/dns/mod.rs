//! Reverse DNS resolution.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - PTR lookups through the system-configured resolver
//! - SOA lookups of the reverse zone against a fixed upstream
//! - Reverse zone name construction for IPv4 and IPv6

mod resolution;
mod zone;

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use crate::engine::ReverseResolver;

// Re-export public API
pub use resolution::{lookup_reverse_soa, reverse_dns_lookup};
pub use zone::reverse_zone_name;

/// Reverse resolver backed by two hickory resolvers.
///
/// PTR queries use the system configuration; SOA queries go to the fixed
/// upstream so the answer does not depend on local stub behavior.
#[derive(Clone)]
pub struct DnsReverseResolver {
    system: Arc<TokioAsyncResolver>,
    upstream: Arc<TokioAsyncResolver>,
}

impl DnsReverseResolver {
    /// Wraps already-initialized resolvers (see `initialization`).
    pub fn new(system: Arc<TokioAsyncResolver>, upstream: Arc<TokioAsyncResolver>) -> Self {
        Self { system, upstream }
    }
}

#[async_trait]
impl ReverseResolver for DnsReverseResolver {
    async fn lookup_ptr(&self, ip: IpAddr) -> Option<String> {
        reverse_dns_lookup(ip, &self.system).await
    }

    async fn lookup_soa(&self, ip: IpAddr) -> Option<String> {
        lookup_reverse_soa(ip, &self.upstream).await
    }
}
