//! DNS resolver initialization.
//!
//! Two resolvers are built once per run: the system-configured one for PTR
//! lookups and one pinned to a fixed upstream for reverse-zone SOA queries.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use log::warn;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

/// Applies the run-wide query timeout and attempt count to `opts`.
fn tuned(mut opts: ResolverOpts) -> ResolverOpts {
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    // Reverse names are always fully qualified; never append search domains.
    opts.ndots = 0;
    opts
}

/// Initializes the resolver used for PTR lookups.
///
/// Reads the host's resolver configuration (`/etc/resolv.conf` on Unix). When
/// that cannot be read, falls back to hickory's default public upstreams.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let (config, opts) = match read_system_conf() {
        Ok(conf) => conf,
        Err(e) => {
            warn!("Failed to read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    Arc::new(TokioAsyncResolver::tokio(config, tuned(opts)))
}

/// Initializes a resolver that only queries `upstream` (plain UDP/TCP).
pub fn init_soa_resolver(upstream: SocketAddr) -> Arc<TokioAsyncResolver> {
    let name_servers =
        NameServerConfigGroup::from_ips_clear(&[upstream.ip()], upstream.port(), true);
    let config = ResolverConfig::from_parts(None, vec![], name_servers);
    Arc::new(TokioAsyncResolver::tokio(config, tuned(ResolverOpts::default())))
}
