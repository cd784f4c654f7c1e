//! Host identification engine.
//!
//! Turns a target into a best-effort hostname:
//! 1. Up to `max_attempts` TLS probes; the first certificate DNS name wins
//!    and stops everything else.
//! 2. Once the budget is spent, one PTR lookup.
//! 3. If PTR is empty, one SOA lookup of the reverse zone.
//! 4. Otherwise the `unknown` sentinel.
//!
//! Reverse DNS is skipped when the address is not a valid IP. Attempts run
//! back to back with the same timeout; there is no backoff.
//!
//! The prober and resolver are traits so the ordering can be exercised with
//! in-memory fakes.

mod state;

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::config::ResolveOptions;
use crate::models::{ResolutionOutcome, Target};

use state::State;

/// Source of certificate-declared names.
#[async_trait]
pub trait CertificateProber: Send + Sync {
    /// Returns the first usable certificate DNS name, or `None` on any
    /// failure. Must not take longer than roughly `timeout`.
    async fn probe(&self, target: &Target, timeout: Duration) -> Option<String>;
}

/// Source of reverse-DNS naming hints.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// PTR name for `ip` without the trailing root dot, or `None`.
    async fn lookup_ptr(&self, ip: IpAddr) -> Option<String>;

    /// `"<mname> <rname>"` from the reverse zone's SOA, or `None`.
    async fn lookup_soa(&self, ip: IpAddr) -> Option<String>;
}

/// Runs the identification pipeline over injected collaborators.
pub struct HostIdentifier<P, R> {
    prober: P,
    resolver: R,
}

impl<P, R> HostIdentifier<P, R>
where
    P: CertificateProber,
    R: ReverseResolver,
{
    pub fn new(prober: P, resolver: R) -> Self {
        Self { prober, resolver }
    }

    /// Resolves one target.
    ///
    /// Never fails: every collaborator failure is a transition to the next
    /// strategy, and the terminal failure is an outcome carrying the sentinel.
    pub async fn resolve(&self, target: &Target, options: &ResolveOptions) -> ResolutionOutcome {
        let max_attempts = options.max_attempts.max(1);
        let ip = target.address.parse::<IpAddr>().ok();
        if ip.is_none() {
            debug!("{} is not an IP literal; reverse DNS will be skipped", target.address);
        }

        let mut state = State::start();
        loop {
            state = match state {
                State::Probing { attempt } => {
                    debug!("TLS attempt {attempt}/{max_attempts} for {target}");
                    let name = self.prober.probe(target, options.timeout).await;
                    State::after_probe(attempt, max_attempts, name, ip)
                }
                State::TryingPtr(ip) => {
                    debug!("TLS budget spent for {target}; trying PTR");
                    State::after_ptr(ip, self.resolver.lookup_ptr(ip).await)
                }
                State::TryingSoa(ip) => {
                    debug!("No PTR for {ip}; trying reverse-zone SOA");
                    State::after_soa(self.resolver.lookup_soa(ip).await)
                }
                State::Resolved(outcome) => {
                    debug!(
                        "{target} resolved to {} via {}",
                        outcome.hostname, outcome.strategy
                    );
                    return outcome;
                }
                State::Unresolved => {
                    debug!("{target} unresolved");
                    return ResolutionOutcome::unresolved();
                }
            };
        }
    }
}
