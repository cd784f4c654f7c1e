//! Resolution state machine.
//!
//! Each transition is a pure function of the current step's result, so the
//! ordering contract can be checked without any I/O.

use std::net::IpAddr;

use crate::config::UNRESOLVED_HOST;
use crate::models::{ResolutionOutcome, Strategy};

/// One step of the identification pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum State {
    /// TLS attempt number `attempt` (1-based) is next
    Probing { attempt: usize },
    /// TLS budget exhausted; PTR lookup is next
    TryingPtr(IpAddr),
    /// PTR came back empty; SOA lookup is next
    TryingSoa(IpAddr),
    /// A strategy produced a name
    Resolved(ResolutionOutcome),
    /// Every applicable strategy came back empty
    Unresolved,
}

impl State {
    pub(crate) fn start() -> Self {
        State::Probing { attempt: 1 }
    }

    /// Next state after TLS attempt `attempt` of `max_attempts`.
    ///
    /// A name ends the pipeline at once. Without one, the next attempt runs
    /// until the budget is spent, then reverse DNS starts if the address is
    /// a valid IP.
    pub(crate) fn after_probe(
        attempt: usize,
        max_attempts: usize,
        name: Option<String>,
        ip: Option<IpAddr>,
    ) -> Self {
        if let Some(name) = usable(name) {
            return State::Resolved(ResolutionOutcome::resolved(name, Strategy::Certificate));
        }
        if attempt < max_attempts {
            return State::Probing {
                attempt: attempt + 1,
            };
        }
        match ip {
            Some(ip) => State::TryingPtr(ip),
            None => State::Unresolved,
        }
    }

    pub(crate) fn after_ptr(ip: IpAddr, name: Option<String>) -> Self {
        match usable(name) {
            Some(name) => State::Resolved(ResolutionOutcome::resolved(name, Strategy::Ptr)),
            None => State::TryingSoa(ip),
        }
    }

    pub(crate) fn after_soa(text: Option<String>) -> Self {
        match usable(text) {
            Some(text) => State::Resolved(ResolutionOutcome::resolved(text, Strategy::Soa)),
            None => State::Unresolved,
        }
    }
}

/// Blank values and the sentinel itself count as "no name".
fn usable(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.trim().is_empty() && n != UNRESOLVED_HOST)
}
