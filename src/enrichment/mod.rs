//! Optional diagnostic enrichment.
//!
//! This module provides:
//! - Handshake fingerprints from external TLS utilities
//! - Geolocation metadata from a remote HTTP API
//!
//! Enrichment never affects the resolved hostname and never fails: collector
//! problems surface as `error: ...` text or absent geolocation fields.

mod fingerprint;
mod geoip;

use std::time::Duration;

use log::debug;

use crate::models::{Enrichment, Fingerprints, Target};

// Re-export public API
pub use fingerprint::{fingerprint, FingerprintKind};
pub use geoip::GeoLocator;

/// Gathers fingerprints and geolocation for one target at a time.
#[derive(Clone)]
pub struct Enricher {
    geo: GeoLocator,
    timeout: Duration,
}

impl Enricher {
    /// `timeout` bounds each external fingerprinting tool separately.
    pub fn new(geo: GeoLocator, timeout: Duration) -> Self {
        Self { geo, timeout }
    }

    /// Runs every collector in turn, then the geolocation lookup.
    pub async fn enrich(&self, target: &Target) -> Enrichment {
        let mut fingerprints = Fingerprints::default();
        for kind in FingerprintKind::ALL {
            let summary = fingerprint(target, self.timeout, kind).await;
            match kind {
                FingerprintKind::Ctls => fingerprints.ctls = Some(summary),
                FingerprintKind::Ztls => fingerprints.ztls = Some(summary),
                FingerprintKind::OpenSsl => fingerprints.openssl = Some(summary),
            }
        }

        let geo = self.geo.lookup(&target.address).await;
        if geo.is_empty() {
            debug!("No geolocation data for {}", target.address);
        }

        Enrichment { fingerprints, geo }
    }
}
