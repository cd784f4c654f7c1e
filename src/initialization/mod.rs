//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared, per-run resources:
//! - Logger
//! - HTTP client (geolocation)
//! - DNS resolvers (system PTR resolver and fixed SOA upstream)
//! - TLS certificate prober

mod client;
mod logger;
mod resolver;

use crate::error_handling::InitializationError;
use crate::tls::TlsProber;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::{init_resolver, init_soa_resolver};

/// Initializes the certificate prober.
///
/// The prober carries its own `ring` crypto provider, so no process-wide
/// provider needs to be installed.
///
/// # Errors
///
/// Returns `InitializationError::TlsConfigError` if the TLS client
/// configuration cannot be built.
pub fn init_prober() -> Result<TlsProber, InitializationError> {
    TlsProber::new()
}
