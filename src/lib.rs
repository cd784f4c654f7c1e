//! certhost library: hostname identification for IP:port targets
//!
//! This library resolves a best-effort hostname for each target by reading the
//! DNS names in the TLS certificate it presents, retrying a bounded number of
//! times, then falling back to a PTR lookup and finally to the SOA record of
//! the reverse zone. Results can optionally be enriched with handshake
//! fingerprints from external tools and geolocation metadata.
//!
//! # Example
//!
//! ```no_run
//! use certhost::{Config, run_lookup};
//! use tokio;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("targets.txt"),
//!     retry: 2,
//!     ..Default::default()
//! };
//!
//! let report = run_lookup(config).await?;
//! println!("Processed {} targets: {} resolved, {} unresolved",
//!          report.total_targets, report.resolved(), report.unresolved);
//! # Ok(())
//! # }
//! ```
//!
//! The engine can also be driven directly with custom collaborators through
//! the [`CertificateProber`] and [`ReverseResolver`] traits.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod dns;
pub mod engine;
pub mod enrichment;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod input;
pub mod models;
pub mod run;
pub mod tls;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat, ResolveOptions};
pub use engine::{CertificateProber, HostIdentifier, ReverseResolver};
pub use error_handling::{InitializationError, OutputError};
pub use models::{HostRecord, ResolutionOutcome, Strategy, Target};
pub use run::{process_targets, run_lookup, RunReport};
