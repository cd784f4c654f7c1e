//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry budget, upstreams)
//! - CLI option types and parsing
//! - The library `Config` and the engine's `ResolveOptions`

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt, OutputFormat, ResolveOptions};
