//! Error handling.
//!
//! This module provides the typed errors for the two fatal failure classes
//! (initialization and output). Input read failures are reported through
//! `anyhow` context in the run loop.

mod types;

// Re-export public API
pub use types::{InitializationError, OutputError};
