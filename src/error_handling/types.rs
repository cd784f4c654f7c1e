//! Error type definitions.
//!
//! Only setup and output failures are typed errors. Probe, DNS and enrichment
//! failures are reported as data (sentinel hostnames, `error: ...` text, empty
//! geolocation) and never surface here.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error building the TLS client configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(#[from] rustls::Error),
}

/// Error types for writing result records.
///
/// Any of these aborts the run; lines already flushed in streaming mode stay
/// in the destination.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The destination file could not be opened or created.
    #[error("error opening file {path}: {source}")]
    Open {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The batch file could not be written.
    #[error("error writing file {path}: {source}")]
    WriteFile {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing the destination failed.
    #[error("error writing output: {0}")]
    Write(#[from] std::io::Error),

    /// A record could not be serialized to JSON.
    #[error("error marshaling JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
