//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{GEOIP_TIMEOUT_SECS, USER_AGENT};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for geolocation lookups.
///
/// Creates a `reqwest::Client` configured with:
/// - The crate's User-Agent
/// - A fixed per-request timeout
///
/// The client is built once per run and reused for every target.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client() -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(GEOIP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
