//! TLS certificate name probing.
//!
//! This module connects to a target, completes a TLS handshake with a
//! **non-validating** verifier and reads the Subject Alternative Name DNS
//! entries of the presented chain. Connection and handshake failures are
//! routine here and are reported as "no name", never as errors.
//!
//! Uses `tokio-rustls` for async TLS connections and `x509-parser` for certificate parsing.

mod extract;
mod verifier;

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use rustls::pki_types::ServerName;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::TlsConnector;

use crate::config::TLS_SHUTDOWN_GRACE_MS;
use crate::engine::CertificateProber;
use crate::error_handling::InitializationError;
use crate::models::Target;

use extract::first_certificate_name;
use verifier::NonValidatingVerifier;

/// Reads hostnames from the certificates a target presents.
///
/// The underlying client configuration disables certificate-chain validation.
/// It is built once and shared by every probe of a run.
#[derive(Clone)]
pub struct TlsProber {
    connector: TlsConnector,
}

impl TlsProber {
    /// Builds the non-validating client configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::TlsConfigError` if the crypto provider
    /// supports none of the default protocol versions.
    pub fn new() -> Result<Self, InitializationError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(Arc::clone(&provider))
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NonValidatingVerifier::new(provider)))
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
        })
    }

    /// Probes one target and returns the first usable certificate DNS name.
    ///
    /// `timeout` bounds TCP connect and TLS handshake together. Returns `None`
    /// when the connection fails, times out, or no certificate carries a
    /// non-blank DNS name.
    pub async fn probe_name(&self, target: &Target, timeout: Duration) -> Option<String> {
        let (name, mut stream) = match tokio::time::timeout(timeout, self.handshake(target)).await
        {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                debug!("TLS probe failed for {target}: {e:#}");
                return None;
            }
            Err(_) => {
                debug!(
                    "TLS probe timeout for {target} ({}s)",
                    timeout.as_secs_f64()
                );
                return None;
            }
        };

        // Best-effort close_notify; the socket is closed when `stream` drops either way.
        let grace = Duration::from_millis(TLS_SHUTDOWN_GRACE_MS);
        if let Ok(Err(e)) = tokio::time::timeout(grace, stream.shutdown()).await {
            debug!("TLS shutdown error for {target}: {e}");
        }

        match &name {
            Some(name) => debug!("Certificate for {target} names {name}"),
            None => debug!("Certificate for {target} carries no DNS names"),
        }
        name
    }

    async fn handshake(&self, target: &Target) -> Result<(Option<String>, TlsStream<TcpStream>)> {
        let port: u16 = target
            .port
            .parse()
            .with_context(|| format!("Invalid port {:?}", target.port))?;
        let server_name = server_name_for(&target.address)?;

        let sock = TcpStream::connect((target.address.as_str(), port))
            .await
            .with_context(|| format!("Failed to connect to {target}"))?;
        let tls_stream = self
            .connector
            .connect(server_name, sock)
            .await
            .with_context(|| format!("TLS handshake failed for {target}"))?;

        let name = tls_stream
            .get_ref()
            .1
            .peer_certificates()
            .and_then(first_certificate_name);
        Ok((name, tls_stream))
    }
}

#[async_trait]
impl CertificateProber for TlsProber {
    async fn probe(&self, target: &Target, timeout: Duration) -> Option<String> {
        self.probe_name(target, timeout).await
    }
}

/// Server name presented in the handshake.
///
/// IP literals produce an IP server name (no SNI is sent); anything else is
/// treated as a DNS name.
fn server_name_for(address: &str) -> Result<ServerName<'static>> {
    if let Ok(ip) = address.parse::<IpAddr>() {
        return Ok(ServerName::IpAddress(ip.into()));
    }
    ServerName::try_from(address.to_string())
        .map_err(|e| anyhow::anyhow!("Invalid server name {address:?}: {e}"))
}
