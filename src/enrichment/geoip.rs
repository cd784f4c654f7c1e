//! Geolocation lookup via the ipapi.co JSON API.
//!
//! Fail-open: transport errors, non-2xx statuses, API error bodies and
//! unparseable JSON all produce an empty [`GeoRecord`].

use anyhow::{bail, Context, Result};
use log::debug;
use serde::Deserialize;

use crate::models::GeoRecord;

/// Response envelope: geolocation fields plus the API's error flag.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(flatten)]
    geo: GeoRecord,
}

/// Looks up coarse location and network metadata for IP addresses.
#[derive(Clone)]
pub struct GeoLocator {
    client: reqwest::Client,
    base_url: String,
}

impl GeoLocator {
    /// `base_url` is the API root, e.g. `https://ipapi.co`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Returns geolocation for `ip`, or an empty record on any failure.
    pub async fn lookup(&self, ip: &str) -> GeoRecord {
        match self.fetch(ip).await {
            Ok(record) => record,
            Err(e) => {
                debug!("Geolocation lookup failed for {ip}: {e:#}");
                GeoRecord::default()
            }
        }
    }

    fn url_for(&self, ip: &str) -> String {
        format!("{}/{}/json/", self.base_url.trim_end_matches('/'), ip)
    }

    async fn fetch(&self, ip: &str) -> Result<GeoRecord> {
        let url = self.url_for(ip);
        let body = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?
            .text()
            .await
            .context("failed to read response body")?;
        parse_geo_response(&body)
    }
}

/// Parses an API body, rejecting bodies that carry the API's error flag.
pub(crate) fn parse_geo_response(body: &str) -> Result<GeoRecord> {
    let response: IpApiResponse =
        serde_json::from_str(body).context("unparseable geolocation response")?;
    if response.error {
        bail!(
            "geolocation API error: {}",
            response.reason.unwrap_or_else(|| "unspecified".to_string())
        );
    }
    Ok(response.geo.normalized())
}
