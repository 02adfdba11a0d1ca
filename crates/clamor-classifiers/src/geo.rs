//! IP geolocation client for ip-api.com
//!
//! Loopback addresses and the literal `localhost` are never sent
//! upstream; they short-circuit to a `Skipped` result with empty
//! location fields. Upstream failures (transport errors, non-success
//! payload status) degrade to a `Fail` result.

use async_trait::async_trait;
use clamor_core::{GeoLocation, GeoStatus};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::capability::GeoLocator;
use crate::error::ClassifierError;

/// Default ip-api.com endpoint
pub const DEFAULT_API_URL: &str = "http://ip-api.com/json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    status: String,
    country: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    city: Option<String>,
    query: Option<String>,
}

/// Whether an address must never be sent to the upstream service
fn is_local_ip(ip: &str) -> bool {
    ip.starts_with("127.") || ip == "localhost"
}

fn parse_location(body: &str, ip: &str) -> GeoLocation {
    let data = match serde_json::from_str::<IpApiResponse>(body) {
        Ok(d) => d,
        Err(e) => {
            warn!("malformed geolocation response for {ip}: {e}");
            return GeoLocation::empty(ip, GeoStatus::Fail);
        }
    };

    if data.status != "success" {
        warn!("failed IP lookup for {ip}: status {}", data.status);
        return GeoLocation::empty(ip, GeoStatus::Fail);
    }

    GeoLocation {
        ip: data.query.unwrap_or_else(|| ip.to_string()),
        country: data.country,
        region: data.region_name,
        city: data.city,
        status: GeoStatus::Success,
    }
}

/// Client for the ip-api.com geolocation service
#[derive(Debug, Clone)]
pub struct IpApiGeo {
    base_url: String,
    http: reqwest::Client,
}

impl IpApiGeo {
    /// Create a new client (the service requires no credential)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClassifierError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::config(format!("geo http client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }
}

#[async_trait]
impl GeoLocator for IpApiGeo {
    async fn locate(&self, ip: &str) -> Result<GeoLocation, ClassifierError> {
        if is_local_ip(ip) {
            warn!("skipping geo lookup for local IP: {ip}");
            return Ok(GeoLocation::empty(ip, GeoStatus::Skipped));
        }

        let url = format!("{}/{}", self.base_url, ip);

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("HTTP error while fetching geo data: {e}");
                return Ok(GeoLocation::empty(ip, GeoStatus::Fail));
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "geo service returned error status");
            return Ok(GeoLocation::empty(ip, GeoStatus::Fail));
        }

        match response.text().await {
            Ok(body) => Ok(parse_location(&body, ip)),
            Err(e) => {
                warn!("failed to read geo response body: {e}");
                Ok(GeoLocation::empty(ip, GeoStatus::Fail))
            }
        }
    }
}
