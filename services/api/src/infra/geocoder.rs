//! Nominatim-backed geocoder.
//!
//! Nominatim's usage policy allows at most one request per second, so outbound
//! calls are spaced by [`MIN_REQUEST_INTERVAL`] across the whole process.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use loomap_domain::geo::GeoPoint;

use crate::domain::repository::GeocoderPort;
use crate::domain::types::GeocodedAddress;
use crate::error::ApiError;

pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: Url,
    user_agent: String,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocoder {
    pub fn new(endpoint: Url, user_agent: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            user_agent,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    fn search_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        url
    }

    /// Wait until the previous request is at least [`MIN_REQUEST_INTERVAL`] old.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            tokio::time::sleep_until(at + MIN_REQUEST_INTERVAL).await;
        }
        *last = Some(Instant::now());
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

impl GeocoderPort for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, ApiError> {
        self.throttle().await;

        let response = self
            .client
            .get(self.search_url(address))
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .context("geocoder request")
            .map_err(ApiError::GeocoderUnavailable)?;

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .context("decode geocoder response")
            .map_err(ApiError::GeocoderUnavailable)?;

        hits.into_iter()
            .next()
            .map(hit_to_address)
            .transpose()
            .map_err(ApiError::GeocoderUnavailable)
    }
}

fn hit_to_address(hit: SearchHit) -> anyhow::Result<GeocodedAddress> {
    let latitude: f64 = hit.lat.parse().context("geocoder latitude")?;
    let longitude: f64 = hit.lon.parse().context("geocoder longitude")?;
    let location = GeoPoint::new(latitude, longitude)
        .map_err(|e| anyhow!("geocoder returned an invalid point: {e}"))?;
    Ok(GeocodedAddress {
        location,
        display_name: hit.display_name,
    })
}
