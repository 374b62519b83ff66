use crate::config::GeocoderConfig;
use crate::datasources::Geocoder;
use crate::error::{GeoPlantError, Result};
use crate::models::UNKNOWN_LOCATION;
use serde::Deserialize;
use std::time::Duration;

/// Country-level zoom: labels name the country, not the street.
const ZOOM: u8 = 5;

pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<ReverseAddress>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseAddress {
    #[serde(default)]
    country: Option<String>,
}

impl ReverseResponse {
    fn label(self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        self.address
            .and_then(|a| a.country)
            .or(self.display_name)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl NominatimClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    fn reverse_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}&zoom={}&accept-language={}",
            self.base_url, lat, lon, ZOOM, self.language
        )
    }

    /// Reverse-geocode a coordinate. `Ok(None)` when nothing is there.
    pub async fn lookup(&self, lat: f64, lon: f64) -> Result<Option<String>> {
        let url = self.reverse_url(lat, lon);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeoPlantError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            return Err(GeoPlantError::DataSourceUnavailable(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        let body: ReverseResponse = response.json().await?;
        Ok(body.label())
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/status?format=json", self.base_url);

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                GeoPlantError::DataSourceUnavailable(format!("Nominatim: {}", e))
            })?;

        Ok(response.status().is_success())
    }
}

impl Geocoder for NominatimClient {
    async fn reverse_geocode(&self, lat: f64, lon: f64) -> String {
        match self.lookup(lat, lon).await {
            Ok(Some(label)) => label,
            Ok(None) => UNKNOWN_LOCATION.to_string(),
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "Reverse geocoding failed");
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn ping(&self) -> bool {
        match self.test_connection().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "Geocoder unreachable");
                false
            }
        }
    }
}
