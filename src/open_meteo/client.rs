//! HTTP client for the Open-Meteo forecast API.

use crate::config::SiteConfig;
use crate::open_meteo::error::FetchError;
use crate::types::series::HourlySeries;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Source of hourly forecast data for a single model alias.
///
/// The production implementation is [`OpenMeteoClient`]; tests substitute
/// scripted implementations to exercise resolution and merging without a
/// network.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetches the hourly wind series for one provider-specific model alias.
    ///
    /// An `Ok` result may still carry an empty series; callers decide whether
    /// that counts as data.
    async fn fetch_hourly(&self, alias: &str) -> Result<HourlySeries, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlySeries>,
}

/// Client for the Open-Meteo `/forecast` endpoint.
///
/// Holds a configured [`reqwest::Client`] so connections are reused across
/// the alias fetches of a single run.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
    forecast_days: u8,
    unit: &'static str,
    variables: String,
}

impl OpenMeteoClient {
    /// Builds a client from the site configuration.
    pub fn new(config: &SiteConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            latitude: config.latitude,
            longitude: config.longitude,
            forecast_days: config.forecast_days,
            unit: config.unit.api_param(),
            variables: config.variables.join(","),
        })
    }

    fn forecast_url(&self, alias: &str) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}&forecast_days={}&wind_speed_unit={}&models={}",
            self.base_url,
            self.latitude,
            self.longitude,
            self.variables,
            self.forecast_days,
            self.unit,
            alias
        )
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch_hourly(&self, alias: &str) -> Result<HourlySeries, FetchError> {
        let url = self.forecast_url(alias);
        debug!("requesting {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {status} from {url}");
            return Err(FetchError::HttpStatus { url, status });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode { url, source: e })?;

        Ok(body.hourly.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindUnit;

    #[test]
    fn forecast_url_carries_every_query_parameter() {
        let config = SiteConfig::default();
        let client = OpenMeteoClient::new(&config).unwrap();
        let url = client.forecast_url("icon_eu");
        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=52.623&longitude=5.783\
             &hourly=wind_speed_10m,wind_gusts_10m,wind_direction_10m\
             &forecast_days=3&wind_speed_unit=kn&models=icon_eu"
        );
    }

    #[test]
    fn forecast_url_respects_overrides_and_trailing_slash() {
        let config = SiteConfig::builder()
            .base_url("http://localhost:9999/v1/".to_string())
            .latitude(52.0)
            .longitude(5.25)
            .forecast_days(7)
            .unit(WindUnit::Ms)
            .build();
        let client = OpenMeteoClient::new(&config).unwrap();
        let url = client.forecast_url("gfs");
        assert!(url.starts_with("http://localhost:9999/v1/forecast?"));
        assert!(url.contains("latitude=52&longitude=5.25"));
        assert!(url.contains("forecast_days=7"));
        assert!(url.contains("wind_speed_unit=ms"));
        assert!(url.ends_with("&models=gfs"));
    }
}
