//! Site and provider configuration.
//!
//! Every field has a sensible default aimed at the IJsselmeer spot the tool
//! was originally built for, so `SiteConfig::default()` is immediately
//! usable; the builder and serde support exist for overriding individual
//! fields from a CLI flag or a config file.

use crate::types::model::WeatherModel;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wind speed unit requested from the forecast provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    /// Knots.
    #[default]
    Kn,
    /// Kilometres per hour.
    Kmh,
    /// Metres per second.
    Ms,
    /// Miles per hour.
    Mph,
}

impl WindUnit {
    /// The identifier the provider API expects.
    pub fn api_param(self) -> &'static str {
        match self {
            WindUnit::Kn => "kn",
            WindUnit::Kmh => "kmh",
            WindUnit::Ms => "ms",
            WindUnit::Mph => "mph",
        }
    }
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_param())
    }
}

/// Error returned when a wind unit string is not recognized.
#[derive(Debug, Error)]
#[error("unknown wind unit '{0}', expected one of: kn, kmh, ms, mph")]
pub struct ParseWindUnitError(String);

impl FromStr for WindUnit {
    type Err = ParseWindUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kn" => Ok(WindUnit::Kn),
            "kmh" => Ok(WindUnit::Kmh),
            "ms" => Ok(WindUnit::Ms),
            "mph" => Ok(WindUnit::Mph),
            other => Err(ParseWindUnitError(other.to_string())),
        }
    }
}

/// Configuration for one forecast site.
///
/// # Examples
///
/// ```
/// use windblend::SiteConfig;
///
/// let config = SiteConfig::builder()
///     .location("Medemblik".to_string())
///     .latitude(52.774)
///     .longitude(5.106)
///     .build();
/// assert_eq!(config.forecast_days, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct SiteConfig {
    /// Human-readable label stored in snapshot metadata.
    #[serde(default = "default_location")]
    #[builder(default = default_location())]
    pub location: String,

    #[serde(default = "default_latitude")]
    #[builder(default = default_latitude())]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    #[builder(default = default_longitude())]
    pub longitude: f64,

    /// Forecast horizon requested from the provider, in days.
    #[serde(default = "default_forecast_days")]
    #[builder(default = default_forecast_days())]
    pub forecast_days: u8,

    /// Unit for wind and gust speeds.
    #[serde(default)]
    #[builder(default)]
    pub unit: WindUnit,

    /// Hourly variables requested from the provider.
    #[serde(default = "default_variables")]
    #[builder(default = default_variables())]
    pub variables: Vec<String>,

    /// Base URL of the forecast API, without a trailing slash.
    #[serde(default = "default_base_url")]
    #[builder(default = default_base_url())]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    #[builder(default = default_timeout_secs())]
    pub timeout_secs: u64,

    /// Provider aliases to try for each canonical model, in order.
    #[serde(default = "default_aliases")]
    #[builder(default = default_aliases())]
    pub aliases: BTreeMap<WeatherModel, Vec<String>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn default_location() -> String {
    "Schokkerhaven".to_string()
}

fn default_latitude() -> f64 {
    52.623
}

fn default_longitude() -> f64 {
    5.783
}

fn default_forecast_days() -> u8 {
    3
}

fn default_variables() -> Vec<String> {
    ["wind_speed_10m", "wind_gusts_10m", "wind_direction_10m"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_aliases() -> BTreeMap<WeatherModel, Vec<String>> {
    WeatherModel::ALL
        .iter()
        .map(|model| {
            let aliases = model
                .default_aliases()
                .iter()
                .map(|alias| alias.to_string())
                .collect();
            (*model, aliases)
        })
        .collect()
}
