//! Defines the canonical forecast models this crate knows how to fetch and
//! the provider-specific aliases each one is resolved through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical weather-forecast model.
///
/// This is the stable identity a model keeps in snapshots and log output,
/// independent of which provider alias actually satisfied it. The derived
/// `Ord` follows declaration order, which is also the order the models are
/// attempted in: GFS, ICON, ECMWF, JMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherModel {
    /// NOAA Global Forecast System.
    Gfs,
    /// DWD ICON family (EU nest preferred).
    Icon,
    /// ECMWF IFS.
    Ecmwf,
    /// JMA mesoscale/seamless models.
    Jma,
}

impl WeatherModel {
    /// Every canonical model, in attempt order.
    pub const ALL: [WeatherModel; 4] = [
        WeatherModel::Gfs,
        WeatherModel::Icon,
        WeatherModel::Ecmwf,
        WeatherModel::Jma,
    ];

    /// The lowercase identifier used in snapshots and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherModel::Gfs => "gfs",
            WeatherModel::Icon => "icon",
            WeatherModel::Ecmwf => "ecmwf",
            WeatherModel::Jma => "jma",
        }
    }

    /// Provider aliases for this model, tried in order until one yields data.
    ///
    /// The first alias is the preferred dataset; the later ones are coarser or
    /// blended fallbacks offered by the provider under different names.
    pub fn default_aliases(self) -> &'static [&'static str] {
        match self {
            WeatherModel::Gfs => &["gfs"],
            WeatherModel::Icon => &["icon_eu", "icon_seamless", "icon"],
            WeatherModel::Ecmwf => &["ecmwf_ifs", "ecmwf"],
            WeatherModel::Jma => &["jma_msm", "jma_seamless"],
        }
    }
}

/// Formats a `WeatherModel` as its lowercase identifier.
///
/// # Examples
///
/// ```
/// use windblend::WeatherModel;
///
/// assert_eq!(format!("{}", WeatherModel::Gfs), "gfs");
/// assert_eq!(WeatherModel::Ecmwf.to_string(), "ecmwf");
/// ```
impl fmt::Display for WeatherModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
