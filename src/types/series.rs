use serde::{Deserialize, Serialize};

/// The hourly block of a provider forecast response, as parallel columns.
///
/// Timestamps are kept as the provider sent them; the value vectors use
/// `Option<f64>` because the provider reports hours it has not computed yet
/// as `null`, typically at the tail of a model run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, rename = "wind_speed_10m")]
    pub wind: Vec<Option<f64>>,
    #[serde(default, rename = "wind_gusts_10m")]
    pub gust: Vec<Option<f64>>,
    #[serde(default, rename = "wind_direction_10m")]
    pub direction: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Returns the `(wind, gust, direction)` triple at `index`, or `None`
    /// unless all three values are present.
    ///
    /// An hour where any variable is missing is treated as if the model had
    /// not forecast it at all, so partial rows never leak into a merged
    /// timeline.
    pub fn sample_at(&self, index: usize) -> Option<(f64, f64, f64)> {
        let wind = self.wind.get(index).copied().flatten()?;
        let gust = self.gust.get(index).copied().flatten()?;
        let direction = self.direction.get(index).copied().flatten()?;
        Some((wind, gust, direction))
    }
}
