//! Collapses the per-model samples of an hour into a single consensus view
//! with a rough confidence score, for human-facing output.

use crate::types::snapshot::HourRecord;
use chrono::{DateTime, Utc};

/// Consensus figures for one hour across the models that forecast it.
#[derive(Debug, Clone, PartialEq)]
pub struct HourBlend {
    /// Mean sustained wind across models.
    pub wind: f64,
    /// Mean gust across models.
    pub gust: f64,
    /// Circular mean of model directions, in `[0, 360)` degrees.
    pub direction: f64,
    /// How many models contributed.
    pub model_count: usize,
    /// Confidence score from 0 to 100. Two thirds of the weight comes from
    /// how tightly the models agree on wind speed, one third from how many
    /// models contributed (four or more counts as full).
    pub reliability: u8,
    /// Gust excess over sustained wind as a percentage of the sustained
    /// wind. Can exceed 100 in squally conditions.
    pub gustiness: u32,
}

/// Blends one hour record, or `None` when no model forecast the hour.
pub fn blend_hour(record: &HourRecord) -> Option<HourBlend> {
    if record.models.is_empty() {
        return None;
    }

    let winds: Vec<f64> = record.models.values().map(|s| s.wind).collect();
    let gusts: Vec<f64> = record.models.values().map(|s| s.gust).collect();
    let dirs: Vec<f64> = record.models.values().map(|s| f64::from(s.direction)).collect();

    let wind = mean(&winds);
    let gust = mean(&gusts);
    let direction = circular_mean(&dirs);

    let iqr = quantile(&winds, 0.75) - quantile(&winds, 0.25);
    let range = winds.iter().fold(f64::MIN, |a, &b| a.max(b))
        - winds.iter().fold(f64::MAX, |a, &b| a.min(b));
    let spread_penalty = (iqr / 10.0 + range / 20.0).min(1.0);
    let count_boost = (winds.len() as f64 / 4.0).min(1.0);

    let reliability =
        (100.0 * (0.65 * (1.0 - spread_penalty) + 0.35 * count_boost).max(0.0)).round() as u8;
    let gustiness = (100.0 * ((gust - wind) / wind.max(1.0)).max(0.0)).round() as u32;

    Some(HourBlend {
        wind,
        gust,
        direction,
        model_count: winds.len(),
        reliability,
        gustiness,
    })
}

/// The 8-point compass name for a direction in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let sector = (degrees / 45.0).round() as i64;
    POINTS[sector.rem_euclid(8) as usize]
}

/// Index of the first record at or after `now`, falling back to 0 when the
/// whole timeline is in the past or nothing parses.
pub fn next_hour_index(hours: &[HourRecord], now: DateTime<Utc>) -> usize {
    hours
        .iter()
        .position(|h| h.instant().map_or(false, |t| t >= now))
        .unwrap_or(0)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of angles in degrees, computed on the unit circle so that north-ish
/// directions like 350 and 10 average to 0 rather than 180.
fn circular_mean(degrees: &[f64]) -> f64 {
    let n = degrees.len() as f64;
    let (mut x, mut y) = (0.0f64, 0.0f64);
    for d in degrees {
        let r = d.to_radians();
        x += r.cos();
        y += r.sin();
    }
    let angle = (y / n).atan2(x / n).to_degrees();
    (angle + 360.0) % 360.0
}

/// Linear-interpolation quantile over an unsorted sample.
fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}
