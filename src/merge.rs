//! Merges per-model hourly series onto one shared timeline.
//!
//! Models disagree about which hours exist: run starts differ, horizons
//! differ, and some models only publish every third hour. The merge keeps
//! the union of all timestamps so no model's coverage is thrown away, and
//! each hour record carries whichever models actually forecast it.

use crate::config::SiteConfig;
use crate::resolver::ResolvedModels;
use crate::types::model::WeatherModel;
use crate::types::series::HourlySeries;
use crate::types::snapshot::{HourRecord, Snapshot, SnapshotMeta, WindSample};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};

const GENERATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Appends a `Z` suffix so timestamps compare equal across models and read
/// unambiguously as UTC. Already-suffixed timestamps pass through unchanged.
fn normalize_time(raw: &str) -> String {
    if raw.ends_with('Z') {
        raw.to_string()
    } else {
        format!("{raw}Z")
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Builds the snapshot for one resolved fetch.
///
/// Hour records are emitted in chronological order; with the fixed-width
/// timestamp format, sorting the normalized strings is sorting by time.
/// Within an hour, a model contributes only when all three of its variables
/// are present, so a record never shows a wind speed without its gust and
/// direction.
pub fn merge_timeline(
    resolved: &ResolvedModels,
    site: &SiteConfig,
    generated_at: DateTime<Utc>,
) -> Snapshot {
    let mut union: BTreeSet<String> = BTreeSet::new();
    for series in resolved.series.values() {
        for raw in &series.time {
            union.insert(normalize_time(raw));
        }
    }

    // Per-model lookup from normalized timestamp to position in the series.
    // A duplicated timestamp within one series resolves to its last position.
    let mut indexed: BTreeMap<WeatherModel, (&HourlySeries, HashMap<String, usize>)> =
        BTreeMap::new();
    for (model, series) in &resolved.series {
        let mut index = HashMap::with_capacity(series.time.len());
        for (position, raw) in series.time.iter().enumerate() {
            index.insert(normalize_time(raw), position);
        }
        indexed.insert(*model, (series, index));
    }

    let mut hours = Vec::with_capacity(union.len());
    for time in union {
        let mut models = BTreeMap::new();
        for (model, (series, index)) in &indexed {
            if let Some(&position) = index.get(&time) {
                if let Some((wind, gust, direction)) = series.sample_at(position) {
                    models.insert(
                        *model,
                        WindSample {
                            wind: round_tenth(wind),
                            gust: round_tenth(gust),
                            direction: direction.round() as i32,
                        },
                    );
                }
            }
        }
        hours.push(HourRecord { time, models });
    }

    Snapshot {
        meta: SnapshotMeta {
            location: site.location.clone(),
            lat: site.latitude,
            lon: site.longitude,
            models: resolved.models(),
            generated_at: generated_at.format(GENERATED_AT_FORMAT).to_string(),
            aliases: resolved.aliases.clone(),
        },
        hours,
    }
}
