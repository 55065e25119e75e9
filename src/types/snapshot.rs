//! The persisted snapshot document: one fetch of every model, merged onto a
//! shared hourly timeline and written to disk as JSON.

use crate::error::WindBlendError;
use crate::types::model::WeatherModel;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One model's wind figures for a single hour, rounded for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    /// Sustained wind speed, one decimal place.
    pub wind: f64,
    /// Gust speed, one decimal place.
    pub gust: f64,
    /// Wind direction in whole degrees. Rounding may produce 360, which is
    /// kept as-is rather than wrapped to 0.
    #[serde(rename = "dir")]
    pub direction: i32,
}

/// A single hour on the merged timeline.
///
/// The per-model samples are flattened into the record, so an hour covered by
/// GFS and ICON serializes as `{"time": ..., "gfs": {...}, "icon": {...}}`.
/// Models that did not forecast the hour are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    /// Normalized timestamp, e.g. `2025-08-23T14:00Z`.
    pub time: String,
    #[serde(flatten)]
    pub models: BTreeMap<WeatherModel, WindSample>,
}

impl HourRecord {
    /// Parses the record's timestamp back into a UTC instant.
    ///
    /// Accepts the minute-precision form snapshots are written with as well
    /// as a seconds suffix, since both appear in provider data.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        let raw = self.time.strip_suffix('Z').unwrap_or(&self.time);
        let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()?;
        Some(Utc.from_utc_datetime(&parsed))
    }
}

/// Provenance block describing how a snapshot was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    /// Models that contributed data, in canonical order.
    pub models: Vec<WeatherModel>,
    /// UTC generation time, `%Y-%m-%dT%H:%M:%SZ`.
    pub generated_at: String,
    /// Which provider alias actually satisfied each model.
    pub aliases: BTreeMap<WeatherModel, String>,
}

/// The full snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub hours: Vec<HourRecord>,
}

impl Snapshot {
    /// Writes the snapshot as pretty-printed JSON, atomically.
    ///
    /// The document is staged in a temporary file in the target directory and
    /// renamed over `path`, so readers never observe a partially written
    /// snapshot. Missing parent directories are created.
    pub fn write_json(&self, path: &Path) -> Result<(), WindBlendError> {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(|e| WindBlendError::SnapshotWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let body = serde_json::to_vec_pretty(self).map_err(WindBlendError::SnapshotEncode)?;

        let stage_dir = parent.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        let mut staged = NamedTempFile::new_in(stage_dir).map_err(|e| {
            WindBlendError::SnapshotWrite {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        staged.write_all(&body).map_err(|e| WindBlendError::SnapshotWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        staged.persist(path).map_err(|e| WindBlendError::SnapshotWrite {
            path: path.to_path_buf(),
            source: e.error,
        })?;
        Ok(())
    }

    /// Reads a snapshot previously written with [`Snapshot::write_json`].
    pub fn read_json(path: &Path) -> Result<Self, WindBlendError> {
        let body = fs::read(path).map_err(|e| WindBlendError::SnapshotRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_slice(&body).map_err(|e| WindBlendError::SnapshotParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
