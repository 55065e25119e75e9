//! This module provides the main entry point for building merged wind-forecast
//! snapshots. It ties together the forecast provider, the per-model alias
//! resolution and the timeline merge, and knows how to persist the result.

use crate::config::SiteConfig;
use crate::error::WindBlendError;
use crate::merge::merge_timeline;
use crate::open_meteo::client::{ForecastProvider, OpenMeteoClient};
use crate::resolver::SourceResolver;
use crate::types::snapshot::Snapshot;
use chrono::Utc;
use log::info;
use std::path::Path;

/// The main client struct for producing merged wind-forecast snapshots.
///
/// A `WindBlend` owns the site configuration and a [`ForecastProvider`], and
/// exposes the two operations a caller needs: building a snapshot in memory
/// and writing one to disk. Create an instance with [`WindBlend::new()`] to
/// fetch from the Open-Meteo API, or with [`WindBlend::with_provider()`] to
/// supply any other provider implementation (scripted providers in tests,
/// alternative backends).
///
/// # Examples
///
/// ```rust
/// # use windblend::{SiteConfig, WindBlend, WindBlendError};
/// # async fn run() -> Result<(), WindBlendError> {
/// let blender = WindBlend::new(SiteConfig::default())?;
/// let snapshot = blender.build_snapshot().await?;
/// println!("merged {} hours", snapshot.hours.len());
/// # Ok(())
/// # }
/// ```
pub struct WindBlend {
    config: SiteConfig,
    provider: Box<dyn ForecastProvider>,
}

impl WindBlend {
    /// Creates a blender backed by the Open-Meteo forecast API.
    ///
    /// # Arguments
    ///
    /// * `config` - The [`SiteConfig`] describing the site, the forecast
    ///   horizon, the unit system and the per-model alias table.
    ///
    /// # Errors
    ///
    /// Returns [`WindBlendError::Fetch`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: SiteConfig) -> Result<Self, WindBlendError> {
        let client = OpenMeteoClient::new(&config)?;
        Ok(Self {
            config,
            provider: Box::new(client),
        })
    }

    /// Creates a blender on top of an arbitrary [`ForecastProvider`].
    ///
    /// Useful for exercising resolution and merging without a network, or for
    /// pointing the same pipeline at a different forecast backend.
    pub fn with_provider(config: SiteConfig, provider: impl ForecastProvider + 'static) -> Self {
        Self {
            config,
            provider: Box::new(provider),
        }
    }

    /// The configuration this blender was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Resolves every configured model and merges the results into a snapshot.
    ///
    /// Models are fetched sequentially through their alias chains; models that
    /// fail entirely are dropped with warnings rather than failing the run.
    ///
    /// # Returns
    ///
    /// A [`Snapshot`] whose hour records cover the union of all resolved
    /// model timelines, stamped with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns [`WindBlendError::NoModelData`] when not a single model
    /// produced data.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use windblend::{SiteConfig, WindBlend, WindBlendError};
    /// # async fn run() -> Result<(), WindBlendError> {
    /// let blender = WindBlend::new(SiteConfig::default())?;
    /// let snapshot = blender.build_snapshot().await?;
    /// for record in &snapshot.hours {
    ///     println!("{}: {} models", record.time, record.models.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build_snapshot(&self) -> Result<Snapshot, WindBlendError> {
        let resolver = SourceResolver::new(self.provider.as_ref(), &self.config);
        let resolved = resolver.resolve().await?;
        Ok(merge_timeline(&resolved, &self.config, Utc::now()))
    }

    /// Builds a snapshot and writes it to `path`, returning the document.
    ///
    /// The write is atomic, so a crash or a fatal fetch error never leaves a
    /// truncated snapshot where a previous good one stood.
    ///
    /// # Errors
    ///
    /// Returns [`WindBlendError::NoModelData`] when nothing resolved, or the
    /// snapshot I/O variants when persisting fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::path::Path;
    /// # use windblend::{SiteConfig, WindBlend, WindBlendError};
    /// # async fn run() -> Result<(), WindBlendError> {
    /// let blender = WindBlend::new(SiteConfig::default())?;
    /// let snapshot = blender.write_latest(Path::new("data/latest.json")).await?;
    /// println!("wrote {} hours", snapshot.hours.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn write_latest(&self, path: &Path) -> Result<Snapshot, WindBlendError> {
        let snapshot = self.build_snapshot().await?;
        snapshot.write_json(path)?;
        info!(
            "wrote {} hour records from {} models to {}",
            snapshot.hours.len(),
            snapshot.meta.models.len(),
            path.display()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::open_meteo::error::FetchError;
    use crate::types::model::WeatherModel;
    use crate::types::series::HourlySeries;
    use async_trait::async_trait;

    /// Answers only the plain `gfs` alias; every other alias is empty.
    struct OnlyGfs;

    #[async_trait]
    impl ForecastProvider for OnlyGfs {
        async fn fetch_hourly(&self, alias: &str) -> Result<HourlySeries, FetchError> {
            if alias != "gfs" {
                return Ok(HourlySeries::default());
            }
            Ok(HourlySeries {
                time: vec!["2025-08-23T06:00".to_string(), "2025-08-23T07:00".to_string()],
                wind: vec![Some(12.34), Some(14.0)],
                gust: vec![Some(18.0), Some(21.5)],
                direction: vec![Some(231.4), Some(240.0)],
            })
        }
    }

    struct NothingEver;

    #[async_trait]
    impl ForecastProvider for NothingEver {
        async fn fetch_hourly(&self, _alias: &str) -> Result<HourlySeries, FetchError> {
            Ok(HourlySeries::default())
        }
    }

    #[tokio::test]
    async fn build_snapshot_merges_whatever_resolved() -> Result<(), WindBlendError> {
        let blender = WindBlend::with_provider(SiteConfig::default(), OnlyGfs);

        let snapshot = blender.build_snapshot().await?;

        assert_eq!(snapshot.meta.models, vec![WeatherModel::Gfs]);
        assert_eq!(snapshot.meta.aliases[&WeatherModel::Gfs], "gfs");
        assert_eq!(snapshot.hours.len(), 2);
        assert_eq!(snapshot.hours[0].time, "2025-08-23T06:00Z");
        let sample = snapshot.hours[0].models[&WeatherModel::Gfs];
        assert!((sample.wind - 12.3).abs() < 1e-9);
        assert_eq!(sample.direction, 231);
        // generated_at is stamped at merge time in the fixed UTC format
        assert_eq!(snapshot.meta.generated_at.len(), 20);
        assert!(snapshot.meta.generated_at.ends_with('Z'));

        Ok(())
    }

    #[tokio::test]
    async fn write_latest_persists_what_it_returns() -> Result<(), WindBlendError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("latest.json");
        let blender = WindBlend::with_provider(SiteConfig::default(), OnlyGfs);

        let written = blender.write_latest(&path).await?;
        let on_disk = Snapshot::read_json(&path)?;

        assert_eq!(on_disk, written);
        Ok(())
    }

    #[tokio::test]
    async fn a_run_with_zero_models_is_an_error() {
        let blender = WindBlend::with_provider(SiteConfig::default(), NothingEver);

        let err = blender.build_snapshot().await.unwrap_err();

        assert!(matches!(err, WindBlendError::NoModelData { .. }));
    }

    #[tokio::test]
    async fn failed_runs_leave_no_snapshot_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.json");
        let blender = WindBlend::with_provider(SiteConfig::default(), NothingEver);

        assert!(blender.write_latest(&path).await.is_err());
        assert!(!path.exists());
    }
}
