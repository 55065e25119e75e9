//! Resolves each canonical model to forecast data by walking its alias list.
//!
//! Providers publish the same physical model under several names with
//! different coverage, and any of them can be missing, lagging or broken at a
//! given moment. The resolver tries each alias in order and keeps the first
//! one that returns a non-empty series, so one flaky dataset degrades the
//! snapshot instead of sinking it.

use crate::config::SiteConfig;
use crate::error::WindBlendError;
use crate::open_meteo::client::ForecastProvider;
use crate::open_meteo::error::FetchError;
use crate::types::model::WeatherModel;
use crate::types::series::HourlySeries;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// One alias fetch that did not produce data.
#[derive(Debug)]
pub struct AliasFailure {
    pub model: WeatherModel,
    pub alias: String,
    pub error: FetchError,
}

/// Outcome of resolving every configured model.
///
/// `series` and `aliases` are keyed by canonical model and therefore iterate
/// in canonical order. `failures` records the aliases that errored along the
/// way, including those of models that later succeeded through a fallback.
#[derive(Debug, Default)]
pub struct ResolvedModels {
    pub series: BTreeMap<WeatherModel, HourlySeries>,
    pub aliases: BTreeMap<WeatherModel, String>,
    pub failures: Vec<AliasFailure>,
}

impl ResolvedModels {
    /// The models that produced data, in canonical order.
    pub fn models(&self) -> Vec<WeatherModel> {
        self.series.keys().copied().collect()
    }
}

/// Walks the configured alias lists against a [`ForecastProvider`].
pub struct SourceResolver<'a> {
    provider: &'a dyn ForecastProvider,
    aliases: &'a BTreeMap<WeatherModel, Vec<String>>,
}

impl<'a> SourceResolver<'a> {
    pub fn new(provider: &'a dyn ForecastProvider, config: &'a SiteConfig) -> Self {
        Self {
            provider,
            aliases: &config.aliases,
        }
    }

    /// Fetches every model sequentially, falling back through aliases.
    ///
    /// A model whose aliases all fail is dropped with warnings; the run only
    /// errors when no model at all produced data, since a snapshot with zero
    /// models would be useless downstream.
    pub async fn resolve(&self) -> Result<ResolvedModels, WindBlendError> {
        let mut resolved = ResolvedModels::default();
        let mut attempts = 0usize;

        for (model, aliases) in self.aliases {
            for alias in aliases {
                attempts += 1;
                match self.provider.fetch_hourly(alias).await {
                    Ok(series) if !series.time.is_empty() => {
                        info!("{model} resolved via alias {alias} ({} hours)", series.time.len());
                        resolved.aliases.insert(*model, alias.clone());
                        resolved.series.insert(*model, series);
                        break;
                    }
                    Ok(_) => {
                        debug!("{model}/{alias} returned no timestamps");
                    }
                    Err(error) => {
                        warn!("{model}/{alias} failed: {error}");
                        resolved.failures.push(AliasFailure {
                            model: *model,
                            alias: alias.clone(),
                            error,
                        });
                    }
                }
            }
        }

        if resolved.series.is_empty() {
            return Err(WindBlendError::NoModelData { attempts });
        }
        Ok(resolved)
    }
}
