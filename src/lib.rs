mod blend;
mod config;
mod error;
mod merge;
mod open_meteo;
mod resolver;
mod types;
mod windblend;

pub use error::WindBlendError;
pub use windblend::WindBlend;

pub use blend::*;
pub use config::*;
pub use merge::merge_timeline;
pub use resolver::*;

pub use types::model::WeatherModel;
pub use types::series::HourlySeries;
pub use types::snapshot::{HourRecord, Snapshot, SnapshotMeta, WindSample};

pub use open_meteo::client::{ForecastProvider, OpenMeteoClient};
pub use open_meteo::error::FetchError;
