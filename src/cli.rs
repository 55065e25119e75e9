use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use windblend::WindUnit;

#[derive(Debug, Parser)]
#[command(name = "windblend", version, about = "Blend multi-model wind forecasts into one snapshot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every configured model and write a fresh snapshot
    Fetch(FetchArgs),
    /// Print the blended outlook from an existing snapshot
    Outlook(OutlookArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Where to write the snapshot
    #[arg(long, default_value = "data/latest.json")]
    pub output: PathBuf,

    /// Location label stored in the snapshot metadata
    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub latitude: Option<f64>,

    #[arg(long)]
    pub longitude: Option<f64>,

    /// Forecast horizon in days
    #[arg(long)]
    pub forecast_days: Option<u8>,

    /// Wind speed unit: kn, kmh, ms or mph
    #[arg(long)]
    pub unit: Option<WindUnit>,

    /// Base URL of the forecast API
    #[arg(long, env = "WINDBLEND_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct OutlookArgs {
    /// Snapshot to read
    #[arg(long, default_value = "data/latest.json")]
    pub input: PathBuf,

    /// How many upcoming hours to show
    #[arg(long, default_value_t = 8)]
    pub hours: usize,
}
