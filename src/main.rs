use chrono::Utc;
use clap::Parser;
use std::process::ExitCode;
use windblend::{blend_hour, compass_point, next_hour_index, SiteConfig, Snapshot, WindBlend};

mod cli;
use cli::{Cli, Command, FetchArgs, OutlookArgs};

type CliError = Box<dyn std::error::Error>;

/// Log filter from `RUST_LOG` when set, defaulting to `warn` so per-alias
/// fetch failures are reported on a plain run.
fn logging_env() -> env_logger::Env<'static> {
    env_logger::Env::default().default_filter_or("warn")
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(logging_env()).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Fetch(args) => run_fetch(args).await,
        Command::Outlook(args) => run_outlook(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(err.as_ref());
            ExitCode::FAILURE
        }
    }
}

async fn run_fetch(args: FetchArgs) -> Result<(), CliError> {
    let mut config = SiteConfig::default();
    if let Some(location) = args.location {
        config.location = location;
    }
    if let Some(latitude) = args.latitude {
        config.latitude = latitude;
    }
    if let Some(longitude) = args.longitude {
        config.longitude = longitude;
    }
    if let Some(days) = args.forecast_days {
        config.forecast_days = days;
    }
    if let Some(unit) = args.unit {
        config.unit = unit;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let blender = WindBlend::new(config)?;
    let snapshot = blender.write_latest(&args.output).await?;

    let names: Vec<&str> = snapshot.meta.models.iter().map(|m| m.as_str()).collect();
    println!("OK models: {}", names.join(", "));
    for (model, alias) in &snapshot.meta.aliases {
        println!("  {model} via {alias}");
    }
    Ok(())
}

fn run_outlook(args: OutlookArgs) -> Result<(), CliError> {
    let snapshot = Snapshot::read_json(&args.input)?;
    let meta = &snapshot.meta;
    let names: Vec<&str> = meta.models.iter().map(|m| m.as_str()).collect();
    println!(
        "{} ({}, {})  models: {}  generated {}",
        meta.location,
        meta.lat,
        meta.lon,
        names.join(", "),
        meta.generated_at
    );
    println!();
    println!(
        "{:<18} {:>6} {:>6} {:>11} {:>4}  models",
        "time", "wind", "gust", "dir", "rel"
    );

    let start = next_hour_index(&snapshot.hours, Utc::now());
    for record in snapshot.hours.iter().skip(start).take(args.hours) {
        match blend_hour(record) {
            Some(blend) => {
                let dir = format!("{} ({:.0}°)", compass_point(blend.direction), blend.direction);
                let contributors: Vec<&str> = record.models.keys().map(|m| m.as_str()).collect();
                println!(
                    "{:<18} {:>6.1} {:>6.1} {:>11} {:>3}%  {}",
                    record.time,
                    blend.wind,
                    blend.gust,
                    dir,
                    blend.reliability,
                    contributors.join("+")
                );
            }
            None => println!(
                "{:<18} {:>6} {:>6} {:>11} {:>4}",
                record.time, "-", "-", "-", "-"
            ),
        }
    }
    Ok(())
}

fn report(err: &dyn std::error::Error) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
