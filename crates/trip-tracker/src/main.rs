//! `trip-tracker` binary: load a tracking table, clean it and print its metrics.
//!
//! # Usage
//!
//! ```bash
//! trip-tracker --config config/trip.toml
//! trip-tracker --config config/trip.toml --source session_02 --pretty
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use trip_tracker::config::TrackerConfig;
use trip_tracker::pipeline::run_with_config;

/// Command-line arguments for the tracker binary.
#[derive(Parser, Debug)]
#[command(
    name = "trip-tracker",
    version,
    about = "Locomotion metrics from single-subject pose tracking",
    long_about = None
)]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Override the table name from the config.
    #[arg(long, value_name = "NAME")]
    source: Option<String>,

    /// Override the data directory from the config.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write the JSON report to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report.
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level_filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Loading configuration from {}", args.config.display());
    let mut config = match TrackerConfig::from_file(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Some(source) = args.source {
        config.data.source = source;
    }
    if let Some(dir) = args.data_dir {
        config.data.root = dir;
    }

    info!("  source       : {}", config.data.source);
    info!("  keypoints    : {}", config.schema.keypoints.join(", "));
    info!("  frame rate   : {}", config.schema.frame_rate);
    info!("  threshold    : {}", config.schema.confidence_threshold);

    let output = match run_with_config(&config) {
        Ok(output) => output,
        Err(e) => {
            error!("Pipeline failed: {e}");
            std::process::exit(1);
        }
    };

    let json = if args.pretty {
        output.report.to_json_pretty()
    } else {
        output.report.to_json()
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, json) {
                error!("Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }
}
