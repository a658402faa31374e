//! Command-line parsing for the CO-OPS collector and regression fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! acquisition and modeling code. Station settings can also come from the
//! environment (or a `.env` file).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Datum, StationConfig, Units};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tidefit", version, about = "NOAA CO-OPS data collector and linear regression")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect wind, temperature, pressure and water level data from a start date to today.
    Collect(CollectArgs),
    /// Fit a linear model on a training artifact and print its R² on an evaluation artifact.
    Fit(FitArgs),
    /// Write a dataset artifact out as CSV.
    Export(ExportArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CollectArgs {
    /// First day to collect, as YYYYMMDD. Also names the output artifact.
    #[arg(value_name = "START_DATE")]
    pub start_date: String,

    /// Directory the `<START_DATE>.pkl` artifact is written to.
    #[arg(long, default_value = ".", env = "TIDEFIT_OUT_DIR")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub station: StationArgs,
}

/// Station and request settings.
#[derive(Debug, Args, Clone)]
pub struct StationArgs {
    /// CO-OPS station id.
    #[arg(long = "station", default_value = StationConfig::DEFAULT_STATION, env = "TIDEFIT_STATION")]
    pub station_id: String,

    /// Data getter endpoint.
    #[arg(long, default_value = StationConfig::DEFAULT_BASE_URL, env = "TIDEFIT_BASE_URL")]
    pub base_url: String,

    /// Unit system for reported values.
    #[arg(long, value_enum, default_value_t = Units::Metric, env = "TIDEFIT_UNITS")]
    pub units: Units,

    /// Vertical datum for water levels.
    #[arg(long, value_enum, default_value_t = Datum::Msl, env = "TIDEFIT_DATUM")]
    pub datum: Datum,

    /// Application tag sent with each request.
    #[arg(long, default_value = StationConfig::DEFAULT_APPLICATION, env = "TIDEFIT_APPLICATION")]
    pub application: String,
}

impl From<StationArgs> for StationConfig {
    fn from(args: StationArgs) -> Self {
        StationConfig {
            base_url: args.base_url,
            station_id: args.station_id,
            units: args.units,
            datum: args.datum,
            application: args.application,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Training artifact; its last column is the target.
    #[arg(value_name = "TRAIN")]
    pub train: PathBuf,

    /// Evaluation artifact scored with R².
    #[arg(long = "eval", value_name = "PATH", default_value = "20120101.pkl", env = "TIDEFIT_EVAL")]
    pub eval: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Artifact to export.
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Destination CSV file.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,
}
