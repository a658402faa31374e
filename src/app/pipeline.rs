//! The three workflows behind the CLI subcommands.
//!
//! - collect: walk date windows -> sanitize -> write artifact
//! - fit: read train + eval artifacts -> OLS -> R²
//! - export: read artifact -> CSV

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};

use crate::cli::{CollectArgs, ExportArgs, FitArgs};
use crate::data::{CoopsClient, collect};
use crate::domain::{DATE_FORMAT, StationConfig};
use crate::error::AppError;
use crate::io::{artifact_path, read_dataset, write_dataset, write_dataset_csv};
use crate::models::LinearModel;

/// Collect from the requested start date through today (UTC) and write the artifact.
///
/// Nothing is written unless the whole walk succeeds.
pub fn run_collect(args: &CollectArgs) -> Result<PathBuf, AppError> {
    let start = parse_start_date(&args.start_date)?;
    let today = Utc::now().date_naive();
    let station = StationConfig::from(args.station.clone());
    tracing::debug!(?station, %start, %today, "starting collection");

    let client = CoopsClient::new();
    let data = collect(&client, &station, start, today)?;

    tracing::info!("All done! Saving {} rows...", data.nrows());
    let path = artifact_path(&args.out_dir, &args.start_date);
    write_dataset(&path, &data)?;
    Ok(path)
}

/// Fit on the training artifact and return R² on the evaluation artifact.
pub fn run_fit(args: &FitArgs) -> Result<f64, AppError> {
    let train = read_dataset(&args.train)?;
    let eval = read_dataset(&args.eval)?;
    tracing::debug!(
        train_rows = train.nrows(),
        eval_rows = eval.nrows(),
        columns = train.ncols(),
        "loaded datasets"
    );

    let model = LinearModel::fit(&train)?;
    tracing::debug!(intercept = model.intercept, coefficients = ?model.coefficients, "fitted model");

    Ok(model.score(&eval)?)
}

/// Export an artifact to CSV; returns the number of rows written.
pub fn run_export(args: &ExportArgs) -> Result<usize, AppError> {
    let data = read_dataset(&args.artifact)?;
    write_dataset_csv(&args.out, &data)?;
    Ok(data.nrows())
}

fn parse_start_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AppError::new(2, format!("Invalid start date '{raw}' (expected YYYYMMDD): {e}")))
}
