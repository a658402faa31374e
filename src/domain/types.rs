//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built up window by window during acquisition
//! - serialized to a binary artifact or exported to CSV
//! - reloaded later for regression

use std::fmt;

use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Wire format for begin/end dates and for the artifact file stem.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Longest span (in days past `begin`) the remote service is asked for at once.
pub const MAX_WINDOW_DAYS: i64 = 30;

/// Column names of an assembled dataset, in their fixed order.
pub const COLUMN_NAMES: [&str; 8] = [
    "wind_speed",
    "wind_direction",
    "wind_cardinal",
    "wind_gust",
    "air_temperature",
    "water_temperature",
    "air_pressure",
    "water_level",
];

/// Number of wind fields kept per row.
pub const WIND_COLUMNS: usize = 4;

/// Number of columns in an assembled dataset.
pub const COLUMN_COUNT: usize = COLUMN_NAMES.len();

/// A CO-OPS data product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Wind,
    AirTemperature,
    WaterTemperature,
    AirPressure,
    WaterLevel,
}

impl Product {
    /// Scalar products appended after the wind columns, in column order.
    pub const SCALARS: [Product; 4] = [
        Product::AirTemperature,
        Product::WaterTemperature,
        Product::AirPressure,
        Product::WaterLevel,
    ];

    /// Name used for the `product` query parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            Product::Wind => "wind",
            Product::AirTemperature => "air_temperature",
            Product::WaterTemperature => "water_temperature",
            Product::AirPressure => "air_pressure",
            Product::WaterLevel => "water_level",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Physical unit system requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    English,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::English => "english",
        }
    }
}

/// Vertical datum that water levels are referenced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Datum {
    #[value(name = "MHHW")]
    Mhhw,
    #[value(name = "MHW")]
    Mhw,
    #[value(name = "MTL")]
    Mtl,
    /// Mean sea level.
    #[value(name = "MSL")]
    Msl,
    #[value(name = "MLW")]
    Mlw,
    #[value(name = "MLLW")]
    Mllw,
}

impl Datum {
    pub fn as_str(self) -> &'static str {
        match self {
            Datum::Mhhw => "MHHW",
            Datum::Mhw => "MHW",
            Datum::Mtl => "MTL",
            Datum::Msl => "MSL",
            Datum::Mlw => "MLW",
            Datum::Mllw => "MLLW",
        }
    }
}

/// Station and request settings shared by every fetch of a run.
///
/// This is never mutated after construction; each fetch derives its own
/// `ProductRequest` from it.
#[derive(Debug, Clone, PartialEq)]
pub struct StationConfig {
    pub base_url: String,
    pub station_id: String,
    pub units: Units,
    pub datum: Datum,
    pub application: String,
}

impl StationConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://tidesandcurrents.noaa.gov/api/datagetter";
    /// Providence, RI.
    pub const DEFAULT_STATION: &'static str = "8454000";
    pub const DEFAULT_APPLICATION: &'static str = "ports_screen";
    /// Timestamps are always requested in GMT; the epoch normalizer relies on it.
    pub const TIME_ZONE: &'static str = "gmt";
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            station_id: Self::DEFAULT_STATION.to_string(),
            units: Units::Metric,
            datum: Datum::Msl,
            application: Self::DEFAULT_APPLICATION.to_string(),
        }
    }
}

/// Inclusive calendar-date range used as the unit of remote query granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Returns `None` when `end < begin` or the span exceeds `MAX_WINDOW_DAYS`.
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Option<Self> {
        let span = (end - begin).num_days();
        if span < 0 || span > MAX_WINDOW_DAYS {
            return None;
        }
        Some(Self { begin, end })
    }

    /// Span in days between `begin` and `end`.
    pub fn span_days(&self) -> i64 {
        (self.end - self.begin).num_days()
    }

    /// First day after this window.
    pub fn next_begin(&self) -> NaiveDate {
        self.end + Duration::days(1)
    }

    pub fn begin_param(&self) -> String {
        self.begin.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.begin.format("%m/%d/%Y"),
            self.end.format("%m/%d/%Y")
        )
    }
}

/// Attempted to add a row or block whose width differs from the dataset's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} columns, found {found}")]
pub struct WidthMismatch {
    pub expected: usize,
    pub found: usize,
}

/// Dense row-major numeric table.
///
/// Missing values are stored as NaN.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    ncols: usize,
    values: Vec<f64>,
}

impl Dataset {
    pub fn empty(ncols: usize) -> Self {
        Self {
            ncols,
            values: Vec::new(),
        }
    }

    /// Build from a flat row-major buffer.
    ///
    /// Returns `None` when `ncols` is zero or the buffer is not a whole number of rows.
    pub fn from_row_major(ncols: usize, values: Vec<f64>) -> Option<Self> {
        if ncols == 0 || values.len() % ncols != 0 {
            return None;
        }
        Some(Self { ncols, values })
    }

    /// Stack equally long columns side by side.
    ///
    /// # Panics
    /// Panics if the columns differ in length.
    pub fn from_columns(columns: &[Vec<f64>]) -> Self {
        let nrows = columns.first().map_or(0, Vec::len);
        assert!(
            columns.iter().all(|c| c.len() == nrows),
            "columns must have equal length"
        );
        let mut values = Vec::with_capacity(nrows * columns.len());
        for r in 0..nrows {
            values.extend(columns.iter().map(|c| c[r]));
        }
        Self {
            ncols: columns.len(),
            values,
        }
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nrows(&self) -> usize {
        if self.ncols == 0 {
            0
        } else {
            self.values.len() / self.ncols
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn row(&self, idx: usize) -> &[f64] {
        &self.values[idx * self.ncols..(idx + 1) * self.ncols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.ncols.max(1))
    }

    pub fn push_row(&mut self, row: &[f64]) -> Result<(), WidthMismatch> {
        if row.len() != self.ncols {
            return Err(WidthMismatch {
                expected: self.ncols,
                found: row.len(),
            });
        }
        self.values.extend_from_slice(row);
        Ok(())
    }

    /// Append all rows of `other` below this dataset.
    pub fn append(&mut self, other: &Dataset) -> Result<(), WidthMismatch> {
        if other.ncols != self.ncols {
            return Err(WidthMismatch {
                expected: self.ncols,
                found: other.ncols,
            });
        }
        self.values.extend_from_slice(&other.values);
        Ok(())
    }

    /// Copy of this dataset with only the rows for which `keep` returns `true`.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[f64]) -> bool) -> Dataset {
        let values = self
            .rows()
            .filter(|row| keep(*row))
            .flatten()
            .copied()
            .collect();
        Dataset {
            ncols: self.ncols,
            values,
        }
    }

    /// Split into a design matrix (all but the last column) and a target vector
    /// (the last column).
    ///
    /// Returns `None` when the dataset has fewer than two columns.
    pub fn split_target(&self) -> Option<(DMatrix<f64>, DVector<f64>)> {
        if self.ncols < 2 {
            return None;
        }
        let n_features = self.ncols - 1;
        let x = DMatrix::from_row_iterator(
            self.nrows(),
            n_features,
            self.rows().flat_map(|row| row[..n_features].iter().copied()),
        );
        let y = DVector::from_iterator(self.nrows(), self.rows().map(|row| row[n_features]));
        Some((x, y))
    }
}

impl PartialEq for Dataset {
    /// NaN cells compare equal to each other so that sanitized and unsanitized
    /// datasets can be compared in tests.
    fn eq(&self, other: &Self) -> bool {
        self.ncols == other.ncols
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}
