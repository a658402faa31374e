//! Multi-product assembly for a single date window.
//!
//! The wind product defines the rows of the window. Every scalar product is
//! aligned to the six-minute grid on its own timestamps and then joined onto the
//! wind rows by timestamp, after checking that it kept exactly as many samples as
//! the wind product did.

use std::collections::HashMap;
use std::fmt;

use crate::data::align::{alignment_mask, kept_indices};
use crate::data::coops::{FetchOutcome, ProductRequest, ProductSource, ProductTable, fetch};
use crate::data::error::AcquireError;
use crate::domain::{Dataset, DateWindow, Product, StationConfig, WIND_COLUMNS};

/// Why a window contributed no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The service had no data for this product.
    NoData(Product),
    /// A product kept a different number of aligned samples than the wind product.
    ShapeMismatch {
        product: Product,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoData(product) => write!(f, "no {product} data"),
            SkipReason::ShapeMismatch {
                product,
                expected,
                found,
            } => write!(
                f,
                "{product} has {found} aligned rows, wind has {expected}"
            ),
        }
    }
}

/// Outcome of assembling one window.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembled {
    Complete(Dataset),
    Skipped(SkipReason),
}

/// Fetch wind plus every scalar product for `window` and join them into one table.
///
/// Columns: speed, direction, cardinal code, gust, then one column per entry of
/// `Product::SCALARS`. The result is all or nothing; a window is never returned
/// with only some of its products.
pub fn assemble<S: ProductSource + ?Sized>(
    source: &S,
    station: &StationConfig,
    window: DateWindow,
) -> Result<Assembled, AcquireError> {
    let wind = match fetch(source, &ProductRequest::new(station, window, Product::Wind))? {
        FetchOutcome::Table(table) => table,
        FetchOutcome::NoData => return Ok(Assembled::Skipped(SkipReason::NoData(Product::Wind))),
    };

    let kept = kept_indices(&alignment_mask(&wind.timestamps));
    let keys: Vec<i64> = kept.iter().map(|&i| wind.timestamps[i]).collect();

    let mut columns: Vec<Vec<f64>> = (0..WIND_COLUMNS)
        .map(|field| kept.iter().map(|&i| wind.value(i, field)).collect())
        .collect();

    for product in Product::SCALARS {
        let table = match fetch(source, &ProductRequest::new(station, window, product))? {
            FetchOutcome::Table(table) => table,
            FetchOutcome::NoData => return Ok(Assembled::Skipped(SkipReason::NoData(product))),
        };

        match join_on_timestamp(&keys, &table) {
            Ok(column) => columns.push(column),
            Err(found) => {
                return Ok(Assembled::Skipped(SkipReason::ShapeMismatch {
                    product,
                    expected: keys.len(),
                    found,
                }));
            }
        }
    }

    Ok(Assembled::Complete(Dataset::from_columns(&columns)))
}

/// Align `table` on its own timestamps and look up its value column for each key.
///
/// Returns the aligned row count as the error when it differs from `keys.len()`.
/// Keys the product does not report become NaN.
fn join_on_timestamp(keys: &[i64], table: &ProductTable) -> Result<Vec<f64>, usize> {
    let kept = kept_indices(&alignment_mask(&table.timestamps));
    if kept.len() != keys.len() {
        return Err(kept.len());
    }

    let mut by_ts: HashMap<i64, f64> = HashMap::with_capacity(kept.len());
    for &i in &kept {
        by_ts.entry(table.timestamps[i]).or_insert(table.value(i, 0));
    }

    let column: Vec<f64> = keys
        .iter()
        .map(|ts| by_ts.get(ts).copied().unwrap_or(f64::NAN))
        .collect();

    let unmatched = keys.iter().filter(|ts| !by_ts.contains_key(ts)).count();
    if unmatched > 0 {
        tracing::debug!(unmatched, "product timestamps do not match wind rows");
    }

    Ok(column)
}
