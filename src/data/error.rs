use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Product;

/// Fatal failures during acquisition.
///
/// Benign outcomes (the service has no data, a window's products do not line
/// up) are not errors; they surface as `FetchOutcome::NoData` and
/// `Assembled::Skipped` instead.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("CO-OPS request for {product} failed: {source}")]
    Http {
        product: Product,
        #[source]
        source: reqwest::Error,
    },

    #[error("CO-OPS request for {product} failed with status {status}")]
    Status {
        product: Product,
        status: reqwest::StatusCode,
    },

    #[error("malformed {product} CSV: {source}")]
    Csv {
        product: Product,
        #[source]
        source: csv::Error,
    },

    #[error("invalid timestamp '{raw}' in {product} response: {source}")]
    Timestamp {
        product: Product,
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("start date {start} is after today ({today})")]
    StartInFuture { start: NaiveDate, today: NaiveDate },
}
