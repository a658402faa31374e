//! In-memory CO-OPS responses for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};

use crate::data::coops::{NO_DATA_SENTINEL, ProductRequest, ProductSource};
use crate::data::error::AcquireError;
use crate::domain::{DateWindow, Product};

/// Answers queries from a table keyed by product and window start.
///
/// Unknown queries get the no-data sentinel.
#[derive(Default)]
pub struct CannedSource {
    bodies: HashMap<(Product, NaiveDate), String>,
    pub calls: RefCell<Vec<(Product, DateWindow)>>,
}

impl CannedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, product: Product, begin: NaiveDate, body: String) -> Self {
        self.bodies.insert((product, begin), body);
        self
    }

    /// Register consistent responses for every product of a window.
    pub fn with_full_window(mut self, begin: NaiveDate, epochs: &[i64]) -> Self {
        self.bodies.insert((Product::Wind, begin), wind_csv(epochs));
        for product in Product::SCALARS {
            self.bodies
                .insert((product, begin), scalar_csv(product, epochs));
        }
        self
    }
}

impl ProductSource for CannedSource {
    fn fetch_body(&self, request: &ProductRequest<'_>) -> Result<String, AcquireError> {
        self.calls
            .borrow_mut()
            .push((request.product, request.window));
        Ok(self
            .bodies
            .get(&(request.product, request.window.begin))
            .cloned()
            .unwrap_or_else(|| format!("{NO_DATA_SENTINEL}. No data for this request.")))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Epoch seconds of midnight UTC on `day`.
pub fn midnight(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp()
}

fn stamp(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .unwrap()
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn wind_csv(epochs: &[i64]) -> String {
    let mut out = String::from("Date Time, Speed, Direction, Direction, Gust, X, R\n");
    for (i, ts) in epochs.iter().enumerate() {
        let i = i as f64;
        out.push_str(&format!(
            "{},{:.2},{:.2},NE,{:.2},0,0\n",
            stamp(*ts),
            3.0 + i,
            45.0,
            5.0 + i
        ));
    }
    out
}

/// Value written for `product` at sample index `i`.
pub fn scalar_value(product: Product, i: usize) -> f64 {
    let base = match product {
        Product::Wind => 0.0,
        Product::AirTemperature => 10.0,
        Product::WaterTemperature => 8.0,
        Product::AirPressure => 1000.0,
        Product::WaterLevel => 0.5,
    };
    base + i as f64 * 0.25
}

pub fn scalar_csv(product: Product, epochs: &[i64]) -> String {
    let mut out = String::from("Date Time, Value, X, N, R\n");
    for (i, ts) in epochs.iter().enumerate() {
        out.push_str(&format!(
            "{},{},0,0,0\n",
            stamp(*ts),
            scalar_value(product, i)
        ));
    }
    out
}
