//! NOAA CO-OPS "datagetter" API integration.
//!
//! One call fetches one product for one date window as CSV. The transport sits
//! behind [`ProductSource`] so parsing and everything above it can run against
//! canned responses.

use reqwest::blocking::Client;

use crate::data::direction;
use crate::data::epoch::{self, TIMESTAMP_FORMAT};
use crate::data::error::AcquireError;
use crate::domain::{DateWindow, Product, StationConfig};

/// Phrase the service puts in the body when a station has nothing for the request.
pub const NO_DATA_SENTINEL: &str = "Error: No data was found";

/// Fully specified description of a single product query.
#[derive(Debug, Clone, Copy)]
pub struct ProductRequest<'a> {
    pub station: &'a StationConfig,
    pub window: DateWindow,
    pub product: Product,
}

impl<'a> ProductRequest<'a> {
    pub fn new(station: &'a StationConfig, window: DateWindow, product: Product) -> Self {
        Self {
            station,
            window,
            product,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("station", self.station.station_id.clone()),
            ("units", self.station.units.as_str().to_string()),
            ("time_zone", StationConfig::TIME_ZONE.to_string()),
            ("application", self.station.application.clone()),
            ("format", "csv".to_string()),
            ("datum", self.station.datum.as_str().to_string()),
            ("begin_date", self.window.begin_param()),
            ("end_date", self.window.end_param()),
            ("product", self.product.api_name().to_string()),
        ]
    }
}

/// Something that can answer a product query with a raw response body.
pub trait ProductSource {
    fn fetch_body(&self, request: &ProductRequest<'_>) -> Result<String, AcquireError>;
}

/// Blocking HTTP client for the CO-OPS service.
pub struct CoopsClient {
    client: Client,
}

impl CoopsClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for CoopsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductSource for CoopsClient {
    fn fetch_body(&self, request: &ProductRequest<'_>) -> Result<String, AcquireError> {
        let product = request.product;
        tracing::debug!(%product, window = %request.window, "requesting product");

        let resp = self
            .client
            .get(&request.station.base_url)
            .query(&request.query_pairs())
            .send()
            .map_err(|source| AcquireError::Http { product, source })?;

        if !resp.status().is_success() {
            return Err(AcquireError::Status {
                product,
                status: resp.status(),
            });
        }

        resp.text()
            .map_err(|source| AcquireError::Http { product, source })
    }
}

/// How a non-timestamp CSV column is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDecoder {
    /// Floating point; empty or unparseable cells become NaN.
    Float,
    /// Compass abbreviation, via the direction codec.
    Compass,
}

impl ColumnDecoder {
    /// Decoder for field `idx` (0 = first column after the timestamp).
    pub fn for_field(product: Product, idx: usize) -> Self {
        match (product, idx) {
            // Date Time, Speed, Direction, Direction, Gust, X, R
            (Product::Wind, 2) => ColumnDecoder::Compass,
            _ => ColumnDecoder::Float,
        }
    }

    fn decode(self, cell: &str) -> f64 {
        match self {
            ColumnDecoder::Float => cell.trim().parse::<f64>().unwrap_or(f64::NAN),
            ColumnDecoder::Compass => f64::from(direction::encode(cell)),
        }
    }
}

/// Parsed product response: one epoch timestamp per row plus the row's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTable {
    pub timestamps: Vec<i64>,
    width: usize,
    fields: Vec<f64>,
}

impl ProductTable {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of fields per row, excluding the timestamp.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, idx: usize) -> &[f64] {
        &self.fields[idx * self.width..(idx + 1) * self.width]
    }

    /// Value of field `field` in row `row`, NaN when the column does not exist.
    pub fn value(&self, row: usize, field: usize) -> f64 {
        if field < self.width {
            self.fields[row * self.width + field]
        } else {
            f64::NAN
        }
    }
}

/// Result of a single product fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Table(ProductTable),
    /// The station has no data for this request.
    NoData,
}

/// Fetch and parse one product for one window.
pub fn fetch<S: ProductSource + ?Sized>(
    source: &S,
    request: &ProductRequest<'_>,
) -> Result<FetchOutcome, AcquireError> {
    let body = source.fetch_body(request)?;
    parse_product_csv(request.product, &body)
}

/// Parse a CO-OPS CSV body.
///
/// The first column must be a `YYYY-mm-dd HH:MM` timestamp; any other column is
/// decoded according to [`ColumnDecoder::for_field`].
pub fn parse_product_csv(product: Product, body: &str) -> Result<FetchOutcome, AcquireError> {
    if body.contains(NO_DATA_SENTINEL) {
        return Ok(FetchOutcome::NoData);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let header_len = reader
        .headers()
        .map_err(|source| AcquireError::Csv { product, source })?
        .len();
    let width = header_len.saturating_sub(1);

    let mut timestamps = Vec::new();
    let mut fields = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|source| AcquireError::Csv { product, source })?;

        let raw = record.get(0).unwrap_or_default();
        let ts = epoch::normalize(raw, TIMESTAMP_FORMAT).map_err(|source| {
            AcquireError::Timestamp {
                product,
                raw: raw.to_string(),
                source,
            }
        })?;
        timestamps.push(ts);

        for (idx, cell) in record.iter().skip(1).enumerate() {
            fields.push(ColumnDecoder::for_field(product, idx).decode(cell));
        }
    }

    Ok(FetchOutcome::Table(ProductTable {
        timestamps,
        width,
        fields,
    }))
}
