//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - request configuration (`StationConfig`, `Units`, `Datum`, `Product`)
//! - the query unit (`DateWindow`)
//! - the row-aligned numeric table (`Dataset`)

pub mod types;

pub use types::*;
