//! Data acquisition from the NOAA CO-OPS service.
//!
//! Pipeline, leaf-first:
//! - `direction` / `epoch`: cell decoders
//! - `coops`: one product, one window, one request
//! - `align`: six-minute grid mask
//! - `assemble`: wind + scalar products joined for a window
//! - `walk`: windows from a start date to today, stacked and sanitized

pub mod align;
pub mod assemble;
pub mod coops;
pub mod direction;
pub mod epoch;
pub mod error;
pub mod sanitize;
pub mod walk;

#[cfg(test)]
pub(crate) mod testing;

pub use assemble::{Assembled, SkipReason, assemble};
pub use coops::{CoopsClient, FetchOutcome, ProductRequest, ProductSource, ProductTable};
pub use error::AcquireError;
pub use sanitize::sanitize;
pub use walk::{collect, plan_windows};
