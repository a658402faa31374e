//! Mathematical utilities: least squares and regression scores.

pub mod metrics;
pub mod ols;

pub use metrics::*;
pub use ols::*;
