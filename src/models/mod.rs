//! Regression models fitted on assembled datasets.

pub mod linear;

pub use linear::*;
