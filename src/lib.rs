//! `tidefit` library crate.
//!
//! The binary (`tidefit`) is a thin wrapper around this library so that:
//!
//! - the acquisition pipeline is testable without network access
//! - the collector and the regression fitter share one dataset format

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
