//! Input/output helpers.
//!
//! - binary dataset artifacts (`artifact`)
//! - CSV exports (`export`)

pub mod artifact;
pub mod export;

pub use artifact::*;
pub use export::*;
