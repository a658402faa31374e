//! Ordinary least squares with an intercept.
//!
//! The last column of a dataset is the target; every preceding column is a
//! feature.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::domain::Dataset;
use crate::math::{r2_score, solve_least_squares};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("dataset needs at least one feature column and a target column, found {0} columns")]
    TooFewColumns(usize),

    #[error("training dataset has no rows")]
    NoRows,

    #[error("dataset has {found} columns but the model was fitted on {expected}")]
    WidthMismatch { expected: usize, found: usize },

    #[error("least squares system is too ill-conditioned to solve")]
    IllConditioned,
}

/// Fitted linear model `y = intercept + Σ coefficients[j] * x[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Fit on `data`, regressing its last column on the others.
    pub fn fit(data: &Dataset) -> Result<Self, FitError> {
        let (x, y) = data
            .split_target()
            .ok_or(FitError::TooFewColumns(data.ncols()))?;
        if x.nrows() == 0 {
            return Err(FitError::NoRows);
        }

        let design = with_intercept(&x);
        let beta = solve_least_squares(&design, &y).ok_or(FitError::IllConditioned)?;

        Ok(Self {
            intercept: beta[0],
            coefficients: beta.iter().skip(1).copied().collect(),
        })
    }

    /// Number of feature columns the model expects.
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn predict(&self, x: &DMatrix<f64>) -> DVector<f64> {
        let coefficients = DVector::from_column_slice(&self.coefficients);
        let mut out = x * coefficients;
        out.add_scalar_mut(self.intercept);
        out
    }

    /// R² of this model's predictions against the last column of `data`.
    pub fn score(&self, data: &Dataset) -> Result<f64, FitError> {
        if data.ncols() != self.n_features() + 1 {
            return Err(FitError::WidthMismatch {
                expected: self.n_features() + 1,
                found: data.ncols(),
            });
        }
        let (x, y) = data
            .split_target()
            .ok_or(FitError::TooFewColumns(data.ncols()))?;
        let predictions = self.predict(&x);
        r2_score(y.as_slice(), predictions.as_slice()).ok_or(FitError::NoRows)
    }
}

fn with_intercept(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.clone().insert_column(0, 1.0)
}
