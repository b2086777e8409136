//! Error types for interrogation.
//!
//! Failing checks are data, not errors. These variants cover datasets and
//! specifications that cannot be evaluated at all.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// A row check targets a column the dataset lacks, and no schema step
    /// already accounts for it.
    #[error("step {step}: column '{column}' not found in dataset")]
    MissingColumn { step: usize, column: String },

    /// A bound or range check targets a non-numeric column.
    #[error("step {step}: column '{column}' has type {dtype}, expected a numeric type")]
    NonNumericColumn {
        step: usize,
        column: String,
        dtype: String,
    },

    #[error("step {step}: malformed constraint: {message}")]
    MalformedConstraint { step: usize, message: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
