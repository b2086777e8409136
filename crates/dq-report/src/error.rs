//! Error types for report views.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Step numbers run from 1 to the number of steps.
    #[error("step {step} not found (valid steps: 1..={steps})")]
    StepNotFound { step: usize, steps: usize },

    /// Building the failing-row extract failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
