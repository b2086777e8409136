//! Error types for dataset providers.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while producing a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Parameter Errors ===
    /// A parameter value outside the provider's declared domain, or a
    /// parameter the provider does not declare.
    #[error(
        "invalid parameter for {provider}: {parameter}='{value}' (allowed: {})",
        .allowed.join(", ")
    )]
    InvalidParameter {
        provider: String,
        parameter: String,
        value: String,
        allowed: Vec<String>,
    },

    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {source_name}: {message}")]
    CsvParse {
        source_name: String,
        message: String,
    },

    /// The filter column is missing from the loaded table.
    #[error("filter column '{column}' not found in {provider}")]
    FilterColumnMissing { provider: String, column: String },

    /// Any other polars failure while shaping the dataset.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
