//! Dataset providers for the data-quality dashboard.
//!
//! A [`DatasetProvider`] produces a fresh polars `DataFrame` for a set of
//! categorical [`Params`]. [`TableProvider`] covers the common case: a CSV
//! file, embedded CSV text or a prepared frame, narrowed by choice filters.

pub mod error;
pub mod params;
pub mod provider;
pub mod source;

pub use error::{IngestError, Result};
pub use params::{ParameterSpec, Params, resolve_params};
pub use provider::{ChoiceFilter, DatasetProvider, TableProvider};
pub use source::{TableSource, read_csv_file, read_csv_text};
