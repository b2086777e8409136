//! Shared utilities for the data-quality dashboard crates.
//!
//! Small helpers around polars values and dtypes that the ingest, validation
//! and reporting crates all need, plus the row-value redaction switch used by
//! their log events.

pub mod polars;
pub mod redact;

pub use polars::{any_to_f64, any_to_string, format_numeric, is_numeric_dtype};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
