//! Validation engine for the data-quality dashboard.
//!
//! [`interrogate`] applies a [`dq_model::RuleSpec`] to a polars `DataFrame`
//! and returns an immutable [`ValidationResult`]: per step, the test units,
//! the failure count, the failing rows or schema mismatches, and the
//! threshold levels reached.
//!
//! ```
//! use dq_model::{RuleSpec, Thresholds};
//! use dq_validate::interrogate;
//! use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
//!
//! let df = DataFrame::new(vec![
//!     Series::new("Wind".into(), &[7.4, -8.0, 12.6]).into_column(),
//! ])
//! .unwrap();
//! let spec = RuleSpec::builder("wind")
//!     .thresholds(Thresholds::any_failure())
//!     .col_vals_ge("Wind", 0.0)
//!     .build();
//!
//! let result = interrogate(&df, &spec).unwrap();
//! assert_eq!(result.failure_counts()[&1], 1);
//! assert!(result.steps()[0].levels.critical);
//! ```

mod checks;
mod engine;
pub mod error;
pub mod result;
mod util;
mod wellformed;

pub use engine::interrogate;
pub use error::{Result, ValidationError};
pub use result::{
    FailingRow, MismatchReason, SchemaMismatch, StepDetail, StepResult, ValidationResult,
};
