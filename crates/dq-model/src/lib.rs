//! Rule specification model for the data-quality dashboard.
//!
//! A [`RuleSpec`] is an ordered list of [`Constraint`]s (an optional schema
//! match followed by column checks) plus a label and [`Thresholds`]. Specs are
//! built in code with [`RuleSpecBuilder`] or loaded from TOML with
//! [`load_rule_file`].

pub mod column_type;
pub mod constraint;
pub mod error;
pub mod file;
pub mod schema;
pub mod spec;
pub mod thresholds;

pub use column_type::ColumnType;
pub use constraint::{Check, Constraint};
pub use error::{Result, SpecError};
pub use file::{load_rule_file, parse_rule_file};
pub use schema::{Schema, SchemaColumn, SchemaMatchOptions};
pub use spec::{IntoColumns, RuleSpec, RuleSpecBuilder};
pub use thresholds::{Threshold, ThresholdLevels, Thresholds};
