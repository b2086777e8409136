//! Validation steps as plain value objects.
//!
//! A rule specification is an ordered list of [`Constraint`]s. Each one wraps
//! a [`Check`] (what to test) with an optional brief and per-step thresholds.

use serde::{Deserialize, Serialize};

use crate::schema::{Schema, SchemaMatchOptions};
use crate::thresholds::Thresholds;

/// The predicate a step evaluates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Compare the dataset's columns and types against a declared schema.
    SchemaMatch {
        schema: Schema,
        options: SchemaMatchOptions,
    },
    /// `column >= value` (or `>` when not inclusive).
    LowerBound {
        column: String,
        value: f64,
        inclusive: bool,
        na_pass: bool,
    },
    /// `low <= column <= high`, each end independently inclusive.
    Range {
        column: String,
        low: f64,
        high: f64,
        inclusive: (bool, bool),
        na_pass: bool,
    },
    /// `column` value is one of `set` (exact, case-sensitive).
    InSet {
        column: String,
        set: Vec<String>,
        na_pass: bool,
    },
}

impl Check {
    /// Name of the assertion, as used in rule files and reports.
    pub fn assertion_type(&self) -> &'static str {
        match self {
            Self::SchemaMatch { .. } => "col_schema_match",
            Self::LowerBound {
                inclusive: true, ..
            } => "col_vals_ge",
            Self::LowerBound {
                inclusive: false, ..
            } => "col_vals_gt",
            Self::Range { .. } => "col_vals_between",
            Self::InSet { .. } => "col_vals_in_set",
        }
    }

    /// Target column of a row check; `None` for the schema match.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::SchemaMatch { .. } => None,
            Self::LowerBound { column, .. }
            | Self::Range { column, .. }
            | Self::InSet { column, .. } => Some(column),
        }
    }

    pub fn is_schema_match(&self) -> bool {
        matches!(self, Self::SchemaMatch { .. })
    }

    pub fn na_pass(&self) -> bool {
        match self {
            Self::SchemaMatch { .. } => false,
            Self::LowerBound { na_pass, .. }
            | Self::Range { na_pass, .. }
            | Self::InSet { na_pass, .. } => *na_pass,
        }
    }

    /// Compact rendering of the check's parameters for report tables.
    pub fn values_label(&self) -> String {
        match self {
            Self::SchemaMatch { .. } => "SCHEMA".to_string(),
            Self::LowerBound { value, .. } => format_bound(*value),
            Self::Range {
                low,
                high,
                inclusive,
                ..
            } => {
                let open = if inclusive.0 { '[' } else { '(' };
                let close = if inclusive.1 { ']' } else { ')' };
                format!("{open}{}, {}{close}", format_bound(*low), format_bound(*high))
            }
            Self::InSet { set, .. } => set.join(", "),
        }
    }

    /// Default human-readable description of the step.
    pub fn describe(&self) -> String {
        match self {
            Self::SchemaMatch { schema, options } => format!(
                "Expect that column schemas match ({} declared columns{}).",
                schema.len(),
                if options.complete { ", complete" } else { "" }
            ),
            Self::LowerBound {
                column,
                value,
                inclusive,
                ..
            } => format!(
                "Expect that values in `{column}` should be {} `{}`.",
                if *inclusive { ">=" } else { ">" },
                format_bound(*value)
            ),
            Self::Range { column, .. } => format!(
                "Expect that values in `{column}` should be between `{}`.",
                self.values_label()
            ),
            Self::InSet { column, set, .. } => format!(
                "Expect that values in `{column}` should be in the set of `{}`.",
                set.join("`, `")
            ),
        }
    }
}

/// One validation step: a check plus its presentation and threshold overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub check: Check,
    /// Label shown in reports instead of the generated description.
    pub brief: Option<String>,
    /// Overrides the rule-wide thresholds for this step.
    pub thresholds: Option<Thresholds>,
}

impl Constraint {
    pub fn new(check: Check) -> Self {
        Self {
            check,
            brief: None,
            thresholds: None,
        }
    }

    /// Brief if one was given, otherwise the generated description.
    pub fn label(&self) -> String {
        self.brief.clone().unwrap_or_else(|| self.check.describe())
    }
}

fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_types() {
        let ge = Check::LowerBound {
            column: "Wind".into(),
            value: 0.0,
            inclusive: true,
            na_pass: false,
        };
        assert_eq!(ge.assertion_type(), "col_vals_ge");
        assert_eq!(ge.column(), Some("Wind"));
        assert_eq!(ge.describe(), "Expect that values in `Wind` should be >= `0`.");
    }

    #[test]
    fn range_label_marks_open_ends() {
        let range = Check::Range {
            column: "Month".into(),
            low: 6.0,
            high: 12.0,
            inclusive: (true, false),
            na_pass: false,
        };
        assert_eq!(range.values_label(), "[6, 12)");
    }

    #[test]
    fn brief_overrides_description() {
        let mut constraint = Constraint::new(Check::InSet {
            column: "bdy_style".into(),
            set: vec!["coupe".into(), "sedan".into()],
            na_pass: false,
        });
        assert_eq!(
            constraint.label(),
            "Expect that values in `bdy_style` should be in the set of `coupe`, `sedan`."
        );
        constraint.brief = Some("Body styles".into());
        assert_eq!(constraint.label(), "Body styles");
    }
}
