//! Rule specifications and their builder.

use serde::{Deserialize, Serialize};

use crate::constraint::{Check, Constraint};
use crate::schema::{Schema, SchemaMatchOptions};
use crate::thresholds::Thresholds;

/// An ordered list of validation steps bound to one dataset.
///
/// Step numbers are positions, 1-indexed. A schema match, when present, is
/// expected first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub label: String,
    pub thresholds: Thresholds,
    pub constraints: Vec<Constraint>,
}

impl RuleSpec {
    pub fn builder(label: impl Into<String>) -> RuleSpecBuilder {
        RuleSpecBuilder::new(label)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The declared schema, if the first step is a schema match.
    pub fn schema(&self) -> Option<&Schema> {
        match self.constraints.first().map(|constraint| &constraint.check) {
            Some(Check::SchemaMatch { schema, .. }) => Some(schema),
            _ => None,
        }
    }

    /// Iterate steps with their 1-based step numbers.
    pub fn steps(&self) -> impl Iterator<Item = (usize, &Constraint)> {
        self.constraints
            .iter()
            .enumerate()
            .map(|(index, constraint)| (index + 1, constraint))
    }
}

/// Column argument for checks that accept one or many columns.
///
/// Passing several columns adds one step per column, in the order given.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoColumns for Vec<String> {
    fn into_columns(self) -> Vec<String> {
        self
    }
}

impl IntoColumns for Vec<&str> {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl<const N: usize> IntoColumns for [&str; N] {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

/// Builds a [`RuleSpec`] step by step.
///
/// ```
/// use dq_model::{ColumnType, RuleSpec, Schema, Thresholds};
///
/// let spec = RuleSpec::builder("Air Quality Validation")
///     .thresholds(Thresholds::any_failure())
///     .col_schema_match(Schema::new([
///         ("Wind", ColumnType::Float64),
///         ("Month", ColumnType::Int64),
///     ]))
///     .col_vals_ge("Wind", 0.0)
///     .col_vals_between("Month", 6.0, 12.0)
///     .build();
///
/// assert_eq!(spec.len(), 3);
/// assert!(spec.schema().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RuleSpecBuilder {
    label: String,
    thresholds: Thresholds,
    constraints: Vec<Constraint>,
    /// Index of the first step added by the latest check call.
    last_call: usize,
}

impl RuleSpecBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            thresholds: Thresholds::default(),
            constraints: Vec::new(),
            last_call: 0,
        }
    }

    #[must_use]
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Complete, ordered, case-sensitive schema match.
    #[must_use]
    pub fn col_schema_match(self, schema: Schema) -> Self {
        self.col_schema_match_with(schema, SchemaMatchOptions::default())
    }

    #[must_use]
    pub fn col_schema_match_with(self, schema: Schema, options: SchemaMatchOptions) -> Self {
        self.push([Check::SchemaMatch { schema, options }])
    }

    #[must_use]
    pub fn col_vals_ge(self, columns: impl IntoColumns, value: f64) -> Self {
        self.lower_bound(columns, value, true)
    }

    #[must_use]
    pub fn col_vals_gt(self, columns: impl IntoColumns, value: f64) -> Self {
        self.lower_bound(columns, value, false)
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn col_vals_between(self, columns: impl IntoColumns, low: f64, high: f64) -> Self {
        self.col_vals_between_with(columns, low, high, (true, true))
    }

    #[must_use]
    pub fn col_vals_between_with(
        self,
        columns: impl IntoColumns,
        low: f64,
        high: f64,
        inclusive: (bool, bool),
    ) -> Self {
        let checks = columns
            .into_columns()
            .into_iter()
            .map(|column| Check::Range {
                column,
                low,
                high,
                inclusive,
                na_pass: false,
            })
            .collect::<Vec<_>>();
        self.push(checks)
    }

    #[must_use]
    pub fn col_vals_in_set<I, S>(self, columns: impl IntoColumns, set: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: Vec<String> = set.into_iter().map(Into::into).collect();
        let checks = columns
            .into_columns()
            .into_iter()
            .map(|column| Check::InSet {
                column,
                set: set.clone(),
                na_pass: false,
            })
            .collect::<Vec<_>>();
        self.push(checks)
    }

    /// Append a prepared step as-is.
    #[must_use]
    pub fn step(mut self, constraint: Constraint) -> Self {
        self.last_call = self.constraints.len();
        self.constraints.push(constraint);
        self
    }

    /// Let nulls pass the steps added by the latest check call.
    #[must_use]
    pub fn na_pass(mut self, na_pass: bool) -> Self {
        for constraint in &mut self.constraints[self.last_call..] {
            match &mut constraint.check {
                Check::SchemaMatch { .. } => {}
                Check::LowerBound { na_pass: flag, .. }
                | Check::Range { na_pass: flag, .. }
                | Check::InSet { na_pass: flag, .. } => *flag = na_pass,
            }
        }
        self
    }

    /// Label the steps added by the latest check call.
    #[must_use]
    pub fn brief(mut self, brief: impl Into<String>) -> Self {
        let brief = brief.into();
        for constraint in &mut self.constraints[self.last_call..] {
            constraint.brief = Some(brief.clone());
        }
        self
    }

    /// Override thresholds for the steps added by the latest check call.
    #[must_use]
    pub fn step_thresholds(mut self, thresholds: Thresholds) -> Self {
        for constraint in &mut self.constraints[self.last_call..] {
            constraint.thresholds = Some(thresholds);
        }
        self
    }

    pub fn build(self) -> RuleSpec {
        RuleSpec {
            label: self.label,
            thresholds: self.thresholds,
            constraints: self.constraints,
        }
    }

    fn lower_bound(self, columns: impl IntoColumns, value: f64, inclusive: bool) -> Self {
        let checks = columns
            .into_columns()
            .into_iter()
            .map(|column| Check::LowerBound {
                column,
                value,
                inclusive,
                na_pass: false,
            })
            .collect::<Vec<_>>();
        self.push(checks)
    }

    fn push(mut self, checks: impl IntoIterator<Item = Check>) -> Self {
        self.last_call = self.constraints.len();
        self.constraints
            .extend(checks.into_iter().map(Constraint::new));
        self
    }
}
