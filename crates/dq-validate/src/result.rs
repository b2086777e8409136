//! Validation results.
//!
//! A [`ValidationResult`] is produced once per interrogation and never
//! modified afterwards. It keeps the dataset snapshot it was computed from so
//! that reports and failing-row extracts always agree with the counts.

use std::collections::BTreeMap;
use std::fmt;

use dq_model::{ColumnType, Constraint, ThresholdLevels, Thresholds};
use polars::prelude::DataFrame;
use serde::Serialize;

/// One row that violated a row check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailingRow {
    /// Zero-based row position in the dataset snapshot.
    pub row: usize,
    /// Offending cell value; `None` for nulls and unevaluable steps.
    pub value: Option<String>,
}

/// Why a column failed the schema match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MismatchReason {
    /// Declared but absent from the dataset.
    Missing,
    /// Present in the dataset but not declared.
    Unexpected,
    TypeMismatch {
        expected: ColumnType,
        actual: ColumnType,
    },
    /// Shared column appears out of declared order.
    OutOfOrder { expected: usize, actual: usize },
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing from dataset"),
            Self::Unexpected => write!(f, "not declared in schema"),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "type {actual}, expected {expected}")
            }
            Self::OutOfOrder { expected, actual } => {
                write!(f, "at position {actual}, expected position {expected}")
            }
        }
    }
}

/// A column that failed the schema match, with every reason found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaMismatch {
    pub column: String,
    pub reasons: Vec<MismatchReason>,
}

impl SchemaMismatch {
    pub fn is_missing(&self) -> bool {
        self.reasons.contains(&MismatchReason::Missing)
    }
}

/// Per-step evidence behind the failure count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDetail {
    Schema { mismatches: Vec<SchemaMismatch> },
    Rows { failing: Vec<FailingRow> },
    /// The target column is absent and the schema step already reported it;
    /// every row counts as failing.
    Unevaluable {
        column: String,
        failing: Vec<FailingRow>,
    },
}

/// Outcome of one validation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// 1-based step number.
    pub step: usize,
    pub constraint: Constraint,
    /// Rows for row checks, distinct column names for the schema match.
    pub units: u64,
    pub failed: u64,
    pub thresholds: Thresholds,
    pub levels: ThresholdLevels,
    pub detail: StepDetail,
}

impl StepResult {
    pub fn passed(&self) -> u64 {
        self.units.saturating_sub(self.failed)
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Passing share of the test units; 1.0 when there were none.
    pub fn fraction_passed(&self) -> f64 {
        if self.units == 0 {
            1.0
        } else {
            self.passed() as f64 / self.units as f64
        }
    }

    pub fn is_unevaluable(&self) -> bool {
        matches!(self.detail, StepDetail::Unevaluable { .. })
    }

    /// Failing rows of a row check; empty for the schema match.
    pub fn failing_rows(&self) -> &[FailingRow] {
        match &self.detail {
            StepDetail::Rows { failing } | StepDetail::Unevaluable { failing, .. } => failing,
            StepDetail::Schema { .. } => &[],
        }
    }

    pub fn schema_mismatches(&self) -> &[SchemaMismatch] {
        match &self.detail {
            StepDetail::Schema { mismatches } => mismatches,
            _ => &[],
        }
    }
}

/// Outcome of applying one rule specification to one dataset snapshot.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    label: String,
    thresholds: Thresholds,
    dataset: DataFrame,
    steps: Vec<StepResult>,
}

impl ValidationResult {
    pub(crate) fn new(
        label: String,
        thresholds: Thresholds,
        dataset: DataFrame,
        steps: Vec<StepResult>,
    ) -> Self {
        Self {
            label,
            thresholds,
            dataset,
            steps,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The dataset snapshot the steps were evaluated against.
    pub fn dataset(&self) -> &DataFrame {
        &self.dataset
    }

    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step `k` (1-based).
    pub fn step(&self, k: usize) -> Option<&StepResult> {
        k.checked_sub(1).and_then(|index| self.steps.get(index))
    }

    /// Failure count of every step, keyed by step number.
    pub fn failure_counts(&self) -> BTreeMap<usize, u64> {
        self.steps
            .iter()
            .map(|step| (step.step, step.failed))
            .collect()
    }

    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(StepResult::all_passed)
    }

    /// Steps with at least one failure.
    pub fn failing_steps(&self) -> usize {
        self.steps.iter().filter(|step| !step.all_passed()).count()
    }
}
