//! Report views derived from a validation result.

use dq_model::{ThresholdLevels, Thresholds};
use dq_validate::{FailingRow, SchemaMismatch, StepResult};
use polars::prelude::DataFrame;
use serde::Serialize;

/// Title shown above every aggregate report.
pub const REPORT_TITLE: &str = "Data Quality Report";

/// The first rows of the validated dataset.
#[derive(Debug, Clone)]
pub struct Preview {
    pub frame: DataFrame,
    /// Rows in the full dataset.
    pub total_rows: usize,
}

/// One row of the aggregate report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub step: usize,
    pub assertion_type: String,
    /// Target column; `None` for the schema match.
    pub column: Option<String>,
    pub values: String,
    pub brief: String,
    pub units: u64,
    pub passed: u64,
    pub failed: u64,
    pub fraction_passed: f64,
    pub all_passed: bool,
    pub thresholds: Thresholds,
    pub levels: ThresholdLevels,
    pub unevaluable: bool,
}

impl From<&StepResult> for StepSummary {
    fn from(step: &StepResult) -> Self {
        let check = &step.constraint.check;
        Self {
            step: step.step,
            assertion_type: check.assertion_type().to_string(),
            column: check.column().map(str::to_string),
            values: check.values_label(),
            brief: step.constraint.label(),
            units: step.units,
            passed: step.passed(),
            failed: step.failed,
            fraction_passed: step.fraction_passed(),
            all_passed: step.all_passed(),
            thresholds: step.thresholds,
            levels: step.levels,
            unevaluable: step.is_unevaluable(),
        }
    }
}

/// Summary of every step, in step order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub title: String,
    pub label: String,
    pub rows: usize,
    pub columns: usize,
    pub steps: Vec<StepSummary>,
}

impl AggregateReport {
    /// Number of steps with no failures.
    pub fn passing_steps(&self) -> usize {
        self.steps.iter().filter(|step| step.all_passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|step| step.all_passed)
    }
}

/// Full detail for one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub summary: StepSummary,
    /// Failing rows of a row check, in row order.
    pub failing_rows: Vec<FailingRow>,
    /// Mismatched columns of the schema match.
    pub mismatches: Vec<SchemaMismatch>,
    /// Every column of the failing rows; `None` for the schema match.
    #[serde(skip)]
    pub extract: Option<DataFrame>,
}

/// A selectable step, labelled for a step picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepChoice {
    pub step: usize,
    pub label: String,
}

/// Steps split by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepChoices {
    pub successes: Vec<StepChoice>,
    pub failures: Vec<StepChoice>,
}

impl StepChoices {
    pub const SUCCESSES: &'static str = "Successes";
    pub const FAILURES: &'static str = "Failures";

    /// Groups in display order, skipping empty ones.
    pub fn groups(&self) -> impl Iterator<Item = (&'static str, &[StepChoice])> {
        [
            (Self::SUCCESSES, self.successes.as_slice()),
            (Self::FAILURES, self.failures.as_slice()),
        ]
        .into_iter()
        .filter(|(_, choices)| !choices.is_empty())
    }
}
