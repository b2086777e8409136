//! Interrogation: run every step of a rule specification against a dataset.

use dq_model::{Check, ColumnType, RuleSpec};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info, info_span, warn};

use crate::checks;
use crate::error::{Result, ValidationError};
use crate::result::{FailingRow, StepDetail, StepResult, ValidationResult};
use crate::util::ColumnIndex;
use crate::wellformed::check_spec;

/// Evaluate `spec` against `dataset`.
///
/// Steps run in declaration order and are numbered from 1. Failing checks are
/// recorded in the result; an error means the dataset or specification could
/// not be evaluated and no partial result exists. The result holds a snapshot
/// of `dataset`.
pub fn interrogate(dataset: &DataFrame, spec: &RuleSpec) -> Result<ValidationResult> {
    let span = info_span!(
        "interrogate",
        label = %spec.label,
        rows = dataset.height(),
        steps = spec.len()
    );
    let _guard = span.enter();

    check_spec(spec)?;

    let columns: Vec<(String, ColumnType)> = dataset
        .get_columns()
        .iter()
        .map(|column| {
            (
                column.name().to_string(),
                ColumnType::from_dtype(column.dtype()),
            )
        })
        .collect();
    let rows = dataset.height() as u64;

    // Columns the schema step reported missing.
    let mut reported_missing: Option<ColumnIndex> = None;
    let mut steps = Vec::with_capacity(spec.len());

    for (step, constraint) in spec.steps() {
        let (units, detail) = match &constraint.check {
            Check::SchemaMatch { schema, options } => {
                let outcome = checks::schema_match(&columns, schema, options);
                reported_missing = Some(ColumnIndex::new(
                    outcome
                        .mismatches
                        .iter()
                        .filter(|mismatch| mismatch.is_missing())
                        .map(|mismatch| mismatch.column.as_str()),
                    options.case_sensitive_colnames,
                ));
                (
                    outcome.units,
                    StepDetail::Schema {
                        mismatches: outcome.mismatches,
                    },
                )
            }
            check => (
                rows,
                evaluate_rows(step, check, dataset, reported_missing.as_ref())?,
            ),
        };

        let failed = match &detail {
            StepDetail::Schema { mismatches } => mismatches.len() as u64,
            StepDetail::Rows { failing } | StepDetail::Unevaluable { failing, .. } => {
                failing.len() as u64
            }
        };
        let thresholds = constraint.thresholds.unwrap_or(spec.thresholds);
        let levels = thresholds.evaluate(failed, units);

        let assertion = constraint.check.assertion_type();
        if failed > 0 {
            warn!(step, assertion, failed, units, "step failed");
        } else {
            debug!(step, assertion, units, "step passed");
        }

        steps.push(StepResult {
            step,
            constraint: constraint.clone(),
            units,
            failed,
            thresholds,
            levels,
            detail,
        });
    }

    let result = ValidationResult::new(
        spec.label.clone(),
        spec.thresholds,
        dataset.clone(),
        steps,
    );
    info!(
        steps = result.len(),
        failing_steps = result.failing_steps(),
        "interrogation complete"
    );
    Ok(result)
}

fn evaluate_rows(
    step: usize,
    check: &Check,
    dataset: &DataFrame,
    reported_missing: Option<&ColumnIndex>,
) -> Result<StepDetail> {
    let failing = match check {
        Check::SchemaMatch { .. } => {
            return Err(ValidationError::MalformedConstraint {
                step,
                message: "schema match must be the first step".to_string(),
            });
        }
        Check::LowerBound {
            column,
            value,
            inclusive,
            na_pass,
        } => match target(step, dataset, column, reported_missing)? {
            Some(target) => {
                require_numeric(step, target)?;
                checks::lower_bound(target, *value, *inclusive, *na_pass)?
            }
            None => return Ok(unevaluable(column, dataset.height())),
        },
        Check::Range {
            column,
            low,
            high,
            inclusive,
            na_pass,
        } => match target(step, dataset, column, reported_missing)? {
            Some(target) => {
                require_numeric(step, target)?;
                checks::range(target, *low, *high, *inclusive, *na_pass)?
            }
            None => return Ok(unevaluable(column, dataset.height())),
        },
        Check::InSet {
            column,
            set,
            na_pass,
        } => match target(step, dataset, column, reported_missing)? {
            Some(target) => checks::in_set(target, set, *na_pass)?,
            None => return Ok(unevaluable(column, dataset.height())),
        },
    };
    Ok(StepDetail::Rows { failing })
}

/// Look up the target column. `None` means absent but already reported by the
/// schema step.
fn target<'a>(
    step: usize,
    dataset: &'a DataFrame,
    column: &str,
    reported_missing: Option<&ColumnIndex>,
) -> Result<Option<&'a Column>> {
    if let Ok(found) = dataset.column(column) {
        return Ok(Some(found));
    }
    if reported_missing.is_some_and(|missing| missing.contains(column)) {
        debug!(step, column, "target column missing; step unevaluable");
        return Ok(None);
    }
    Err(ValidationError::MissingColumn {
        step,
        column: column.to_string(),
    })
}

fn require_numeric(step: usize, column: &Column) -> Result<()> {
    if dq_common::is_numeric_dtype(column.dtype()) {
        Ok(())
    } else {
        Err(ValidationError::NonNumericColumn {
            step,
            column: column.name().to_string(),
            dtype: ColumnType::from_dtype(column.dtype()).to_string(),
        })
    }
}

fn unevaluable(column: &str, rows: usize) -> StepDetail {
    StepDetail::Unevaluable {
        column: column.to_string(),
        failing: (0..rows).map(|row| FailingRow { row, value: None }).collect(),
    }
}
