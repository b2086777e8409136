//! Row-wise value checks: lower bound, range and set membership.

use std::collections::HashSet;

use dq_common::{any_to_f64, any_to_string, redact_value};
use polars::prelude::{AnyValue, Column, PolarsResult};
use tracing::trace;

use crate::result::FailingRow;

/// Collect the rows of `column` for which `passes` is false.
///
/// Nulls fail unless `na_pass` is set and never reach `passes`.
fn failing_rows<F>(column: &Column, na_pass: bool, passes: F) -> PolarsResult<Vec<FailingRow>>
where
    F: Fn(&AnyValue<'_>) -> bool,
{
    let mut failing = Vec::new();
    for row in 0..column.len() {
        let value = column.get(row)?;
        if matches!(value, AnyValue::Null) {
            if !na_pass {
                failing.push(FailingRow { row, value: None });
            }
            continue;
        }
        if !passes(&value) {
            let text = any_to_string(value);
            trace!(column = %column.name(), row, value = redact_value(&text), "row failed");
            failing.push(FailingRow {
                row,
                value: Some(text),
            });
        }
    }
    Ok(failing)
}

fn above(x: f64, bound: f64, inclusive: bool) -> bool {
    if inclusive { x >= bound } else { x > bound }
}

fn below(x: f64, bound: f64, inclusive: bool) -> bool {
    if inclusive { x <= bound } else { x < bound }
}

/// `column >= value` (or `>` when not inclusive). NaN never passes.
pub(crate) fn lower_bound(
    column: &Column,
    value: f64,
    inclusive: bool,
    na_pass: bool,
) -> PolarsResult<Vec<FailingRow>> {
    failing_rows(column, na_pass, |cell| {
        any_to_f64(cell.clone()).is_some_and(|x| above(x, value, inclusive))
    })
}

pub(crate) fn range(
    column: &Column,
    low: f64,
    high: f64,
    inclusive: (bool, bool),
    na_pass: bool,
) -> PolarsResult<Vec<FailingRow>> {
    failing_rows(column, na_pass, |cell| {
        any_to_f64(cell.clone())
            .is_some_and(|x| above(x, low, inclusive.0) && below(x, high, inclusive.1))
    })
}

/// Exact, case-sensitive membership of the cell's string form.
pub(crate) fn in_set(column: &Column, set: &[String], na_pass: bool) -> PolarsResult<Vec<FailingRow>> {
    let members: HashSet<&str> = set.iter().map(String::as_str).collect();
    failing_rows(column, na_pass, |cell| {
        members.contains(any_to_string(cell.clone()).as_str())
    })
}
