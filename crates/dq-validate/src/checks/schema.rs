//! Schema match: dataset columns against a declared schema.
//!
//! One failure per mismatched column. A column that is missing, undeclared
//! (complete mode), mistyped or out of order (in-order mode) fails once,
//! with every reason recorded.

use std::cmp::Reverse;
use std::collections::HashSet;

use dq_model::{ColumnType, Schema, SchemaMatchOptions};

use crate::result::{MismatchReason, SchemaMismatch};
use crate::util::ColumnIndex;

#[derive(Debug)]
pub(crate) struct SchemaOutcome {
    /// Distinct column names across schema and dataset.
    pub units: u64,
    pub mismatches: Vec<SchemaMismatch>,
}

/// Compare `actual` (dataset columns in order) against `schema`.
pub(crate) fn schema_match(
    actual: &[(String, ColumnType)],
    schema: &Schema,
    options: &SchemaMatchOptions,
) -> SchemaOutcome {
    let case_sensitive = options.case_sensitive_colnames;
    let actual_index = ColumnIndex::new(actual.iter().map(|(name, _)| name), case_sensitive);
    let declared_index = ColumnIndex::new(schema.names(), case_sensitive);

    let keys: HashSet<String> = schema
        .names()
        .chain(actual.iter().map(|(name, _)| name.as_str()))
        .map(|name| actual_index.key(name))
        .collect();

    // Shared columns in declared order, with their dataset positions.
    let shared: Vec<(usize, usize)> = schema
        .columns
        .iter()
        .enumerate()
        .filter_map(|(declared, column)| {
            actual_index
                .position(&column.name)
                .map(|position| (declared, position))
        })
        .collect();
    let ordered = if options.in_order {
        longest_ordered_run(&shared.iter().map(|(_, actual)| *actual).collect::<Vec<_>>())
    } else {
        vec![true; shared.len()]
    };

    let mut mismatches = Vec::new();
    let mut shared_iter = shared.iter().zip(&ordered);
    for column in &schema.columns {
        let Some(position) = actual_index.position(&column.name) else {
            mismatches.push(SchemaMismatch {
                column: column.name.clone(),
                reasons: vec![MismatchReason::Missing],
            });
            continue;
        };

        let mut reasons = Vec::new();
        let (_, actual_type) = &actual[position];
        if actual_type != &column.dtype {
            reasons.push(MismatchReason::TypeMismatch {
                expected: column.dtype.clone(),
                actual: actual_type.clone(),
            });
        }
        if let Some(((declared, _), in_order)) = shared_iter.next()
            && !in_order
        {
            reasons.push(MismatchReason::OutOfOrder {
                expected: declared + 1,
                actual: position + 1,
            });
        }
        if !reasons.is_empty() {
            mismatches.push(SchemaMismatch {
                column: column.name.clone(),
                reasons,
            });
        }
    }

    if options.complete {
        for (name, _) in actual {
            if !declared_index.contains(name) {
                mismatches.push(SchemaMismatch {
                    column: name.clone(),
                    reasons: vec![MismatchReason::Unexpected],
                });
            }
        }
    }

    SchemaOutcome {
        units: keys.len() as u64,
        mismatches,
    }
}

/// Marks the members of the longest increasing subsequence of `positions`.
///
/// Shared columns outside it are the ones reported as out of order. Ties go to
/// the run ending earliest.
fn longest_ordered_run(positions: &[usize]) -> Vec<bool> {
    let n = positions.len();
    let mut length = vec![1usize; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        for j in 0..i {
            if positions[j] < positions[i] && length[j] + 1 > length[i] {
                length[i] = length[j] + 1;
                previous[i] = Some(j);
            }
        }
    }

    let mut keep = vec![false; n];
    let mut cursor = (0..n).max_by_key(|&i| (length[i], Reverse(i)));
    while let Some(i) = cursor {
        keep[i] = true;
        cursor = previous[i];
    }
    keep
}
