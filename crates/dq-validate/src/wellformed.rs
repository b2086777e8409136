//! Rejects specifications that cannot be evaluated meaningfully.

use std::collections::HashSet;

use dq_model::{Check, RuleSpec};

use crate::error::{Result, ValidationError};

/// Check every step of `spec` before any data is touched.
pub(crate) fn check_spec(spec: &RuleSpec) -> Result<()> {
    for (step, constraint) in spec.steps() {
        let malformed = |message: String| ValidationError::MalformedConstraint { step, message };

        match &constraint.check {
            Check::SchemaMatch { schema, options } => {
                if step != 1 {
                    return Err(malformed("schema match must be the first step".to_string()));
                }
                let mut seen = HashSet::new();
                for name in schema.names() {
                    if name.is_empty() {
                        return Err(malformed("schema declares an empty column name".to_string()));
                    }
                    let key = if options.case_sensitive_colnames {
                        name.to_string()
                    } else {
                        name.to_lowercase()
                    };
                    if !seen.insert(key) {
                        return Err(malformed(format!(
                            "schema declares column '{name}' more than once"
                        )));
                    }
                }
            }
            Check::LowerBound { column, value, .. } => {
                if column.is_empty() {
                    return Err(malformed("empty column name".to_string()));
                }
                if value.is_nan() {
                    return Err(malformed("bound is NaN".to_string()));
                }
            }
            Check::Range {
                column, low, high, ..
            } => {
                if column.is_empty() {
                    return Err(malformed("empty column name".to_string()));
                }
                if low.is_nan() || high.is_nan() {
                    return Err(malformed("range bound is NaN".to_string()));
                }
                if low > high {
                    return Err(malformed(format!(
                        "low bound {low} exceeds high bound {high}"
                    )));
                }
            }
            Check::InSet { column, set, .. } => {
                if column.is_empty() {
                    return Err(malformed("empty column name".to_string()));
                }
                if set.is_empty() {
                    return Err(malformed("membership set is empty".to_string()));
                }
            }
        }

        let thresholds = constraint.thresholds.unwrap_or(spec.thresholds);
        if !thresholds.is_valid() {
            return Err(malformed(
                "threshold fraction must lie between 0 and 1".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{ColumnType, Constraint, Schema, Thresholds};

    fn step_of(err: ValidationError) -> usize {
        match err {
            ValidationError::MalformedConstraint { step, .. } => step,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn inverted_range_is_malformed() {
        let spec = RuleSpec::builder("bad")
            .col_vals_ge("a", 0.0)
            .col_vals_between("b", 5.0, 1.0)
            .build();
        assert_eq!(step_of(check_spec(&spec).unwrap_err()), 2);
    }

    #[test]
    fn late_schema_match_is_malformed() {
        let spec = RuleSpec::builder("bad")
            .col_vals_ge("a", 0.0)
            .col_schema_match(Schema::new([("a", ColumnType::Float64)]))
            .build();
        assert_eq!(step_of(check_spec(&spec).unwrap_err()), 2);
    }

    #[test]
    fn duplicate_schema_names_are_malformed() {
        let spec = RuleSpec::builder("bad")
            .col_schema_match(Schema::new([
                ("a", ColumnType::Float64),
                ("a", ColumnType::Int64),
            ]))
            .build();
        assert!(check_spec(&spec).is_err());
    }

    #[test]
    fn empty_set_and_nan_bound_are_malformed() {
        let empty: [&str; 0] = [];
        let spec = RuleSpec::builder("bad").col_vals_in_set("a", empty).build();
        assert!(check_spec(&spec).is_err());

        let spec = RuleSpec::builder("bad").col_vals_gt("a", f64::NAN).build();
        assert!(check_spec(&spec).is_err());
    }

    #[test]
    fn invalid_step_threshold_is_malformed() {
        let mut constraint = Constraint::new(Check::LowerBound {
            column: "a".into(),
            value: 0.0,
            inclusive: true,
            na_pass: false,
        });
        constraint.thresholds = Some(Thresholds::new(0u64, 2.0, 0u64));
        let spec = RuleSpec::builder("bad").step(constraint).build();
        assert_eq!(step_of(check_spec(&spec).unwrap_err()), 1);
    }

    #[test]
    fn well_formed_spec_passes() {
        let spec = RuleSpec::builder("ok")
            .thresholds(Thresholds::any_failure())
            .col_schema_match(Schema::new([("a", ColumnType::Float64)]))
            .col_vals_between("a", 1.0, 1.0)
            .build();
        assert!(check_spec(&spec).is_ok());
    }
}
