//! End-to-end interrogation tests.

use dq_model::{ColumnType, RuleSpec, Schema, Thresholds};
use dq_validate::{MismatchReason, StepDetail, ValidationError, interrogate};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::{any, prop, proptest};

const NEGATIVE_ROWS: [usize; 10] = [3, 17, 31, 45, 59, 73, 87, 101, 115, 129];

fn air_quality_153() -> DataFrame {
    let wind: Vec<f64> = (0..153)
        .map(|row| {
            if NEGATIVE_ROWS.contains(&row) {
                -(row as f64) / 10.0
            } else {
                row as f64 / 10.0 + 1.0
            }
        })
        .collect();
    let month: Vec<i64> = (0..153).map(|row| 5 + (row as i64 / 31)).collect();
    DataFrame::new(vec![
        Series::new("Ozone".into(), vec![41.0; 153]).into_column(),
        Series::new("Solar_R".into(), vec![190.0; 153]).into_column(),
        Series::new("Wind".into(), wind).into_column(),
        Series::new("Temp".into(), vec![67i64; 153]).into_column(),
        Series::new("Month".into(), month).into_column(),
        Series::new("Day".into(), (1..=153i64).collect::<Vec<_>>()).into_column(),
    ])
    .unwrap()
}

fn air_schema() -> Schema {
    Schema::new([
        ("Ozone", ColumnType::Float64),
        ("Solar_R", ColumnType::Float64),
        ("Wind", ColumnType::Float64),
        ("Temp", ColumnType::Int64),
        ("Month", ColumnType::Int64),
        ("Day", ColumnType::Int64),
    ])
}

fn air_spec() -> RuleSpec {
    RuleSpec::builder("Air Quality Validation")
        .thresholds(Thresholds::any_failure())
        .col_schema_match(air_schema())
        .col_vals_ge("Wind", 0.0)
        .col_vals_between("Month", 6.0, 12.0)
        .build()
}

#[test]
fn negative_wind_rows_are_reported() {
    let result = interrogate(&air_quality_153(), &air_spec()).unwrap();

    let counts = result.failure_counts();
    assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(counts[&1], 0);
    assert_eq!(counts[&2], 10);
    // Month 5 covers rows 0..31.
    assert_eq!(counts[&3], 31);

    let wind = result.step(2).unwrap();
    assert_eq!(wind.units, 153);
    assert_eq!(wind.passed(), 143);
    let rows: Vec<usize> = wind.failing_rows().iter().map(|row| row.row).collect();
    assert_eq!(rows, NEGATIVE_ROWS.to_vec());
    assert_eq!(wind.failing_rows()[0].value.as_deref(), Some("-0.3"));
    assert!(wind.levels.warning && wind.levels.error && wind.levels.critical);
}

#[test]
fn missing_and_extra_column_fail_schema_with_two() {
    let mut df = air_quality_153().drop("Day").unwrap();
    df.with_column(Series::new("Station".into(), vec!["north"; 153]))
        .unwrap();

    let spec = RuleSpec::builder("schema only")
        .thresholds(Thresholds::any_failure())
        .col_schema_match(air_schema())
        .build();
    let result = interrogate(&df, &spec).unwrap();

    let step = result.step(1).unwrap();
    assert_eq!(step.failed, 2);
    assert_eq!(step.units, 7);
    let columns: Vec<&str> = step
        .schema_mismatches()
        .iter()
        .map(|mismatch| mismatch.column.as_str())
        .collect();
    assert_eq!(columns, vec!["Day", "Station"]);
    assert_eq!(
        step.schema_mismatches()[1].reasons,
        vec![MismatchReason::Unexpected]
    );
}

#[test]
fn constraint_on_column_missing_from_schema_step_is_unevaluable() {
    let df = air_quality_153().drop("Wind").unwrap();
    let result = interrogate(&df, &air_spec()).unwrap();

    assert_eq!(result.step(1).unwrap().failed, 1);
    let wind = result.step(2).unwrap();
    assert!(wind.is_unevaluable());
    assert_eq!(wind.failed, 153);
    assert!(wind.failing_rows().iter().all(|row| row.value.is_none()));
    assert!(matches!(wind.detail, StepDetail::Unevaluable { ref column, .. } if column == "Wind"));
}

#[test]
fn missing_column_without_schema_step_is_an_error() {
    let spec = RuleSpec::builder("no schema")
        .col_vals_ge("Pressure", 0.0)
        .build();
    let err = interrogate(&air_quality_153(), &spec).unwrap_err();
    match err {
        ValidationError::MissingColumn { step, column } => {
            assert_eq!(step, 1);
            assert_eq!(column, "Pressure");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bound_on_string_column_is_an_error() {
    let df = DataFrame::new(vec![
        Series::new("bdy_style".into(), &["coupe", "sedan"]).into_column(),
    ])
    .unwrap();
    let spec = RuleSpec::builder("strings")
        .col_vals_ge("bdy_style", 0.0)
        .build();
    assert!(matches!(
        interrogate(&df, &spec),
        Err(ValidationError::NonNumericColumn { step: 1, .. })
    ));
}

#[test]
fn nulls_fail_unless_na_pass() {
    let df = DataFrame::new(vec![
        Series::new("Ozone".into(), &[Some(41.0), None, Some(12.0)]).into_column(),
    ])
    .unwrap();
    let strict = RuleSpec::builder("nulls").col_vals_ge("Ozone", 0.0).build();
    assert_eq!(interrogate(&df, &strict).unwrap().failure_counts()[&1], 1);

    let lenient = RuleSpec::builder("nulls")
        .col_vals_ge("Ozone", 0.0)
        .na_pass(true)
        .build();
    assert_eq!(interrogate(&df, &lenient).unwrap().failure_counts()[&1], 0);
}

#[test]
fn empty_dataset_passes_every_row_check() {
    let df = air_quality_153().head(Some(0));
    let result = interrogate(&df, &air_spec()).unwrap();
    assert!(result.all_passed());
    assert_eq!(result.step(2).unwrap().units, 0);
    assert_eq!(result.step(2).unwrap().fraction_passed(), 1.0);
}

#[test]
fn result_keeps_dataset_snapshot() {
    let df = air_quality_153();
    let result = interrogate(&df, &air_spec()).unwrap();
    assert!(result.dataset().equals_missing(&df));
    assert_eq!(result.label(), "Air Quality Validation");
}

proptest! {
    #[test]
    fn interrogation_is_deterministic(values in prop::collection::vec(any::<Option<i32>>(), 0..64)) {
        let wind: Vec<Option<f64>> = values.iter().map(|v| v.map(f64::from)).collect();
        let df = DataFrame::new(vec![Series::new("Wind".into(), wind).into_column()]).unwrap();
        let spec = RuleSpec::builder("wind")
            .col_vals_ge("Wind", 0.0)
            .col_vals_between("Wind", -100.0, 100.0)
            .build();

        let first = interrogate(&df, &spec).unwrap();
        let second = interrogate(&df, &spec).unwrap();
        assert_eq!(first.steps(), second.steps());

        let expected = values.iter().filter(|v| v.is_none_or(|x| x < 0)).count() as u64;
        assert_eq!(first.failure_counts()[&1], expected);
    }
}
