//! Air quality measurements, May and June.

use dq_ingest::{TableProvider, TableSource};
use dq_model::{ColumnType, RuleSpec, Schema, Thresholds};

use crate::board::Board;

pub const NAME: &str = "airquality";

const CSV: &str = include_str!("../../data/airquality.csv");

pub fn rule_spec() -> RuleSpec {
    RuleSpec::builder("Air Quality Validation")
        .thresholds(Thresholds::any_failure())
        .col_schema_match(Schema::new([
            ("Ozone", ColumnType::Float64),
            ("Solar_R", ColumnType::Float64),
            ("Wind", ColumnType::Float64),
            ("Temp", ColumnType::Int64),
            ("Month", ColumnType::Int64),
            ("Day", ColumnType::Int64),
        ]))
        .col_vals_ge("Wind", 0.0)
        .col_vals_between("Month", 6.0, 12.0)
        .build()
}

pub fn board() -> Board {
    let provider = TableProvider::new(
        NAME,
        TableSource::Embedded {
            name: "airquality.csv",
            csv: CSV,
        },
    );
    Board::new(NAME, provider, rule_spec()).with_title("Air Quality Data")
}
