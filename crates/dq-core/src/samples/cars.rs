//! Sports cars, filtered by drivetrain, with a styled preview.

use std::sync::Arc;

use comfy_table::{Attribute, Cell, CellAlignment, Table};
use dq_common::{any_to_f64, any_to_string};
use dq_ingest::{ChoiceFilter, ParameterSpec, TableProvider, TableSource};
use dq_model::{ColumnType, RuleSpec, Schema, Thresholds};
use dq_report::{
    PreviewRenderer, Renderable, align_column, apply_detail_table_style, dim_cell, frame_table,
    header_cell,
};
use polars::prelude::{AnyValue, DataFrame};

use crate::board::Board;

pub const NAME: &str = "cars";

pub const DRIVETRAIN: &str = "drivetrain";

const CSV: &str = include_str!("../../data/gtcars.csv");

const TITLE: &str = "Sports Car Specs and Price";

/// Display label per column.
const LABELS: [(&str, &str); 15] = [
    ("mfr", "Make"),
    ("model", "Model"),
    ("year", "Year"),
    ("trim", "Package"),
    ("bdy_style", "Body"),
    ("hp", "Power (hp)"),
    ("hp_rpm", "Engine Speed @ Max. Power (rev/min)"),
    ("trq", "Torque (ft-lbs)"),
    ("trq_rpm", "Engine Speed @ Max. Torque (rev/min)"),
    ("mpg_c", "City (mpg)"),
    ("mpg_h", "Highway (mpg)"),
    ("drivetrain", "Drivetrain"),
    ("trsmn", "Transmission"),
    ("ctry_origin", "Country"),
    ("msrp", "MSRP"),
];

pub fn rule_spec() -> RuleSpec {
    RuleSpec::builder("Cars Validation")
        .thresholds(Thresholds::any_failure())
        .col_schema_match(Schema::new([
            ("mfr", ColumnType::String),
            ("model", ColumnType::String),
            ("year", ColumnType::Int64),
            ("trim", ColumnType::String),
            ("bdy_style", ColumnType::String),
            ("hp", ColumnType::Float64),
            ("hp_rpm", ColumnType::Float64),
            ("trq", ColumnType::Float64),
            ("trq_rpm", ColumnType::Float64),
            ("mpg_c", ColumnType::Float64),
            ("mpg_h", ColumnType::Float64),
            ("drivetrain", ColumnType::String),
            ("trsmn", ColumnType::String),
            ("ctry_origin", ColumnType::String),
            ("msrp", ColumnType::Float64),
        ]))
        .col_vals_ge("hp", 0.0)
        .col_vals_ge("hp_rpm", 5500.0)
        .col_vals_in_set("bdy_style", ["coupe", "sedan", "convertible"])
        .col_vals_in_set(
            "ctry_origin",
            ["Germany", "Italy", "United Kingdom", "United States"],
        )
        .build()
}

pub fn board() -> Board {
    let provider = TableProvider::new(
        NAME,
        TableSource::Embedded {
            name: "gtcars.csv",
            csv: CSV,
        },
    )
    .with_filter(ChoiceFilter::new(
        ParameterSpec::new(DRIVETRAIN, "Select Drivetrain Type", ["rwd", "awd"]),
        DRIVETRAIN,
    ));
    let renderer: PreviewRenderer = Arc::new(|frame: &DataFrame| {
        Box::new(CarsPreview::new(frame.clone())) as Box<dyn Renderable>
    });
    Board::new(NAME, provider, rule_spec())
        .with_title("Cars Data")
        .with_preview_renderer(renderer)
}

/// Preview with display labels, whole-number performance figures and
/// currency-formatted prices.
#[derive(Debug, Clone)]
pub struct CarsPreview {
    frame: DataFrame,
}

impl CarsPreview {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl Renderable for CarsPreview {
    fn to_table(&self) -> Table {
        if self.frame.width() == 0 {
            return frame_table(&self.frame, None);
        }

        let mut table = Table::new();
        let columns = self.frame.get_columns();
        table.set_header(
            columns
                .iter()
                .map(|column| header_cell(label(column.name().as_str())))
                .collect::<Vec<_>>(),
        );
        apply_detail_table_style(&mut table);
        for (index, column) in columns.iter().enumerate() {
            if dq_common::is_numeric_dtype(column.dtype()) {
                align_column(&mut table, index, CellAlignment::Right);
            }
        }

        for row in 0..self.frame.height() {
            let cells = columns.iter().map(|column| {
                let name = column.name().as_str();
                match column.get(row).unwrap_or(AnyValue::Null) {
                    AnyValue::Null => dim_cell("NA"),
                    value if name == "msrp" => match any_to_f64(value.clone()) {
                        Some(price) => {
                            Cell::new(format_currency(price)).add_attribute(Attribute::Bold)
                        }
                        None => Cell::new(any_to_string(value)),
                    },
                    value if name.starts_with("hp") || name.starts_with("trq") => {
                        match any_to_f64(value.clone()) {
                            Some(number) => Cell::new(format!("{number:.0}")),
                            None => Cell::new(any_to_string(value)),
                        }
                    }
                    value => Cell::new(any_to_string(value)),
                }
            });
            table.add_row(cells.collect::<Vec<_>>());
        }
        table
    }

    fn caption(&self) -> Option<String> {
        Some(TITLE.to_string())
    }
}

fn label(column: &str) -> &str {
    LABELS
        .iter()
        .find(|(name, _)| *name == column)
        .map_or(column, |(_, label)| *label)
}

/// Whole dollars with thousands separators, e.g. `$447,000`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(447000.0), "$447,000");
        assert_eq!(format_currency(1416362.4), "$1,416,362");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(-1200.0), "-$1,200");
    }

    #[test]
    fn labels_fall_back_to_column_name() {
        assert_eq!(label("msrp"), "MSRP");
        assert_eq!(label("colour"), "colour");
    }
}
