//! Terminal rendering of report views with comfy-table.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dq_common::any_to_string;
use dq_model::Threshold;
use polars::prelude::{AnyValue, DataFrame};

use crate::views::{AggregateReport, Preview, StepReport, StepSummary};

/// A view that renders to a terminal table.
pub trait Renderable {
    fn to_table(&self) -> Table;

    /// Text shown above the table.
    fn caption(&self) -> Option<String> {
        None
    }

    /// Plain text form: caption, then the table without terminal styling.
    fn render(&self) -> String {
        let mut table = self.to_table();
        table.force_no_tty();
        match self.caption() {
            Some(caption) => format!("{caption}\n{table}"),
            None => table.to_string(),
        }
    }
}

impl Renderable for Preview {
    fn to_table(&self) -> Table {
        frame_table(&self.frame, None)
    }

    fn caption(&self) -> Option<String> {
        Some(format!(
            "Preview: {} of {} rows, {} columns",
            self.frame.height(),
            self.total_rows,
            self.frame.width()
        ))
    }
}

impl Renderable for AggregateReport {
    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell(""),
            header_cell("Step"),
            header_cell("Assertion"),
            header_cell("Column"),
            header_cell("Values"),
            header_cell("Units"),
            header_cell("Pass"),
            header_cell("Fail"),
            header_cell("W"),
            header_cell("E"),
            header_cell("C"),
        ]);
        apply_report_table_style(&mut table);
        for index in [1, 5, 6, 7] {
            align_column(&mut table, index, CellAlignment::Right);
        }
        for index in [0, 8, 9, 10] {
            align_column(&mut table, index, CellAlignment::Center);
        }

        for step in &self.steps {
            table.add_row(vec![
                status_cell(step),
                Cell::new(step.step),
                Cell::new(&step.assertion_type),
                step.column
                    .as_deref()
                    .map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(&step.values),
                Cell::new(step.units),
                Cell::new(format!("{} ({:.2})", step.passed, step.fraction_passed)),
                count_cell(step.failed, Color::Red),
                level_cell(step.thresholds.warning, step.levels.warning, Color::Yellow),
                level_cell(step.thresholds.error, step.levels.error, Color::Red),
                level_cell(step.thresholds.critical, step.levels.critical, Color::Magenta),
            ]);
        }
        table
    }

    fn caption(&self) -> Option<String> {
        Some(format!(
            "{}: {}\n{} rows, {} columns; {} of {} steps passed",
            self.title,
            self.label,
            self.rows,
            self.columns,
            self.passing_steps(),
            self.steps.len()
        ))
    }
}

impl Renderable for StepReport {
    fn to_table(&self) -> Table {
        if let Some(extract) = &self.extract {
            let rows: Vec<usize> = self.failing_rows.iter().map(|row| row.row).collect();
            return frame_table(extract, Some(&rows));
        }

        let mut table = Table::new();
        table.set_header(vec![header_cell("Column"), header_cell("Problem")]);
        apply_detail_table_style(&mut table);
        for mismatch in &self.mismatches {
            let reasons: Vec<String> = mismatch.reasons.iter().map(ToString::to_string).collect();
            table.add_row(vec![
                Cell::new(&mismatch.column).fg(Color::Blue),
                Cell::new(reasons.join("; ")),
            ]);
        }
        table
    }

    fn caption(&self) -> Option<String> {
        let summary = &self.summary;
        let outcome = if summary.unevaluable {
            format!("could not be evaluated; all {} rows fail", summary.units)
        } else if summary.all_passed {
            "passed".to_string()
        } else {
            format!("{} of {} units failed", summary.failed, summary.units)
        };
        Some(format!(
            "Step {} ({}): {}\n{}",
            summary.step, summary.assertion_type, summary.brief, outcome
        ))
    }
}

/// Table of a frame's cells, with 1-based row numbers.
///
/// `rows` gives the dataset positions of the frame's rows; `None` numbers
/// them consecutively.
pub fn frame_table(frame: &DataFrame, rows: Option<&[usize]>) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Row")];
    header.extend(
        frame
            .get_columns()
            .iter()
            .map(|column| header_cell(column.name().as_str())),
    );
    table.set_header(header);
    apply_detail_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for index in 0..frame.height() {
        let number = rows.and_then(|rows| rows.get(index)).copied().unwrap_or(index) + 1;
        let mut cells = vec![dim_cell(number)];
        cells.extend(frame.get_columns().iter().map(|column| {
            match column.get(index).unwrap_or(AnyValue::Null) {
                AnyValue::Null => dim_cell("NA"),
                value => Cell::new(any_to_string(value)),
            }
        }));
        table.add_row(cells);
    }
    table
}

/// Rounded condensed style shared by previews and step detail.
pub fn apply_detail_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn status_cell(step: &StepSummary) -> Cell {
    if step.all_passed {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn level_cell(level: Option<Threshold>, reached: bool, color: Color) -> Cell {
    match (level, reached) {
        (None, _) => dim_cell("-"),
        (Some(_), true) => Cell::new("●").fg(color),
        (Some(_), false) => dim_cell("○"),
    }
}
