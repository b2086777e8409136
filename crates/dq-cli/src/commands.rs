//! Subcommand implementations.
//!
//! Every command writes to the given writer and returns whether all
//! validation steps passed.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ColorChoice;
use comfy_table::{Cell, Table};
use dq_common::any_to_string;
use dq_core::{Board, Dashboard, DashboardConfig};
use dq_ingest::{ParameterSpec, TableProvider, TableSource};
use dq_model::load_rule_file;
use dq_report::{
    AggregateReport, Preview, Renderable, StepChoices, StepReport, apply_detail_table_style,
    header_cell,
};
use polars::prelude::AnyValue;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, info_span};

use crate::cli::{CheckArgs, ShowArgs, ViewArg, ViewArgs};

/// How views are written.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: ColorChoice,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            json: false,
            color: ColorChoice::Never,
        }
    }
}

#[derive(Serialize)]
struct BoardListing<'a> {
    name: &'a str,
    title: &'a str,
    steps: usize,
    parameters: &'a [ParameterSpec],
}

/// Board name used by `check` when the data path has no usable stem.
const CHECK_BOARD: &str = "data";

pub fn run_boards<W: Write>(output: Output, out: &mut W) -> Result<()> {
    let dashboard = Dashboard::with_samples(DashboardConfig::default());
    let listings: Vec<BoardListing<'_>> = dashboard
        .boards()
        .iter()
        .map(|board| BoardListing {
            name: board.name(),
            title: board.title(),
            steps: board.spec().len(),
            parameters: board.parameters(),
        })
        .collect();

    if output.json {
        return write_json(out, &listings);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Board"),
        header_cell("Title"),
        header_cell("Steps"),
        header_cell("Parameters"),
    ]);
    apply_detail_table_style(&mut table);
    for listing in &listings {
        let parameters: Vec<String> = listing
            .parameters
            .iter()
            .map(|parameter| format!("{}: {}", parameter.name, parameter.choices.join(" | ")))
            .collect();
        table.add_row(vec![
            Cell::new(listing.name),
            Cell::new(listing.title),
            Cell::new(listing.steps),
            Cell::new(parameters.join("\n")),
        ]);
    }
    style_table(&mut table, output.color);
    writeln!(out, "{table}")?;
    Ok(())
}

pub fn run_show<W: Write>(args: &ShowArgs, output: Output, out: &mut W) -> Result<bool> {
    let mut dashboard = Dashboard::with_samples(DashboardConfig::default());
    show_board(&mut dashboard, &args.board, &args.params, &args.views, output, out)
}

pub fn run_check<W: Write>(args: &CheckArgs, output: Output, out: &mut W) -> Result<bool> {
    let spec = load_rule_file(&args.rules)
        .with_context(|| format!("load rules from {}", args.rules.display()))?;
    let name = args
        .data
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(CHECK_BOARD)
        .to_string();
    debug!(board = %name, steps = spec.len(), "loaded rule file");

    let provider = TableProvider::new(name.clone(), TableSource::File(args.data.clone()));
    let board = Board::new(name.clone(), provider, spec).with_title(args.data.display().to_string());
    let mut dashboard = Dashboard::new(DashboardConfig::default());
    dashboard.add_board(board);
    show_board(&mut dashboard, &name, &[], &args.views, output, out)
}

/// Select `params` on board `name` and write the requested views.
fn show_board<W: Write>(
    dashboard: &mut Dashboard,
    name: &str,
    params: &[(String, String)],
    views: &ViewArgs,
    output: Output,
    out: &mut W,
) -> Result<bool> {
    if let Some(rows) = views.rows {
        dashboard.set_preview_rows(rows);
    }
    let rows = dashboard.preview_rows();
    let board = dashboard.board_mut(name)?;
    let span = info_span!("show", board = %name);
    let _guard = span.enter();

    for (param, value) in params {
        board
            .select(param, value)
            .with_context(|| format!("select {param}={value} on board '{name}'"))?;
    }
    let report = board
        .aggregate_report()
        .with_context(|| format!("validate board '{name}'"))?;
    let details = detail_steps(views.step, &report);
    let wants = |view: ViewArg| views.view == view || views.view == ViewArg::All;

    let mut step_reports = Vec::new();
    if wants(ViewArg::Step) {
        for step in &details {
            let detail = board
                .step_report(*step)
                .with_context(|| format!("report step {step} of board '{name}'"))?;
            step_reports.push(detail);
        }
    }

    let resolved = board.resolved_params()?;
    if output.json {
        let mut document = json!({
            "board": board.name(),
            "title": board.title(),
            "params": resolved,
        });
        if wants(ViewArg::Preview) {
            document["preview"] = preview_json(&*board.preview(rows)?);
        }
        if wants(ViewArg::Report) {
            document["report"] = serde_json::to_value(&*report)?;
            document["choices"] = serde_json::to_value(board.step_choices()?)?;
        }
        if wants(ViewArg::Step) {
            let steps: Vec<&StepReport> = step_reports.iter().map(AsRef::as_ref).collect();
            document["steps"] = serde_json::to_value(steps)?;
        }
        write_json(out, &document)?;
    } else {
        writeln!(out, "{}", board.title())?;
        for (param, value) in resolved.iter() {
            writeln!(out, "  {param}: {value}")?;
        }
        writeln!(out)?;
        if wants(ViewArg::Preview) {
            write_view(out, &*board.preview_table(rows)?, output.color)?;
        }
        if wants(ViewArg::Report) {
            write_view(out, &*report, output.color)?;
            write_choices(out, &board.step_choices()?)?;
        }
        if views.view == ViewArg::Step && details.is_empty() {
            writeln!(out, "All {} steps passed.", report.steps.len())?;
        }
        for detail in &step_reports {
            write_view(out, &**detail, output.color)?;
        }
    }

    info!(
        board = %name,
        steps = report.steps.len(),
        passing = report.passing_steps(),
        "rendered board"
    );
    Ok(report.all_passed())
}

/// Steps to detail: the requested one, or every failing step.
fn detail_steps(requested: Option<usize>, report: &AggregateReport) -> Vec<usize> {
    match requested {
        Some(step) => vec![step],
        None => report
            .steps
            .iter()
            .filter(|step| !step.all_passed)
            .map(|step| step.step)
            .collect(),
    }
}

fn write_view<W: Write>(out: &mut W, view: &dyn Renderable, color: ColorChoice) -> Result<()> {
    let mut table = view.to_table();
    style_table(&mut table, color);
    if let Some(caption) = view.caption() {
        writeln!(out, "{caption}")?;
    }
    writeln!(out, "{table}")?;
    writeln!(out)?;
    Ok(())
}

fn write_choices<W: Write>(out: &mut W, choices: &StepChoices) -> Result<()> {
    for (group, steps) in choices.groups() {
        let labels: Vec<&str> = steps.iter().map(|choice| choice.label.as_str()).collect();
        writeln!(out, "{group}: {}", labels.join(", "))?;
    }
    writeln!(out)?;
    Ok(())
}

fn style_table(table: &mut Table, color: ColorChoice) {
    match color {
        ColorChoice::Always => {
            table.enforce_styling();
        }
        ColorChoice::Never => {
            table.force_no_tty();
        }
        ColorChoice::Auto => {}
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Preview rows as JSON: cell text, or null for missing cells.
fn preview_json(preview: &Preview) -> Value {
    let frame = &preview.frame;
    let columns: Vec<String> = frame
        .get_columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let rows: Vec<Value> = (0..frame.height())
        .map(|index| {
            let cells: Vec<Value> = frame
                .get_columns()
                .iter()
                .map(|column| match column.get(index).unwrap_or(AnyValue::Null) {
                    AnyValue::Null => Value::Null,
                    value => Value::String(any_to_string(value)),
                })
                .collect();
            Value::Array(cells)
        })
        .collect();
    json!({
        "total_rows": preview.total_rows,
        "columns": columns,
        "rows": rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(board: &str, params: &[(&str, &str)], view: ViewArg, step: Option<usize>) -> (bool, String) {
        let args = ShowArgs {
            board: board.to_string(),
            params: params
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
            views: ViewArgs {
                rows: Some(3),
                view,
                step,
            },
        };
        let mut out = Vec::new();
        let passed = run_show(&args, Output::default(), &mut out).unwrap();
        (passed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn boards_lists_samples() {
        let mut out = Vec::new();
        run_boards(Output::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("airquality"));
        assert!(text.contains("rwd | awd"));
    }

    #[test]
    fn show_report_marks_failing_board() {
        let (passed, text) = show("airquality", &[], ViewArg::Report, None);
        assert!(!passed);
        assert!(text.contains("Data Quality Report: Air Quality Validation"));
        assert!(text.contains("Failures: Step 3 (20 failures)"));
    }

    #[test]
    fn show_details_failing_steps_by_default() {
        let (_, text) = show("cars", &[("drivetrain", "awd")], ViewArg::Step, None);
        assert!(text.contains("Step 4 (col_vals_in_set)"));
        assert!(text.contains("Step 5 (col_vals_in_set)"));
        assert!(!text.contains("Step 3 ("));
    }

    #[test]
    fn unknown_step_is_an_error() {
        let args = ShowArgs {
            board: "airquality".to_string(),
            params: Vec::new(),
            views: ViewArgs {
                rows: None,
                view: ViewArg::Step,
                step: Some(9),
            },
        };
        let err = run_show(&args, Output::default(), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("step 9"));
    }

    #[test]
    fn json_output_carries_requested_views() {
        let args = ShowArgs {
            board: "airquality".to_string(),
            params: Vec::new(),
            views: ViewArgs {
                rows: Some(2),
                view: ViewArg::All,
                step: Some(3),
            },
        };
        let output = Output {
            json: true,
            ..Output::default()
        };
        let mut out = Vec::new();
        run_show(&args, output, &mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["board"], "airquality");
        assert_eq!(value["preview"]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["preview"]["total_rows"], 30);
        assert_eq!(value["report"]["steps"].as_array().unwrap().len(), 3);
        assert_eq!(value["steps"][0]["summary"]["failed"], 20);
    }
}
