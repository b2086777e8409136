//! CLI argument definitions for the data-quality dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq-dashboard",
    version,
    about = "Data quality dashboard - validate tables against rule specifications",
    long_about = "Validate tabular datasets against declarative rule specifications.\n\n\
                  Shows a data preview, an aggregate report of every validation step \
                  and the failing rows of individual steps."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include failing row values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Print views as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the built-in boards and their parameters.
    Boards,

    /// Show the views of a built-in board.
    Show(ShowArgs),

    /// Validate a CSV file against a TOML rule file.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Board name (see `boards`).
    #[arg(value_name = "BOARD")]
    pub board: String,

    /// Parameter selection, repeatable.
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    #[command(flatten)]
    pub views: ViewArgs,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV file to validate ("NA" cells are read as missing).
    #[arg(long = "data", value_name = "CSV")]
    pub data: PathBuf,

    /// TOML rule file.
    #[arg(long = "rules", value_name = "TOML")]
    pub rules: PathBuf,

    #[command(flatten)]
    pub views: ViewArgs,
}

#[derive(Args, Clone)]
pub struct ViewArgs {
    /// Preview row count (clamped to the dashboard maximum).
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Views to show.
    #[arg(long = "view", value_enum, default_value = "all")]
    pub view: ViewArg,

    /// Step to detail (1-based). Defaults to every failing step.
    #[arg(long = "step", value_name = "K")]
    pub step: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Preview,
    Report,
    Step,
    All,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_split_on_first_equals() {
        assert_eq!(
            parse_param("drivetrain=awd"),
            Ok(("drivetrain".to_string(), "awd".to_string()))
        );
        assert_eq!(
            parse_param("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert!(parse_param("drivetrain").is_err());
        assert!(parse_param("=awd").is_err());
    }

    #[test]
    fn show_accepts_repeated_params() {
        let cli = Cli::try_parse_from([
            "dq-dashboard",
            "show",
            "cars",
            "--param",
            "drivetrain=awd",
            "--view",
            "report",
        ])
        .unwrap();
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.board, "cars");
                assert_eq!(args.params.len(), 1);
                assert!(args.views.view == ViewArg::Report);
                assert_eq!(args.views.rows, None);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["dq-dashboard", "boards", "--json", "--log-data"]).unwrap();
        assert!(cli.json);
        assert!(cli.log_data);
    }

    #[test]
    fn check_requires_data_and_rules() {
        assert!(Cli::try_parse_from(["dq-dashboard", "check", "--data", "a.csv"]).is_err());
    }
}
