//! `check` against CSV and rule files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use dq_cli::cli::{CheckArgs, ViewArg, ViewArgs};
use dq_cli::commands::{Output, run_check};
use insta::assert_json_snapshot;
use serde_json::Value;
use tempfile::TempDir;

const SCORES: &str = "id,score,grade\n1,3.5,a\n2,-1.0,b\n3,NA,c\n4,7.25,z\n";

const RULES: &str = r#"
label = "Scores"
thresholds = { critical = 1 }

[schema]
columns = [["id", "Int64"], ["score", "Float64"], ["grade", "String"]]

[[steps]]
kind = "col_vals_ge"
column = "score"
value = 0

[[steps]]
kind = "col_vals_in_set"
column = "grade"
set = ["a", "b", "c"]
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn args(data: &Path, rules: &Path, view: ViewArg) -> CheckArgs {
    CheckArgs {
        data: data.to_path_buf(),
        rules: rules.to_path_buf(),
        views: ViewArgs {
            rows: None,
            view,
            step: None,
        },
    }
}

fn check_json(args: &CheckArgs) -> (bool, Value) {
    let output = Output {
        json: true,
        ..Output::default()
    };
    let mut out = Vec::new();
    let passed = run_check(args, output, &mut out).unwrap();
    (passed, serde_json::from_slice(&out).unwrap())
}

#[test]
fn failing_rows_are_reported_per_step() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "scores.csv", SCORES);
    let rules = write(&dir, "rules.toml", RULES);

    let (passed, value) = check_json(&args(&data, &rules, ViewArg::All));
    assert!(!passed);
    assert_eq!(value["board"], "scores");
    assert_eq!(value["preview"]["total_rows"], 4);
    assert_eq!(value["report"]["label"], "Scores");

    let failing: Vec<&Value> = value["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| &step["failing_rows"])
        .collect();
    assert_json_snapshot!(failing, @r#"
    [
      [
        {
          "row": 1,
          "value": "-1"
        },
        {
          "row": 2,
          "value": null
        }
      ],
      [
        {
          "row": 3,
          "value": "z"
        }
      ]
    ]
    "#);
}

#[test]
fn choices_split_schema_from_failing_checks() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "scores.csv", SCORES);
    let rules = write(&dir, "rules.toml", RULES);

    let (_, value) = check_json(&args(&data, &rules, ViewArg::Report));
    assert!(value.get("preview").is_none());
    assert!(value.get("steps").is_none());
    assert_json_snapshot!(value["choices"], @r#"
    {
      "successes": [
        {
          "step": 1,
          "label": "Step 1"
        }
      ],
      "failures": [
        {
          "step": 2,
          "label": "Step 2 (2 failures)"
        },
        {
          "step": 3,
          "label": "Step 3 (1 failures)"
        }
      ]
    }
    "#);
}

#[test]
fn clean_data_passes() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "clean.csv", "id,score,grade\n1,3.5,a\n2,0.0,c\n");
    let rules = write(&dir, "rules.toml", RULES);

    let mut out = Vec::new();
    let passed = run_check(&args(&data, &rules, ViewArg::All), Output::default(), &mut out).unwrap();
    assert!(passed);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Data Quality Report: Scores"));
    assert!(text.contains("3 of 3 steps passed"));
}

#[test]
fn missing_data_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.toml", RULES);
    let data = dir.path().join("absent.csv");

    let err = run_check(&args(&data, &rules, ViewArg::Report), Output::default(), &mut Vec::new())
        .unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}

#[test]
fn malformed_rule_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "scores.csv", SCORES);
    let rules = write(&dir, "rules.toml", "label = \"Scores\"\n[[steps]]\nkind = \"col_vals_ge\"\n");

    let err = run_check(&args(&data, &rules, ViewArg::Report), Output::default(), &mut Vec::new())
        .unwrap_err();
    assert!(format!("{err:#}").contains("load rules from"));
}
