//! TOML rule files.
//!
//! ```toml
//! label = "Air Quality Validation"
//! thresholds = { warning = 0, error = 0, critical = 0 }
//!
//! [schema]
//! complete = true
//! columns = [["Wind", "Float64"], ["Month", "Int64"]]
//!
//! [[steps]]
//! kind = "col_vals_ge"
//! columns = ["Wind"]
//! value = 0
//!
//! [[steps]]
//! kind = "col_vals_between"
//! column = "Month"
//! low = 6
//! high = 12
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::column_type::ColumnType;
use crate::error::{Result, SpecError};
use crate::schema::{Schema, SchemaMatchOptions};
use crate::spec::{RuleSpec, RuleSpecBuilder};
use crate::thresholds::Thresholds;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    label: String,
    #[serde(default)]
    thresholds: Thresholds,
    schema: Option<SchemaSection>,
    #[serde(default)]
    steps: Vec<StepEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaSection {
    columns: Vec<(String, ColumnType)>,
    complete: Option<bool>,
    in_order: Option<bool>,
    case_sensitive_colnames: Option<bool>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StepKind {
    ColValsGe,
    ColValsGt,
    ColValsBetween,
    ColValsInSet,
}

impl StepKind {
    fn name(self) -> &'static str {
        match self {
            Self::ColValsGe => "col_vals_ge",
            Self::ColValsGt => "col_vals_gt",
            Self::ColValsBetween => "col_vals_between",
            Self::ColValsInSet => "col_vals_in_set",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepEntry {
    kind: StepKind,
    column: Option<String>,
    #[serde(default)]
    columns: Vec<String>,
    value: Option<f64>,
    low: Option<f64>,
    high: Option<f64>,
    inclusive: Option<(bool, bool)>,
    set: Option<Vec<String>>,
    #[serde(default)]
    na_pass: bool,
    brief: Option<String>,
    thresholds: Option<Thresholds>,
}

/// Read and parse a rule file.
pub fn load_rule_file(path: &Path) -> Result<RuleSpec> {
    let contents = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rule_file(&contents, path)
}

/// Parse rule file contents; `origin` is only used in error messages.
pub fn parse_rule_file(contents: &str, origin: &Path) -> Result<RuleSpec> {
    let file: RuleFile = toml::from_str(contents).map_err(|source| SpecError::Toml {
        path: origin.to_path_buf(),
        source,
    })?;
    file.into_spec()
}

impl RuleFile {
    fn into_spec(self) -> Result<RuleSpec> {
        let mut builder = RuleSpec::builder(self.label).thresholds(self.thresholds);
        if let Some(section) = self.schema {
            let defaults = SchemaMatchOptions::default();
            let options = SchemaMatchOptions {
                complete: section.complete.unwrap_or(defaults.complete),
                in_order: section.in_order.unwrap_or(defaults.in_order),
                case_sensitive_colnames: section
                    .case_sensitive_colnames
                    .unwrap_or(defaults.case_sensitive_colnames),
            };
            builder = builder.col_schema_match_with(Schema::new(section.columns), options);
        }
        for (index, entry) in self.steps.into_iter().enumerate() {
            builder = entry.apply(index + 1, builder)?;
        }
        Ok(builder.build())
    }
}

impl StepEntry {
    fn apply(self, index: usize, builder: RuleSpecBuilder) -> Result<RuleSpecBuilder> {
        let kind = self.kind;
        let invalid = |message: &str| SpecError::InvalidStep {
            index,
            kind: kind.name().to_string(),
            message: message.to_string(),
        };

        let mut columns = self.columns;
        if let Some(column) = self.column {
            columns.insert(0, column);
        }
        if columns.is_empty() {
            return Err(invalid("needs `column` or `columns`"));
        }

        let builder = match kind {
            StepKind::ColValsGe => {
                let value = self.value.ok_or_else(|| invalid("needs `value`"))?;
                builder.col_vals_ge(columns, value)
            }
            StepKind::ColValsGt => {
                let value = self.value.ok_or_else(|| invalid("needs `value`"))?;
                builder.col_vals_gt(columns, value)
            }
            StepKind::ColValsBetween => {
                let low = self.low.ok_or_else(|| invalid("needs `low`"))?;
                let high = self.high.ok_or_else(|| invalid("needs `high`"))?;
                let inclusive = self.inclusive.unwrap_or((true, true));
                builder.col_vals_between_with(columns, low, high, inclusive)
            }
            StepKind::ColValsInSet => {
                let set = self.set.ok_or_else(|| invalid("needs `set`"))?;
                builder.col_vals_in_set(columns, set)
            }
        };

        let mut builder = builder.na_pass(self.na_pass);
        if let Some(brief) = self.brief {
            builder = builder.brief(brief);
        }
        if let Some(thresholds) = self.thresholds {
            builder = builder.step_thresholds(thresholds);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Check;
    use crate::thresholds::Threshold;

    const AIR_QUALITY: &str = r#"
label = "Air Quality Validation"
thresholds = { warning = 0, error = 0, critical = 0 }

[schema]
columns = [["Wind", "Float64"], ["Month", "Int64"]]

[[steps]]
kind = "col_vals_ge"
column = "Wind"
value = 0

[[steps]]
kind = "col_vals_between"
columns = ["Month"]
low = 6
high = 12
"#;

    #[test]
    fn parses_schema_and_steps_in_order() {
        let spec = parse_rule_file(AIR_QUALITY, Path::new("aq.toml")).unwrap();
        assert_eq!(spec.label, "Air Quality Validation");
        assert_eq!(spec.thresholds.warning, Some(Threshold::Count(0)));
        assert_eq!(spec.len(), 3);
        assert!(spec.constraints[0].check.is_schema_match());
        assert_eq!(
            spec.constraints[2].check,
            Check::Range {
                column: "Month".into(),
                low: 6.0,
                high: 12.0,
                inclusive: (true, true),
                na_pass: false,
            }
        );
    }

    #[test]
    fn missing_parameter_names_the_step() {
        let contents = r#"
label = "broken"

[[steps]]
kind = "col_vals_ge"
column = "hp"
"#;
        let err = parse_rule_file(contents, Path::new("broken.toml")).unwrap_err();
        assert!(matches!(
            err,
            SpecError::InvalidStep { index: 1, ref kind, .. } if kind == "col_vals_ge"
        ));
    }

    #[test]
    fn unknown_type_in_schema_is_rejected() {
        let contents = r#"
label = "bad schema"

[schema]
columns = [["hp", "Real"]]
"#;
        let err = parse_rule_file(contents, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, SpecError::Toml { .. }));
    }
}
