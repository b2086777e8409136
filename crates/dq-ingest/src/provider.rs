//! Dataset provider contract and the table-backed implementation.

use polars::prelude::{DataFrame, DataType, IntoLazy, col, lit};
use tracing::{debug, info_span};

use crate::error::{IngestError, Result};
use crate::params::{ParameterSpec, Params, resolve_params};
use crate::source::TableSource;

/// Supplies a dataset on demand.
///
/// `get_dataset` must be a pure, deterministic function of the declared
/// parameters: equal params give equal frames, and nothing else is read.
pub trait DatasetProvider {
    fn name(&self) -> &str;

    /// Declared parameters and their choice sets.
    fn parameters(&self) -> &[ParameterSpec];

    fn get_dataset(&self, params: &Params) -> Result<DataFrame>;

    /// Validate `params` and fill defaults for absent parameters.
    fn resolve(&self, params: &Params) -> Result<Params> {
        resolve_params(self.name(), self.parameters(), params)
    }
}

/// Keeps rows whose `column` equals the selected choice of `parameter`.
#[derive(Debug, Clone)]
pub struct ChoiceFilter {
    pub parameter: ParameterSpec,
    pub column: String,
}

impl ChoiceFilter {
    pub fn new(parameter: ParameterSpec, column: impl Into<String>) -> Self {
        Self {
            parameter,
            column: column.into(),
        }
    }
}

/// A provider reading one table source, optionally filtered by choice
/// parameters.
#[derive(Debug, Clone)]
pub struct TableProvider {
    name: String,
    source: TableSource,
    filters: Vec<ChoiceFilter>,
    parameters: Vec<ParameterSpec>,
}

impl TableProvider {
    pub fn new(name: impl Into<String>, source: TableSource) -> Self {
        Self {
            name: name.into(),
            source,
            filters: Vec::new(),
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ChoiceFilter) -> Self {
        self.parameters.push(filter.parameter.clone());
        self.filters.push(filter);
        self
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }
}

impl DatasetProvider for TableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    fn get_dataset(&self, params: &Params) -> Result<DataFrame> {
        let span = info_span!("dataset", provider = %self.name, source = %self.source.describe());
        let _guard = span.enter();

        let resolved = self.resolve(params)?;
        let mut df = self.source.load()?;

        for filter in &self.filters {
            if df.column(&filter.column).is_err() {
                return Err(IngestError::FilterColumnMissing {
                    provider: self.name.clone(),
                    column: filter.column.clone(),
                });
            }
            // resolve() fills every declared parameter.
            let Some(value) = resolved.get(&filter.parameter.name) else {
                continue;
            };
            df = df
                .lazy()
                .filter(
                    col(filter.column.as_str())
                        .cast(DataType::String)
                        .eq(lit(value)),
                )
                .collect()?;
            debug!(
                column = %filter.column,
                value,
                rows = df.height(),
                "applied choice filter"
            );
        }

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::read_csv_text;

    const CARS: &str = "model,drivetrain,hp\nGT,rwd,647.0\nR8,awd,570.0\nF12,rwd,731.0\n";

    fn provider() -> TableProvider {
        let df = read_csv_text("cars", CARS).unwrap();
        TableProvider::new("cars", TableSource::Frame(df)).with_filter(ChoiceFilter::new(
            ParameterSpec::new("drivetrain", "Select Drivetrain Type", ["rwd", "awd"]),
            "drivetrain",
        ))
    }

    #[test]
    fn filters_by_selected_choice() {
        let provider = provider();
        let awd = provider
            .get_dataset(&Params::new().with("drivetrain", "awd"))
            .unwrap();
        assert_eq!(awd.height(), 1);

        let rwd = provider.get_dataset(&Params::new()).unwrap();
        assert_eq!(rwd.height(), 2);
    }

    #[test]
    fn same_params_give_equal_frames() {
        let provider = provider();
        let params = Params::new().with("drivetrain", "rwd");
        let first = provider.get_dataset(&params).unwrap();
        let second = provider.get_dataset(&params).unwrap();
        assert!(first.equals_missing(&second));
    }

    #[test]
    fn rejects_unknown_choice() {
        let err = provider()
            .get_dataset(&Params::new().with("drivetrain", "4wd"))
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidParameter { .. }));
    }

    #[test]
    fn missing_filter_column_is_reported() {
        let df = read_csv_text("cars", CARS).unwrap();
        let provider = TableProvider::new("cars", TableSource::Frame(df)).with_filter(
            ChoiceFilter::new(ParameterSpec::new("origin", "Origin", ["Italy"]), "ctry_origin"),
        );
        assert!(matches!(
            provider.get_dataset(&Params::new()),
            Err(IngestError::FilterColumnMissing { .. })
        ));
    }
}
