//! A board: one dataset panel with memoized views.
//!
//! Inputs are the provider parameters, the rule specification and the
//! preview row count. Every read recomputes only the nodes whose inputs
//! changed: dataset, validation result, aggregate report, preview and step
//! report.

use std::collections::BTreeMap;
use std::sync::Arc;

use dq_ingest::{DatasetProvider, ParameterSpec, Params};
use dq_model::RuleSpec;
use dq_report::{
    AggregateReport, Preview, PreviewRenderer, Renderable, ReportFacade, StepChoices, StepReport,
};
use dq_validate::{ValidationResult, interrogate};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info_span;

use crate::error::{BoardError, Result};
use crate::fingerprint::Fingerprint;
use crate::memo::{Memo, MemoStats};

/// Hit and miss counts of every node of a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub dataset: MemoStats,
    pub result: MemoStats,
    pub aggregate: MemoStats,
    pub preview: MemoStats,
    pub step_report: MemoStats,
}

pub struct Board {
    name: String,
    title: String,
    provider: Box<dyn DatasetProvider>,
    spec: RuleSpec,
    preview_renderer: Option<PreviewRenderer>,
    params: Params,
    dataset: Memo<DataFrame>,
    result: Memo<ValidationResult>,
    aggregate: Memo<AggregateReport>,
    preview: Memo<Preview>,
    step_report: Memo<StepReport>,
}

impl Board {
    pub fn new(
        name: impl Into<String>,
        provider: impl DatasetProvider + 'static,
        spec: RuleSpec,
    ) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            provider: Box::new(provider),
            spec,
            preview_renderer: None,
            params: Params::new(),
            dataset: Memo::new("dataset"),
            result: Memo::new("result"),
            aggregate: Memo::new("aggregate"),
            preview: Memo::new("preview"),
            step_report: Memo::new("step_report"),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render previews through `renderer` instead of the default table.
    #[must_use]
    pub fn with_preview_renderer(mut self, renderer: PreviewRenderer) -> Self {
        self.preview_renderer = Some(renderer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        self.provider.parameters()
    }

    /// Selected parameters, before defaults are filled in.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// Select `value` for parameter `name`.
    ///
    /// Values outside the declared domain are rejected and the previous
    /// selection is kept.
    pub fn select(&mut self, name: &str, value: &str) -> Result<()> {
        let params = self.params.clone().with(name, value);
        self.set_params(params)
    }

    /// Replace all parameter selections.
    pub fn set_params(&mut self, params: Params) -> Result<()> {
        self.provider.resolve(&params)?;
        self.params = params;
        Ok(())
    }

    /// Effective parameters, defaults filled in.
    pub fn resolved_params(&self) -> Result<Params> {
        Ok(self.provider.resolve(&self.params)?)
    }

    pub fn dataset(&mut self) -> Result<Arc<DataFrame>> {
        let resolved = self.resolved_params()?;
        let key = self.dataset_key()?;
        let provider = &self.provider;
        self.dataset
            .get_or_try_compute(&key, || {
                let span = info_span!("load", board = %self.name);
                let _guard = span.enter();
                provider.get_dataset(&resolved)
            })
            .map_err(BoardError::from)
    }

    pub fn result(&mut self) -> Result<Arc<ValidationResult>> {
        let key = self.result_key()?;
        let dataset = self.dataset()?;
        let spec = &self.spec;
        self.result
            .get_or_try_compute(&key, || interrogate(&dataset, spec))
            .map_err(BoardError::from)
    }

    /// Facade over the current result, carrying the board's preview renderer.
    pub fn facade(&mut self) -> Result<ReportFacade> {
        let result = self.result()?;
        Ok(ReportFacade::new(result).with_preview_renderer(self.preview_renderer.clone()))
    }

    pub fn preview(&mut self, rows: usize) -> Result<Arc<Preview>> {
        let result_key = self.result_key()?;
        let key = fingerprint("preview", &(&result_key, rows))?;
        let facade = self.facade()?;
        self.preview
            .get_or_try_compute(&key, || Ok::<_, BoardError>(facade.preview(rows)))
    }

    /// Preview view, through the custom renderer when the board has one.
    pub fn preview_table(&mut self, rows: usize) -> Result<Box<dyn Renderable>> {
        let facade = self.facade()?;
        Ok(facade.preview_table(rows))
    }

    pub fn aggregate_report(&mut self) -> Result<Arc<AggregateReport>> {
        let key = self.result_key()?;
        let facade = self.facade()?;
        self.aggregate
            .get_or_try_compute(&key, || Ok::<_, BoardError>(facade.aggregate_report()))
    }

    pub fn failure_counts(&mut self) -> Result<BTreeMap<usize, u64>> {
        Ok(self.facade()?.failure_counts())
    }

    pub fn step_choices(&mut self) -> Result<StepChoices> {
        Ok(self.facade()?.step_choices())
    }

    /// Detail for step `k` (1-based).
    pub fn step_report(&mut self, k: usize) -> Result<Arc<StepReport>> {
        let result_key = self.result_key()?;
        let key = fingerprint("step_report", &(&result_key, k))?;
        let facade = self.facade()?;
        self.step_report
            .get_or_try_compute(&key, || facade.step_report(k).map_err(BoardError::from))
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            dataset: self.dataset.stats(),
            result: self.result.stats(),
            aggregate: self.aggregate.stats(),
            preview: self.preview.stats(),
            step_report: self.step_report.stats(),
        }
    }

    /// Whether a validation result is currently cached.
    pub fn has_result(&self) -> bool {
        self.result.peek().is_some()
    }

    fn dataset_key(&self) -> Result<Fingerprint> {
        let resolved = self.resolved_params()?;
        fingerprint("dataset", &(self.provider.name(), &resolved))
    }

    /// Key of the validation result for the current inputs; views derived
    /// from the result key on it too.
    fn result_key(&self) -> Result<Fingerprint> {
        let dataset_key = self.dataset_key()?;
        fingerprint("result", &(&dataset_key, &self.spec))
    }
}

fn fingerprint<T: Serialize + ?Sized>(node: &'static str, inputs: &T) -> Result<Fingerprint> {
    Fingerprint::of(inputs).map_err(|source| BoardError::Fingerprint { node, source })
}
