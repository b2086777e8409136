//! Read-only views over one validation result.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use dq_validate::{StepDetail, ValidationResult};
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::render::Renderable;
use crate::views::{
    AggregateReport, Preview, REPORT_TITLE, StepChoice, StepChoices, StepReport, StepSummary,
};

/// Builds a custom preview view from the previewed rows.
pub type PreviewRenderer = Arc<dyn Fn(&DataFrame) -> Box<dyn Renderable> + Send + Sync>;

/// Side-effect-free views of a [`ValidationResult`].
///
/// Every read derives from the wrapped result alone, so repeated reads return
/// equal values.
#[derive(Clone)]
pub struct ReportFacade {
    result: Arc<ValidationResult>,
    preview_renderer: Option<PreviewRenderer>,
}

impl fmt::Debug for ReportFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportFacade")
            .field("label", &self.result.label())
            .field("steps", &self.result.len())
            .field("custom_preview", &self.preview_renderer.is_some())
            .finish()
    }
}

impl ReportFacade {
    pub fn new(result: Arc<ValidationResult>) -> Self {
        Self {
            result,
            preview_renderer: None,
        }
    }

    /// Use `renderer` for [`ReportFacade::preview_table`].
    #[must_use]
    pub fn with_preview_renderer(mut self, renderer: Option<PreviewRenderer>) -> Self {
        self.preview_renderer = renderer;
        self
    }

    pub fn result(&self) -> &Arc<ValidationResult> {
        &self.result
    }

    /// First `min(n, rows)` rows; zero rows keep the full schema.
    pub fn preview(&self, n: usize) -> Preview {
        let dataset = self.result.dataset();
        Preview {
            frame: dataset.head(Some(n)),
            total_rows: dataset.height(),
        }
    }

    /// The preview as a renderable view, through the custom renderer if set.
    pub fn preview_table(&self, n: usize) -> Box<dyn Renderable> {
        let preview = self.preview(n);
        match &self.preview_renderer {
            Some(renderer) => renderer(&preview.frame),
            None => Box::new(preview),
        }
    }

    pub fn aggregate_report(&self) -> AggregateReport {
        let dataset = self.result.dataset();
        AggregateReport {
            title: REPORT_TITLE.to_string(),
            label: self.result.label().to_string(),
            rows: dataset.height(),
            columns: dataset.width(),
            steps: self.result.steps().iter().map(StepSummary::from).collect(),
        }
    }

    /// Detail for step `k`, numbered from 1.
    pub fn step_report(&self, k: usize) -> Result<StepReport> {
        let step = self.result.step(k).ok_or(ReportError::StepNotFound {
            step: k,
            steps: self.result.len(),
        })?;

        let extract = match &step.detail {
            StepDetail::Schema { .. } => None,
            StepDetail::Rows { .. } | StepDetail::Unevaluable { .. } => {
                let dataset = self.result.dataset();
                let mut mask = vec![false; dataset.height()];
                for row in step.failing_rows() {
                    if let Some(flag) = mask.get_mut(row.row) {
                        *flag = true;
                    }
                }
                let mask = BooleanChunked::from_slice("failing".into(), &mask);
                Some(dataset.filter(&mask)?)
            }
        };
        debug!(step = k, failed = step.failed, "built step report");

        Ok(StepReport {
            summary: StepSummary::from(step),
            failing_rows: step.failing_rows().to_vec(),
            mismatches: step.schema_mismatches().to_vec(),
            extract,
        })
    }

    /// Failure count of every step, in step order.
    pub fn failure_counts(&self) -> BTreeMap<usize, u64> {
        self.result.failure_counts()
    }

    /// Steps grouped for a step picker: `Step k` or `Step k (n failures)`.
    pub fn step_choices(&self) -> StepChoices {
        let mut choices = StepChoices::default();
        for (step, failed) in self.failure_counts() {
            if failed == 0 {
                choices.successes.push(StepChoice {
                    step,
                    label: format!("Step {step}"),
                });
            } else {
                choices.failures.push(StepChoice {
                    step,
                    label: format!("Step {step} ({failed} failures)"),
                });
            }
        }
        choices
    }
}
