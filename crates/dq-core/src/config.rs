//! Dashboard configuration.

use serde::{Deserialize, Serialize};

/// Preview row-count limits shared by every board of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub preview_rows_default: usize,
    pub preview_rows_max: usize,
    /// Granularity offered by row-count pickers.
    pub preview_rows_step: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preview_rows_default: 10,
            preview_rows_max: 50,
            preview_rows_step: 5,
        }
    }
}

impl DashboardConfig {
    /// Clamp a requested row count to `[0, preview_rows_max]`.
    pub fn clamp_rows(&self, rows: usize) -> usize {
        rows.min(self.preview_rows_max)
    }

    /// Row counts a picker offers: `0, step, 2 * step, ..., max`.
    pub fn row_choices(&self) -> Vec<usize> {
        let step = self.preview_rows_step.max(1);
        let mut choices: Vec<usize> = (0..=self.preview_rows_max).step_by(step).collect();
        if choices.last() != Some(&self.preview_rows_max) {
            choices.push(self.preview_rows_max);
        }
        choices
    }
}
