//! Reporting facade for the data-quality dashboard.
//!
//! [`ReportFacade`] wraps a shared [`dq_validate::ValidationResult`] and
//! derives the dashboard's views from it: a data preview, the aggregate
//! report, per-step detail and the step failure counts. Views implement
//! [`Renderable`] for terminal output.

pub mod error;
pub mod facade;
pub mod render;
pub mod views;

pub use error::{ReportError, Result};
pub use facade::{PreviewRenderer, ReportFacade};
pub use render::{
    Renderable, align_column, apply_detail_table_style, dim_cell, frame_table, header_cell,
};
pub use views::{
    AggregateReport, Preview, REPORT_TITLE, StepChoice, StepChoices, StepReport, StepSummary,
};
