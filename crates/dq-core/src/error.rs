//! Error types for boards and dashboards.

use dq_ingest::IngestError;
use dq_report::ReportError;
use dq_validate::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Report(#[from] ReportError),

    /// A node's inputs could not be serialized for fingerprinting.
    #[error("failed to fingerprint {node} inputs: {source}")]
    Fingerprint {
        node: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown board '{name}' (available: {})", .available.join(", "))]
    UnknownBoard {
        name: String,
        available: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, BoardError>;
