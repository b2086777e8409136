use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading a rule specification.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Rule file could not be read.
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rule file is not valid TOML for the rule file layout.
    #[error("failed to parse rule file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Declared column type name is not recognised.
    #[error("unknown column type '{name}'")]
    UnknownType { name: String },

    /// A step entry is missing a field its kind needs.
    #[error("rule file step {index} ({kind}): {message}")]
    InvalidStep {
        index: usize,
        kind: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, SpecError>;
