//! Table sources: CSV files, embedded CSV text, and in-memory frames.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, NullValues, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Rows used for CSV schema inference.
pub const INFER_SCHEMA_ROWS: usize = 100;

/// Cell text read as null.
pub const NULL_TOKEN: &str = "NA";

/// Where a provider's table comes from.
#[derive(Debug, Clone)]
pub enum TableSource {
    /// CSV file on disk, re-read on every access.
    File(PathBuf),
    /// CSV text compiled into the binary.
    Embedded {
        name: &'static str,
        csv: &'static str,
    },
    /// Prepared frame, cloned on every access.
    Frame(DataFrame),
}

impl TableSource {
    /// Load a fresh copy of the table.
    pub fn load(&self) -> Result<DataFrame> {
        match self {
            Self::File(path) => read_csv_file(path),
            Self::Embedded { name, csv } => read_csv_text(name, *csv),
            Self::Frame(frame) => Ok(frame.clone()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Embedded { name, .. } => format!("embedded:{name}"),
            Self::Frame(frame) => format!("frame:{}x{}", frame.height(), frame.width()),
        }
    }
}

fn csv_options() -> CsvReadOptions {
    let parse_options = CsvParseOptions::default()
        .with_null_values(Some(NullValues::AllColumnsSingle(NULL_TOKEN.into())));
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(parse_options)
}

/// Read a CSV file into a Polars DataFrame.
pub fn read_csv_file(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })?;

    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read CSV file");
    Ok(df)
}

/// Read CSV text into a Polars DataFrame.
pub fn read_csv_text(name: &str, csv: &'static str) -> Result<DataFrame> {
    let df = csv_options()
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            source_name: name.to_string(),
            message: e.to_string(),
        })?;

    debug!(source = name, rows = df.height(), columns = df.width(), "read embedded CSV");
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    const SAMPLE: &str = "Ozone,Wind,Month\n41.0,7.4,5\nNA,8.0,5\n12.0,-12.6,6\n";

    #[test]
    fn embedded_csv_infers_types_and_nulls() {
        let df = read_csv_text("sample", SAMPLE).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("Ozone").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Month").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("Ozone").unwrap().null_count(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_csv_file(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn frame_source_returns_fresh_copies() {
        let df = read_csv_text("sample", SAMPLE).unwrap();
        let source = TableSource::Frame(df.clone());
        assert!(source.load().unwrap().equals_missing(&df));
        assert_eq!(source.describe(), "frame:3x3");
    }
}
