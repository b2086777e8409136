//! Declared dataset schemas.

use serde::{Deserialize, Serialize};

use crate::column_type::ColumnType;
use crate::error::Result;

/// One declared column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    pub dtype: ColumnType,
}

/// Ordered list of declared columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<SchemaColumn>,
}

impl Schema {
    /// Build a schema from `(name, type)` pairs.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|(name, dtype)| SchemaColumn {
                    name: name.into(),
                    dtype,
                })
                .collect(),
        }
    }

    /// Build a schema from `(name, type name)` pairs, e.g. `("Wind", "Float64")`.
    pub fn parse<I, S, T>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let columns = columns
            .into_iter()
            .map(|(name, dtype)| {
                Ok(SchemaColumn {
                    name: name.into(),
                    dtype: dtype.as_ref().parse()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}

/// How strictly a schema match compares the dataset against the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaMatchOptions {
    /// Dataset must contain exactly the declared columns, no extras.
    pub complete: bool,
    /// Shared columns must appear in declared order.
    pub in_order: bool,
    /// Column names compare case-sensitively.
    pub case_sensitive_colnames: bool,
}

impl Default for SchemaMatchOptions {
    fn default() -> Self {
        Self {
            complete: true,
            in_order: true,
            case_sensitive_colnames: true,
        }
    }
}
