//! Declared column types.
//!
//! Schemas name their types the way rule authors write them (`"Float64"`,
//! `"Int64"`, `"String"`). Dataset columns are mapped onto the same
//! vocabulary from their polars dtype so both sides compare as plain values.

use std::fmt;
use std::str::FromStr;

use polars::prelude::DataType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SpecError;

/// Column type vocabulary shared by schemas and datasets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Date,
    Datetime,
    /// Any dtype outside the vocabulary, kept under its polars name.
    Other(String),
}

impl ColumnType {
    /// Map a polars dtype onto the declared-type vocabulary.
    pub fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::String => Self::String,
            DataType::Boolean => Self::Boolean,
            DataType::Int8 => Self::Int8,
            DataType::Int16 => Self::Int16,
            DataType::Int32 => Self::Int32,
            DataType::Int64 => Self::Int64,
            DataType::UInt8 => Self::UInt8,
            DataType::UInt16 => Self::UInt16,
            DataType::UInt32 => Self::UInt32,
            DataType::UInt64 => Self::UInt64,
            DataType::Float32 => Self::Float32,
            DataType::Float64 => Self::Float64,
            DataType::Date => Self::Date,
            DataType::Datetime(_, _) => Self::Datetime,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical name, as written in schemas and reports.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::Other(name) => name,
        }
    }

    /// Parse a declared type name. Accepts the canonical names in any case
    /// and the short polars names (`str`, `i64`, `f64`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        let ty = match name.trim().to_ascii_lowercase().as_str() {
            "string" | "str" | "utf8" => Self::String,
            "boolean" | "bool" => Self::Boolean,
            "int8" | "i8" => Self::Int8,
            "int16" | "i16" => Self::Int16,
            "int32" | "i32" => Self::Int32,
            "int64" | "i64" => Self::Int64,
            "uint8" | "u8" => Self::UInt8,
            "uint16" | "u16" => Self::UInt16,
            "uint32" | "u32" => Self::UInt32,
            "uint64" | "u64" => Self::UInt64,
            "float32" | "f32" => Self::Float32,
            "float64" | "f64" => Self::Float64,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SpecError::UnknownType {
            name: s.to_string(),
        })
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
