//! Error taxonomy for the analysis pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The role a column plays in a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Date,
    Value,
}

impl ColumnRole {
    /// Human-readable list of the name fragments the resolver looks for.
    pub fn keyword_hint(self) -> &'static str {
        match self {
            Self::Date => "\"Date\" or \"Time\"",
            Self::Value => "\"Price\", \"Close\", \"Val\" or \"Amt\"",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => f.write_str("date"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// Errors raised while turning a raw table into an analysed series.
///
/// Every variant is fatal to the current run. Row numbers are 1-based data
/// rows (the header is not counted).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The resolver found no column for a required role.
    #[error(
        "missing {role} column: no column name contains {} (columns: {})",
        .role.keyword_hint(),
        .available.join(", ")
    )]
    MissingColumn {
        role: ColumnRole,
        available: Vec<String>,
    },

    /// A resolved column name does not exist in the table.
    #[error("column '{column}' not found in table")]
    UnknownColumn { column: String },

    /// A value cell is not numeric after stripping thousands separators.
    #[error("invalid numeric value '{value}' in column '{column}' at row {row}")]
    ValueParse {
        column: String,
        row: usize,
        value: String,
    },

    /// A date cell matches none of the supported formats.
    #[error("unrecognized date '{value}' in column '{column}' at row {row}")]
    DateParse {
        column: String,
        row: usize,
        value: String,
    },

    /// A moving-average window is not a positive integer.
    #[error("invalid moving-average window '{value}': expected a positive integer")]
    InvalidWindow { value: String },

    /// The report document could not be assembled.
    #[error("report build failed: {reason}")]
    ReportBuild { reason: String },
}

impl AnalysisError {
    pub fn report(reason: impl Into<String>) -> Self {
        Self::ReportBuild {
            reason: reason.into(),
        }
    }
}

/// Structural errors raised when constructing a [`RawTable`](crate::RawTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two header names are identical after trimming.
    #[error("duplicate column name '{column}'")]
    DuplicateColumn { column: String },

    /// A data row has more cells than the header declares.
    #[error("row {row} has {found} cells but the header declares {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
