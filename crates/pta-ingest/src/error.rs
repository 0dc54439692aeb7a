//! Error types for CSV ingestion.

use std::path::PathBuf;

use pta_model::TableError;
use thiserror::Error;

/// Errors that can occur while loading the input table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected a record.
    #[error("failed to parse CSV {origin}: {source}")]
    CsvParse {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// The input has no header row.
    #[error("CSV input is empty: {origin}")]
    EmptyCsv { origin: String },

    /// The header or rows violate the table shape.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/prices.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/prices.csv");
    }

    #[test]
    fn test_table_error_is_transparent() {
        let err: IngestError = TableError::DuplicateColumn {
            column: "Date".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "duplicate column name 'Date'");
    }
}
