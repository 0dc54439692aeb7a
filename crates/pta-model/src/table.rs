use std::collections::BTreeSet;

use crate::error::TableError;

/// An untyped table as read from the uploaded file.
///
/// Header names are trimmed and distinct. Every row holds exactly one cell
/// per header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table, trimming header names and checking the shape invariants.
    ///
    /// Rows shorter than the header are padded with empty cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();
        let mut seen = BTreeSet::new();
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        let width = headers.len();
        let mut padded = Vec::with_capacity(rows.len());
        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(TableError::RowWidth {
                    row: idx + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            row.resize(width, String::new());
            padded.push(row);
        }
        Ok(Self {
            headers,
            rows: padded,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cells of one column in row order, or `None` when the column is unknown.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str> + use<'_>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }
}
