use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use pta_model::RawTable;

use crate::error::{IngestError, Result};

/// Label used in errors for input that did not come from a named file.
pub const UPLOAD_ORIGIN: &str = "<upload>";

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into a [`RawTable`].
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    read_csv_from_reader(file, &path.display().to_string())
}

/// Read an in-memory CSV upload into a [`RawTable`].
pub fn read_csv_bytes(bytes: &[u8]) -> Result<RawTable> {
    read_csv_from_reader(bytes, UPLOAD_ORIGIN)
}

/// Read CSV text from any reader.
///
/// The first non-blank record is the header. Rows whose cells are all blank
/// are skipped. Cell text is kept as-is apart from a stray byte-order mark.
pub fn read_csv_from_reader<R: Read>(reader: R, origin: &str) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            origin: origin.to_string(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        match headers {
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(_) => rows.push(record.iter().map(normalize_cell).collect()),
        }
    }
    let Some(headers) = headers else {
        return Err(IngestError::EmptyCsv {
            origin: origin.to_string(),
        });
    };
    debug!(
        origin,
        columns = headers.len(),
        rows = rows.len(),
        skipped_blank = skipped,
        "csv read"
    );
    Ok(RawTable::new(headers, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_strips_bom_and_padding() {
        assert_eq!(normalize_header("\u{feff} Date "), "Date");
        assert_eq!(normalize_header("  Close Price\t"), "Close Price");
    }

    #[test]
    fn cells_keep_inner_text() {
        assert_eq!(normalize_cell(" 1,234.50 "), " 1,234.50 ");
        assert_eq!(normalize_cell("\u{feff}100"), "100");
    }
}
