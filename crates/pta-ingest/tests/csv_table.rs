use std::fs;
use std::path::PathBuf;

use pta_ingest::{IngestError, read_csv_bytes, read_csv_table};
use pta_model::TableError;
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_table_with_trimmed_headers() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "prices.csv",
        " Date , Close Price \n2024-01-01,\"1,050.75\"\n2024-01-02,1051\n",
    );
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.headers(), &["Date", "Close Price"]);
    assert_eq!(table.row_count(), 2);
    let closes: Vec<&str> = table.column("Close Price").expect("column").collect();
    assert_eq!(closes, vec!["1,050.75", "1051"]);
}

#[test]
fn skips_blank_rows_and_pads_short_rows() {
    let table = read_csv_bytes(b"Date,Price,Volume\n\n,,\n2024-01-01,100\n").expect("read csv");
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows()[0], vec!["2024-01-01", "100", ""]);
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn empty_input_is_rejected() {
    let err = read_csv_bytes(b"\n\n").unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn duplicate_headers_after_trim_are_rejected() {
    let err = read_csv_bytes(b"Price, Price\n1,2\n").unwrap_err();
    assert!(matches!(
        err,
        IngestError::Table(TableError::DuplicateColumn { .. })
    ));
}

#[test]
fn rows_wider_than_header_are_rejected() {
    let err = read_csv_bytes(b"Date,Price\n2024-01-01,1,extra\n").unwrap_err();
    assert!(matches!(
        err,
        IngestError::Table(TableError::RowWidth {
            row: 1,
            expected: 2,
            found: 3
        })
    ));
}
