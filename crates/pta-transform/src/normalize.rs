//! Conversion of the raw date and value columns into a typed series.

use tracing::{debug, warn};

use pta_model::{AnalysisError, NormalizedSeries, RawTable, Result, SeriesRecord};

use crate::normalization::{parse_timestamp, parse_value};

fn column_cells<'a>(table: &'a RawTable, column: &str) -> Result<Vec<&'a str>> {
    table
        .column(column)
        .map(Iterator::collect)
        .ok_or_else(|| AnalysisError::UnknownColumn {
            column: column.to_string(),
        })
}

/// Parse every value cell, failing on the first non-numeric one.
pub fn parse_value_column(table: &RawTable, column: &str) -> Result<Vec<f64>> {
    column_cells(table, column)?
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            parse_value(raw).ok_or_else(|| {
                warn!(column, row = idx + 1, "value cell is not numeric");
                AnalysisError::ValueParse {
                    column: column.to_string(),
                    row: idx + 1,
                    value: raw.trim().to_string(),
                }
            })
        })
        .collect()
}

/// Parse every date cell, failing on the first unrecognized one.
pub fn parse_date_column(table: &RawTable, column: &str) -> Result<Vec<chrono::NaiveDateTime>> {
    column_cells(table, column)?
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            parse_timestamp(raw).ok_or_else(|| {
                warn!(column, row = idx + 1, "date cell is not a recognized date");
                AnalysisError::DateParse {
                    column: column.to_string(),
                    row: idx + 1,
                    value: raw.trim().to_string(),
                }
            })
        })
        .collect()
}

/// Build the date-sorted series from two columns of `table`.
///
/// Values are parsed before dates; the first bad cell aborts the whole
/// series. Records are stably sorted by date and duplicates are kept.
pub fn normalize(table: &RawTable, date_column: &str, value_column: &str) -> Result<NormalizedSeries> {
    let values = parse_value_column(table, value_column)?;
    let dates = parse_date_column(table, date_column)?;
    let records: Vec<SeriesRecord> = dates
        .into_iter()
        .zip(values)
        .map(|(date, value)| SeriesRecord { date, value })
        .collect();
    let series = NormalizedSeries::new(date_column, value_column, records);
    debug!(
        date_column,
        value_column,
        records = series.len(),
        "series normalized"
    );
    Ok(series)
}
