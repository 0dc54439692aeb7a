use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ColumnRole, Result};

/// Column names chosen by the resolver. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumns {
    pub date: Option<String>,
    pub value: Option<String>,
}

impl ResolvedColumns {
    /// Both names, or `MissingColumn` for the first absent role (date first).
    pub fn require(&self, available: &[String]) -> Result<(&str, &str)> {
        let Some(date) = self.date.as_deref() else {
            return Err(AnalysisError::MissingColumn {
                role: ColumnRole::Date,
                available: available.to_vec(),
            });
        };
        let Some(value) = self.value.as_deref() else {
            return Err(AnalysisError::MissingColumn {
                role: ColumnRole::Value,
                available: available.to_vec(),
            });
        };
        Ok((date, value))
    }

    pub fn role_of(&self, column: &str) -> Option<ColumnRole> {
        if self.date.as_deref() == Some(column) {
            Some(ColumnRole::Date)
        } else if self.value.as_deref() == Some(column) {
            Some(ColumnRole::Value)
        } else {
            None
        }
    }
}

/// One observation of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub date: NaiveDateTime,
    pub value: f64,
}

/// Typed observations sorted ascending by date.
///
/// The sort is stable: records sharing a timestamp keep their input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    date_column: String,
    value_column: String,
    records: Vec<SeriesRecord>,
}

impl NormalizedSeries {
    pub fn new(
        date_column: impl Into<String>,
        value_column: impl Into<String>,
        mut records: Vec<SeriesRecord>,
    ) -> Self {
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            date_column: date_column.into(),
            value_column: value_column.into(),
            records,
        }
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    pub fn records(&self) -> &[SeriesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.records.iter().map(|record| record.date)
    }

    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.value).collect()
    }

    /// The most recent record.
    pub fn latest(&self) -> Option<&SeriesRecord> {
        self.records.last()
    }

    /// Up to `count` records, most recent first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &SeriesRecord> + '_ {
        self.records.iter().rev().take(count)
    }

    /// First and last timestamps.
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_sorts_stably() {
        let series = NormalizedSeries::new(
            "Date",
            "Price",
            vec![
                SeriesRecord { date: at(2), value: 1.0 },
                SeriesRecord { date: at(1), value: 2.0 },
                SeriesRecord { date: at(2), value: 3.0 },
                SeriesRecord { date: at(1), value: 4.0 },
            ],
        );
        let values = series.values();
        assert_eq!(values, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn tail_is_most_recent_first() {
        let records = (1..=3)
            .map(|day| SeriesRecord {
                date: at(day),
                value: f64::from(day),
            })
            .collect();
        let series = NormalizedSeries::new("Date", "Price", records);
        let tail: Vec<f64> = series.tail(5).map(|r| r.value).collect();
        assert_eq!(tail, vec![3.0, 2.0, 1.0]);
        assert_eq!(series.latest().map(|r| r.value), Some(3.0));
        assert_eq!(series.date_range(), Some((at(1), at(3))));
    }

    #[test]
    fn require_reports_first_missing_role() {
        let columns = ResolvedColumns {
            date: None,
            value: None,
        };
        let err = columns.require(&["A".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingColumn {
                role: ColumnRole::Date,
                ..
            }
        ));

        let columns = ResolvedColumns {
            date: Some("Date".to_string()),
            value: None,
        };
        let err = columns.require(&[]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingColumn {
                role: ColumnRole::Value,
                ..
            }
        ));
    }
}
