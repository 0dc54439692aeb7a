//! Page layout of the analysis report.
//!
//! The layout is computed as plain data (text lines and an image slot) so it
//! can be inspected without decoding a PDF. Coordinates are PDF points from
//! the bottom-left corner of a Letter page.

use serde::Serialize;

use pta_model::{AnalysisError, ChartEmbedding, NormalizedSeries, Result};
use pta_transform::{format_iso8601_date, format_thousands};

pub const REPORT_TITLE: &str = "Interactive Price Analysis Report";

/// Tail rows listed when nothing else is configured.
pub const DEFAULT_TAIL_ROWS: usize = 5;

/// Tail rows that still fit above the bottom margin.
pub const MAX_TAIL_ROWS: usize = 15;

const LEFT: f32 = 100.0;
const TAIL_LEFT: f32 = 120.0;
const TAIL_TOP: f32 = 280.0;
const TAIL_STEP: f32 = 18.0;

/// Where the chart image goes.
pub const CHART_SLOT: ImageSlot = ImageSlot {
    x: 50.0,
    y: 330.0,
    width: 500.0,
    height: 300.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub face: FontFace,
}

impl TextLine {
    fn new(text: impl Into<String>, x: f32, y: f32, size: f32, face: FontFace) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            face,
        }
    }
}

/// Rectangle for an embedded image, lower-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageSlot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Most recent records listed at the bottom of the page.
    pub tail_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            tail_rows: DEFAULT_TAIL_ROWS,
        }
    }
}

/// Positioned page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLayout {
    pub lines: Vec<TextLine>,
    pub chart_slot: Option<ImageSlot>,
}

impl ReportLayout {
    /// Text lines joined by newlines, top to bottom.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `Date: 2024-01-03 | Price: 1,234.50`
pub fn tail_row_text(date: chrono::NaiveDateTime, value: f64) -> String {
    format!(
        "Date: {} | Price: {}",
        format_iso8601_date(date),
        format_thousands(value, 2)
    )
}

/// Lay out the report page.
///
/// The chart slot is reserved only for [`ChartEmbedding::Embedded`]; a
/// placeholder becomes a text line where the chart would sit.
///
/// # Errors
///
/// `ReportBuild` when the series has no records.
pub fn layout_report(
    series: &NormalizedSeries,
    value_label: &str,
    chart: &ChartEmbedding,
    options: ReportOptions,
) -> Result<ReportLayout> {
    let latest = series
        .latest()
        .ok_or_else(|| AnalysisError::report("series has no records"))?;

    let mut lines = vec![
        TextLine::new(REPORT_TITLE, LEFT, 750.0, 16.0, FontFace::Bold),
        TextLine::new(
            format!("Data Column: {value_label}"),
            LEFT,
            725.0,
            12.0,
            FontFace::Regular,
        ),
        TextLine::new(
            format!(
                "Latest Value: {} ({})",
                format_thousands(latest.value, 2),
                format_iso8601_date(latest.date)
            ),
            LEFT,
            710.0,
            12.0,
            FontFace::Regular,
        ),
    ];

    let chart_slot = match chart {
        ChartEmbedding::Embedded => Some(CHART_SLOT),
        ChartEmbedding::Placeholder(message) => {
            lines.push(TextLine::new(
                format!("(Chart image error: {message})"),
                LEFT,
                450.0,
                12.0,
                FontFace::Regular,
            ));
            None
        }
        ChartEmbedding::Omitted => None,
    };

    lines.push(TextLine::new(
        "Recent Data Summary:",
        LEFT,
        300.0,
        12.0,
        FontFace::Bold,
    ));
    let mut y = TAIL_TOP;
    for record in series.tail(options.tail_rows.min(MAX_TAIL_ROWS)) {
        lines.push(TextLine::new(
            tail_row_text(record.date, record.value),
            TAIL_LEFT,
            y,
            10.0,
            FontFace::Regular,
        ));
        y -= TAIL_STEP;
    }

    Ok(ReportLayout { lines, chart_slot })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pta_model::SeriesRecord;

    use super::*;

    fn series(count: u32) -> NormalizedSeries {
        let records = (1..=count)
            .map(|day| SeriesRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, day)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                value: 1000.0 + f64::from(day) * 10.5,
            })
            .collect();
        NormalizedSeries::new("Date", "Price", records)
    }

    fn tail_lines(layout: &ReportLayout) -> Vec<&TextLine> {
        layout
            .lines
            .iter()
            .filter(|line| line.text.starts_with("Date: "))
            .collect()
    }

    #[test]
    fn tail_lists_at_most_five_most_recent_first() {
        let layout = layout_report(
            &series(8),
            "Price",
            &ChartEmbedding::Omitted,
            ReportOptions::default(),
        )
        .unwrap();
        let tail = tail_lines(&layout);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].text, "Date: 2024-01-08 | Price: 1,084.00");
        assert_eq!(tail[4].text, "Date: 2024-01-04 | Price: 1,042.00");
        let ys: Vec<f32> = tail.iter().map(|line| line.y).collect();
        assert_eq!(ys, vec![280.0, 262.0, 244.0, 226.0, 208.0]);
    }

    #[test]
    fn short_series_is_not_padded() {
        let layout = layout_report(
            &series(2),
            "Price",
            &ChartEmbedding::Embedded,
            ReportOptions::default(),
        )
        .unwrap();
        assert_eq!(tail_lines(&layout).len(), 2);
        assert_eq!(layout.chart_slot, Some(CHART_SLOT));
    }

    #[test]
    fn placeholder_replaces_chart_slot() {
        let layout = layout_report(
            &series(1),
            "Price",
            &ChartEmbedding::Placeholder("no renderer".into()),
            ReportOptions::default(),
        )
        .unwrap();
        assert!(layout.chart_slot.is_none());
        let placeholder = layout
            .lines
            .iter()
            .find(|line| line.y == 450.0)
            .expect("placeholder line");
        assert_eq!(placeholder.text, "(Chart image error: no renderer)");
    }

    #[test]
    fn tail_rows_are_capped() {
        let options = ReportOptions { tail_rows: 40 };
        let layout = layout_report(&series(20), "Price", &ChartEmbedding::Omitted, options).unwrap();
        assert_eq!(tail_lines(&layout).len(), MAX_TAIL_ROWS);
    }

    #[test]
    fn empty_series_fails() {
        let empty = NormalizedSeries::new("Date", "Price", Vec::new());
        let err = layout_report(
            &empty,
            "Price",
            &ChartEmbedding::Omitted,
            ReportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::ReportBuild { .. }));
    }
}
