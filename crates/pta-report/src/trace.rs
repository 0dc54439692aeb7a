//! Chart trace contract handed to chart renderers.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use pta_model::{DerivedOverlay, NormalizedSeries, SmaWindow};

/// Colour of the raw price trace.
pub const BASE_TRACE_COLOR: TraceColor = TraceColor(0x00, 0xd1, 0xff);

/// Overlay colours, keyed on a window's position in the configured window
/// set and cycled.
pub const OVERLAY_COLORS: [TraceColor; 3] = [
    TraceColor(0x00, 0x80, 0x00),
    TraceColor(0xff, 0xff, 0x00),
    TraceColor(0xff, 0x00, 0x00),
];

const BASE_TRACE_WIDTH: f32 = 2.0;
const OVERLAY_TRACE_WIDTH: f32 = 1.0;

/// An sRGB colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceColor(pub u8, pub u8, pub u8);

impl fmt::Display for TraceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for TraceColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dot,
}

/// One x/y sample. `y` is `None` where an overlay is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    pub x: NaiveDateTime,
    pub y: Option<f64>,
}

/// A named line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTrace {
    pub name: String,
    pub color: TraceColor,
    pub width: f32,
    pub dash: LineDash,
    pub points: Vec<TracePoint>,
}

impl ChartTrace {
    /// Maximal runs of consecutive defined points, as `(x, y)` pairs.
    pub fn segments(&self) -> Vec<Vec<(NaiveDateTime, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.y {
                Some(y) => current.push((point.x, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Everything a renderer needs to draw the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<ChartTrace>,
}

impl ChartSpec {
    /// Base trace for `series` followed by one trace per overlay, in the
    /// order given, coloured against the default window set.
    pub fn new<'a>(
        series: &NormalizedSeries,
        overlays: impl IntoIterator<Item = &'a DerivedOverlay>,
    ) -> Self {
        Self::with_windows(series, overlays, &SmaWindow::defaults())
    }

    /// Like [`ChartSpec::new`], with overlay colours keyed on each window's
    /// position in `windows`. Windows missing from `windows` take the slots
    /// after it in the order given.
    pub fn with_windows<'a>(
        series: &NormalizedSeries,
        overlays: impl IntoIterator<Item = &'a DerivedOverlay>,
        windows: &[SmaWindow],
    ) -> Self {
        let value_column = series.value_column();
        let base = ChartTrace {
            name: format!("Original Price ({value_column})"),
            color: BASE_TRACE_COLOR,
            width: BASE_TRACE_WIDTH,
            dash: LineDash::Solid,
            points: series
                .records()
                .iter()
                .map(|record| TracePoint {
                    x: record.date,
                    y: Some(record.value),
                })
                .collect(),
        };

        let mut traces = vec![base];
        let mut unlisted = 0;
        for overlay in overlays {
            let slot = match windows.iter().position(|&w| w == overlay.window()) {
                Some(position) => position,
                None => {
                    unlisted += 1;
                    windows.len() + unlisted - 1
                }
            };
            traces.push(ChartTrace {
                name: overlay.name(),
                color: OVERLAY_COLORS[slot % OVERLAY_COLORS.len()],
                width: OVERLAY_TRACE_WIDTH,
                dash: LineDash::Dot,
                points: series
                    .dates()
                    .zip(overlay.values())
                    .map(|(x, &y)| TracePoint { x, y })
                    .collect(),
            });
        }

        Self {
            title: format!("Trend Analysis: {value_column}"),
            x_label: "Date".to_string(),
            y_label: "Price".to_string(),
            traces,
        }
    }

    pub fn trace_names(&self) -> Vec<&str> {
        self.traces.iter().map(|trace| trace.name.as_str()).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
