//! Chart and report output for price series.
//!
//! - **trace**: the chart trace contract (base series plus overlays)
//! - **chart**: the [`ChartRenderer`] seam and a bitmap implementation
//! - **layout**: report page layout as positioned text lines
//! - **pdf**: the report assembler

mod chart;
mod error;
mod layout;
mod pdf;
mod trace;

pub use chart::{CHART_BACKGROUND, ChartImage, ChartRenderer, PlottersRenderer};
pub use error::{ChartError, Result};
pub use layout::{
    CHART_SLOT, DEFAULT_TAIL_ROWS, FontFace, ImageSlot, MAX_TAIL_ROWS, REPORT_TITLE,
    ReportLayout, ReportOptions, TextLine, layout_report, tail_row_text,
};
pub use pdf::{ChartAttachment, build_report};
pub use trace::{
    BASE_TRACE_COLOR, ChartSpec, ChartTrace, LineDash, OVERLAY_COLORS, TraceColor, TracePoint,
};
