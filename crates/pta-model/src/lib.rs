//! Data model for price trend analysis.
//!
//! - **table**: untyped table as read from the input file
//! - **series**: resolved columns and the typed, date-sorted series
//! - **overlay**: moving-average windows and their derived values
//! - **report**: the finished report document and chart embedding status
//! - **error**: the pipeline error taxonomy

pub mod error;
pub mod overlay;
pub mod report;
pub mod series;
pub mod table;

pub use error::{AnalysisError, ColumnRole, Result, TableError};
pub use overlay::{DEFAULT_SMA_WINDOWS, DerivedOverlay, SmaWindow};
pub use report::{
    CHART_IMAGE_SIZE, ChartEmbedding, LETTER_PAGE_POINTS, REPORT_MIME_TYPE, ReportDocument,
    report_file_name,
};
pub use series::{NormalizedSeries, ResolvedColumns, SeriesRecord};
pub use table::RawTable;
