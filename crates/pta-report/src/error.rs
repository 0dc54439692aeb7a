//! Error types for chart rendering.

use thiserror::Error;

/// Errors raised while rendering a chart image.
///
/// These never abort a report: the assembler turns them into a placeholder
/// line on the page.
#[derive(Debug, Error)]
pub enum ChartError {
    /// There is nothing to plot.
    #[error("chart has no data points")]
    NoData,

    /// Requested image dimensions are unusable.
    #[error("invalid chart size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// The drawing backend failed.
    #[error("chart drawing failed: {message}")]
    Draw { message: String },

    /// PNG encoding failed.
    #[error("chart encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl ChartError {
    pub(crate) fn draw(err: &impl std::fmt::Display) -> Self {
        Self::Draw {
            message: err.to_string(),
        }
    }
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
