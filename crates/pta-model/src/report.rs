use serde::Serialize;

/// MIME type of the rendered report.
pub const REPORT_MIME_TYPE: &str = "application/pdf";

/// Page size of the report in PDF points (US Letter).
pub const LETTER_PAGE_POINTS: (f32, f32) = (612.0, 792.0);

/// Pixel dimensions of the chart image embedded in the report.
pub const CHART_IMAGE_SIZE: (u32, u32) = (600, 350);

/// How the chart ended up in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ChartEmbedding {
    /// The chart image was placed on the page.
    Embedded,
    /// The image could not be produced or decoded; a text line stands in.
    Placeholder(String),
    /// No chart was supplied.
    Omitted,
}

impl ChartEmbedding {
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded)
    }
}

/// A finished report, owned by the caller.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    file_name: String,
    bytes: Vec<u8>,
    chart: ChartEmbedding,
}

impl ReportDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, chart: ChartEmbedding) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            chart,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        REPORT_MIME_TYPE
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn chart(&self) -> &ChartEmbedding {
        &self.chart
    }
}

/// File name for a report about `value_column`: `Price_Analysis_<column>.pdf`.
///
/// Characters other than ASCII alphanumerics, `-` and `_` become `_`.
pub fn report_file_name(value_column: &str) -> String {
    let sanitized: String = value_column
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    let stem = if sanitized.is_empty() {
        "Series".to_string()
    } else {
        sanitized
    };
    format!("Price_Analysis_{stem}.pdf")
}
