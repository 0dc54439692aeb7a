//! PDF report assembly.

use printpdf::image_crate::{self, DynamicImage, ImageFormat};
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument, Pt};
use tracing::{debug, info, warn};

use pta_model::{
    AnalysisError, ChartEmbedding, LETTER_PAGE_POINTS, NormalizedSeries, ReportDocument, Result,
    report_file_name,
};

use crate::chart::ChartImage;
use crate::error::ChartError;
use crate::layout::{FontFace, REPORT_TITLE, ReportLayout, ReportOptions, layout_report};

/// Chart input to the report.
#[derive(Debug, Clone)]
pub enum ChartAttachment {
    /// A rendered PNG to embed.
    Rendered(ChartImage),
    /// Rendering failed with this message.
    Unavailable(String),
    /// No chart requested.
    Absent,
}

impl From<std::result::Result<ChartImage, ChartError>> for ChartAttachment {
    fn from(result: std::result::Result<ChartImage, ChartError>) -> Self {
        match result {
            Ok(image) => Self::Rendered(image),
            Err(err) => Self::Unavailable(err.to_string()),
        }
    }
}

/// Build the single-page report for `series`.
///
/// A chart that cannot be decoded is replaced by a placeholder line and the
/// report is still produced; the outcome is recorded on the returned
/// document.
///
/// # Errors
///
/// `ReportBuild` for an empty series or when the PDF cannot be written.
pub fn build_report(
    series: &NormalizedSeries,
    value_label: &str,
    chart: ChartAttachment,
    options: ReportOptions,
) -> Result<ReportDocument> {
    if series.is_empty() {
        return Err(AnalysisError::report("series has no records"));
    }

    let (embedding, image) = match chart {
        ChartAttachment::Rendered(rendered) => match decode_chart(&rendered) {
            Ok(image) => (ChartEmbedding::Embedded, Some(image)),
            Err(message) => {
                warn!(%message, "chart image could not be decoded");
                (ChartEmbedding::Placeholder(message), None)
            }
        },
        ChartAttachment::Unavailable(message) => {
            debug!(%message, "chart image unavailable");
            (ChartEmbedding::Placeholder(message), None)
        }
        ChartAttachment::Absent => (ChartEmbedding::Omitted, None),
    };

    let layout = layout_report(series, value_label, &embedding, options)?;
    debug!(lines = layout.lines.len(), "report layout computed");

    let bytes = render_pdf(&layout, image.as_ref())?;

    let file_name = report_file_name(value_label);
    info!(
        file_name = %file_name,
        bytes = bytes.len(),
        chart_embedded = embedding.is_embedded(),
        "report built"
    );
    Ok(ReportDocument::new(file_name, bytes, embedding))
}

fn decode_chart(chart: &ChartImage) -> std::result::Result<DynamicImage, String> {
    image_crate::load_from_memory_with_format(chart.png(), ImageFormat::Png)
        .map_err(|err| err.to_string())
}

fn points(value: f32) -> Mm {
    Mm::from(Pt(value))
}

fn pdf_error(err: &impl std::fmt::Display) -> AnalysisError {
    AnalysisError::report(format!("pdf write failed: {err}"))
}

fn render_pdf(layout: &ReportLayout, chart: Option<&DynamicImage>) -> Result<Vec<u8>> {
    let (page_width, page_height) = LETTER_PAGE_POINTS;
    let (doc, page, layer) = PdfDocument::new(
        REPORT_TITLE,
        points(page_width),
        points(page_height),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| pdf_error(&err))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| pdf_error(&err))?;

    for line in &layout.lines {
        let font = match line.face {
            FontFace::Regular => &regular,
            FontFace::Bold => &bold,
        };
        layer.use_text(
            line.text.as_str(),
            line.size,
            points(line.x),
            points(line.y),
            font,
        );
    }

    if let (Some(slot), Some(image)) = (layout.chart_slot, chart) {
        // At 72 dpi one pixel is one point; scale to the slot.
        let transform = ImageTransform {
            translate_x: Some(points(slot.x)),
            translate_y: Some(points(slot.y)),
            scale_x: Some(slot.width / image.width() as f32),
            scale_y: Some(slot.height / image.height() as f32),
            dpi: Some(72.0),
            ..Default::default()
        };
        Image::from_dynamic_image(image).add_to_layer(layer, transform);
    }

    doc.save_to_bytes().map_err(|err| pdf_error(&err))
}
