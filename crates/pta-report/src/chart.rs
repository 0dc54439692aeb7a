//! Raster chart rendering.
//!
//! Renderers draw a [`ChartSpec`] into a PNG. The bitmap renderer draws lines
//! only; titles and legends belong to the interactive view fed by the JSON
//! trace contract.

use std::io::Cursor;
use std::ops::Range;

use image::{ImageFormat, RgbImage};
use plotters::prelude::{BitMapBackend, ChartBuilder, Color, IntoDrawingArea, LineSeries, RGBColor};
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::trace::{ChartSpec, TraceColor};

/// Background of the bitmap chart.
pub const CHART_BACKGROUND: TraceColor = TraceColor(0x11, 0x11, 0x11);

/// A rendered chart image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl ChartImage {
    pub fn new(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Produces raster images of a chart.
pub trait ChartRenderer {
    fn render(&self, spec: &ChartSpec, size: (u32, u32)) -> Result<ChartImage>;
}

/// Bitmap renderer backed by `plotters`.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    background: TraceColor,
    margin: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            background: CHART_BACKGROUND,
            margin: 16,
        }
    }
}

impl PlottersRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&self, spec: &ChartSpec, buffer: &mut [u8], size: (u32, u32)) -> Result<()> {
        let (x_range, y_range) = axis_ranges(spec).ok_or(ChartError::NoData)?;

        let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
        root.fill(&rgb(self.background))
            .map_err(|e| ChartError::draw(&e))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(self.margin)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| ChartError::draw(&e))?;

        for trace in &spec.traces {
            let style = rgb(trace.color).stroke_width(stroke_px(trace.width));
            for segment in trace.segments() {
                let points = segment
                    .into_iter()
                    .map(|(x, y)| (timestamp_x(x), y));
                chart
                    .draw_series(LineSeries::new(points, style))
                    .map_err(|e| ChartError::draw(&e))?;
            }
        }

        root.present().map_err(|e| ChartError::draw(&e))?;
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, spec: &ChartSpec, size: (u32, u32)) -> Result<ChartImage> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidSize { width, height });
        }

        let mut buffer = vec![0_u8; width as usize * height as usize * 3];
        self.draw(spec, &mut buffer, size)?;

        let image = RgbImage::from_raw(width, height, buffer).ok_or(ChartError::InvalidSize {
            width,
            height,
        })?;
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;
        let png = png.into_inner();

        debug!(
            traces = spec.traces.len(),
            width,
            height,
            bytes = png.len(),
            "chart rendered"
        );
        Ok(ChartImage::new(png, width, height))
    }
}

fn rgb(color: TraceColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn stroke_px(width: f32) -> u32 {
    width.round().max(1.0) as u32
}

fn timestamp_x(value: chrono::NaiveDateTime) -> f64 {
    value.and_utc().timestamp() as f64
}

/// X and Y ranges covering every defined point, padded so that flat series
/// still span a visible range.
fn axis_ranges(spec: &ChartSpec) -> Option<(Range<f64>, Range<f64>)> {
    let mut x_bounds: Option<(f64, f64)> = None;
    let mut y_bounds: Option<(f64, f64)> = None;
    for point in spec.traces.iter().flat_map(|trace| trace.points.iter()) {
        let Some(y) = point.y else { continue };
        let x = timestamp_x(point.x);
        x_bounds = Some(x_bounds.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
        y_bounds = Some(y_bounds.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))));
    }
    let (x_min, x_max) = x_bounds?;
    let (y_min, y_max) = y_bounds?;
    Some((padded(x_min, x_max, 0.0), padded(y_min, y_max, 0.05)))
}

fn padded(min: f64, max: f64, margin: f64) -> Range<f64> {
    let span = max - min;
    if span > 0.0 {
        (min - span * margin)..(max + span * margin)
    } else {
        let pad = (min.abs() * 0.05).max(1.0);
        (min - pad)..(max + pad)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pta_model::{CHART_IMAGE_SIZE, DerivedOverlay, NormalizedSeries, SeriesRecord, SmaWindow};

    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn series(values: &[f64]) -> NormalizedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let records = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| SeriesRecord {
                date: start + chrono::Duration::days(idx as i64),
                value,
            })
            .collect();
        NormalizedSeries::new("Date", "Price", records)
    }

    #[test]
    fn renders_png_with_requested_size() {
        let base = series(&[100.0, 101.0, 102.0, 101.5]);
        let overlay = DerivedOverlay::new(
            SmaWindow::new(2).unwrap(),
            vec![None, Some(100.5), Some(101.5), Some(101.75)],
        );
        let spec = ChartSpec::new(&base, [&overlay]);

        let image = PlottersRenderer::new()
            .render(&spec, CHART_IMAGE_SIZE)
            .expect("render");
        assert_eq!(image.dimensions(), (600, 350));
        assert_eq!(image.png()[..8], PNG_SIGNATURE);

        let decoded = image::load_from_memory_with_format(image.png(), ImageFormat::Png)
            .expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (600, 350));
    }

    #[test]
    fn single_point_series_renders() {
        let spec = ChartSpec::new(&series(&[42.0]), []);
        assert!(PlottersRenderer::new().render(&spec, (64, 32)).is_ok());
    }

    #[test]
    fn empty_series_is_rejected() {
        let spec = ChartSpec::new(&series(&[]), []);
        let err = PlottersRenderer::new().render(&spec, (64, 32)).unwrap_err();
        assert!(matches!(err, ChartError::NoData));
    }

    #[test]
    fn zero_size_is_rejected() {
        let spec = ChartSpec::new(&series(&[1.0]), []);
        let err = PlottersRenderer::new().render(&spec, (0, 32)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidSize { .. }));
    }

    #[test]
    fn flat_range_is_padded() {
        assert_eq!(padded(5.0, 5.0, 0.05), 4.0..6.0);
        assert_eq!(padded(0.0, 10.0, 0.1), -1.0..11.0);
    }
}
