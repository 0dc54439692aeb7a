//! The single-upload analysis session.
//!
//! A session owns the current table, its normalized series and the overlay
//! cache. Loading a new table replaces all of it; overlay toggles persist
//! across loads and are recomputed for the new series.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use pta_model::{
    AnalysisError, CHART_IMAGE_SIZE, DerivedOverlay, NormalizedSeries, RawTable, ReportDocument,
    Result, SmaWindow,
};
use pta_report::{ChartAttachment, ChartRenderer, ChartSpec, ReportOptions, build_report};
use pta_transform::{OverlaySet, normalize, resolve_columns};

use crate::logging::redact_value;

#[derive(Debug, Default)]
pub struct AnalysisSession {
    table: Option<RawTable>,
    series: Option<NormalizedSeries>,
    enabled: BTreeSet<SmaWindow>,
    /// Configured window set; overlay colours are keyed on it.
    windows: Vec<SmaWindow>,
    overlays: OverlaySet,
    report_options: ReportOptions,
}

impl AnalysisSession {
    pub fn new(report_options: ReportOptions) -> Self {
        Self {
            report_options,
            windows: SmaWindow::defaults(),
            ..Self::default()
        }
    }

    /// Use `windows` as the configured window set.
    #[must_use]
    pub fn with_windows(mut self, windows: Vec<SmaWindow>) -> Self {
        self.windows = windows;
        self
    }

    /// Replace the session's data with `table`.
    ///
    /// Previous state is discarded before the new table is processed, so on
    /// failure the session holds no data.
    ///
    /// # Errors
    ///
    /// `MissingColumn` when either role cannot be resolved, `ValueParse` or
    /// `DateParse` on the first bad cell.
    pub fn load_table(&mut self, table: RawTable) -> Result<&NormalizedSeries> {
        self.table = None;
        self.series = None;
        self.overlays.clear();

        let resolved = resolve_columns(table.headers());
        let (date_column, value_column) = resolved.require(table.headers())?;
        let series = normalize(&table, date_column, value_column).inspect_err(|err| {
            if let AnalysisError::ValueParse { value, .. } | AnalysisError::DateParse { value, .. } =
                err
            {
                warn!(cell = redact_value(value), "rejected cell");
            }
        })?;
        info!(
            date_column,
            value_column,
            records = series.len(),
            "series loaded"
        );

        self.overlays.sync(&series, &self.enabled);
        self.table = Some(table);
        Ok(&*self.series.insert(series))
    }

    /// Switch the overlay for `window` on or off.
    pub fn set_overlay(&mut self, window: SmaWindow, enabled: bool) {
        if enabled {
            self.enabled.insert(window);
            if let Some(series) = &self.series {
                self.overlays.get_or_compute(series, window);
            }
        } else {
            self.enabled.remove(&window);
            self.overlays.remove(window);
        }
        debug!(window = window.get(), enabled, "overlay toggled");
    }

    pub fn is_enabled(&self, window: SmaWindow) -> bool {
        self.enabled.contains(&window)
    }

    pub fn table(&self) -> Option<&RawTable> {
        self.table.as_ref()
    }

    pub fn series(&self) -> Option<&NormalizedSeries> {
        self.series.as_ref()
    }

    /// Computed overlays in ascending window order.
    pub fn overlays(&self) -> impl Iterator<Item = &DerivedOverlay> + '_ {
        self.overlays.iter()
    }

    pub fn report_options(&self) -> ReportOptions {
        self.report_options
    }

    /// Chart traces for the loaded series and enabled overlays.
    pub fn chart_spec(&self) -> Option<ChartSpec> {
        self.series
            .as_ref()
            .map(|series| ChartSpec::with_windows(series, self.overlays.iter(), &self.windows))
    }

    /// Render the chart. A renderer failure is returned as
    /// [`ChartAttachment::Unavailable`], not as an error.
    ///
    /// # Errors
    ///
    /// `ReportBuild` when no data is loaded.
    pub fn render_chart(&self, renderer: &dyn ChartRenderer) -> Result<ChartAttachment> {
        let spec = self.chart_spec().ok_or_else(no_data)?;
        let attachment = ChartAttachment::from(renderer.render(&spec, CHART_IMAGE_SIZE));
        if let ChartAttachment::Unavailable(message) = &attachment {
            warn!(%message, "chart rendering failed");
        }
        Ok(attachment)
    }

    /// Assemble the report around an already rendered chart.
    ///
    /// # Errors
    ///
    /// `ReportBuild` when no data is loaded or the PDF cannot be written.
    pub fn build_report(&self, chart: ChartAttachment) -> Result<ReportDocument> {
        let series = self.series.as_ref().ok_or_else(no_data)?;
        build_report(series, series.value_column(), chart, self.report_options)
    }

    /// Render the chart and assemble the report.
    ///
    /// # Errors
    ///
    /// See [`AnalysisSession::build_report`].
    pub fn export_report(&self, renderer: &dyn ChartRenderer) -> Result<ReportDocument> {
        let chart = self.render_chart(renderer)?;
        self.build_report(chart)
    }
}

fn no_data() -> AnalysisError {
    AnalysisError::report("no data loaded")
}
