//! Analysis pipeline stages.
//!
//! 1. **Ingest**: read the CSV into a raw table
//! 2. **Load**: resolve columns and normalize into the session
//! 3. **Chart**: render the PNG and the trace contract
//! 4. **Report**: assemble and write the PDF
//!
//! Stages log their counts and durations; the session holds state between
//! them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use pta_ingest::read_csv_table;
use pta_model::{NormalizedSeries, RawTable, ReportDocument};
use pta_report::{ChartImage, ChartSpec};

use crate::logging::redact_value;
use crate::session::AnalysisSession;

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Read `path` into a raw table.
pub fn ingest(path: &Path) -> Result<RawTable> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_csv_table(path).with_context(|| format!("read {}", path.display()))?;
    if let Some(first) = table.rows().first() {
        trace!(
            cells = ?first.iter().map(|cell| redact_value(cell)).collect::<Vec<_>>(),
            "first data row"
        );
    }
    info!(
        columns = table.headers().len(),
        rows = table.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}

// ============================================================================
// Stage 2: Load
// ============================================================================

/// Load `table` into the session, replacing any earlier upload.
pub fn load(session: &mut AnalysisSession, table: RawTable) -> Result<&NormalizedSeries> {
    let span = info_span!("normalize", rows = table.row_count());
    let _guard = span.enter();
    let start = Instant::now();

    let series = session.load_table(table)?;
    info!(
        records = series.len(),
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    Ok(series)
}

// ============================================================================
// Stage 3-4: Outputs
// ============================================================================

/// Directory outputs go to: `configured`, else the input's parent.
pub fn output_dir_for(input: &Path, configured: Option<&Path>) -> PathBuf {
    configured.map_or_else(
        || {
            input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

pub fn write_chart_png(image: &ChartImage, path: &Path) -> Result<()> {
    fs::write(path, image.png()).with_context(|| format!("write chart {}", path.display()))?;
    info!(path = %path.display(), "chart image written");
    Ok(())
}

pub fn write_chart_json(spec: &ChartSpec, path: &Path) -> Result<()> {
    let json = spec.to_json().context("serialize chart traces")?;
    fs::write(path, json).with_context(|| format!("write chart traces {}", path.display()))?;
    info!(path = %path.display(), traces = spec.traces.len(), "chart traces written");
    Ok(())
}

/// Write `report` into `dir` under its own file name.
pub fn write_report(report: &ReportDocument, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(report.file_name());
    fs::write(&path, report.bytes()).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = report.bytes().len(), "report written");
    Ok(path)
}
