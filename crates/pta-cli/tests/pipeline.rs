//! Integration tests for the analysis session and pipeline stages.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use pta_cli::pipeline::{ingest, load, write_chart_json, write_report};
use pta_cli::session::AnalysisSession;
use pta_ingest::read_csv_bytes;
use pta_model::{AnalysisError, ChartEmbedding, ColumnRole, SmaWindow};
use pta_report::{
    ChartError, ChartImage, ChartRenderer, ChartSpec, PlottersRenderer, ReportOptions,
};

const SCENARIO_CSV: &str = "Date,Price\n2024-01-01,100\n2024-01-03,102\n2024-01-02,101\n";

fn window(size: usize) -> SmaWindow {
    SmaWindow::new(size).unwrap()
}

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn loaded_session(csv: &str) -> AnalysisSession {
    let mut session = AnalysisSession::new(ReportOptions::default());
    session
        .load_table(read_csv_bytes(csv.as_bytes()).unwrap())
        .expect("load");
    session
}

struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&self, _spec: &ChartSpec, _size: (u32, u32)) -> pta_report::Result<ChartImage> {
        Err(ChartError::Draw {
            message: "renderer offline".to_string(),
        })
    }
}

#[test]
fn scenario_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "prices.csv", SCENARIO_CSV);

    let mut session = AnalysisSession::new(ReportOptions::default());
    session.set_overlay(window(2), true);
    let table = ingest(&input).unwrap();
    let series = load(&mut session, table).unwrap();

    assert_eq!(series.date_column(), "Date");
    assert_eq!(series.value_column(), "Price");
    assert_eq!(series.values(), vec![100.0, 101.0, 102.0]);

    let overlay: Vec<_> = session.overlays().collect();
    assert_eq!(overlay.len(), 1);
    assert_eq!(overlay[0].values(), &[None, Some(100.5), Some(101.5)]);

    let report = session.export_report(&PlottersRenderer::new()).unwrap();
    assert_eq!(report.chart(), &ChartEmbedding::Embedded);
    let path = write_report(&report, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "Price_Analysis_Price.pdf");
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn chart_spec_lists_base_then_overlays() {
    let mut session = loaded_session(SCENARIO_CSV);
    session.set_overlay(window(3), true);
    session.set_overlay(window(2), true);
    let spec = session.chart_spec().unwrap();
    assert_eq!(spec.title, "Trend Analysis: Price");
    insta::assert_debug_snapshot!(spec.trace_names(), @r#"
    [
        "Original Price (Price)",
        "2-day SMA",
        "3-day SMA",
    ]
    "#);
}

#[test]
fn overlay_colour_is_keyed_on_configured_window() {
    let windows: Vec<_> = [5, 50].into_iter().map(window).collect();
    let mut session = AnalysisSession::new(ReportOptions::default()).with_windows(windows);
    session
        .load_table(read_csv_bytes(SCENARIO_CSV.as_bytes()).unwrap())
        .unwrap();
    session.set_overlay(window(50), true);
    let spec = session.chart_spec().unwrap();
    assert_eq!(spec.traces[1].color.to_string(), "#ffff00");
}

#[test]
fn zero_overlays_still_produce_report() {
    let session = loaded_session(SCENARIO_CSV);
    assert_eq!(session.overlays().count(), 0);
    let report = session.export_report(&PlottersRenderer::new()).unwrap();
    assert!(report.chart().is_embedded());
    assert!(report.bytes().starts_with(b"%PDF-"));
}

#[test]
fn renderer_failure_degrades_to_placeholder() {
    let session = loaded_session(SCENARIO_CSV);
    let report = session.export_report(&FailingRenderer).unwrap();
    assert_eq!(
        report.chart(),
        &ChartEmbedding::Placeholder("chart drawing failed: renderer offline".to_string())
    );
}

#[test]
fn deselecting_discards_overlay() {
    let mut session = loaded_session(SCENARIO_CSV);
    session.set_overlay(window(2), true);
    assert_eq!(session.overlays().count(), 1);
    session.set_overlay(window(2), false);
    assert_eq!(session.overlays().count(), 0);
    assert!(!session.is_enabled(window(2)));
}

#[test]
fn new_upload_replaces_series_and_recomputes_overlays() {
    let mut session = loaded_session(SCENARIO_CSV);
    session.set_overlay(window(2), true);

    let replacement = "Timestamp,Close\n2024-02-01,10\n2024-02-02,20\n2024-02-03,30\n";
    session
        .load_table(read_csv_bytes(replacement.as_bytes()).unwrap())
        .unwrap();

    let series = session.series().unwrap();
    assert_eq!(series.value_column(), "Close");
    let overlays: Vec<_> = session.overlays().collect();
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].values(), &[None, Some(15.0), Some(25.0)]);
}

#[test]
fn failed_upload_leaves_session_empty() {
    let mut session = loaded_session(SCENARIO_CSV);
    let broken = "Date,Price\n2024-01-01,100\n2024-01-02,N/A\n";
    let err = session
        .load_table(read_csv_bytes(broken.as_bytes()).unwrap())
        .unwrap_err();
    assert!(matches!(err, AnalysisError::ValueParse { row: 2, .. }));
    assert!(session.series().is_none());
    assert!(session.table().is_none());

    let err = session.export_report(&PlottersRenderer::new()).unwrap_err();
    assert!(matches!(err, AnalysisError::ReportBuild { .. }));
}

#[test]
fn missing_value_column_is_reported() {
    let mut session = AnalysisSession::new(ReportOptions::default());
    let csv = "Date,Volume\n2024-01-01,5\n";
    let err = session
        .load_table(read_csv_bytes(csv.as_bytes()).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::MissingColumn {
            role: ColumnRole::Value,
            ..
        }
    ));
}

#[test]
fn chart_json_is_written() {
    let dir = TempDir::new().unwrap();
    let mut session = loaded_session(SCENARIO_CSV);
    session.set_overlay(window(2), true);
    let path = dir.path().join("chart.json");
    write_chart_json(&session.chart_spec().unwrap(), &path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["title"], "Trend Analysis: Price");
    assert_eq!(json["traces"][0]["color"], "#00d1ff");
    assert_eq!(json["traces"][1]["points"][0]["y"], serde_json::Value::Null);
    assert_eq!(json["traces"][1]["points"][1]["y"], 100.5);
}
