use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{debug, info, info_span};

use pta_cli::config::{AppConfig, OverlayConfig};
use pta_cli::pipeline::{
    ingest, load, output_dir_for, write_chart_json, write_chart_png, write_report,
};
use pta_cli::session::AnalysisSession;
use pta_model::{ColumnRole, SmaWindow};
use pta_report::{ChartAttachment, PlottersRenderer};
use pta_transform::resolve_columns;

use crate::cli::{AnalyzeArgs, ColumnsArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};
use crate::types::{AnalyzeResult, OverlaySummary};

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let table = ingest(&args.input)?;
    let resolved = resolve_columns(table.headers());

    let mut listing = Table::new();
    listing.set_header(vec![header_cell("#"), header_cell("Column"), header_cell("Role")]);
    apply_table_style(&mut listing);
    for (idx, name) in table.headers().iter().enumerate() {
        let role = match resolved.role_of(name) {
            Some(role) => Cell::new(role),
            None => dim_cell("-"),
        };
        listing.add_row(vec![Cell::new(idx + 1), Cell::new(name), role]);
    }
    println!("{listing}");

    for role in [ColumnRole::Date, ColumnRole::Value] {
        let found = match role {
            ColumnRole::Date => resolved.date.is_some(),
            ColumnRole::Value => resolved.value.is_some(),
        };
        if !found {
            println!(
                "No {role} column: no column name contains {}.",
                role.keyword_hint()
            );
        }
    }
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let analyze_span = info_span!("analyze", input = %args.input.display());
    let _analyze_guard = analyze_span.enter();

    // =========================================================================
    // Stage 0: Configuration and overlay toggles
    // =========================================================================
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let output_dir = output_dir_for(
        &args.input,
        args.output_dir.as_deref().or(config.output_dir.as_deref()),
    );
    let mut session = AnalysisSession::new(config.report.options())
        .with_windows(config.overlays.windows.clone());
    for window in selected_windows(args, &config.overlays) {
        session.set_overlay(window, true);
    }

    // =========================================================================
    // Stage 1-2: Ingest and normalize
    // =========================================================================
    let table = ingest(&args.input)?;
    load(&mut session, table)?;
    let series = session.series().context("series missing after load")?;

    let overlay_span = info_span!("overlay", count = session.overlays().count());
    let overlays: Vec<OverlaySummary> = overlay_span.in_scope(|| {
        session
            .overlays()
            .map(|overlay| {
                let defined = overlay.values().iter().flatten().count();
                debug!(window = overlay.window().get(), defined, "overlay ready");
                OverlaySummary {
                    name: overlay.name(),
                    defined,
                    last: overlay.last_defined(),
                }
            })
            .collect()
    });

    // =========================================================================
    // Stage 3: Chart
    // =========================================================================
    let chart_span = info_span!("chart");
    let chart_start = Instant::now();
    let wants_chart = args.chart.is_some() || !args.no_report;
    let attachment = chart_span.in_scope(|| -> Result<ChartAttachment> {
        if let Some(path) = &args.chart_json {
            let spec = session.chart_spec().context("series missing for chart")?;
            write_chart_json(&spec, path)?;
        }
        if !wants_chart {
            return Ok(ChartAttachment::Absent);
        }
        let attachment = session.render_chart(&PlottersRenderer::new())?;
        if let (Some(path), ChartAttachment::Rendered(image)) = (&args.chart, &attachment) {
            write_chart_png(image, path)?;
        }
        Ok(attachment)
    })?;
    info!(
        duration_ms = chart_start.elapsed().as_millis(),
        rendered = matches!(attachment, ChartAttachment::Rendered(_)),
        "chart complete"
    );
    let chart_path = match &attachment {
        ChartAttachment::Rendered(_) => args.chart.clone(),
        _ => None,
    };

    // =========================================================================
    // Stage 4: Report
    // =========================================================================
    let (report_path, chart) = if args.no_report {
        (None, None)
    } else {
        let report_span = info_span!("report", output_dir = %output_dir.display());
        let report_start = Instant::now();
        let (path, embedding) = report_span.in_scope(|| -> Result<_> {
            let report = session.build_report(attachment)?;
            let path = write_report(&report, &output_dir)?;
            Ok((path, report.chart().clone()))
        })?;
        info!(
            duration_ms = report_start.elapsed().as_millis(),
            "report complete"
        );
        (Some(path), Some(embedding))
    };

    Ok(AnalyzeResult {
        input: args.input.clone(),
        date_column: series.date_column().to_string(),
        value_column: series.value_column().to_string(),
        records: series.len(),
        first: series.records().first().copied(),
        latest: series.latest().copied(),
        overlays,
        tail: series
            .tail(config.report.tail_rows)
            .copied()
            .collect(),
        chart,
        chart_path,
        chart_json_path: args.chart_json.clone(),
        report_path,
    })
}

/// Windows from `--sma`, `--all-sma` and the configured start set.
fn selected_windows(args: &AnalyzeArgs, overlays: &OverlayConfig) -> BTreeSet<SmaWindow> {
    let mut windows: BTreeSet<SmaWindow> = overlays.enabled.iter().copied().collect();
    if args.all_sma {
        windows.extend(overlays.windows.iter().copied());
    }
    windows.extend(args.sma.iter().copied());
    windows
}
