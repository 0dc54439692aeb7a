use std::path::PathBuf;

use pta_model::{ChartEmbedding, SeriesRecord};

#[derive(Debug)]
pub struct AnalyzeResult {
    pub input: PathBuf,
    pub date_column: String,
    pub value_column: String,
    pub records: usize,
    pub first: Option<SeriesRecord>,
    pub latest: Option<SeriesRecord>,
    pub overlays: Vec<OverlaySummary>,
    pub tail: Vec<SeriesRecord>,
    pub chart: Option<ChartEmbedding>,
    pub chart_path: Option<PathBuf>,
    pub chart_json_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct OverlaySummary {
    pub name: String,
    pub defined: usize,
    pub last: Option<f64>,
}
