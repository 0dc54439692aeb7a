//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pta_model::SmaWindow;

#[derive(Parser)]
#[command(
    name = "price-trend",
    version,
    about = "Price trend analysis - moving averages and PDF reports from CSV prices",
    long_about = "Analyze a CSV price series.\n\n\
                  Detects the date and price columns, overlays simple moving averages\n\
                  and exports a one-page PDF report with the trend chart."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a CSV file and export the report.
    Analyze(AnalyzeArgs),

    /// Show the columns of a CSV file and the role detected for each.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// CSV file with a date column and a price column.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Enable a moving-average overlay of N days (repeatable).
    #[arg(long = "sma", value_name = "N")]
    pub sma: Vec<SmaWindow>,

    /// Enable every configured overlay window.
    #[arg(long = "all-sma")]
    pub all_sma: bool,

    /// Output directory for the report (default: the input file's folder).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write the chart image as PNG.
    #[arg(long = "chart", value_name = "PATH")]
    pub chart: Option<PathBuf>,

    /// Also write the chart traces as JSON.
    #[arg(long = "chart-json", value_name = "PATH")]
    pub chart_json: Option<PathBuf>,

    /// Skip PDF report generation.
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// CSV file to inspect.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
