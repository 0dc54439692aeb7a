//! TOML configuration.
//!
//! ```toml
//! output_dir = "reports"
//!
//! [overlays]
//! windows = [10, 20, 30]
//! enabled = [20]
//!
//! [report]
//! tail_rows = 5
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use pta_model::SmaWindow;
use pta_report::{DEFAULT_TAIL_ROWS, MAX_TAIL_ROWS, ReportOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Where reports and charts are written. Defaults to the input's folder.
    pub output_dir: Option<PathBuf>,
    pub overlays: OverlayConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Windows offered as toggles.
    pub windows: Vec<SmaWindow>,
    /// Windows switched on at start.
    pub enabled: Vec<SmaWindow>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            windows: SmaWindow::defaults(),
            enabled: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub tail_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tail_rows: DEFAULT_TAIL_ROWS,
        }
    }
}

impl ReportConfig {
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            tail_rows: self.tail_rows,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.overlays.windows.is_empty() {
            bail!("overlays.windows must list at least one window");
        }
        if self.report.tail_rows > MAX_TAIL_ROWS {
            bail!(
                "report.tail_rows must be at most {MAX_TAIL_ROWS}, got {}",
                self.report.tail_rows
            );
        }
        Ok(())
    }

    /// Load `path` if given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
