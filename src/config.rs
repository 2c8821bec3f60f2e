use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::Colormap;

/// File looked up in the working directory for overrides.
pub const CONFIG_FILE: &str = "tube.json";

// ---------------------------------------------------------------------------
// Top-level configuration
// ---------------------------------------------------------------------------

/// Everything a run can be tuned with. Every field has a default, so an
/// absent or partial `tube.json` is fine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub charts: ChartConfig,
}

impl AppConfig {
    /// Read the config at `path`, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Where the station table lives and how its columns are laid out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Worksheet name; ignored for CSV and Parquet sources.
    pub sheet: String,
    /// Rows skipped before the first station row.
    pub header_rows: usize,
    pub columns: ColumnLayout,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tube02.xls"),
            sheet: "2014 Entry & Exit".to_string(),
            header_rows: 1,
            columns: ColumnLayout::default(),
        }
    }
}

/// Zero-based positions of the columns we read. The schema is positional:
/// header text is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub name: usize,
    pub weekday: usize,
    pub saturday: usize,
    pub sunday: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            name: 0,
            weekday: 2,
            saturday: 3,
            sunday: 4,
        }
    }
}

impl ColumnLayout {
    /// Highest column index the layout touches.
    pub fn max_index(&self) -> usize {
        self.name.max(self.weekday).max(self.saturday).max(self.sunday)
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Bar width as a fraction of the spacing between stations.
    pub bar_width: f64,
    /// Window width granted to each station on the bar chart.
    pub station_width_px: f32,
    pub min_width_px: f32,
    pub figure_height_px: f32,
    pub pie_size_px: f32,
    /// Angle of the first wedge edge, counter-clockwise from the +x axis.
    pub start_angle_deg: f64,
    pub colormap: Colormap,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: 0.25,
            station_width_px: 100.0,
            min_width_px: 400.0,
            figure_height_px: 1000.0,
            pie_size_px: 1000.0,
            start_angle_deg: 160.0,
            colormap: Colormap::Prism,
        }
    }
}
