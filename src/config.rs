//! Run configuration
//!
//! Everything the map depends on is fixed at compile time. The constants are
//! grouped into [`HeatmapConfig`] so each pipeline stage receives them as an
//! explicit argument instead of reading globals.

use std::path::PathBuf;

/// Draw the hand-built legend boxes and labels
pub const DRAW_LEGEND: bool = true;

/// Font size for the per-country count labels
pub const LABEL_FONT_SIZE: f64 = 13.0;

/// Width and height of the (square) figure, in pixels
pub const FIG_SIZE: u32 = 1000;

/// Five-step teal gradient, light to dark
pub const GRADIENT: [&str; 5] = [
    "rgb(190, 226, 222)",
    "rgb(108, 200, 197)",
    "rgb(27, 173, 172)",
    "rgb(14, 133, 136)",
    "rgb(0, 93, 100)",
];

/// Outline accent for priority tier 1
pub const RED: &str = "rgb(250, 86, 93)";

/// Outline accent for priority tier 2
pub const ORANGE: &str = "rgb(247, 150, 70)";

pub const COUNTRIES_PATH: &str = "countries.csv";
pub const PROJECTS_PATH: &str = "projects_anon.csv";
pub const HTML_PATH: &str = "temp-plot.html";
pub const PNG_PATH: &str = "project_counts_heatmap.png";

/// Geographic scope passed to the map projection
pub const MAP_SCOPE: &str = "africa";

pub const TITLE: &str = "Number of projects, by country";

/// Column names of the reference table
#[derive(Debug, Clone)]
pub struct ReferenceColumns {
    pub country: String,
    pub code: String,
    pub priority: String,
}

impl Default for ReferenceColumns {
    fn default() -> Self {
        Self {
            country: "country".to_string(),
            code: "code".to_string(),
            priority: "priority".to_string(),
        }
    }
}

/// Column names of the project roster
#[derive(Debug, Clone)]
pub struct ProjectColumns {
    pub country: String,
    pub engagement: String,
}

impl Default for ProjectColumns {
    fn default() -> Self {
        Self {
            country: "Country".to_string(),
            engagement: "Level of engagement".to_string(),
        }
    }
}

/// Legend placement, in paper coordinates
#[derive(Debug, Clone)]
pub struct LegendConfig {
    pub enabled: bool,
    /// Left edge of the legend boxes
    pub x0: f64,
    /// Vertical position of the legend title
    pub y0: f64,
    /// Distance between legend rows
    pub y_step: f64,
    /// Horizontal gap between a box and its label
    pub x_pad: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: DRAW_LEGEND,
            x0: 0.2,
            y0: 0.45,
            y_step: 0.03,
            x_pad: 0.03,
        }
    }
}

/// Colors used by the map layers
#[derive(Debug, Clone)]
pub struct ColorConfig {
    pub gradient: [String; 5],
    pub red: String,
    pub orange: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            gradient: GRADIENT.map(str::to_string),
            red: RED.to_string(),
            orange: ORANGE.to_string(),
        }
    }
}

/// Everything a run needs, built once at startup
#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    pub countries_path: PathBuf,
    pub projects_path: PathBuf,
    pub html_path: PathBuf,
    pub png_path: PathBuf,
    pub reference_columns: ReferenceColumns,
    pub project_columns: ProjectColumns,
    pub legend: LegendConfig,
    pub colors: ColorConfig,
    pub label_font_size: f64,
    pub fig_size: u32,
    pub scope: String,
    pub title: String,
    /// Open the HTML page in the default browser after writing it
    pub auto_open: bool,
    /// Executable used for the PNG export
    pub kaleido_path: PathBuf,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            countries_path: PathBuf::from(COUNTRIES_PATH),
            projects_path: PathBuf::from(PROJECTS_PATH),
            html_path: PathBuf::from(HTML_PATH),
            png_path: PathBuf::from(PNG_PATH),
            reference_columns: ReferenceColumns::default(),
            project_columns: ProjectColumns::default(),
            legend: LegendConfig::default(),
            colors: ColorConfig::default(),
            label_font_size: LABEL_FONT_SIZE,
            fig_size: FIG_SIZE,
            scope: MAP_SCOPE.to_string(),
            title: TITLE.to_string(),
            auto_open: true,
            kaleido_path: PathBuf::from("kaleido"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = HeatmapConfig::default();
        assert_eq!(config.fig_size, 1000);
        assert_eq!(config.label_font_size, 13.0);
        assert!(config.legend.enabled);
        assert_eq!(config.colors.gradient[0], "rgb(190, 226, 222)");
        assert_eq!(config.colors.gradient[4], "rgb(0, 93, 100)");
        assert_eq!(config.png_path, PathBuf::from("project_counts_heatmap.png"));
    }
}
