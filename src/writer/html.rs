//! Interactive HTML output
//!
//! Writes a standalone page that loads plotly.js from its CDN and draws the
//! figure JSON, then optionally opens it in the default browser.

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::info;

use super::{PlotlyWriter, Writer};
use crate::plot::Figure;
use crate::{HeatmapError, Result};

pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const DIV_ID: &str = "heatmap";

/// Standalone HTML page writer
#[derive(Debug, Clone)]
pub struct HtmlWriter {
    plotly: PlotlyWriter,
    script_url: String,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self {
            plotly: PlotlyWriter::new(),
            script_url: PLOTLY_JS_URL.to_string(),
        }
    }

    /// Load plotly.js from somewhere other than the CDN
    pub fn with_script_url(mut self, url: impl Into<String>) -> Self {
        self.script_url = url.into();
        self
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for HtmlWriter {
    type Output = String;

    fn write(&self, figure: &Figure) -> Result<String> {
        let json = self.plotly.write(figure)?;
        let data = script_safe(&serde_json::to_string(&json["data"])?);
        let layout = script_safe(&serde_json::to_string(&json["layout"])?);

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{script}"></script>
</head>
<body>
<div id="{div}" style="width:{width}px;height:{height}px;"></div>
<script>
Plotly.newPlot("{div}", {data}, {layout});
</script>
</body>
</html>
"#,
            title = html_escape(&figure.layout.title),
            script = self.script_url,
            div = DIV_ID,
            width = figure.layout.width,
            height = figure.layout.height,
            data = data,
            layout = layout,
        ))
    }

    fn validate(&self, figure: &Figure) -> Result<()> {
        self.plotly.validate(figure)
    }
}

/// Keep embedded JSON from closing the surrounding `<script>` element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write the page and, when `open` is set, show it in the default browser
pub fn display(html: &str, path: &Path, open: bool) -> Result<()> {
    fs::write(path, html).map_err(|e| {
        HeatmapError::ExportError(format!("Failed to write '{}': {}", path.display(), e))
    })?;
    info!(path = %path.display(), "Wrote interactive figure");

    if open {
        open_in_browser(path)?;
    }
    Ok(())
}

fn open_in_browser(path: &Path) -> Result<()> {
    let path = path.canonicalize()?;

    #[cfg(target_os = "macos")]
    let mut command = {
        let mut command = Command::new("open");
        command.arg(&path);
        command
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(&path);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut command = Command::new("xdg-open");
        command.arg(&path);
        command
    };

    let status = command.status().map_err(|e| {
        HeatmapError::ExportError(format!("Failed to launch browser for '{}': {}", path.display(), e))
    })?;
    if !status.success() {
        return Err(HeatmapError::ExportError(format!(
            "Browser launcher exited with {} for '{}'",
            status,
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Aggregation, CountryCount};
    use crate::config::HeatmapConfig;
    use crate::plot::PriorityTier;

    fn figure() -> Figure {
        let aggregation = Aggregation {
            counts: vec![CountryCount {
                code: "KEN".to_string(),
                count: 3,
                tier: PriorityTier::Priority1,
            }],
            global_max: 3,
        };
        Figure::build(&aggregation, &HeatmapConfig::default()).unwrap()
    }

    #[test]
    fn test_page_embeds_figure() {
        let html = figure().render(&HtmlWriter::new()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PLOTLY_JS_URL));
        assert!(html.contains("Plotly.newPlot(\"heatmap\""));
        assert!(html.contains("\"type\":\"choropleth\""));
        assert!(html.contains("\"scope\":\"africa\""));
        assert!(html.contains("width:1000px;height:1000px;"));
    }

    #[test]
    fn test_legend_markup_cannot_close_script() {
        let html = figure().render(&HtmlWriter::new()).unwrap();
        // The legend title carries <b>...</b>
        assert!(html.contains("<b>Priority Countries<\\/b>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_custom_script_url() {
        let writer = HtmlWriter::new().with_script_url("plotly.min.js");
        let html = figure().render(&writer).unwrap();
        assert!(html.contains("<script src=\"plotly.min.js\"></script>"));
        assert!(!html.contains(PLOTLY_JS_URL));
    }

    #[test]
    fn test_display_without_opening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp-plot.html");
        display("<html></html>", &path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_display_unwritable_path() {
        let result = display("x", Path::new("/nonexistent-dir/plot.html"), false);
        assert!(matches!(result, Err(HeatmapError::ExportError(_))));
    }
}
