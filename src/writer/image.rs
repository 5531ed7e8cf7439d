//! PNG export through kaleido
//!
//! kaleido reads one JSON request per line on stdin and answers with one JSON
//! line per request. The image comes back base64 encoded in `result`.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{PlotlyWriter, Writer};
use crate::plot::Figure;
use crate::{HeatmapError, Result};

const KALEIDO_ARGS: &[&str] = &[
    "plotly",
    "--disable-gpu",
    "--allow-file-access-from-files",
    "--disable-extensions",
    "--disable-dev-shm-usage",
    "--disable-software-rasterizer",
    "--single-process",
];

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// One response line from kaleido
#[derive(Debug, Deserialize)]
struct KaleidoResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<String>,
}

/// Renders figures to PNG bytes with an external kaleido executable
#[derive(Debug, Clone)]
pub struct KaleidoExporter {
    executable: PathBuf,
    plotly: PlotlyWriter,
    scale: f64,
}

impl KaleidoExporter {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            plotly: PlotlyWriter::new(),
            scale: 1.0,
        }
    }

    /// Pixel multiplier applied to the layout size
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl Writer for KaleidoExporter {
    type Output = Vec<u8>;

    fn write(&self, figure: &Figure) -> Result<Vec<u8>> {
        self.validate(figure)?;
        let request = json!({
            "data": self.plotly.write(figure)?,
            "format": "png",
            "width": figure.layout.width,
            "height": figure.layout.height,
            "scale": self.scale,
        });
        let request = serde_json::to_string(&request)?;

        let mut child = Command::new(&self.executable)
            .args(KALEIDO_ARGS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                HeatmapError::ExportError(format!(
                    "Failed to start '{}': {}",
                    self.executable.display(),
                    e
                ))
            })?;

        // Dropping stdin closes it so kaleido exits after answering
        let sent = child
            .stdin
            .take()
            .ok_or_else(|| HeatmapError::InternalError("kaleido stdin was not piped".to_string()))
            .and_then(|mut stdin| {
                stdin.write_all(request.as_bytes())?;
                stdin.write_all(b"\n")?;
                Ok(())
            });
        let output = child.wait_with_output()?;
        sent?;

        debug!(
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            "kaleido finished"
        );

        decode_response(&String::from_utf8_lossy(&output.stdout)).map_err(|e| {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if output.status.success() || stderr.trim().is_empty() {
                e
            } else {
                HeatmapError::ExportError(format!("{} (stderr: {})", e, stderr.trim()))
            }
        })
    }

    fn validate(&self, figure: &Figure) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(HeatmapError::ValidationError(format!(
                "export scale must be positive, got {}",
                self.scale
            )));
        }
        self.plotly.validate(figure)
    }
}

/// Pull the PNG out of kaleido's stdout
///
/// Lines that are not JSON, or carry no result, are skipped; the first non-zero
/// code is an error.
fn decode_response(stdout: &str) -> Result<Vec<u8>> {
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Ok(response) = serde_json::from_str::<KaleidoResponse>(line) else {
            continue;
        };
        if response.code != 0 {
            return Err(HeatmapError::ExportError(format!(
                "kaleido failed with code {}: {}",
                response.code,
                response.message.unwrap_or_default()
            )));
        }
        let Some(result) = response.result else {
            continue;
        };
        let bytes = STANDARD.decode(result.trim()).map_err(|e| {
            HeatmapError::ExportError(format!("kaleido returned invalid base64: {}", e))
        })?;
        if !bytes.starts_with(PNG_SIGNATURE) {
            return Err(HeatmapError::ExportError(
                "kaleido result is not a PNG image".to_string(),
            ));
        }
        return Ok(bytes);
    }

    Err(HeatmapError::ExportError(
        "kaleido returned no image".to_string(),
    ))
}
