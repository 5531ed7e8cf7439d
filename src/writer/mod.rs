//! Output writers
//!
//! A writer turns a [`Figure`] into some output. The plotly writer produces
//! the figure JSON the other two build on:
//!
//! - [`PlotlyWriter`] - plotly.js figure JSON (`data` + `layout`)
//! - [`HtmlWriter`] - standalone interactive page
//! - [`KaleidoExporter`] - PNG bytes rendered by the kaleido executable
//!
//! # Example
//!
//! ```rust,ignore
//! use project_heatmap::writer::{PlotlyWriter, Writer};
//!
//! let json = figure.render(&PlotlyWriter::new())?;
//! ```

use crate::plot::Figure;
use crate::Result;

pub mod html;
pub mod image;
pub mod plotly;

pub use html::{display, HtmlWriter};
pub use image::KaleidoExporter;
pub use plotly::PlotlyWriter;

/// Trait for figure output formats
pub trait Writer {
    type Output;

    /// Render the figure
    fn write(&self, figure: &Figure) -> Result<Self::Output>;

    /// Check the figure can be rendered by this writer
    fn validate(&self, _figure: &Figure) -> Result<()> {
        Ok(())
    }
}
