//! Hand-built legend
//!
//! The choropleth layers hide their own color bars, so the priority outlines
//! are explained by a stack of annotations: a title, one outlined blank box per
//! tier, and the tier labels next to the boxes.

use super::{Color, PriorityTier};
use crate::config::{ColorConfig, LegendConfig};
use crate::{HeatmapError, Result};

pub const LEGEND_TITLE: &str = "<b>Priority Countries</b>";

/// Blank text that gives a box its size
const BOX_FILL: &str = "   ";

const DEFAULT_BORDER_PAD: f64 = 2.0;

/// Vertical anchor of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAnchor {
    Top,
    Middle,
    Bottom,
}

impl YAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            YAnchor::Top => "top",
            YAnchor::Middle => "middle",
            YAnchor::Bottom => "bottom",
        }
    }
}

/// Positioned text box in paper coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub y_anchor: YAnchor,
    pub border_color: Color,
    pub border_width: f64,
    pub border_pad: f64,
    pub align: &'static str,
    pub show_arrow: bool,
}

impl Annotation {
    /// A borderless, centered annotation without an arrow
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(HeatmapError::ValidationError(format!(
                "annotation position must be finite, got ({}, {})",
                x, y
            )));
        }
        Ok(Self {
            x,
            y,
            text: text.into(),
            y_anchor: YAnchor::Middle,
            border_color: Color::WHITE,
            border_width: 0.0,
            border_pad: DEFAULT_BORDER_PAD,
            align: "center",
            show_arrow: false,
        })
    }

    pub fn with_border(mut self, color: Color, width: f64, pad: f64) -> Result<Self> {
        if width < 0.0 || pad < 0.0 {
            return Err(HeatmapError::ValidationError(format!(
                "border width and pad must not be negative, got {} and {}",
                width, pad
            )));
        }
        self.border_color = color;
        self.border_width = width;
        self.border_pad = pad;
        Ok(self)
    }
}

/// Legend annotations, or none when the legend is disabled
///
/// Order: title, the boxes for each tier, then the labels for each tier.
pub fn build_legend(legend: &LegendConfig, colors: &ColorConfig) -> Result<Vec<Annotation>> {
    if !legend.enabled {
        return Ok(Vec::new());
    }

    let row_y = |row: usize| legend.y0 - row as f64 * legend.y_step;

    let mut annotations = vec![Annotation::new(legend.x0, row_y(0), LEGEND_TITLE)?
        .with_border(Color::WHITE, 0.0, DEFAULT_BORDER_PAD)?];

    let styles = PriorityTier::LEGEND_ORDER
        .iter()
        .map(|tier| tier.style(colors))
        .collect::<Result<Vec<_>>>()?;

    for (idx, style) in styles.iter().enumerate() {
        annotations.push(
            Annotation::new(legend.x0, row_y(idx + 1), BOX_FILL)?.with_border(
                style.legend_border,
                style.legend_border_width,
                style.legend_border_pad,
            )?,
        );
    }

    for (idx, style) in styles.iter().enumerate() {
        annotations.push(
            Annotation::new(legend.x0 + legend.x_pad, row_y(idx + 1), style.label)?
                .with_border(style.legend_border, 0.0, DEFAULT_BORDER_PAD)?,
        );
    }

    Ok(annotations)
}
