//! CSS color values
//!
//! Colors come in as any CSS notation `csscolorparser` understands and are
//! written back out in plotly's `rgb(r, g, b)` form.

use std::fmt;
use std::str::FromStr;

use crate::{HeatmapError, Result};

/// A parsed 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    rgba: [u8; 4],
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgba: [r, g, b, 255] }
    }

    /// Parse any CSS color: names, hex, `rgb()`, `hsl()`, ...
    pub fn parse(value: &str) -> Result<Self> {
        csscolorparser::parse(value)
            .map(|c| Self { rgba: c.to_rgba8() })
            .map_err(|e| HeatmapError::ValidationError(format!("Invalid color '{}': {}", value, e)))
    }

    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.rgba;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.rgba;
        if a == 255 {
            write!(f, "rgb({}, {}, {})", r, g, b)
        } else {
            write!(f, "rgba({}, {}, {}, {:.3})", r, g, b, a as f64 / 255.0)
        }
    }
}

impl FromStr for Color {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}
