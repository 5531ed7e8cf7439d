//! Priority tiers and their styling
//!
//! A tier drives both the outline of its choropleth layer and its row in the
//! legend. [`PriorityTier::style`] is the only place that pairing is made.

use std::fmt;

use crate::config::ColorConfig;
use crate::plot::Color;
use crate::{HeatmapError, Result};

/// Outline width for priority countries, in pixels
pub const OUTLINE_WIDTH: f64 = 2.0;

/// Priority classification of a country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriorityTier {
    NonPriority,
    Priority1,
    Priority2,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 3] = [
        PriorityTier::NonPriority,
        PriorityTier::Priority1,
        PriorityTier::Priority2,
    ];

    /// Draw order of the choropleth layers; later layers sit on top
    pub const RENDER_ORDER: [PriorityTier; 3] = [
        PriorityTier::NonPriority,
        PriorityTier::Priority2,
        PriorityTier::Priority1,
    ];

    /// Top-to-bottom order of the legend rows
    pub const LEGEND_ORDER: [PriorityTier; 3] = [
        PriorityTier::Priority1,
        PriorityTier::Priority2,
        PriorityTier::NonPriority,
    ];

    /// Integer value used in the reference table
    pub fn value(self) -> i64 {
        match self {
            PriorityTier::NonPriority => 0,
            PriorityTier::Priority1 => 1,
            PriorityTier::Priority2 => 2,
        }
    }

    pub fn is_priority(self) -> bool {
        self != PriorityTier::NonPriority
    }

    /// Outline and legend styling for this tier
    pub fn style(self, colors: &ColorConfig) -> Result<TierStyle> {
        let style = match self {
            PriorityTier::NonPriority => TierStyle {
                outline: None,
                label: "Non-priority",
                legend_border: Color::BLACK,
                legend_border_width: 1.0,
                legend_border_pad: 2.5,
            },
            PriorityTier::Priority1 => {
                let red = Color::parse(&colors.red)?;
                TierStyle {
                    outline: Some(Outline {
                        color: red,
                        width: OUTLINE_WIDTH,
                    }),
                    label: "Priority 1",
                    legend_border: red,
                    legend_border_width: OUTLINE_WIDTH,
                    legend_border_pad: 2.0,
                }
            }
            PriorityTier::Priority2 => {
                let orange = Color::parse(&colors.orange)?;
                TierStyle {
                    outline: Some(Outline {
                        color: orange,
                        width: OUTLINE_WIDTH,
                    }),
                    label: "Priority 2",
                    legend_border: orange,
                    legend_border_width: OUTLINE_WIDTH,
                    legend_border_pad: 2.0,
                }
            }
        };
        Ok(style)
    }
}

impl TryFrom<i64> for PriorityTier {
    type Error = HeatmapError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(PriorityTier::NonPriority),
            1 => Ok(PriorityTier::Priority1),
            2 => Ok(PriorityTier::Priority2),
            other => Err(HeatmapError::MalformedInput(format!(
                "priority must be 0, 1 or 2, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.value())
    }
}

/// Country outline drawn around a tier's shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Color,
    pub width: f64,
}

/// Styling shared by a tier's map layer and legend row
#[derive(Debug, Clone, PartialEq)]
pub struct TierStyle {
    /// None keeps the map's default country border
    pub outline: Option<Outline>,
    pub label: &'static str,
    pub legend_border: Color,
    pub legend_border_width: f64,
    pub legend_border_pad: f64,
}
