//! Figure model for the choropleth map
//!
//! This module contains the typed pieces a figure is assembled from. Nothing
//! here knows about plotly JSON; the writer module translates these types.
//!
//! # Architecture
//!
//! - `color` - validated CSS colors
//! - `tier` - priority tiers and the single tier → style table
//! - `layer` - choropleth and text layers built from aggregated counts
//! - `legend` - fixed legend annotations
//! - `figure` - layout plus layers plus annotations

pub mod color;
pub mod figure;
pub mod layer;
pub mod legend;
pub mod tier;

pub use color::Color;
pub use figure::{Figure, Layout};
pub use layer::{build_layers, ChoroplethLayer, ColorScale, Layer, TextLayer};
pub use legend::{build_legend, Annotation};
pub use tier::{Outline, PriorityTier, TierStyle};
