//! Map layers
//!
//! One choropleth layer per priority tier and one text layer with the counts.
//! All choropleth layers share the color scale and its `[0, global_max]` range
//! so a shade means the same count in every tier.

use tracing::debug;

use super::{Color, Outline, PriorityTier};
use crate::aggregate::{Aggregation, CountryCount};
use crate::config::{ColorConfig, HeatmapConfig};
use crate::{HeatmapError, Result};

/// Piecewise-linear color scale: `(position, color)` stops over `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<(f64, Color)>,
}

impl ColorScale {
    /// Stops must start at 0, end at 1 and increase strictly
    pub fn new(stops: Vec<(f64, Color)>) -> Result<Self> {
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return Err(HeatmapError::ValidationError(
                "a color scale needs at least one stop".to_string(),
            ));
        };
        if first.0 != 0.0 || last.0 != 1.0 {
            return Err(HeatmapError::ValidationError(format!(
                "color scale must span 0..1, got {}..{}",
                first.0, last.0
            )));
        }
        if stops.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(HeatmapError::ValidationError(
                "color scale stops must increase".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// Light, middle and dark steps of the configured gradient
    pub fn from_gradient(colors: &ColorConfig) -> Result<Self> {
        let gradient = colors
            .gradient
            .iter()
            .map(|c| Color::parse(c))
            .collect::<Result<Vec<_>>>()?;
        Self::new(vec![
            (0.0, gradient[0]),
            (0.2, gradient[2]),
            (1.0, gradient[4]),
        ])
    }

    pub fn stops(&self) -> &[(f64, Color)] {
        &self.stops
    }
}

/// Countries shaded by project count
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethLayer {
    pub tier: PriorityTier,
    /// ISO-3 codes
    pub locations: Vec<String>,
    pub values: Vec<u64>,
    pub colorscale: ColorScale,
    pub zmin: u64,
    pub zmax: u64,
    pub outline: Option<Outline>,
    pub show_scale: bool,
}

impl ChoroplethLayer {
    pub fn new<'a>(
        tier: PriorityTier,
        counts: impl IntoIterator<Item = &'a CountryCount>,
        colorscale: ColorScale,
        zmax: u64,
        outline: Option<Outline>,
    ) -> Result<Self> {
        let mut locations = Vec::new();
        let mut values = Vec::new();
        for count in counts {
            if count.tier != tier {
                return Err(HeatmapError::ValidationError(format!(
                    "{} ({}) does not belong in the {} layer",
                    count.code, count.tier, tier
                )));
            }
            if count.count > zmax {
                return Err(HeatmapError::ValidationError(format!(
                    "{} has {} projects, above the color ceiling {}",
                    count.code, count.count, zmax
                )));
            }
            locations.push(count.code.clone());
            values.push(count.count);
        }

        Ok(Self {
            tier,
            locations,
            values,
            colorscale,
            zmin: 0,
            zmax,
            outline,
            show_scale: false,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Count labels drawn at each country
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub locations: Vec<String>,
    pub text: Vec<String>,
    pub font_color: Color,
    pub font_size: f64,
}

impl TextLayer {
    pub fn new(aggregation: &Aggregation, font_size: f64) -> Result<Self> {
        if font_size.is_nan() || font_size <= 0.0 {
            return Err(HeatmapError::ValidationError(format!(
                "label font size must be positive, got {}",
                font_size
            )));
        }
        Ok(Self {
            locations: aggregation.counts.iter().map(|c| c.code.clone()).collect(),
            text: aggregation.counts.iter().map(|c| c.count.to_string()).collect(),
            font_color: Color::BLACK,
            font_size,
        })
    }
}

/// One renderable series of the figure
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Choropleth(ChoroplethLayer),
    Text(TextLayer),
}

impl Layer {
    pub fn as_choropleth(&self) -> Option<&ChoroplethLayer> {
        match self {
            Layer::Choropleth(layer) => Some(layer),
            Layer::Text(_) => None,
        }
    }
}

/// Build the map layers in draw order: tiers per [`PriorityTier::RENDER_ORDER`],
/// then the count labels on top
pub fn build_layers(aggregation: &Aggregation, config: &HeatmapConfig) -> Result<Vec<Layer>> {
    let colorscale = ColorScale::from_gradient(&config.colors)?;

    let mut layers = Vec::with_capacity(PriorityTier::RENDER_ORDER.len() + 1);
    for tier in PriorityTier::RENDER_ORDER {
        let style = tier.style(&config.colors)?;
        let layer = ChoroplethLayer::new(
            tier,
            aggregation.tier(tier),
            colorscale.clone(),
            aggregation.global_max,
            style.outline,
        )?;
        debug!(%tier, countries = layer.locations.len(), "Built choropleth layer");
        layers.push(Layer::Choropleth(layer));
    }

    layers.push(Layer::Text(TextLayer::new(
        aggregation,
        config.label_font_size,
    )?));
    Ok(layers)
}
