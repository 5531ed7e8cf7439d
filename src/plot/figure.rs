//! The composed figure

use tracing::debug;

use super::{build_layers, build_legend, Annotation, Layer};
use crate::aggregate::Aggregation;
use crate::config::HeatmapConfig;
use crate::writer::Writer;
use crate::{HeatmapError, Result};

/// Page-level settings of the figure
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// Geographic scope of the map, e.g. `africa`
    pub scope: String,
    pub title: String,
    /// Horizontal title position in paper coordinates
    pub title_x: f64,
}

impl Layout {
    /// Square figure with a centered title
    pub fn new(size: u32, scope: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        if size == 0 {
            return Err(HeatmapError::ValidationError(
                "figure size must be positive".to_string(),
            ));
        }
        Ok(Self {
            width: size,
            height: size,
            scope: scope.into(),
            title: title.into(),
            title_x: 0.5,
        })
    }
}

/// Layout, layers in draw order, and annotations
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub layout: Layout,
    pub layers: Vec<Layer>,
    pub annotations: Vec<Annotation>,
}

impl Figure {
    /// Build every layer and the legend from aggregated counts
    pub fn build(aggregation: &Aggregation, config: &HeatmapConfig) -> Result<Self> {
        let layout = Layout::new(config.fig_size, &config.scope, &config.title)?;
        let layers = build_layers(aggregation, config)?;
        let annotations = build_legend(&config.legend, &config.colors)?;
        debug!(
            layers = layers.len(),
            annotations = annotations.len(),
            "Composed figure"
        );
        Ok(Self {
            layout,
            layers,
            annotations,
        })
    }

    /// Render with any writer
    pub fn render<W: Writer>(&self, writer: &W) -> Result<W::Output> {
        writer.write(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CountryCount;
    use crate::config::LegendConfig;
    use crate::plot::PriorityTier;

    fn aggregation() -> Aggregation {
        Aggregation {
            counts: vec![
                CountryCount {
                    code: "KEN".to_string(),
                    count: 3,
                    tier: PriorityTier::Priority1,
                },
                CountryCount {
                    code: "NGA".to_string(),
                    count: 1,
                    tier: PriorityTier::NonPriority,
                },
            ],
            global_max: 3,
        }
    }

    #[test]
    fn test_build_default_figure() {
        let figure = Figure::build(&aggregation(), &HeatmapConfig::default()).unwrap();
        assert_eq!(figure.layout.width, 1000);
        assert_eq!(figure.layout.height, 1000);
        assert_eq!(figure.layout.scope, "africa");
        assert_eq!(figure.layout.title, "Number of projects, by country");
        assert_eq!(figure.layers.len(), 4);
        assert_eq!(figure.annotations.len(), 7);
    }

    #[test]
    fn test_legend_toggle_only_changes_annotations() {
        let with_legend = Figure::build(&aggregation(), &HeatmapConfig::default()).unwrap();

        let config = HeatmapConfig {
            legend: LegendConfig {
                enabled: false,
                ..LegendConfig::default()
            },
            ..HeatmapConfig::default()
        };
        let without_legend = Figure::build(&aggregation(), &config).unwrap();

        assert!(without_legend.annotations.is_empty());
        assert_eq!(without_legend.layers, with_legend.layers);
        assert_eq!(without_legend.layout, with_legend.layout);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Layout::new(0, "africa", "t").is_err());
    }
}
