//! plotly.js figure JSON writer
//!
//! Converts the typed figure into the `{"data": [...], "layout": {...}}`
//! document plotly.js and kaleido both accept.
//!
//! # Mapping Strategy
//!
//! - ChoroplethLayer -> `choropleth` trace keyed by ISO-3 location
//! - TextLayer -> `scattergeo` trace in `text` mode
//! - Annotation -> `layout.annotations[]` in paper coordinates
//! - Layout scope -> `layout.geo.scope`

use serde_json::{json, Map, Value};

use super::Writer;
use crate::plot::{Annotation, ChoroplethLayer, Figure, Layer, TextLayer};
use crate::{HeatmapError, Result};

/// Location mode for three-letter country codes
const LOCATION_MODE: &str = "ISO-3";

/// plotly.js figure writer
#[derive(Debug, Clone, Default)]
pub struct PlotlyWriter;

impl PlotlyWriter {
    pub fn new() -> Self {
        Self
    }

    fn choropleth_trace(layer: &ChoroplethLayer) -> Value {
        let colorscale: Vec<Value> = layer
            .colorscale
            .stops()
            .iter()
            .map(|(position, color)| json!([position, color.to_string()]))
            .collect();

        let mut trace = json!({
            "type": "choropleth",
            "locations": layer.locations,
            "locationmode": LOCATION_MODE,
            "colorscale": colorscale,
            "z": layer.values,
            "zmin": layer.zmin,
            "zmax": layer.zmax,
            "showscale": layer.show_scale,
        });

        // No outline keeps plotly's default country border
        if let Some(outline) = &layer.outline {
            trace["marker"] = json!({
                "line": {
                    "color": outline.color.to_string(),
                    "width": outline.width,
                }
            });
        }

        trace
    }

    fn text_trace(layer: &TextLayer) -> Value {
        json!({
            "type": "scattergeo",
            "locations": layer.locations,
            "locationmode": LOCATION_MODE,
            "text": layer.text,
            "mode": "text",
            "textfont": {
                "color": layer.font_color.to_string(),
                "size": layer.font_size,
            },
        })
    }

    fn annotation(annotation: &Annotation) -> Value {
        json!({
            "x": annotation.x,
            "y": annotation.y,
            "yanchor": annotation.y_anchor.as_str(),
            "borderpad": annotation.border_pad,
            "bordercolor": annotation.border_color.to_string(),
            "borderwidth": annotation.border_width,
            "text": annotation.text,
            "align": annotation.align,
            "showarrow": annotation.show_arrow,
        })
    }
}

impl Writer for PlotlyWriter {
    type Output = Value;

    fn write(&self, figure: &Figure) -> Result<Value> {
        self.validate(figure)?;

        let data: Vec<Value> = figure
            .layers
            .iter()
            .map(|layer| match layer {
                Layer::Choropleth(layer) => Self::choropleth_trace(layer),
                Layer::Text(layer) => Self::text_trace(layer),
            })
            .collect();

        let mut layout = Map::new();
        layout.insert("geo".to_string(), json!({"scope": figure.layout.scope}));
        layout.insert("width".to_string(), json!(figure.layout.width));
        layout.insert("height".to_string(), json!(figure.layout.height));
        layout.insert(
            "title".to_string(),
            json!({"text": figure.layout.title, "x": figure.layout.title_x}),
        );
        if !figure.annotations.is_empty() {
            let annotations: Vec<Value> =
                figure.annotations.iter().map(Self::annotation).collect();
            layout.insert("annotations".to_string(), Value::Array(annotations));
        }

        Ok(json!({
            "data": data,
            "layout": Value::Object(layout),
        }))
    }

    fn validate(&self, figure: &Figure) -> Result<()> {
        if figure.layers.is_empty() {
            return Err(HeatmapError::ValidationError(
                "PlotlyWriter requires at least one layer".to_string(),
            ));
        }

        for (idx, layer) in figure.layers.iter().enumerate() {
            let (locations, values) = match layer {
                Layer::Choropleth(layer) => (layer.locations.len(), layer.values.len()),
                Layer::Text(layer) => (layer.locations.len(), layer.text.len()),
            };
            if locations != values {
                return Err(HeatmapError::WriterError(format!(
                    "Layer {} has {} locations but {} values",
                    idx + 1,
                    locations,
                    values
                )));
            }
        }

        Ok(())
    }
}
