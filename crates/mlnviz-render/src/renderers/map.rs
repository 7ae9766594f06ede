use std::collections::HashMap;

use serde_json::{Value, json};

use mlnviz_core::GeoPoint;

use super::plotly_page;
use crate::{Error, RenderContext, Renderer, RendererKind, Result};

/// Geographic view: mapping entries with coordinates on an OpenStreetMap
/// tile layer, joined by the layer's edges.
pub struct MapRenderer;

struct Placed<'a> {
    id: &'a str,
    point: GeoPoint,
    degree: usize,
}

impl MapRenderer {
    fn placed<'a>(ctx: &RenderContext<'a>) -> Result<Vec<Placed<'a>>> {
        if ctx.mapping.is_empty() {
            return Err(Error::unsupported_input(
                "map visualization needs a mapping file with coordinates",
            ));
        }

        let placed: Vec<_> = ctx
            .mapping
            .iter()
            .filter_map(|(id, value)| {
                value.geo().map(|point| Placed {
                    id,
                    point,
                    degree: 0,
                })
            })
            .collect();

        if placed.is_empty() {
            return Err(Error::unsupported_input(
                "no mapping entry carries coordinates",
            ));
        }
        Ok(placed)
    }

    fn figure(ctx: &RenderContext<'_>) -> Result<(Value, Value)> {
        let mut placed = Self::placed(ctx)?;
        let index: HashMap<String, usize> = placed
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.to_string(), i))
            .collect();

        // Only edges with both endpoints on the map are drawn or counted.
        let mut segments = Vec::new();
        for edge in ctx.dataset.edges().unwrap_or_default() {
            let (Some(&a), Some(&b)) = (
                index.get(&edge.source.to_string()),
                index.get(&edge.target.to_string()),
            ) else {
                continue;
            };
            placed[a].degree += 1;
            placed[b].degree += 1;
            segments.push((a, b));
        }

        let with_attribute = placed.iter().any(|p| p.point.attribute.is_some());
        let hover: Vec<String> = placed
            .iter()
            .map(|p| {
                let mut text = format!("ID: {}", p.id);
                if let Some(attribute) = &p.point.attribute {
                    text.push_str(&format!("<br>Label: {attribute}"));
                }
                text.push_str(&format!(
                    "<br>Lat: {}<br>Lon: {}<br>Degree: {}",
                    p.point.lat, p.point.lon, p.degree
                ));
                text
            })
            .collect();

        let mut traces = Vec::with_capacity(segments.len() + 1);
        traces.push(json!({
            "type": "scattermapbox",
            "mode": "markers+text",
            "lat": placed.iter().map(|p| p.point.lat).collect::<Vec<_>>(),
            "lon": placed.iter().map(|p| p.point.lon).collect::<Vec<_>>(),
            "text": placed.iter().map(|p| p.id).collect::<Vec<_>>(),
            "hovertext": hover,
            "hoverinfo": "text",
            "marker": { "size": if with_attribute { 15 } else { 10 } },
        }));
        for (a, b) in segments {
            traces.push(json!({
                "type": "scattermapbox",
                "mode": "lines",
                "lat": [placed[a].point.lat, placed[b].point.lat],
                "lon": [placed[a].point.lon, placed[b].point.lon],
                "line": { "color": "red", "width": 1 },
                "hoverinfo": "skip",
            }));
        }

        let count = placed.len() as f64;
        let center_lat = placed.iter().map(|p| p.point.lat).sum::<f64>() / count;
        let center_lon = placed.iter().map(|p| p.point.lon).sum::<f64>() / count;
        let layout = json!({
            "mapbox": {
                "style": "open-street-map",
                "center": { "lat": center_lat, "lon": center_lon },
                "zoom": 3,
            },
            "showlegend": false,
            "margin": { "r": 0, "t": 0, "l": 0, "b": 0 },
        });

        Ok((Value::Array(traces), layout))
    }
}

impl Renderer for MapRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Map
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let (traces, layout) = Self::figure(ctx)?;
        plotly_page(&format!("{} map", ctx.cluster_name), &traces, &layout)
    }
}
