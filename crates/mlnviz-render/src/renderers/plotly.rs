use std::collections::HashMap;

use serde_json::{Value, json};

use mlnviz_core::NetworkView;

use super::{label_or_id, plotly_page};
use crate::layout::circular;
use crate::{RenderContext, Renderer, RendererKind, Result};

/// Static network figure: edges as line traces, nodes coloured by degree.
pub struct PlotlyRenderer;

impl PlotlyRenderer {
    fn graph(ctx: &RenderContext<'_>) -> NetworkView {
        match ctx.dataset.edges() {
            Some(edges) if !edges.is_empty() => NetworkView::from_edges(edges),
            _ => NetworkView::with_vertices(ctx.dataset.vertex_count, &[]),
        }
    }

    fn figure(ctx: &RenderContext<'_>) -> (Value, Value) {
        let graph = Self::graph(ctx);
        let nodes: Vec<_> = graph.nodes().collect();
        let positions: HashMap<_, _> = nodes.iter().copied().zip(circular(nodes.len())).collect();

        let mut traces = Vec::with_capacity(graph.edge_count() + 1);
        for edge in graph.edges() {
            let (x0, y0) = positions[&edge.source];
            let (x1, y1) = positions[&edge.target];
            traces.push(json!({
                "type": "scatter",
                "mode": "lines",
                "x": [x0, x1, null],
                "y": [y0, y1, null],
                "line": { "width": edge.weight, "color": "#202213" },
                "hoverinfo": "none",
                "showlegend": false,
            }));
        }

        let mut xs = Vec::with_capacity(nodes.len());
        let mut ys = Vec::with_capacity(nodes.len());
        let mut degrees = Vec::with_capacity(nodes.len());
        let mut hover = Vec::with_capacity(nodes.len());
        for &node in &nodes {
            let (x, y) = positions[&node];
            let degree = graph.degree(node);
            xs.push(x);
            ys.push(y);
            degrees.push(degree);
            hover.push(format!(
                "Node ID: {}<br />Degree Centrality: {degree}",
                label_or_id(ctx.mapping, node)
            ));
        }
        traces.push(json!({
            "type": "scatter",
            "mode": "markers",
            "name": "Nodes",
            "x": xs,
            "y": ys,
            "text": hover,
            "hovertext": hover,
            "hoverinfo": "text",
            "showlegend": true,
            "marker": {
                "showscale": true,
                "colorscale": "Rainbow",
                "reversescale": true,
                "color": degrees,
                "size": 15,
                "line": { "width": 2 },
                "colorbar": {
                    "thickness": 15,
                    "xanchor": "left",
                    "title": { "text": "Node Connections/ Degree Centrality", "side": "right" },
                },
            },
        }));

        let hidden_axis = json!({ "showgrid": false, "zeroline": false, "showticklabels": false });
        let layout = json!({
            "title": {
                "text": format!("<br />Network graph for {} layer", ctx.cluster_name.to_uppercase()),
                "x": 0.5,
                "y": 1,
                "xanchor": "center",
                "yanchor": "top",
                "font": { "size": 20, "color": "#343541", "family": "Arial" },
            },
            "legend": {
                "title": { "text": format!("Nodes: {} | Edges: {}", graph.node_count(), graph.edge_count()) },
                "x": 0.01,
                "y": 0.99,
                "xanchor": "left",
                "yanchor": "top",
            },
            "hovermode": "closest",
            "margin": { "b": 0, "l": 0, "r": 0, "t": 0 },
            "xaxis": hidden_axis,
            "yaxis": hidden_axis,
            "autosize": true,
        });

        (Value::Array(traces), layout)
    }
}

impl Renderer for PlotlyRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Plotly
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let (traces, layout) = Self::figure(ctx);
        plotly_page(
            &format!("Network graph for {} layer", ctx.cluster_name),
            &traces,
            &layout,
        )
    }
}
