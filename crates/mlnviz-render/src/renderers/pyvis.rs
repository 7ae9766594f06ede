use serde_json::json;

use mlnviz_core::NetworkView;

use super::{VisEdge, VisFigure, VisNode, vis_page};
use crate::{RenderContext, Renderer, RendererKind, Result};

/// Force-directed view of the edge endpoints with neighbour lists on hover.
pub struct PyvisRenderer;

impl PyvisRenderer {
    fn figure(ctx: &RenderContext<'_>) -> VisFigure {
        let graph = NetworkView::from_edges(ctx.dataset.edges().unwrap_or_default());
        let label = |vertex: u32| ctx.mapping.label_or_default(&vertex.to_string());

        let nodes = graph
            .nodes()
            .map(|vertex| {
                let neighbours: Vec<String> = graph.neighbors(vertex).map(label).collect();
                let title = format!("Adjacent Nodes:\n{}", neighbours.join("\n"));
                let mut node = VisNode::new(vertex, label(vertex), title);
                node.value = Some(neighbours.len());
                node.color = Some(json!({ "background": "white", "border": "magenta" }));
                node
            })
            .collect();

        let edges = graph
            .edges()
            .map(|edge| VisEdge {
                from: edge.source,
                to: edge.target,
                value: Some(edge.weight),
            })
            .collect();

        VisFigure {
            nodes,
            edges,
            options: json!({
                "nodes": {
                    "shape": "dot",
                    "borderWidth": 5,
                    "borderWidthSelected": 10,
                    "font": { "color": "yellow" },
                },
                "edges": {
                    "color": { "color": "cyan", "highlight": "pink", "hover": "yellow" },
                    "smooth": { "type": "dynamic" },
                },
                "interaction": { "hover": true, "hideEdgesOnDrag": false },
                "physics": {
                    "solver": "forceAtlas2Based",
                    "forceAtlas2Based": { "springLength": 100 },
                    "stabilization": { "iterations": 200 },
                },
                "configure": { "enabled": true, "filter": "physics" },
            }),
        }
    }
}

impl Renderer for PyvisRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Pyvis
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        vis_page(
            &format!("Network graph for {}", ctx.cluster_name),
            None,
            &[],
            &Self::figure(ctx),
            "#222222",
        )
    }
}
