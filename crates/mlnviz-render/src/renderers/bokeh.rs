use serde_json::json;

use mlnviz_core::{NetworkView, create_url};

use super::{VisEdge, VisFigure, VisNode, label_or_id, vis_page};
use crate::layout::centrality_color;
use crate::{RenderContext, Renderer, RendererKind, Result};

const NODE_COLOR: &str = "#3288bd";

/// Interactive layer graph with click-through links.
///
/// Every vertex `0..vertex_count` is drawn, including isolated ones. The
/// degree-centrality variant shades nodes by centrality instead of using a
/// single colour.
pub struct BokehRenderer {
    degree_centrality: bool,
}

impl BokehRenderer {
    pub fn plain() -> Self {
        Self {
            degree_centrality: false,
        }
    }

    pub fn degree_centrality() -> Self {
        Self {
            degree_centrality: true,
        }
    }

    fn title(&self, cluster_name: &str) -> String {
        if self.degree_centrality {
            format!("{cluster_name} network graph based on Degree Centrality")
        } else {
            format!("{cluster_name} Network Graph")
        }
    }

    fn figure(&self, ctx: &RenderContext<'_>) -> VisFigure {
        let edges = ctx.dataset.edges().unwrap_or_default();
        let graph = NetworkView::with_vertices(ctx.dataset.vertex_count, edges);

        let nodes = graph
            .nodes()
            .map(|vertex| {
                let label = label_or_id(ctx.mapping, vertex);
                let degree = graph.degree(vertex);
                let mut title = format!("Node ID: {vertex}\nLabel: {label}\nDegree: {degree}");
                let color = if self.degree_centrality {
                    let centrality = graph.degree_centrality(vertex);
                    title.push_str(&format!("\nDegree Centrality: {centrality:.3}"));
                    centrality_color(centrality)
                } else {
                    NODE_COLOR
                };

                let mut node = VisNode::new(vertex, label.clone(), title);
                node.size = Some(degree + 5);
                node.color = Some(json!({
                    "background": color,
                    "border": "#333333",
                    "highlight": { "background": "white", "border": "black" },
                    "hover": { "background": "white", "border": "black" },
                }));
                node.url = create_url(&label, ctx.dataset_type);
                node
            })
            .collect();

        let edges = graph
            .edges()
            .map(|edge| VisEdge {
                from: edge.source,
                to: edge.target,
                value: None,
            })
            .collect();

        VisFigure {
            nodes,
            edges,
            options: json!({
                "nodes": { "shape": "dot", "font": { "size": 12 } },
                "edges": {
                    "width": 1,
                    "color": { "color": "#333333", "opacity": 0.5, "highlight": "black", "hover": "black" },
                },
                "interaction": { "hover": true, "tooltipDelay": 100, "navigationButtons": true },
                "physics": { "stabilization": { "iterations": 200 } },
            }),
        }
    }
}

impl Renderer for BokehRenderer {
    fn kind(&self) -> RendererKind {
        if self.degree_centrality {
            RendererKind::BokehDegreeCentrality
        } else {
            RendererKind::Bokeh
        }
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let title = self.title(ctx.cluster_name);
        vis_page(&title, Some(&title), &[], &self.figure(ctx), "#ffffff")
    }
}
