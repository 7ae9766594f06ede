use std::collections::HashMap;

use serde_json::json;

use mlnviz_core::{NetworkView, create_url};

use super::{VisEdge, VisFigure, VisNode, vis_page};
use crate::layout::category_color;
use crate::{RenderContext, Renderer, RendererKind, Result};

/// Community-coloured graph.
///
/// `.ecom` allocations become the edge set; a vertex on edges of several
/// communities takes the one read last in the file. `.vcom` vertices are drawn without
/// edges, grouped by community.
pub struct CommunityNetworkRenderer;

impl CommunityNetworkRenderer {
    fn figure(ctx: &RenderContext<'_>) -> VisFigure {
        let graph = NetworkView::from_dataset(ctx.dataset);
        let membership: HashMap<_, _> = ctx.dataset.vertex_communities().into_iter().collect();
        let ids = ctx.dataset.community_ids();
        let color_index: HashMap<_, _> = ids.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        let nodes = graph
            .nodes()
            .map(|vertex| {
                let label = ctx.mapping.label_or_default(&vertex.to_string());
                let degree = graph.degree(vertex);
                let community = membership.get(&vertex).copied();
                let community_text = community.map_or_else(|| "-".to_string(), |c| c.to_string());

                let title = format!(
                    "Node ID: {vertex}\nLabel: {label}\nDegree: {degree}\nCommunity: {community_text}"
                );
                let mut node = VisNode::new(vertex, label.clone(), title);
                node.size = Some(degree + 5);
                node.group = community;
                if let Some(index) = community.and_then(|c| color_index.get(&c)) {
                    node.color = Some(json!({
                        "background": category_color(*index),
                        "border": "#333333",
                        "highlight": { "background": "white", "border": "black" },
                    }));
                }
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
                "nodes": { "shape": "dot" },
                "edges": { "width": 1, "color": { "opacity": 0.5, "highlight": "black" } },
                "interaction": { "hover": true, "tooltipDelay": 100 },
                "physics": { "stabilization": { "iterations": 200 } },
            }),
        }
    }
}

impl Renderer for CommunityNetworkRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::CommunityNetwork
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let layer = &ctx.dataset.layer_name;
        let total = ctx
            .dataset
            .community_count()
            .unwrap_or_else(|| ctx.dataset.community_ids().len());
        let title = format!("{layer} Community Network Visualization");
        vis_page(
            &format!("{layer} Community Network"),
            Some(&title),
            &[format!("Total Number of Communities : {total}")],
            &Self::figure(ctx),
            "#ffffff",
        )
    }
}
