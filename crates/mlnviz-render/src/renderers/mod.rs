mod bar_chart;
mod bokeh;
mod bubble_chart;
mod community_network;
mod map;
mod plotly;
mod pyvis;
mod word_cloud;

use serde::Serialize;
use serde_json::Value;

use mlnviz_core::{CommunityId, LabelMapping, VertexId};

use crate::html::{HtmlPage, PLOTLY_JS, VIS_NETWORK_JS};
use crate::{Renderer, RendererKind, Result};

pub use bar_chart::BarChartRenderer;
pub use bokeh::BokehRenderer;
pub use bubble_chart::BubbleChartRenderer;
pub use community_network::CommunityNetworkRenderer;
pub use map::MapRenderer;
pub use plotly::PlotlyRenderer;
pub use pyvis::PyvisRenderer;
pub use word_cloud::WordCloudRenderer;

pub fn renderer_for(kind: RendererKind) -> Box<dyn Renderer> {
    match kind {
        RendererKind::Plotly => Box::new(PlotlyRenderer),
        RendererKind::Bokeh => Box::new(BokehRenderer::plain()),
        RendererKind::BokehDegreeCentrality => Box::new(BokehRenderer::degree_centrality()),
        RendererKind::Pyvis => Box::new(PyvisRenderer),
        RendererKind::Map => Box::new(MapRenderer),
        RendererKind::WordCloud => Box::new(WordCloudRenderer),
        RendererKind::BubbleChart => Box::new(BubbleChartRenderer),
        RendererKind::CommunityNetwork => Box::new(CommunityNetworkRenderer),
        RendererKind::BarChart => Box::new(BarChartRenderer),
    }
}

/// Mapped label, or the bare vertex id.
pub(crate) fn label_or_id(mapping: &LabelMapping, vertex: VertexId) -> String {
    let id = vertex.to_string();
    mapping.label(&id).unwrap_or(id)
}

/// A plotly.js page drawing `data` traces with `layout`.
pub(crate) fn plotly_page(title: &str, data: &Value, layout: &Value) -> Result<String> {
    let mut page = HtmlPage::new(title);
    page.library(PLOTLY_JS)
        .container("div", "figure", "width:100%;height:100vh");
    page.data("traces", data)?.data("layout", layout)?;
    page.script(
        "Plotly.newPlot(\"figure\", traces, layout, {responsive: true, displaylogo: false});",
    );
    Ok(page.finish())
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct VisNode {
    pub id: VertexId,
    pub label: String,
    /// Hover text
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<CommunityId>,
    /// Click-through link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl VisNode {
    pub fn new(id: VertexId, label: String, title: String) -> Self {
        Self {
            id,
            label,
            title,
            value: None,
            size: None,
            color: None,
            group: None,
            url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct VisEdge {
    pub from: VertexId,
    pub to: VertexId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Nodes, edges and options for one vis-network canvas.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct VisFigure {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
    pub options: Value,
}

const VIS_SCRIPT: &str = r#"const network = new vis.Network(
  document.getElementById("network"),
  { nodes: new vis.DataSet(figure.nodes), edges: new vis.DataSet(figure.edges) },
  figure.options
);
network.on("click", function (params) {
  if (params.nodes.length !== 1) {
    return;
  }
  const node = figure.nodes.find(function (n) { return n.id === params.nodes[0]; });
  if (node && node.url) {
    window.open(node.url, "_blank");
  }
});
"#;

/// A vis-network page with an optional heading and legend.
pub(crate) fn vis_page(
    title: &str,
    heading: Option<&str>,
    legend: &[String],
    figure: &VisFigure,
    background: &str,
) -> Result<String> {
    let mut page = HtmlPage::new(title);
    page.library(VIS_NETWORK_JS)
        .style(".legend{position:absolute;top:8px;left:8px;margin:0;padding:4px 8px;background:rgba(255,255,255,0.85);z-index:1}");
    if let Some(heading) = heading {
        page.heading(heading);
    }
    if !legend.is_empty() {
        page.text_block("legend", legend);
    }
    page.container(
        "div",
        "network",
        &format!("width:100%;height:100vh;background:{background}"),
    );
    page.data("figure", figure)?;
    page.script(VIS_SCRIPT);
    Ok(page.finish())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use mlnviz_core::{
        ArtifactPath, DatasetType, InputDataset, InputFormat, LabelMapping, parse_str,
    };

    use crate::RenderContext;

    pub const NET: &str = "\
L1
4
3
0
1
2
3
0,1,1.0
1,2,2.5
0,2,1.0
";

    pub const ECOM: &str = "\
# Edge Community File for Layer
L3
# Number of Vertices
6
# Number of Non-Singleton Communities
2
# Number of Community Edges
4
# Edge Community Allocation
1,2,1
2,3,1
1,3,1
4,5,2
";

    pub const VCOM: &str = "\
# Vertex Community File for Layer
L2
# Number of Vertices
6
# Number of Total Communities
4
# Vertex Community Allocation
1,1
2,1
3,1
4,2
5,3
6,4
";

    pub fn dataset(text: &str, format: InputFormat) -> InputDataset {
        parse_str(text, format).unwrap()
    }

    pub fn artifact(format: InputFormat) -> ArtifactPath {
        ArtifactPath::new(Path::new("/tmp/mlnviz-test"), "test", "L1", format.extension())
    }

    pub fn context<'a>(
        dataset: &'a InputDataset,
        mapping: &'a LabelMapping,
        artifact: &'a ArtifactPath,
    ) -> RenderContext<'a> {
        RenderContext {
            dataset,
            mapping,
            dataset_type: DatasetType::Unknown,
            cluster_name: "L1",
            artifact,
        }
    }

    /// JSON bound to `const {name} = ...;` in a built page.
    pub fn embedded(html: &str, name: &str) -> serde_json::Value {
        let marker = format!("const {name} = ");
        let start = html.find(&marker).unwrap() + marker.len();
        let end = start + html[start..].find(";\n").unwrap();
        serde_json::from_str(&html[start..end].replace("<\\/", "</")).unwrap()
    }
}
