use serde_json::{Value, json};

use mlnviz_core::stats::sorted_desc_by;
use mlnviz_core::{InputFormat, community_stats};

use super::plotly_page;
use crate::{RenderContext, Renderer, RendererKind, Result};

/// Community sizes as a descending bar chart: edges per community for
/// `.ecom`, vertices for `.vcom`.
pub struct BarChartRenderer;

impl BarChartRenderer {
    fn unit(format: InputFormat) -> &'static str {
        match format {
            InputFormat::Ecom => "edges",
            _ => "vertices",
        }
    }

    fn figure(ctx: &RenderContext<'_>) -> (Value, Value) {
        let unit = Self::unit(ctx.dataset.format);
        let sorted = sorted_desc_by(community_stats(ctx.dataset), |s| s.member_count);
        let x: Vec<String> = sorted.iter().map(|s| s.community_id.to_string()).collect();
        let y: Vec<usize> = sorted.iter().map(|s| s.member_count).collect();

        let traces = json!([{
            "type": "bar",
            "x": x,
            "y": y,
            "text": y,
            "textposition": "outside",
            "textangle": 0,
            "textfont": { "size": 10 },
            "cliponaxis": false,
        }]);
        let layout = json!({
            "title": { "text": format!("Number of {unit} in Each Community") },
            "xaxis": {
                "title": { "text": "Community" },
                "type": "category",
                "categoryorder": "total descending",
            },
            "yaxis": { "title": { "text": format!("Number of {unit}") } },
        });
        (traces, layout)
    }
}

impl Renderer for BarChartRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::BarChart
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let (traces, layout) = Self::figure(ctx);
        plotly_page(
            &format!("{} community sizes", ctx.dataset.layer_name),
            &traces,
            &layout,
        )
    }
}
