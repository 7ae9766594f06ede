use serde::Serialize;

use mlnviz_core::{InputDataset, community_stats};

use crate::html::{D3_JS, HtmlPage};
use crate::{RenderContext, Renderer, RendererKind, Result};

const PACK_SCRIPT: &str = r##"const size = 800;
const root = d3.pack().size([size, size]).padding(3)(
  d3.hierarchy({ children: bubbles }).sum(function (d) { return d.value; })
);
const svg = d3.select("#chart")
  .append("svg")
  .attr("viewBox", [0, 0, size, size])
  .attr("width", "100%")
  .attr("height", "90vh");
const node = svg.selectAll("g")
  .data(root.leaves())
  .join("g")
  .attr("transform", function (d) { return "translate(" + d.x + "," + d.y + ")"; });
node.append("circle")
  .attr("r", function (d) { return d.r; })
  .attr("fill", "#AE183D")
  .attr("stroke", "yellow")
  .attr("stroke-width", 2);
node.append("text")
  .attr("text-anchor", "middle")
  .attr("dy", "0.35em")
  .attr("fill", "white")
  .style("font-size", function (d) { return Math.max(8, d.r / 2) + "px"; })
  .text(function (d) { return d.data.name; });
node.append("title").text(function (d) { return d.data.name + ": " + d.data.value; });
"##;

#[derive(Debug, Serialize, PartialEq)]
struct Bubble {
    name: String,
    value: usize,
}

/// Circle-packed communities, each circle sized by member count.
pub struct BubbleChartRenderer;

/// Smallest first; ties keep ascending community id.
fn bubbles(dataset: &InputDataset) -> Vec<Bubble> {
    let mut bubbles: Vec<Bubble> = community_stats(dataset)
        .into_iter()
        .map(|s| Bubble {
            name: format!("c{}", s.community_id),
            value: s.member_count,
        })
        .collect();
    bubbles.sort_by_key(|b| b.value);
    bubbles
}

impl Renderer for BubbleChartRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::BubbleChart
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let title = format!("Bubble chart of {} communities", ctx.dataset.layer_name);
        let mut page = HtmlPage::new(&title);
        page.library(D3_JS)
            .style("h2{text-align:center}")
            .heading(&title)
            .container("div", "chart", "width:100%");
        page.data("bubbles", &bubbles(ctx.dataset))?;
        page.script(PACK_SCRIPT);
        Ok(page.finish())
    }
}

#[cfg(test)]
mod tests {
    use mlnviz_core::{InputFormat, LabelMapping};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::renderers::test_support::*;

    #[test]
    fn vcom_bubbles_sorted_by_size() {
        let dataset = dataset(VCOM, InputFormat::Vcom);
        let names: Vec<_> = bubbles(&dataset).into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["c2", "c3", "c4", "c1"]);
    }

    #[test]
    fn page_has_title_and_data() {
        let dataset = dataset(ECOM, InputFormat::Ecom);
        let mapping = LabelMapping::empty();
        let artifact = artifact(InputFormat::Ecom);
        let html = BubbleChartRenderer
            .build(&context(&dataset, &mapping, &artifact))
            .unwrap();

        assert!(html.contains("<h2>Bubble chart of L3 communities</h2>"));
        assert_eq!(
            embedded(&html, "bubbles"),
            json!([{ "name": "c2", "value": 1 }, { "name": "c1", "value": 3 }])
        );
    }

    #[test]
    fn pack_script_is_embedded_whole() {
        assert!(PACK_SCRIPT.starts_with("const size = 800;"));
        assert!(PACK_SCRIPT.contains(r##"d3.select("#chart")"##));
        assert!(PACK_SCRIPT.contains(r##".attr("fill", "#AE183D")"##));
        assert!(PACK_SCRIPT.trim_end().ends_with("d.data.value; });"));

        let dataset = dataset(VCOM, InputFormat::Vcom);
        let mapping = LabelMapping::empty();
        let artifact = artifact(InputFormat::Vcom);
        let html = BubbleChartRenderer
            .build(&context(&dataset, &mapping, &artifact))
            .unwrap();
        assert!(html.contains(PACK_SCRIPT.trim()));
    }
}
