use mlnviz_core::stats::sorted_desc_by;
use mlnviz_core::{CommunityStats, InputDataset, InputFormat, community_stats};

use crate::html::{HtmlPage, WORDCLOUD_JS};
use crate::{RenderContext, Renderer, RendererKind, Result};

const LEGEND_LIMIT: usize = 10;

const CLOUD_SCRIPT: &str = r#"const largest = Math.max(1, ...words.map(function (w) { return w[1]; }));
WordCloud(document.getElementById("cloud"), {
  list: words,
  weightFactor: function (size) { return 12 + 88 * size / largest; },
  minSize: 10,
  backgroundColor: "black",
  color: "random-light",
  rotateRatio: 0.3,
  shuffle: false
});
"#;

/// Community names sized by member count, next to a legend of the largest
/// communities.
pub struct WordCloudRenderer;

/// Legend lines: totals first, then at most ten communities by size.
pub(crate) fn legend(dataset: &InputDataset) -> Vec<String> {
    let layer = &dataset.layer_name;
    let stats = community_stats(dataset);
    let total = dataset.community_count().unwrap_or(stats.len());

    let mut lines = vec![format!("Total Communities in {layer} Layer: {total}")];
    lines.push(if stats.len() <= LEGEND_LIMIT {
        format!("All communities in {layer} Layer:")
    } else {
        format!("Top {LEGEND_LIMIT} Communities in {layer} Layer:")
    });

    match dataset.format {
        InputFormat::Ecom => {
            let by_size = sorted_desc_by(stats, |s| s.vertex_count);
            lines.extend(by_size.iter().take(LEGEND_LIMIT).map(|s| {
                format!(
                    "C{}: {} nodes, {} edges, {:.2} average degree, {:.2} density",
                    s.community_id,
                    s.vertex_count,
                    s.edge_count,
                    s.average_degree(),
                    s.density()
                )
            }));
        }
        _ => {
            let by_size = sorted_desc_by(stats, |s| s.member_count);
            lines.extend(
                by_size
                    .iter()
                    .take(LEGEND_LIMIT)
                    .map(|s| format!("{}: {} nodes", s.label(), s.member_count)),
            );
        }
    }
    lines
}

fn words(stats: &[CommunityStats]) -> Vec<(String, usize)> {
    stats.iter().map(|s| (s.label(), s.member_count)).collect()
}

impl Renderer for WordCloudRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::WordCloud
    }

    fn build(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let layer = &ctx.dataset.layer_name;
        let mut page = HtmlPage::new(&format!("Word Cloud for {layer} Layer"));
        page.library(WORDCLOUD_JS)
            .style(".legend{font-size:14px;margin:16px}")
            .heading(&format!("Word Cloud for {layer} Layer"));
        page.container("canvas", "cloud", "width:500px;height:500px");
        page.text_block("legend", &legend(ctx.dataset));
        page.data("words", &words(&community_stats(ctx.dataset)))?;
        page.script(CLOUD_SCRIPT);
        Ok(page.finish())
    }
}
