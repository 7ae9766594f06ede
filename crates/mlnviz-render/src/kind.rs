use mlnviz_core::InputFormat;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every visualization the dispatcher knows how to produce.
///
/// Parsing is case-insensitive and accepts both the kebab names and the
/// `*_visualization` names used by older request payloads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum RendererKind {
    #[strum(to_string = "plotly", serialize = "plotly_visualization")]
    Plotly,
    #[strum(to_string = "bokeh", serialize = "bokeh_visualization")]
    Bokeh,
    #[strum(
        to_string = "bokeh-degree-centrality",
        serialize = "bokeh_dc_visualization",
        serialize = "bokeh-dc"
    )]
    BokehDegreeCentrality,
    #[strum(to_string = "pyvis", serialize = "pyvis_visualization")]
    Pyvis,
    #[strum(to_string = "map", serialize = "map_visualization")]
    Map,
    #[strum(to_string = "word-cloud", serialize = "word_cloud_visualization")]
    WordCloud,
    #[strum(to_string = "bubble-chart", serialize = "bubble_chart_visualization")]
    BubbleChart,
    #[strum(
        to_string = "community-network",
        serialize = "community_network_visualization"
    )]
    CommunityNetwork,
    #[strum(to_string = "bar-chart", serialize = "bar_chart_visualization")]
    BarChart,
}

impl RendererKind {
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Prefix of the artifact file name.
    ///
    /// `CommunityNetwork` shares `bokeh` with the plain network view; the
    /// two never collide because they accept different input formats.
    pub fn artifact_tag(&self) -> &'static str {
        match self {
            RendererKind::Plotly => "plotly",
            RendererKind::Bokeh => "bokeh",
            RendererKind::BokehDegreeCentrality => "bokeh_DC",
            RendererKind::Pyvis => "pyvis",
            RendererKind::Map => "map",
            RendererKind::WordCloud => "wordcloud",
            RendererKind::BubbleChart => "bubblechart",
            RendererKind::CommunityNetwork => "bokeh",
            RendererKind::BarChart => "barchart",
        }
    }

    /// Draws a `.net` edge list.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            RendererKind::Plotly
                | RendererKind::Bokeh
                | RendererKind::BokehDegreeCentrality
                | RendererKind::Pyvis
                | RendererKind::Map
        )
    }

    pub fn accepts(&self, format: InputFormat) -> bool {
        if self.is_network() {
            format == InputFormat::Net
        } else {
            format.is_community()
        }
    }
}
