//! In-memory form of a parsed `.net`, `.ecom` or `.vcom` file.

use std::collections::BTreeMap;
use std::path::Path;

use strum_macros::{Display, EnumString, IntoStaticStr};

pub type VertexId = u32;
pub type CommunityId = u32;

/// One `.net` edge record: `(source, target, weight)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: f64,
}

impl WeightedEdge {
    pub fn new(source: VertexId, target: VertexId, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// Input file kind, decided by extension. Displays as the bare extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum InputFormat {
    /// Weighted edge list of a single layer
    Net,
    /// Edge community allocation
    Ecom,
    /// Vertex community allocation
    Vcom,
}

impl InputFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Accepts the extension with or without its leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        ext.trim_start_matches('.').parse().ok()
    }

    /// Extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Net => ".net",
            Self::Ecom => ".ecom",
            Self::Vcom => ".vcom",
        }
    }

    pub fn is_community(&self) -> bool {
        matches!(self, Self::Ecom | Self::Vcom)
    }
}

/// Parsed payload. Exactly one of edges or communities exists per dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetContent {
    Network {
        /// Edge count as declared in the file header
        edge_count: usize,
        edges: Vec<WeightedEdge>,
    },
    EdgeCommunities {
        /// `# Number of Non-Singleton Communities`
        community_count: usize,
        /// `# Number of Community Edges`
        community_edge_count: usize,
        communities: BTreeMap<CommunityId, Vec<(VertexId, VertexId)>>,
        /// `(vertex, community)` for both endpoints of every record, in file order
        allocation: Vec<(VertexId, CommunityId)>,
    },
    VertexCommunities {
        /// `# Number of Total Communities`
        community_count: usize,
        communities: BTreeMap<CommunityId, Vec<VertexId>>,
        /// `(vertex, community)` records in file order
        allocation: Vec<(VertexId, CommunityId)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputDataset {
    pub layer_name: String,
    pub vertex_count: usize,
    pub format: InputFormat,
    pub content: DatasetContent,
}

impl InputDataset {
    /// Edges of a `.net` dataset, `None` for community datasets.
    pub fn edges(&self) -> Option<&[WeightedEdge]> {
        match &self.content {
            DatasetContent::Network { edges, .. } => Some(edges),
            _ => None,
        }
    }

    /// Declared community count, `None` for `.net` datasets.
    pub fn community_count(&self) -> Option<usize> {
        match &self.content {
            DatasetContent::Network { .. } => None,
            DatasetContent::EdgeCommunities {
                community_count, ..
            }
            | DatasetContent::VertexCommunities {
                community_count, ..
            } => Some(*community_count),
        }
    }

    /// Community ids in ascending order.
    pub fn community_ids(&self) -> Vec<CommunityId> {
        match &self.content {
            DatasetContent::Network { .. } => Vec::new(),
            DatasetContent::EdgeCommunities { communities, .. } => {
                communities.keys().copied().collect()
            }
            DatasetContent::VertexCommunities { communities, .. } => {
                communities.keys().copied().collect()
            }
        }
    }

    /// Last community each vertex was assigned to, in first-seen vertex order.
    ///
    /// An `.ecom` vertex can sit on edges of several communities; the
    /// allocation record read last in the file wins.
    pub fn vertex_communities(&self) -> Vec<(VertexId, CommunityId)> {
        let allocation = match &self.content {
            DatasetContent::Network { .. } => return Vec::new(),
            DatasetContent::EdgeCommunities { allocation, .. }
            | DatasetContent::VertexCommunities { allocation, .. } => allocation,
        };

        let mut order: Vec<VertexId> = Vec::new();
        let mut assigned: BTreeMap<VertexId, CommunityId> = BTreeMap::new();
        for &(vertex, community) in allocation {
            if assigned.insert(vertex, community).is_none() {
                order.push(vertex);
            }
        }
        order
            .into_iter()
            .filter_map(|v| assigned.get(&v).map(|&c| (v, c)))
            .collect()
    }
}
