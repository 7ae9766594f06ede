//! Undirected graph view over a dataset, used for degrees and adjacency.

use petgraph::graphmap::UnGraphMap;

use crate::dataset::{DatasetContent, InputDataset, VertexId, WeightedEdge};

/// Nodes iterate in insertion order.
#[derive(Debug, Clone, Default)]
pub struct NetworkView {
    graph: UnGraphMap<VertexId, f64>,
}

impl NetworkView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph spanned by the edges only.
    pub fn from_edges(edges: &[WeightedEdge]) -> Self {
        let mut view = Self::new();
        for edge in edges {
            view.add_edge(edge.source, edge.target, edge.weight);
        }
        view
    }

    /// Vertices `0..vertex_count` first, then the edges.
    pub fn with_vertices(vertex_count: usize, edges: &[WeightedEdge]) -> Self {
        let mut view = Self::new();
        for vertex in 0..vertex_count {
            view.graph.add_node(vertex as VertexId);
        }
        for edge in edges {
            view.add_edge(edge.source, edge.target, edge.weight);
        }
        view
    }

    /// `.net` edges, `.ecom` community edges (weight 1), or the bare `.vcom`
    /// vertices. Community vertices are added in allocation file order.
    pub fn from_dataset(dataset: &InputDataset) -> Self {
        let mut view = Self::new();
        match &dataset.content {
            DatasetContent::Network { edges, .. } => {
                for edge in edges {
                    view.add_edge(edge.source, edge.target, edge.weight);
                }
            }
            DatasetContent::EdgeCommunities {
                communities,
                allocation,
                ..
            } => {
                for &(vertex, _) in allocation {
                    view.graph.add_node(vertex);
                }
                for edges in communities.values() {
                    for &(a, b) in edges {
                        view.add_edge(a, b, 1.0);
                    }
                }
            }
            DatasetContent::VertexCommunities { allocation, .. } => {
                for &(vertex, _) in allocation {
                    view.graph.add_node(vertex);
                }
            }
        }
        view
    }

    /// Re-adding an edge replaces its weight.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: f64) {
        self.graph.add_edge(a, b, weight);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.graph
            .all_edges()
            .map(|(a, b, &w)| WeightedEdge::new(a, b, w))
    }

    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.neighbors(vertex)
    }

    pub fn degree(&self, vertex: VertexId) -> usize {
        if !self.graph.contains_node(vertex) {
            return 0;
        }
        self.graph.neighbors(vertex).count()
    }

    /// `degree / (n - 1)`; every node of a graph with at most one node scores 1.
    pub fn degree_centrality(&self, vertex: VertexId) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return 1.0;
        }
        self.degree(vertex) as f64 / (n - 1) as f64
    }

    pub fn max_degree(&self) -> usize {
        self.nodes().map(|v| self.degree(v)).max().unwrap_or(0)
    }
}
