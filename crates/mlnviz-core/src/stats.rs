//! Per-community summary numbers used by the chart renderers.

use std::collections::BTreeSet;

use crate::dataset::{CommunityId, DatasetContent, InputDataset};

#[derive(Debug, Clone, PartialEq)]
pub struct CommunityStats {
    pub community_id: CommunityId,
    /// Allocation records in the community (edges for `.ecom`, vertices for `.vcom`)
    pub member_count: usize,
    /// Distinct vertices, i.e. the endpoint set for `.ecom`
    pub vertex_count: usize,
    pub edge_count: usize,
}

impl CommunityStats {
    /// `2e / n`, with `n` clamped to at least 1.
    pub fn average_degree(&self) -> f64 {
        (2 * self.edge_count) as f64 / self.vertex_count.max(1) as f64
    }

    /// `2e / (n (n - 1))`, or `2e` for communities with fewer than 2 vertices.
    pub fn density(&self) -> f64 {
        let n = self.vertex_count;
        let pairs = if n > 1 { n * (n - 1) } else { 1 };
        (2 * self.edge_count) as f64 / pairs as f64
    }

    pub fn label(&self) -> String {
        format!("C{}", self.community_id)
    }
}

/// Stats for each community in ascending id order; empty for `.net`.
pub fn community_stats(dataset: &InputDataset) -> Vec<CommunityStats> {
    match &dataset.content {
        DatasetContent::Network { .. } => Vec::new(),
        DatasetContent::EdgeCommunities { communities, .. } => communities
            .iter()
            .map(|(&community_id, edges)| {
                let endpoints: BTreeSet<_> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
                CommunityStats {
                    community_id,
                    member_count: edges.len(),
                    vertex_count: endpoints.len(),
                    edge_count: edges.len(),
                }
            })
            .collect(),
        DatasetContent::VertexCommunities { communities, .. } => communities
            .iter()
            .map(|(&community_id, vertices)| {
                let unique: BTreeSet<_> = vertices.iter().copied().collect();
                CommunityStats {
                    community_id,
                    member_count: vertices.len(),
                    vertex_count: unique.len(),
                    edge_count: 0,
                }
            })
            .collect(),
    }
}

/// Sort descending by `key`; ties keep ascending community id.
pub fn sorted_desc_by<F>(mut stats: Vec<CommunityStats>, key: F) -> Vec<CommunityStats>
where
    F: Fn(&CommunityStats) -> usize,
{
    stats.sort_by(|a, b| key(b).cmp(&key(a)));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_str;
    use crate::dataset::InputFormat;

    #[test]
    fn ecom_density_and_degree() {
        let text = "\
# Edge Community File for Layer
L1
# Number of Vertices
5
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
        let dataset = parse_str(text, InputFormat::Ecom).unwrap();
        let stats = community_stats(&dataset);
        assert_eq!(stats.len(), 2);

        let triangle = &stats[0];
        assert_eq!(triangle.vertex_count, 3);
        assert_eq!(triangle.edge_count, 3);
        assert_eq!(triangle.average_degree(), 2.0);
        assert_eq!(triangle.density(), 1.0);

        let pair = &stats[1];
        assert_eq!(pair.vertex_count, 2);
        assert_eq!(pair.density(), 1.0);
        assert_eq!(pair.label(), "C2");
    }

    #[test]
    fn singleton_density_uses_unit_denominator() {
        let stats = CommunityStats {
            community_id: 4,
            member_count: 1,
            vertex_count: 1,
            edge_count: 1,
        };
        assert_eq!(stats.density(), 2.0);
        assert_eq!(stats.average_degree(), 2.0);
    }

    #[test]
    fn sorted_desc_is_stable_on_ties() {
        let make = |id, n| CommunityStats {
            community_id: id,
            member_count: n,
            vertex_count: n,
            edge_count: 0,
        };
        let sorted = sorted_desc_by(vec![make(1, 1), make(2, 3), make(3, 1)], |s| s.member_count);
        let ids: Vec<_> = sorted.iter().map(|s| s.community_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
