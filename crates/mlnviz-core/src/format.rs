//! Readers and writers for the `.net`, `.ecom` and `.vcom` text formats.
//!
//! `.net` is positional: cluster name, vertex count and edge count on the
//! first three lines, vertex lines after that, and `v1,v2,weight` edge records
//! from line `vertexCount + 3` on. The community formats use `#` header lines
//! that are each followed by a value line; everything after the allocation
//! header is a data record.
//!
//! A malformed record fails the whole parse. Callers never see a partial
//! dataset.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::dataset::{
    CommunityId, DatasetContent, InputDataset, InputFormat, VertexId, WeightedEdge,
};
use crate::{Error, Result};

pub const ECOM_LAYER: &str = "# Edge Community File for Layer";
pub const ECOM_COMMUNITIES: &str = "# Number of Non-Singleton Communities";
pub const ECOM_COMMUNITY_EDGES: &str = "# Number of Community Edges";
pub const ECOM_ALLOCATION: &str = "# Edge Community Allocation";

pub const VCOM_LAYER: &str = "# Vertex Community File for Layer";
pub const VCOM_COMMUNITIES: &str = "# Number of Total Communities";
pub const VCOM_ALLOCATION: &str = "# Vertex Community Allocation";

pub const NUM_VERTICES: &str = "# Number of Vertices";

/// Parse an input file, choosing the format from its extension.
pub fn parse_file(path: impl AsRef<Path>) -> Result<InputDataset> {
    let path = path.as_ref();
    let shown = path.display().to_string();
    let format = InputFormat::from_path(path)
        .ok_or_else(|| Error::unsupported_extension(shown.clone()))?;

    let text = fs::read_to_string(path).map_err(|e| {
        Error::from(e)
            .with_operation("format::parse_file")
            .with_context("path", shown.clone())
    })?;

    let dataset = parse_str(&text, format).map_err(|e| e.with_context("file", shown.clone()))?;
    debug!(
        path = %shown,
        layer = %dataset.layer_name,
        vertices = dataset.vertex_count,
        "parsed input"
    );
    Ok(dataset)
}

/// Parse in-memory text in the given format.
pub fn parse_str(text: &str, format: InputFormat) -> Result<InputDataset> {
    match format {
        InputFormat::Net => parse_net(text),
        InputFormat::Ecom => parse_ecom(text),
        InputFormat::Vcom => parse_vcom(text),
    }
}

fn parse_net(text: &str) -> Result<InputDataset> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.len() < 3 {
        return Err(Error::invalid_format(format!(
            "expected cluster name, vertex count and edge count, found {} lines",
            lines.len()
        ))
        .with_operation("format::parse_net"));
    }

    let layer_name = lines[0].1.to_string();
    let vertex_count = parse_count(lines[1].1, lines[1].0, "vertex count")
        .map_err(|e| e.with_operation("format::parse_net"))?;
    let edge_count = parse_count(lines[2].1, lines[2].0, "edge count")
        .map_err(|e| e.with_operation("format::parse_net"))?;

    let first_edge = vertex_count.saturating_add(3);
    let mut edges = Vec::new();
    for &(line_no, line) in lines.iter().skip(first_edge) {
        let [v1, v2, weight] =
            split_record::<3>(line, line_no).map_err(|e| e.with_operation("format::parse_net"))?;
        edges.push(WeightedEdge::new(
            parse_id(v1, line_no).map_err(|e| e.with_operation("format::parse_net"))?,
            parse_id(v2, line_no).map_err(|e| e.with_operation("format::parse_net"))?,
            parse_weight(weight, line_no).map_err(|e| e.with_operation("format::parse_net"))?,
        ));
    }

    if edges.len() != edge_count {
        warn!(
            declared = edge_count,
            parsed = edges.len(),
            layer = %layer_name,
            "edge count header disagrees with edge records"
        );
    }

    Ok(InputDataset {
        layer_name,
        vertex_count,
        format: InputFormat::Net,
        content: DatasetContent::Network { edge_count, edges },
    })
}

fn parse_ecom(text: &str) -> Result<InputDataset> {
    let sections = Sections::scan(
        text,
        &[ECOM_LAYER, NUM_VERTICES, ECOM_COMMUNITIES, ECOM_COMMUNITY_EDGES],
        ECOM_ALLOCATION,
    );
    let op = "format::parse_ecom";

    let layer_name = sections.text(ECOM_LAYER).map_err(|e| e.with_operation(op))?;
    let vertex_count = sections.count(NUM_VERTICES).map_err(|e| e.with_operation(op))?;
    let community_count = sections.count(ECOM_COMMUNITIES).map_err(|e| e.with_operation(op))?;
    let community_edge_count = sections
        .count(ECOM_COMMUNITY_EDGES)
        .map_err(|e| e.with_operation(op))?;
    sections.require_allocation().map_err(|e| e.with_operation(op))?;

    let mut communities: BTreeMap<CommunityId, Vec<(VertexId, VertexId)>> = BTreeMap::new();
    let mut allocation = Vec::with_capacity(sections.records.len() * 2);
    for &(line_no, line) in &sections.records {
        let [v1, v2, community] = split_record::<3>(line, line_no).map_err(|e| e.with_operation(op))?;
        let v1 = parse_id(v1, line_no).map_err(|e| e.with_operation(op))?;
        let v2 = parse_id(v2, line_no).map_err(|e| e.with_operation(op))?;
        let community = parse_id(community, line_no).map_err(|e| e.with_operation(op))?;
        communities.entry(community).or_default().push((v1, v2));
        allocation.push((v1, community));
        allocation.push((v2, community));
    }

    if communities.len() != community_count {
        warn!(
            declared = community_count,
            parsed = communities.len(),
            layer = %layer_name,
            "community count header disagrees with allocation"
        );
    }
    if sections.records.len() != community_edge_count {
        warn!(
            declared = community_edge_count,
            parsed = sections.records.len(),
            layer = %layer_name,
            "community edge count header disagrees with allocation"
        );
    }

    Ok(InputDataset {
        layer_name,
        vertex_count,
        format: InputFormat::Ecom,
        content: DatasetContent::EdgeCommunities {
            community_count,
            community_edge_count,
            communities,
            allocation,
        },
    })
}

fn parse_vcom(text: &str) -> Result<InputDataset> {
    let sections = Sections::scan(
        text,
        &[VCOM_LAYER, NUM_VERTICES, VCOM_COMMUNITIES],
        VCOM_ALLOCATION,
    );
    let op = "format::parse_vcom";

    let layer_name = sections.text(VCOM_LAYER).map_err(|e| e.with_operation(op))?;
    let vertex_count = sections.count(NUM_VERTICES).map_err(|e| e.with_operation(op))?;
    let community_count = sections.count(VCOM_COMMUNITIES).map_err(|e| e.with_operation(op))?;
    sections.require_allocation().map_err(|e| e.with_operation(op))?;

    let mut communities: BTreeMap<CommunityId, Vec<VertexId>> = BTreeMap::new();
    let mut allocation = Vec::with_capacity(sections.records.len());
    for &(line_no, line) in &sections.records {
        let [vertex, community] = split_record::<2>(line, line_no).map_err(|e| e.with_operation(op))?;
        let vertex = parse_id(vertex, line_no).map_err(|e| e.with_operation(op))?;
        let community = parse_id(community, line_no).map_err(|e| e.with_operation(op))?;
        communities.entry(community).or_default().push(vertex);
        allocation.push((vertex, community));
    }

    if communities.len() != community_count {
        warn!(
            declared = community_count,
            parsed = communities.len(),
            layer = %layer_name,
            "community count header disagrees with allocation"
        );
    }

    Ok(InputDataset {
        layer_name,
        vertex_count,
        format: InputFormat::Vcom,
        content: DatasetContent::VertexCommunities {
            community_count,
            communities,
            allocation,
        },
    })
}

/// Header values and allocation records of a community file.
struct Sections<'a> {
    /// header -> (1-based line number, trimmed value line)
    values: BTreeMap<&'static str, (usize, &'a str)>,
    records: Vec<(usize, &'a str)>,
    has_allocation: bool,
    allocation_header: &'static str,
}

impl<'a> Sections<'a> {
    fn scan(
        text: &'a str,
        value_headers: &[&'static str],
        allocation_header: &'static str,
    ) -> Self {
        let mut sections = Sections {
            values: BTreeMap::new(),
            records: Vec::new(),
            has_allocation: false,
            allocation_header,
        };

        let mut lines = text.lines().enumerate();
        while let Some((idx, line)) = lines.next() {
            if line.starts_with('#') {
                if let Some(header) = value_headers.iter().find(|h| line.starts_with(**h)) {
                    // The value is the very next line, whatever it holds.
                    if let Some((value_idx, value)) = lines.next() {
                        sections.values.insert(*header, (value_idx + 1, value.trim()));
                    }
                } else if line.starts_with(allocation_header) {
                    sections.has_allocation = true;
                }
                continue;
            }

            let line = line.trim();
            if sections.has_allocation && !line.is_empty() {
                sections.records.push((idx + 1, line));
            }
        }

        sections
    }

    fn value(&self, header: &'static str) -> Result<(usize, &'a str)> {
        self.values
            .get(header)
            .copied()
            .ok_or_else(|| Error::missing_header(header))
    }

    fn text(&self, header: &'static str) -> Result<String> {
        self.value(header).map(|(_, value)| value.to_string())
    }

    fn count(&self, header: &'static str) -> Result<usize> {
        let (line_no, value) = self.value(header)?;
        parse_count(value, line_no, header)
    }

    fn require_allocation(&self) -> Result<()> {
        if self.has_allocation {
            Ok(())
        } else {
            Err(Error::missing_header(self.allocation_header))
        }
    }
}

fn split_record<const N: usize>(line: &str, line_no: usize) -> Result<[&str; N]> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let found = fields.len();
    fields.try_into().map_err(|_| {
        Error::parse_failed(line_no, format!("expected {N} fields, found {found}"))
            .with_context("record", line)
    })
}

fn parse_id(field: &str, line_no: usize) -> Result<u32> {
    field.parse::<u32>().map_err(|e| {
        Error::parse_failed(line_no, format!("'{field}' is not a numeric id"))
            .set_source(e)
    })
}

fn parse_weight(field: &str, line_no: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|e| {
        Error::parse_failed(line_no, format!("'{field}' is not a numeric weight"))
            .set_source(e)
    })
}

fn parse_count(field: &str, line_no: usize, what: &str) -> Result<usize> {
    field.parse::<usize>().map_err(|e| {
        Error::parse_failed(line_no, format!("{what}: '{field}' is not a count"))
            .set_source(e)
    })
}

/// Serialize a dataset back into its own text format.
///
/// Community records are written grouped by community id, so the output is a
/// normalized form of the input rather than a byte-identical copy. `.net`
/// vertex lines are not kept by the parser and are written as bare ids.
pub fn write_dataset(dataset: &InputDataset) -> String {
    let mut out = String::new();
    match &dataset.content {
        DatasetContent::Network { edge_count, edges } => {
            let _ = writeln!(out, "{}", dataset.layer_name);
            let _ = writeln!(out, "{}", dataset.vertex_count);
            let _ = writeln!(out, "{}", edge_count);
            for vertex in 0..dataset.vertex_count {
                let _ = writeln!(out, "{vertex}");
            }
            for edge in edges {
                let _ = writeln!(out, "{},{},{:?}", edge.source, edge.target, edge.weight);
            }
        }
        DatasetContent::EdgeCommunities {
            community_count,
            community_edge_count,
            communities,
            ..
        } => {
            let _ = writeln!(out, "{ECOM_LAYER}\n{}", dataset.layer_name);
            let _ = writeln!(out, "{NUM_VERTICES}\n{}", dataset.vertex_count);
            let _ = writeln!(out, "{ECOM_COMMUNITIES}\n{community_count}");
            let _ = writeln!(out, "{ECOM_COMMUNITY_EDGES}\n{community_edge_count}");
            let _ = writeln!(out, "{ECOM_ALLOCATION}");
            for (community, edges) in communities {
                for (v1, v2) in edges {
                    let _ = writeln!(out, "{v1},{v2},{community}");
                }
            }
        }
        DatasetContent::VertexCommunities {
            community_count,
            communities,
            ..
        } => {
            let _ = writeln!(out, "{VCOM_LAYER}\n{}", dataset.layer_name);
            let _ = writeln!(out, "{NUM_VERTICES}\n{}", dataset.vertex_count);
            let _ = writeln!(out, "{VCOM_COMMUNITIES}\n{community_count}");
            let _ = writeln!(out, "{VCOM_ALLOCATION}");
            for (community, vertices) in communities {
                for vertex in vertices {
                    let _ = writeln!(out, "{vertex},{community}");
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    const VCOM: &str = "\
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

    #[test]
    fn vcom_groups_vertices_by_community() {
        let dataset = parse_str(VCOM, InputFormat::Vcom).unwrap();
        assert_eq!(dataset.layer_name, "L2");
        assert_eq!(dataset.vertex_count, 6);

        let DatasetContent::VertexCommunities {
            community_count,
            communities,
            ..
        } = dataset.content
        else {
            panic!("expected vertex communities");
        };
        assert_eq!(community_count, 4);

        let expected: BTreeMap<u32, Vec<u32>> = [
            (1, vec![1, 2, 3]),
            (2, vec![4]),
            (3, vec![5]),
            (4, vec![6]),
        ]
        .into_iter()
        .collect();
        assert_eq!(communities, expected);
    }

    #[test]
    fn ecom_registers_edges_under_community() {
        let text = "\
# Edge Community File for Layer
L1
# Number of Vertices
4
# Number of Non-Singleton Communities
2
# Number of Community Edges
3
# Edge Community Allocation
1,2,7
2,3,7
3,4,9
";
        let dataset = parse_str(text, InputFormat::Ecom).unwrap();
        let DatasetContent::EdgeCommunities {
            communities,
            community_edge_count,
            ..
        } = &dataset.content
        else {
            panic!("expected edge communities");
        };
        assert_eq!(*community_edge_count, 3);
        assert_eq!(communities[&7], vec![(1, 2), (2, 3)]);
        assert_eq!(communities[&9], vec![(3, 4)]);
    }

    #[test]
    fn net_edges_start_after_vertex_lines() {
        let text = "cluster_a\n3\n2\n0\n1\n2\n0,1,1.5\n1,2,2\n";
        let dataset = parse_str(text, InputFormat::Net).unwrap();
        assert_eq!(dataset.layer_name, "cluster_a");
        assert_eq!(dataset.vertex_count, 3);
        assert_eq!(
            dataset.edges().unwrap(),
            &[WeightedEdge::new(0, 1, 1.5), WeightedEdge::new(1, 2, 2.0)]
        );
    }

    #[test]
    fn net_declared_edge_count_is_not_trusted_for_allocation() {
        let text = "c\n1\n18446744073709551615\n0\n0,0,1.0\n";
        let dataset = parse_str(text, InputFormat::Net).unwrap();
        assert_eq!(dataset.edges().unwrap(), &[WeightedEdge::new(0, 0, 1.0)]);
    }

    #[test]
    fn ecom_allocation_keeps_file_order() {
        let text = "\
# Edge Community File for Layer
L1
# Number of Vertices
3
# Number of Non-Singleton Communities
2
# Number of Community Edges
2
# Edge Community Allocation
1,2,9
2,3,1
";
        let dataset = parse_str(text, InputFormat::Ecom).unwrap();
        let DatasetContent::EdgeCommunities { allocation, .. } = &dataset.content else {
            panic!("expected edge communities");
        };
        assert_eq!(allocation, &vec![(1, 9), (2, 9), (2, 1), (3, 1)]);
        assert_eq!(dataset.vertex_communities(), vec![(1, 9), (2, 1), (3, 1)]);
    }

    #[test]
    fn net_without_edges() {
        let dataset = parse_str("solo\n2\n0\n0\n1\n", InputFormat::Net).unwrap();
        assert!(dataset.edges().unwrap().is_empty());
    }

    #[test]
    fn wrong_field_count_fails_whole_parse() {
        let text = VCOM.replace("4,2", "4,2,9");
        let err = parse_str(&text, InputFormat::Vcom).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
        assert_eq!(err.context_value("line"), Some("11"));
        assert_eq!(err.operation(), "format::parse_vcom");
    }

    #[test]
    fn non_numeric_id_fails() {
        let err = parse_str("c\n0\n1\na,1,1.0\n", InputFormat::Net).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
        assert!(err.message().contains("'a'"));
    }

    #[test]
    fn missing_header_is_reported() {
        let text = VCOM.replace("# Number of Vertices\n6\n", "");
        let err = parse_str(&text, InputFormat::Vcom).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingHeader);
        assert_eq!(err.context_value("header"), Some(NUM_VERTICES));
    }

    #[test]
    fn missing_allocation_is_reported() {
        let text = VCOM.replace("# Vertex Community Allocation\n", "");
        let err = parse_str(&text, InputFormat::Vcom).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingHeader);
    }

    #[test]
    fn truncated_net_header() {
        let err = parse_str("only_name\n", InputFormat::Net).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn comments_and_blank_lines_inside_allocation_are_skipped() {
        let text = format!("{VCOM}\n# trailing note\n7,4\n\n");
        let dataset = parse_str(&text, InputFormat::Vcom).unwrap();
        let DatasetContent::VertexCommunities { communities, .. } = dataset.content else {
            panic!("expected vertex communities");
        };
        assert_eq!(communities[&4], vec![6, 7]);
    }

    #[test]
    fn write_dataset_reparses_to_same_dataset() {
        let dataset = parse_str(VCOM, InputFormat::Vcom).unwrap();
        let reparsed = parse_str(&write_dataset(&dataset), InputFormat::Vcom).unwrap();
        assert_eq!(reparsed, dataset);
    }
}
