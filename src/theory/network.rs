use super::classify::{is_topology, is_topology_related};
use super::record::TheoryRow;

pub const LARGE_NETWORK_NODES: usize = 80;
pub const SIMILARITY_THRESHOLD: f64 = 0.75;
pub const LARGE_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const TOPOLOGICAL_PAIR_THRESHOLD: f64 = 0.6;

const QF_SIMILARITY_SPAN: f64 = 50.0;
const TOPOLOGY_BOOST: f64 = 1.3;
const RELATED_BOOST: f64 = 1.2;

#[derive(Clone, Debug, PartialEq)]
pub struct TheoryNode {
    pub id: String,
    pub category: String,
    pub quantum_fidelity: f64,
    pub stability: f64,
    pub entropy: f64,
    pub cqc: f64,
    pub result: String,
    pub is_topology: bool,
    pub is_topology_related: bool,
}

impl TheoryNode {
    pub fn from_row(row: &TheoryRow) -> Self {
        Self {
            id: row.theory.clone(),
            category: row.category.clone(),
            quantum_fidelity: row.quantum_fidelity,
            stability: row.stability,
            entropy: row.entropy,
            cqc: row.cqc,
            result: row.known_result.clone(),
            is_topology: is_topology(&row.category),
            is_topology_related: is_topology_related(&row.category),
        }
    }

    pub fn is_topological(&self) -> bool {
        self.is_topology || self.is_topology_related
    }

    pub fn is_solved(&self) -> bool {
        self.result.contains("Solved")
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TheoryEdge {
    pub source: usize,
    pub target: usize,
    pub strength: f64,
    pub is_topological: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TheoryNetwork {
    pub nodes: Vec<TheoryNode>,
    pub edges: Vec<TheoryEdge>,
}

pub fn pair_similarity(a: &TheoryNode, b: &TheoryNode) -> f64 {
    let qf_similarity = 1.0 - (a.quantum_fidelity - b.quantum_fidelity).abs() / QF_SIMILARITY_SPAN;
    let stability_similarity = 1.0 - (a.stability - b.stability).abs();

    if a.is_topology && b.is_topology {
        (qf_similarity * 0.6 + stability_similarity * 0.4) * TOPOLOGY_BOOST
    } else if a.is_topology_related && b.is_topology_related {
        (qf_similarity * 0.6 + stability_similarity * 0.4) * RELATED_BOOST
    } else {
        qf_similarity * 0.7 + stability_similarity * 0.3
    }
}

pub fn similarity_threshold(node_count: usize) -> f64 {
    if node_count > LARGE_NETWORK_NODES {
        LARGE_SIMILARITY_THRESHOLD
    } else {
        SIMILARITY_THRESHOLD
    }
}

impl TheoryNetwork {
    pub fn build<'a>(rows: impl IntoIterator<Item = &'a TheoryRow>) -> Self {
        let nodes = rows.into_iter().map(TheoryNode::from_row).collect::<Vec<_>>();
        let edges = Self::collect_edges(&nodes);
        Self { nodes, edges }
    }

    fn collect_edges(nodes: &[TheoryNode]) -> Vec<TheoryEdge> {
        let large = nodes.len() > LARGE_NETWORK_NODES;
        let threshold = similarity_threshold(nodes.len());

        let mut edges = Vec::new();
        for (source, a) in nodes.iter().enumerate() {
            for (offset, b) in nodes[source + 1..].iter().enumerate() {
                let both_topological = a.is_topological() && b.is_topological();
                if large && !a.is_topological() && !b.is_topological() {
                    continue;
                }

                let similarity = pair_similarity(a, b);
                if similarity > threshold
                    || (both_topological && similarity > TOPOLOGICAL_PAIR_THRESHOLD)
                {
                    edges.push(TheoryEdge {
                        source,
                        target: source + 1 + offset,
                        strength: similarity,
                        is_topological: both_topological,
                    });
                }
            }
        }
        edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
