pub const TOPOLOGY_TERMS: [&str; 6] = [
    "Topology",
    "Homology",
    "Manifold",
    "Geometric",
    "Differential Geometry",
    "Knot",
];

pub fn is_topology(category: &str) -> bool {
    category == "Topology"
}

/// Case-sensitive substring match against [`TOPOLOGY_TERMS`]. Categories are
/// not normalized, so `"algebraic topology"` does not count.
pub fn is_topology_related(category: &str) -> bool {
    TOPOLOGY_TERMS.iter().any(|term| category.contains(term))
}
