use std::collections::HashSet;
use std::sync::Arc;

use crate::theory::TheoryNode;

use super::{SearchMatchCache, ViewModel};

/// Indices of nodes whose id contains `query`, ignoring case. An empty query
/// matches nothing.
pub(super) fn matching_indices(nodes: &[TheoryNode], query: &str) -> HashSet<usize> {
    if query.is_empty() {
        return HashSet::new();
    }

    let needle = query.to_lowercase();
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.id.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

impl ViewModel {
    pub(super) fn cached_search_matches(&mut self) -> Arc<HashSet<usize>> {
        if let Some(cached) = &self.search_match_cache
            && cached.graph_revision == self.render_graph_revision
            && cached.query == self.search
        {
            return Arc::clone(&cached.matches);
        }

        let matches = Arc::new(
            self.graph_cache
                .as_ref()
                .map(|cache| matching_indices(&cache.network.nodes, &self.search))
                .unwrap_or_default(),
        );

        self.search_match_cache = Some(SearchMatchCache {
            query: self.search.clone(),
            graph_revision: self.render_graph_revision,
            matches: Arc::clone(&matches),
        });

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::TheoryRow;

    fn nodes(ids: &[&str]) -> Vec<TheoryNode> {
        ids.iter()
            .map(|id| {
                TheoryNode::from_row(&TheoryRow {
                    theory: (*id).to_owned(),
                    ..TheoryRow::default()
                })
            })
            .collect()
    }

    #[test]
    fn substring_ignores_case() {
        let nodes = nodes(&["Poincare Conjecture", "Hodge Conjecture", "Riemann Hypothesis"]);
        let matches = matching_indices(&nodes, "CONJ");
        assert_eq!(matches, HashSet::from([0, 1]));
        assert_eq!(matching_indices(&nodes, "mann hyp"), HashSet::from([2]));
    }

    #[test]
    fn empty_query_matches_nothing() {
        let nodes = nodes(&["Poincare Conjecture"]);
        assert!(matching_indices(&nodes, "").is_empty());
    }

    #[test]
    fn whitespace_is_significant() {
        let nodes = nodes(&["Hodge"]);
        assert!(matching_indices(&nodes, " hodge").is_empty());
    }
}
