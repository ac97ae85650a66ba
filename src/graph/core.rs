//! Threshold reduction to the bounded "language core" subgraph.
//!
//! Reduces the full neighbor statistics down to a visualization-ready
//! node/edge set. Thresholds apply consistently to both stages: node
//! selection and edge selection each honor the minimum connection weight,
//! and edge inclusion never depends on iteration order: symmetric pairs
//! are deduplicated by their unordered key.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::graph::builder::NeighborGraph;
use crate::nlp::stopwords::StopwordFilter;

/// A selected node of the reduced graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub frequency: u64,
    pub unique_neighbors: usize,
    /// Sum of all neighbor weights for this lemma.
    pub connection_weight: u64,
}

/// An undirected edge of the reduced graph, reported once per unordered
/// pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Reduction thresholds.
#[derive(Debug, Clone, Copy)]
pub struct CoreGraphParams {
    pub min_frequency: u64,
    pub min_connection_weight: u64,
    pub max_nodes: usize,
}

/// The bounded subgraph produced by [`reduce`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Reduce neighbor statistics to the bounded core subgraph.
///
/// Node candidates must clear the frequency threshold, not be a core
/// stopword or blocklisted, have at least one recorded neighbor, and
/// clear the connection-weight threshold. Candidates sort descending by
/// `(connection_weight, frequency)` with a stable sort, so first-seen
/// order breaks remaining ties, and are truncated to `max_nodes`. An edge survives
/// when both endpoints were selected and its pairwise weight clears the
/// connection threshold.
pub fn reduce(graph: &NeighborGraph, filter: &StopwordFilter, params: CoreGraphParams) -> CoreGraph {
    // Node selection, in first-seen order before the sort.
    let mut candidates: Vec<(u32, GraphNode)> = Vec::new();
    for (id, stats) in graph.nodes() {
        if stats.frequency < params.min_frequency {
            continue;
        }
        if filter.blocks_node(&stats.lemma) {
            continue;
        }
        if stats.edges.is_empty() {
            continue;
        }
        let connection_weight = stats.connection_weight();
        if connection_weight < params.min_connection_weight {
            continue;
        }
        candidates.push((
            id,
            GraphNode {
                id: stats.lemma.clone(),
                frequency: stats.frequency,
                unique_neighbors: stats.edges.len(),
                connection_weight,
            },
        ));
    }

    candidates.sort_by(|(_, a), (_, b)| {
        (b.connection_weight, b.frequency).cmp(&(a.connection_weight, a.frequency))
    });
    candidates.truncate(params.max_nodes);

    let selected_ids: FxHashSet<u32> = candidates.iter().map(|(id, _)| *id).collect();

    // Edge selection: deterministic order (selected nodes, then neighbor
    // ID), deduplicated by unordered pair.
    let mut edges: Vec<GraphEdge> = Vec::new();
    let mut seen_pairs: FxHashSet<(u32, u32)> = FxHashSet::default();
    for (id, _) in &candidates {
        let stats = match graph.node(*id) {
            Some(stats) => stats,
            None => continue,
        };
        let mut neighbors: Vec<(u32, u64)> =
            stats.edges.iter().map(|(&to, &weight)| (to, weight)).collect();
        neighbors.sort_by_key(|(to, _)| *to);

        for (neighbor, weight) in neighbors {
            if !selected_ids.contains(&neighbor) || weight < params.min_connection_weight {
                continue;
            }
            let key = (std::cmp::min(*id, neighbor), std::cmp::max(*id, neighbor));
            if !seen_pairs.insert(key) {
                continue;
            }
            edges.push(GraphEdge {
                source: stats.lemma.clone(),
                // Selected neighbor IDs always resolve to a stored node.
                target: graph.lemma(neighbor).unwrap_or_default().to_string(),
                weight,
            });
        }
    }

    CoreGraph {
        nodes: candidates.into_iter().map(|(_, node)| node).collect(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lemma;

    fn seq(words: &[&str]) -> Vec<Lemma> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn params(min_frequency: u64, min_connection_weight: u64, max_nodes: usize) -> CoreGraphParams {
        CoreGraphParams {
            min_frequency,
            min_connection_weight,
            max_nodes,
        }
    }

    fn scenario_graph() -> NeighborGraph {
        let mut graph = NeighborGraph::new();
        graph.observe_sequence(&seq(&["a", "b", "a", "c"]));
        graph.observe_sequence(&seq(&["b", "c", "b"]));
        graph.observe_sequence(&seq(&["a", "c"]));
        graph
    }

    #[test]
    fn test_end_to_end_scenario() {
        let graph = scenario_graph();
        let core = reduce(&graph, &StopwordFilter::empty(), params(1, 1, 10));

        assert_eq!(core.nodes.len(), 3);
        for node in &core.nodes {
            assert_eq!(node.frequency, 3);
            // Each lemma has two neighbors with two adjacencies apiece.
            assert_eq!(node.connection_weight, 4);
        }

        let mut edges: Vec<(String, String, u64)> = core
            .edges
            .iter()
            .map(|e| {
                let (s, t) = if e.source <= e.target {
                    (e.source.clone(), e.target.clone())
                } else {
                    (e.target.clone(), e.source.clone())
                };
                (s, t, e.weight)
            })
            .collect();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                ("a".into(), "b".into(), 2),
                ("a".into(), "c".into(), 2),
                ("b".into(), "c".into(), 2),
            ]
        );
    }

    #[test]
    fn test_no_duplicate_pairs_or_self_edges() {
        let core = reduce(&scenario_graph(), &StopwordFilter::empty(), params(1, 1, 10));

        let mut keys: Vec<(String, String)> = Vec::new();
        for edge in &core.edges {
            assert_ne!(edge.source, edge.target);
            let key = if edge.source <= edge.target {
                (edge.source.clone(), edge.target.clone())
            } else {
                (edge.target.clone(), edge.source.clone())
            };
            keys.push(key);
        }
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn test_frequency_threshold_excludes_nodes() {
        let core = reduce(&scenario_graph(), &StopwordFilter::empty(), params(4, 1, 10));
        assert!(core.nodes.is_empty());
        assert!(core.edges.is_empty());
    }

    #[test]
    fn test_connection_threshold_monotonicity() {
        let graph = scenario_graph();
        let loose = reduce(&graph, &StopwordFilter::empty(), params(1, 1, 10));
        let tight = reduce(&graph, &StopwordFilter::empty(), params(1, 2, 10));
        assert!(tight.edges.len() <= loose.edges.len());

        let small = reduce(&graph, &StopwordFilter::empty(), params(1, 1, 2));
        let large = reduce(&graph, &StopwordFilter::empty(), params(1, 1, 3));
        assert!(large.nodes.len() >= small.nodes.len());
    }

    #[test]
    fn test_max_nodes_keeps_highest_connection_weight() {
        let mut graph = NeighborGraph::new();
        graph.observe_sequence(&seq(&["a", "b"]));
        graph.observe_sequence(&seq(&["a", "c"]));
        graph.observe_sequence(&seq(&["a", "c"]));

        // a: weight 3 (b:1 + c:2), c: 2, b: 1.
        let core = reduce(&graph, &StopwordFilter::empty(), params(1, 1, 1));
        assert_eq!(core.nodes.len(), 1);
        assert_eq!(core.nodes[0].id, "a");
        // Its partners were not selected, so no edges survive.
        assert!(core.edges.is_empty());
    }

    #[test]
    fn test_equal_weights_tie_break_by_first_seen() {
        let core = reduce(&scenario_graph(), &StopwordFilter::empty(), params(1, 1, 10));
        let ids: Vec<&str> = core.nodes.iter().map(|n| n.id.as_str()).collect();
        // All three tie on (connection_weight, frequency); the stable sort
        // keeps first-seen order.
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stoplisted_nodes_excluded() {
        let graph = scenario_graph();
        let filter = StopwordFilter::from_list(&["a"]);
        let core = reduce(&graph, &filter, params(1, 1, 10));

        assert!(core.nodes.iter().all(|n| n.id != "a"));
        assert!(core
            .edges
            .iter()
            .all(|e| e.source != "a" && e.target != "a"));
    }

    #[test]
    fn test_edges_require_both_endpoints_selected() {
        let mut graph = NeighborGraph::new();
        // "hub" touches both; "rare" is below the frequency threshold.
        graph.observe_sequence(&seq(&["hub", "rare"]));
        graph.observe_sequence(&seq(&["hub", "other", "hub"]));

        let core = reduce(&graph, &StopwordFilter::empty(), params(2, 1, 10));
        assert!(core.nodes.iter().any(|n| n.id == "hub"));
        assert!(core.edges.iter().all(|e| e.source != "rare" && e.target != "rare"));
    }

    #[test]
    fn test_reduction_is_deterministic() {
        let graph = scenario_graph();
        let first = reduce(&graph, &StopwordFilter::empty(), params(1, 1, 10));
        let second = reduce(&graph, &StopwordFilter::empty(), params(1, 1, 10));
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.edges, second.edges);
    }
}
