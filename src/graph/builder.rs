//! Neighbor-statistics accumulator with efficient edge handling
//!
//! This module provides a mutable adjacency accumulator that uses
//! FxHashMap for O(1) edge lookups during construction. Node IDs are
//! assigned in first-seen order, which keeps every downstream iteration
//! deterministic.

use rustc_hash::FxHashMap;

use crate::types::Lemma;

/// A node in the neighbor graph: one lemma with its occurrence count and
/// adjacency weights.
#[derive(Debug, Clone)]
pub struct NodeStats {
    pub lemma: Lemma,
    /// Occurrence positions observed for this lemma.
    pub frequency: u64,
    /// Adjacency list: neighbor node ID → co-occurrence weight.
    pub edges: FxHashMap<u32, u64>,
}

impl NodeStats {
    fn new(lemma: impl Into<Lemma>) -> Self {
        Self {
            lemma: lemma.into(),
            frequency: 0,
            edges: FxHashMap::default(),
        }
    }

    /// Sum of all neighbor weights for this node.
    pub fn connection_weight(&self) -> u64 {
        self.edges.values().sum()
    }
}

/// A mutable neighbor-statistics accumulator optimized for incremental
/// construction over a streamed lemma sequence.
#[derive(Debug, Default)]
pub struct NeighborGraph {
    /// Maps lemma → node ID (first-seen order).
    lemma_to_id: FxHashMap<Lemma, u32>,
    /// Node storage, indexed by ID.
    nodes: Vec<NodeStats>,
}

impl NeighborGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            lemma_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create the node for `lemma`, returning its ID.
    pub fn get_or_create_node(&mut self, lemma: &str) -> u32 {
        if let Some(&id) = self.lemma_to_id.get(lemma) {
            return id;
        }
        let id = self.nodes.len() as u32;
        self.lemma_to_id.insert(lemma.to_string(), id);
        self.nodes.push(NodeStats::new(lemma));
        id
    }

    /// Increment the edge weight between two nodes in both directions.
    ///
    /// Self-loops are ignored.
    pub fn increment_edge(&mut self, from: u32, to: u32) {
        if from == to {
            return;
        }
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0) += 1;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0) += 1;
        }
    }

    /// Fold one record's ordered lemma sequence into the statistics.
    ///
    /// Every position increments its lemma's frequency; every consecutive
    /// pair of *distinct* lemmas increments their symmetric edge weight.
    /// Identical adjacent repeats contribute frequency only.
    pub fn observe_sequence(&mut self, lemmas: &[Lemma]) {
        let mut previous: Option<u32> = None;
        for lemma in lemmas {
            let id = self.get_or_create_node(lemma);
            self.nodes[id as usize].frequency += 1;
            if let Some(prev) = previous {
                if prev != id {
                    self.increment_edge(prev, id);
                }
            }
            previous = Some(id);
        }
    }

    /// Number of distinct lemmas observed.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges, counting each undirected edge once.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    pub fn node(&self, id: u32) -> Option<&NodeStats> {
        self.nodes.get(id as usize)
    }

    pub fn node_id(&self, lemma: &str) -> Option<u32> {
        self.lemma_to_id.get(lemma).copied()
    }

    pub fn lemma(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.lemma.as_str())
    }

    /// Iterate over all nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &NodeStats)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
