//! Persisted artifact payloads.
//!
//! Each analytical stage persists exactly one flat JSON document, and
//! every document is self-describing through its `metadata` block
//! (targets, thresholds, observed counts). These types are the stability
//! boundary: the presentation layer consumes them as-is.

use serde::{Deserialize, Serialize};

use crate::corpus::CorpusMetadata;
use crate::frequency::FrequencyEntry;
use crate::graph::core::{GraphEdge, GraphNode};
use crate::graph::NeighborScanMetadata;
use crate::semantic::{BipartiteGraph, SemanticScanMetadata};
use crate::translate::NounEntry;
use crate::zipf::{RegressionResult, ZipfPoint};

/// `corpus_<target>_tokens.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusArtifact {
    pub tokens: Vec<String>,
    pub metadata: CorpusMetadata,
}

/// Metadata block of the frequency table artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyMetadata {
    pub total_tokens: u64,
    pub unique_words: usize,
    /// Length of the capped corpus the run was anchored to.
    pub source_corpus_tokens: usize,
}

/// `frequency_table.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyArtifact {
    pub metadata: FrequencyMetadata,
    pub data: Vec<FrequencyEntry>,
}

/// Metadata block of the Zipf artifact: the regression itself plus the
/// number of points it was fitted over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZipfMetadata {
    pub points_count: usize,
    #[serde(flatten)]
    pub regression: RegressionResult,
}

/// `zipf_analysis.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZipfArtifact {
    pub metadata: ZipfMetadata,
    pub points: Vec<ZipfPoint>,
}

/// Metadata block of the language core graph artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreGraphMetadata {
    #[serde(flatten)]
    pub scan: NeighborScanMetadata,
    pub min_frequency: u64,
    pub min_connection_weight: u64,
    pub max_nodes: usize,
    pub selected_nodes: usize,
    pub selected_edges: usize,
}

/// `language_core_graph.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreGraphArtifact {
    pub metadata: CoreGraphMetadata,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Metadata block of the noun translation artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NounsMetadata {
    pub limit: usize,
    pub source_total_tokens: u64,
}

/// `nouns_translations.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NounsArtifact {
    pub metadata: NounsMetadata,
    pub data: Vec<NounEntry>,
}

/// Metadata block of the semantic bipartite artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticMetadata {
    #[serde(flatten)]
    pub scan: SemanticScanMetadata,
    pub top_n: usize,
    pub min_connection: u64,
}

/// `semantic_bipartite_graphs.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticArtifact {
    pub metadata: SemanticMetadata,
    pub adjective_noun: BipartiteGraph,
    pub verb_noun: BipartiteGraph,
}
