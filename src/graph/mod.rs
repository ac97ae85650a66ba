//! Co-occurrence graph construction and reduction
//!
//! This module accumulates neighbor statistics over the lemma stream and
//! reduces them to the bounded "language core" subgraph.

pub mod builder;
pub mod core;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::nlp::normalizer::TextNormalizer;
use crate::source::{RecordSource, ScanControl};

use builder::NeighborGraph;

/// Metadata of the neighbor-statistics scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborScanMetadata {
    pub target_unique_words: usize,
    pub unique_words_observed: usize,
    pub total_tokens_observed: u64,
    pub articles_used: usize,
    pub files_considered: usize,
    pub lemma_strategy: String,
}

/// The accumulated adjacency statistics plus scan metadata.
#[derive(Debug)]
pub struct NeighborScan {
    pub graph: NeighborGraph,
    pub metadata: NeighborScanMetadata,
}

/// Stream records and accumulate per-lemma frequencies and symmetric
/// neighbor weights, stopping once `target_unique` distinct lemmas have
/// been observed (same early-stop policy as the corpus collector: the
/// triggering record is processed to completion).
pub fn collect_neighbor_stats(
    source: &RecordSource,
    normalizer: &TextNormalizer,
    target_unique: usize,
) -> Result<NeighborScan> {
    let mut graph = NeighborGraph::new();
    let mut articles_used = 0usize;
    let mut total_tokens = 0u64;

    let stats = source.for_each_html(|html| {
        let lemmas = normalizer.normalize(html)?;
        if lemmas.is_empty() {
            return Ok(ScanControl::Continue);
        }
        articles_used += 1;
        total_tokens += lemmas.len() as u64;
        graph.observe_sequence(&lemmas);

        if graph.node_count() >= target_unique {
            Ok(ScanControl::Stop)
        } else {
            Ok(ScanControl::Continue)
        }
    })?;

    let metadata = NeighborScanMetadata {
        target_unique_words: target_unique,
        unique_words_observed: graph.node_count(),
        total_tokens_observed: total_tokens,
        articles_used,
        files_considered: stats.files_considered,
        lemma_strategy: normalizer.strategy(),
    };

    tracing::info!(
        unique_words = metadata.unique_words_observed,
        total_tokens = metadata.total_tokens_observed,
        articles_used = metadata.articles_used,
        "neighbor statistics collected"
    );

    Ok(NeighborScan { graph, metadata })
}
