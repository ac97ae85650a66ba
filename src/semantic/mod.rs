//! POS bipartite graph construction
//!
//! Streams POS-tagged lemmas up to a token budget, tallies per-category
//! frequencies and adjacent modifier-noun pairs, and reduces them to two
//! bipartite graphs (adjective-noun and verb-noun) that share the noun
//! side.

use serde::{Deserialize, Serialize};

use crate::counting::{PairTally, Tally};
use crate::error::Result;
use crate::nlp::html::html_to_text;
use crate::nlp::tagger::PosTagger;
use crate::source::{RecordSource, ScanControl};
use crate::types::TaggedToken;

/// Lemmas excluded from the bipartite statistics regardless of category.
const SEMANTIC_BLOCKLIST: &[&str] = &["c", "km", "wikipedia"];

/// POS-aware lemma normalization.
///
/// Stricter than the corpus normalizer: URLs and pathy lemmas are
/// rejected outright, and only letters, hyphens, and apostrophes may
/// appear. Returns `None` for anything that should not enter the
/// statistics.
pub fn normalize_lemma(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http") || raw.starts_with("www") || raw.contains('/') {
        return None;
    }
    let token = raw.trim_matches(['_', '\'', '"', '-']).to_lowercase();
    if token.is_empty() {
        return None;
    }
    if token.chars().any(|ch| ch.is_numeric()) {
        return None;
    }
    if !token
        .chars()
        .all(|ch| ch.is_alphabetic() || ch == '-' || ch == '\'')
    {
        return None;
    }
    if !token.chars().any(|ch| ch.is_alphabetic()) {
        return None;
    }
    if token.chars().count() < 2 {
        return None;
    }
    if token
        .chars()
        .any(|ch| ('\u{AC00}'..='\u{D7A3}').contains(&ch))
    {
        return None;
    }
    if token.starts_with('{') || token.starts_with('\\') || token.contains("displaystyle") {
        return None;
    }
    if SEMANTIC_BLOCKLIST.contains(&token.as_str()) {
        return None;
    }
    Some(token)
}

/// Accumulated category tallies and directed pair tallies.
///
/// Pair keys are always `(modifier, noun)` regardless of which linear
/// order the two tokens appeared in.
#[derive(Debug, Default)]
pub struct BipartiteStats {
    pub noun_counts: Tally,
    pub adjective_counts: Tally,
    pub verb_counts: Tally,
    pub adjective_noun: PairTally,
    pub verb_noun: PairTally,
    pub total_tokens: u64,
}

impl BipartiteStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tagged token into the statistics.
    ///
    /// `previous` is the immediately preceding tagged token of the
    /// stream (the stream, not the record): adjacency spans record
    /// boundaries exactly as the tokens were observed.
    pub fn observe(&mut self, token: &TaggedToken, previous: Option<&TaggedToken>) {
        self.total_tokens += 1;

        if token.pos.is_noun() {
            self.noun_counts.increment(&token.lemma);
        }
        if token.pos.is_adjective() {
            self.adjective_counts.increment(&token.lemma);
        }
        if token.pos.is_verbal() {
            self.verb_counts.increment(&token.lemma);
        }

        let Some(prev) = previous else {
            return;
        };
        // Either linear order produces the same (modifier, noun) pair.
        if prev.pos.is_noun() && token.pos.is_adjective() {
            self.adjective_noun.increment(&token.lemma, &prev.lemma);
        } else if prev.pos.is_adjective() && token.pos.is_noun() {
            self.adjective_noun.increment(&prev.lemma, &token.lemma);
        }
        if prev.pos.is_noun() && token.pos.is_verbal() {
            self.verb_noun.increment(&token.lemma, &prev.lemma);
        } else if prev.pos.is_verbal() && token.pos.is_noun() {
            self.verb_noun.increment(&prev.lemma, &token.lemma);
        }
    }
}

/// Metadata of the tagged-stream scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticScanMetadata {
    pub target_tokens: usize,
    pub total_tokens_observed: u64,
    pub pos_strategy: String,
}

/// Stream records through the tagger and accumulate bipartite statistics
/// until `target_tokens` tagged tokens have been observed.
///
/// The stop is exact: the token that reaches the budget is the last one
/// observed.
pub fn collect_bipartite<T: PosTagger>(
    source: &RecordSource,
    tagger: &T,
    target_tokens: usize,
) -> Result<(BipartiteStats, SemanticScanMetadata)> {
    let mut stats = BipartiteStats::new();
    let mut previous: Option<TaggedToken> = None;

    source.for_each_html(|html| {
        let text = html_to_text(html);
        if text.is_empty() {
            return Ok(ScanControl::Continue);
        }
        for tagged in tagger.tag(&text)? {
            let Some(lemma) = normalize_lemma(&tagged.lemma) else {
                continue;
            };
            let token = TaggedToken::new(lemma, tagged.pos);
            stats.observe(&token, previous.as_ref());
            previous = Some(token);
            if stats.total_tokens as usize >= target_tokens {
                return Ok(ScanControl::Stop);
            }
        }
        Ok(ScanControl::Continue)
    })?;

    let metadata = SemanticScanMetadata {
        target_tokens,
        total_tokens_observed: stats.total_tokens,
        pos_strategy: tagger.strategy(),
    };

    tracing::info!(
        total_tokens = stats.total_tokens,
        nouns = stats.noun_counts.len(),
        adjectives = stats.adjective_counts.len(),
        verbs = stats.verb_counts.len(),
        "bipartite statistics collected"
    );

    Ok((stats, metadata))
}

/// One node of a bipartite side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BipartiteNode {
    pub id: String,
    pub frequency: u64,
}

/// A modifier → noun edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BipartiteEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Per-graph shape description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BipartiteGraphMetadata {
    pub left_label: String,
    pub right_label: String,
    pub left_count: usize,
    pub right_count: usize,
    pub edge_count: usize,
}

/// One reduced bipartite graph: truncated node sides plus the edges that
/// survive between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BipartiteGraph {
    pub metadata: BipartiteGraphMetadata,
    pub left_nodes: Vec<BipartiteNode>,
    pub right_nodes: Vec<BipartiteNode>,
    pub edges: Vec<BipartiteEdge>,
}

/// Both reduced graphs. They share the noun side but have independent
/// modifier sides and edge sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticGraphs {
    pub adjective_noun: BipartiteGraph,
    pub verb_noun: BipartiteGraph,
}

/// Reduce accumulated statistics to the two top-N bipartite graphs.
///
/// Each category is truncated to its top-N by frequency independently;
/// an edge survives only when both endpoints are in their side's top-N
/// set and the pair weight clears `min_connection`.
pub fn build_graphs(stats: &BipartiteStats, top_n: usize, min_connection: u64) -> SemanticGraphs {
    let top_nouns = stats.noun_counts.top(top_n);
    let top_adjectives = stats.adjective_counts.top(top_n);
    let top_verbs = stats.verb_counts.top(top_n);

    let adjective_noun = reduce_side(
        "adjectives",
        "nouns",
        &top_adjectives,
        &top_nouns,
        &stats.adjective_noun,
        min_connection,
    );
    let verb_noun = reduce_side(
        "verbs",
        "nouns",
        &top_verbs,
        &top_nouns,
        &stats.verb_noun,
        min_connection,
    );

    SemanticGraphs {
        adjective_noun,
        verb_noun,
    }
}

fn reduce_side(
    left_label: &str,
    right_label: &str,
    left: &[(&str, u64)],
    right: &[(&str, u64)],
    pairs: &PairTally,
    min_connection: u64,
) -> BipartiteGraph {
    let left_set: rustc_hash::FxHashSet<&str> = left.iter().map(|(word, _)| *word).collect();
    let right_set: rustc_hash::FxHashSet<&str> = right.iter().map(|(word, _)| *word).collect();

    let edges: Vec<BipartiteEdge> = pairs
        .iter()
        .filter(|(modifier, noun, weight)| {
            left_set.contains(modifier) && right_set.contains(noun) && *weight >= min_connection
        })
        .map(|(modifier, noun, weight)| BipartiteEdge {
            source: modifier.to_string(),
            target: noun.to_string(),
            weight,
        })
        .collect();

    BipartiteGraph {
        metadata: BipartiteGraphMetadata {
            left_label: left_label.to_string(),
            right_label: right_label.to_string(),
            left_count: left.len(),
            right_count: right.len(),
            edge_count: edges.len(),
        },
        left_nodes: nodes_of(left),
        right_nodes: nodes_of(right),
        edges,
    }
}

fn nodes_of(ranked: &[(&str, u64)]) -> Vec<BipartiteNode> {
    ranked
        .iter()
        .map(|(word, frequency)| BipartiteNode {
            id: word.to_string(),
            frequency: *frequency,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosTag;

    fn noun(lemma: &str) -> TaggedToken {
        TaggedToken::new(lemma, PosTag::Noun)
    }

    fn adjective(lemma: &str) -> TaggedToken {
        TaggedToken::new(lemma, PosTag::Adjective)
    }

    fn verb(lemma: &str) -> TaggedToken {
        TaggedToken::new(lemma, PosTag::Verb)
    }

    fn observe_all(stats: &mut BipartiteStats, tokens: &[TaggedToken]) {
        let mut previous: Option<TaggedToken> = None;
        for token in tokens {
            stats.observe(token, previous.as_ref());
            previous = Some(token.clone());
        }
    }

    #[test]
    fn test_normalize_lemma_rules() {
        assert_eq!(normalize_lemma("Cidade"), Some("cidade".to_string()));
        assert_eq!(normalize_lemma("'casa'"), Some("casa".to_string()));
        assert_eq!(normalize_lemma("http-site"), None);
        assert_eq!(normalize_lemma("www"), None);
        assert_eq!(normalize_lemma("a/b"), None);
        assert_eq!(normalize_lemma("ano2020"), None);
        assert_eq!(normalize_lemma("x"), None);
        assert_eq!(normalize_lemma("km"), None);
        assert_eq!(normalize_lemma("wikipedia"), None);
        assert_eq!(normalize_lemma("guarda-chuva"), Some("guarda-chuva".to_string()));
    }

    #[test]
    fn test_pair_recorded_in_either_order() {
        let mut stats = BipartiteStats::new();
        // adjective before noun...
        observe_all(&mut stats, &[adjective("grande"), noun("casa")]);
        assert_eq!(stats.adjective_noun.get("grande", "casa"), 1);

        // ...and noun before adjective produce the same key.
        let mut reversed = BipartiteStats::new();
        observe_all(&mut reversed, &[noun("casa"), adjective("grande")]);
        assert_eq!(reversed.adjective_noun.get("grande", "casa"), 1);
    }

    #[test]
    fn test_verb_and_aux_share_the_modifier_side() {
        let mut stats = BipartiteStats::new();
        observe_all(
            &mut stats,
            &[
                noun("casa"),
                TaggedToken::new("ser", PosTag::Auxiliary),
                verb("crescer"),
                noun("cidade"),
            ],
        );
        assert_eq!(stats.verb_counts.get("ser"), 1);
        assert_eq!(stats.verb_counts.get("crescer"), 1);
        assert_eq!(stats.verb_noun.get("ser", "casa"), 1);
        assert_eq!(stats.verb_noun.get("crescer", "cidade"), 1);
    }

    #[test]
    fn test_other_category_breaks_no_pairs() {
        let mut stats = BipartiteStats::new();
        observe_all(
            &mut stats,
            &[
                adjective("grande"),
                TaggedToken::new("muito", PosTag::Other),
                noun("casa"),
            ],
        );
        // "muito" sits between them, so no pair is adjacent.
        assert!(stats.adjective_noun.is_empty());
    }

    #[test]
    fn test_reduction_truncates_and_filters_edges() {
        let mut stats = BipartiteStats::new();
        observe_all(
            &mut stats,
            &[
                adjective("grande"),
                noun("casa"),
                adjective("grande"),
                noun("casa"),
                adjective("pequeno"),
                noun("rua"),
            ],
        );

        let graphs = build_graphs(&stats, 1, 1);
        let adj = &graphs.adjective_noun;
        // Top-1 per side: "grande" and "casa".
        assert_eq!(adj.left_nodes, vec![BipartiteNode { id: "grande".into(), frequency: 2 }]);
        assert_eq!(adj.right_nodes, vec![BipartiteNode { id: "casa".into(), frequency: 2 }]);
        // The pequeno pairs lost an endpoint each; grande-casa was
        // adjacent three times (either linear order records the pair).
        assert_eq!(adj.edges.len(), 1);
        assert_eq!(adj.edges[0].source, "grande");
        assert_eq!(adj.edges[0].target, "casa");
        assert_eq!(adj.edges[0].weight, 3);
        assert_eq!(adj.metadata.edge_count, 1);
    }

    #[test]
    fn test_min_connection_filters_edges() {
        let mut stats = BipartiteStats::new();
        observe_all(&mut stats, &[adjective("grande"), noun("casa")]);

        let graphs = build_graphs(&stats, 10, 2);
        assert!(graphs.adjective_noun.edges.is_empty());
        // Nodes still appear; only the edge fell below the threshold.
        assert_eq!(graphs.adjective_noun.left_nodes.len(), 1);
    }

    #[test]
    fn test_graphs_share_noun_side() {
        let mut stats = BipartiteStats::new();
        observe_all(
            &mut stats,
            &[adjective("grande"), noun("casa"), verb("crescer"), noun("casa")],
        );
        let graphs = build_graphs(&stats, 5, 1);
        assert_eq!(
            graphs.adjective_noun.right_nodes,
            graphs.verb_noun.right_nodes
        );
    }
}
