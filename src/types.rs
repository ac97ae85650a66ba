//! Core types shared across the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{LexigraphError, Result};

/// A normalized word form, the atomic unit of all statistics.
///
/// Invariant: non-empty, lower-cased, and accepted by the normalizer
/// filters. Equality on the string is the aggregation key everywhere.
pub type Lemma = String;

/// Coarse part-of-speech category (Universal POS tagset subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    Adjective,
    Verb,
    Auxiliary,
    Other,
}

impl PosTag {
    /// Map a Universal POS tag string (`NOUN`, `ADJ`, ...) to a category.
    ///
    /// Unrecognized tags become [`PosTag::Other`] and never contribute to
    /// the bipartite statistics.
    pub fn from_upos(upos: &str) -> Self {
        match upos {
            "NOUN" => Self::Noun,
            "ADJ" => Self::Adjective,
            "VERB" => Self::Verb,
            "AUX" => Self::Auxiliary,
            _ => Self::Other,
        }
    }

    pub fn is_noun(&self) -> bool {
        matches!(self, Self::Noun)
    }

    pub fn is_adjective(&self) -> bool {
        matches!(self, Self::Adjective)
    }

    /// Verbs and auxiliaries share the modifier side of the verb-noun graph.
    pub fn is_verbal(&self) -> bool {
        matches!(self, Self::Verb | Self::Auxiliary)
    }
}

/// A lemma paired with its coarse POS category, produced by a
/// [`PosTagger`](crate::nlp::tagger::PosTagger).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub lemma: Lemma,
    pub pos: PosTag,
}

impl TaggedToken {
    pub fn new(lemma: impl Into<Lemma>, pos: PosTag) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
        }
    }
}

/// Numeric parameters consumed by the analysis stages.
///
/// Defaults mirror the reference batch invocation; every field is exposed
/// as a CLI flag. [`AnalysisConfig::validate`] runs before any scan so a
/// degenerate configuration never touches the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Unique-lemma target that bounds both streaming scans.
    pub target_unique_tokens: usize,
    /// Minimum lemma frequency for a language-core graph node.
    pub min_frequency: u64,
    /// Minimum connection weight for nodes and edges of the core graph.
    pub min_connection_weight: u64,
    /// Maximum number of nodes in the reduced core graph.
    pub max_nodes: usize,
    /// Top-N per POS category for the bipartite graphs.
    pub top_n_per_category: usize,
    /// Minimum pair weight for a bipartite edge.
    pub semantic_min_connection: u64,
    /// Maximum number of ranked entries fed to the Zipf regression.
    pub max_regression_points: usize,
    /// Number of noun entries looked up against the translator.
    pub noun_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_unique_tokens: 100_000,
            min_frequency: 12,
            min_connection_weight: 5,
            max_nodes: 250,
            top_n_per_category: 100,
            semantic_min_connection: 1,
            max_regression_points: 2000,
            noun_limit: 50,
        }
    }
}

impl AnalysisConfig {
    /// Reject degenerate parameter values before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: usize) -> Result<()> {
            if value == 0 {
                Err(LexigraphError::Config(format!("{name} must be positive")))
            } else {
                Ok(())
            }
        }

        positive("target_unique_tokens", self.target_unique_tokens)?;
        positive("max_nodes", self.max_nodes)?;
        positive("top_n_per_category", self.top_n_per_category)?;
        positive("max_regression_points", self.max_regression_points)?;
        // A threshold of 1 keeps everything; zero means the flag was
        // passed by mistake.
        if self.min_frequency == 0 {
            return Err(LexigraphError::Config(
                "min_frequency must be positive".into(),
            ));
        }
        if self.min_connection_weight == 0 {
            return Err(LexigraphError::Config(
                "min_connection_weight must be positive".into(),
            ));
        }
        if self.semantic_min_connection == 0 {
            return Err(LexigraphError::Config(
                "semantic_min_connection must be positive".into(),
            ));
        }
        Ok(())
    }
}
