//! lexigraph: streaming lexical statistics and graph construction.
//!
//! Ingests a line-delimited dump of HTML-bearing article records and
//! derives a bounded, statistically-grounded dataset for visualization:
//!
//! - a capped token corpus ([`corpus`]),
//! - a frequency/rank table ([`frequency`]),
//! - a Zipf-law log-log regression ([`zipf`]),
//! - a co-occurrence "language core" graph ([`graph`]),
//! - two POS bipartite graphs ([`semantic`]),
//! - and a translated noun table ([`translate`]).
//!
//! The scanning stages share one early-stop policy: records stream in
//! deterministic sorted-path order until a unique-token target is
//! reached, and the record that crosses the target is always processed
//! to completion. Every artifact is immutable once built and persisted
//! atomically as a self-describing JSON document ([`pipeline`]).
//!
//! # Example
//!
//! ```no_run
//! use lexigraph::nlp::normalizer::{IdentityLemmatizer, TextNormalizer};
//! use lexigraph::nlp::stopwords::StopwordFilter;
//! use lexigraph::nlp::tagger::LexiconTagger;
//! use lexigraph::pipeline::{ArtifactPaths, Pipeline};
//! use lexigraph::source::RecordSource;
//! use lexigraph::translate::NullTranslator;
//! use lexigraph::types::AnalysisConfig;
//!
//! # fn main() -> lexigraph::error::Result<()> {
//! let source = RecordSource::discover(std::path::Path::new("data/raw"))?;
//! let normalizer =
//!     TextNormalizer::new(Box::new(IdentityLemmatizer), StopwordFilter::curated());
//! let tagger = LexiconTagger::from_tsv("pt", std::path::Path::new("data/lexicon.tsv"))?;
//!
//! let pipeline = Pipeline::new(
//!     source,
//!     normalizer,
//!     tagger,
//!     NullTranslator,
//!     AnalysisConfig::default(),
//!     ArtifactPaths::new("data/processed"),
//! )?;
//! let summary = pipeline.run(false)?;
//! println!("{} corpus tokens", summary.corpus_tokens);
//! # Ok(())
//! # }
//! ```

pub mod corpus;
pub mod counting;
pub mod error;
pub mod frequency;
pub mod graph;
pub mod nlp;
pub mod pipeline;
pub mod semantic;
pub mod source;
pub mod translate;
pub mod types;
pub mod zipf;

pub use error::{LexigraphError, Result};
pub use types::{AnalysisConfig, Lemma, PosTag, TaggedToken};
