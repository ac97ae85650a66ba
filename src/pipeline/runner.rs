//! Pipeline runner: sequences the analytical stages and persists one
//! artifact per stage.
//!
//! The runner owns no statistics of its own: collaborators (normalizer,
//! tagger, translator) are constructed once by the caller and injected,
//! each stage produces one immutable artifact, and downstream stages read
//! those artifacts rather than sharing mutable state.
//!
//! Corpus and frequency artifacts from a prior run are reused unless a
//! forced rebuild is requested; the graph stages always re-derive their
//! statistics from the dump.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::corpus;
use crate::counting::Tally;
use crate::error::Result;
use crate::frequency::frequency_table;
use crate::graph::{self, core::CoreGraphParams};
use crate::nlp::normalizer::TextNormalizer;
use crate::nlp::tagger::PosTagger;
use crate::pipeline::artifacts::*;
use crate::pipeline::persist;
use crate::semantic;
use crate::source::RecordSource;
use crate::translate::{self, Translator};
use crate::types::AnalysisConfig;
use crate::zipf;

/// Output locations of the persisted artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    out_dir: PathBuf,
}

impl ArtifactPaths {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn corpus(&self, target: usize) -> PathBuf {
        self.out_dir.join(format!("corpus_{target}_tokens.json"))
    }

    pub fn frequency(&self) -> PathBuf {
        self.out_dir.join("frequency_table.json")
    }

    pub fn zipf(&self) -> PathBuf {
        self.out_dir.join("zipf_analysis.json")
    }

    pub fn language_core(&self) -> PathBuf {
        self.out_dir.join("language_core_graph.json")
    }

    pub fn nouns(&self) -> PathBuf {
        self.out_dir.join("nouns_translations.json")
    }

    pub fn semantic(&self) -> PathBuf {
        self.out_dir.join("semantic_bipartite_graphs.json")
    }
}

/// Element counts of one completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub corpus_tokens: usize,
    pub frequency_entries: usize,
    pub zipf_points: usize,
    pub core_nodes: usize,
    pub core_edges: usize,
    pub noun_entries: usize,
    pub adjective_noun_edges: usize,
    pub verb_noun_edges: usize,
}

/// The statically-composed batch pipeline.
pub struct Pipeline<T, Tr> {
    source: RecordSource,
    normalizer: TextNormalizer,
    tagger: T,
    translator: Tr,
    config: AnalysisConfig,
    paths: ArtifactPaths,
}

impl<T: PosTagger, Tr: Translator> Pipeline<T, Tr> {
    /// Assemble a pipeline. Fails fast on a degenerate configuration so
    /// no scan starts with invalid thresholds.
    pub fn new(
        source: RecordSource,
        normalizer: TextNormalizer,
        tagger: T,
        translator: Tr,
        config: AnalysisConfig,
        paths: ArtifactPaths,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            normalizer,
            tagger,
            translator,
            config,
            paths,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Execute every stage in order. With `force_rebuild`, prior corpus
    /// and frequency artifacts are ignored and recomputed.
    pub fn run(&self, force_rebuild: bool) -> Result<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        let (corpus_artifact, tally) = self.load_or_build_corpus(force_rebuild)?;
        summary.corpus_tokens = corpus_artifact.tokens.len();

        let frequency = self.load_or_build_frequency(force_rebuild, tally, &corpus_artifact)?;
        summary.frequency_entries = frequency.data.len();

        let zipf_artifact = self.build_zipf(&frequency)?;
        summary.zipf_points = zipf_artifact.points.len();

        let core = self.build_language_core()?;
        summary.core_nodes = core.nodes.len();
        summary.core_edges = core.edges.len();

        let nouns = self.build_nouns(&frequency)?;
        summary.noun_entries = nouns.data.len();

        let semantic_artifact = self.build_semantic()?;
        summary.adjective_noun_edges = semantic_artifact.adjective_noun.edges.len();
        summary.verb_noun_edges = semantic_artifact.verb_noun.edges.len();

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            corpus_tokens = summary.corpus_tokens,
            core_nodes = summary.core_nodes,
            "pipeline complete"
        );
        Ok(summary)
    }

    /// Reuse a persisted corpus, or scan and persist a fresh one.
    ///
    /// The full tally only exists when the corpus was rebuilt; a reused
    /// corpus artifact carries the token list and metadata alone.
    fn load_or_build_corpus(&self, force: bool) -> Result<(CorpusArtifact, Option<Tally>)> {
        let path = self.paths.corpus(self.config.target_unique_tokens);
        if !force && path.exists() {
            tracing::info!(path = %path.display(), "reusing persisted corpus");
            return Ok((persist::read_json(&path)?, None));
        }

        let started = Instant::now();
        let result = corpus::collect(
            &self.source,
            &self.normalizer,
            self.config.target_unique_tokens,
        )?;
        let artifact = CorpusArtifact {
            tokens: result.tokens,
            metadata: result.metadata,
        };
        persist::write_json(&path, &artifact)?;
        tracing::info!(
            stage = "corpus",
            elapsed_ms = started.elapsed().as_millis() as u64,
            tokens = artifact.tokens.len(),
            "stage persisted"
        );
        Ok((artifact, Some(result.tally)))
    }

    /// Reuse a persisted frequency table, or reduce one from the tally.
    ///
    /// When the corpus was reused but the frequency artifact is missing,
    /// the full tally has to be re-derived with a fresh scan; the capped
    /// corpus alone cannot reproduce observation counts.
    fn load_or_build_frequency(
        &self,
        force: bool,
        tally: Option<Tally>,
        corpus_artifact: &CorpusArtifact,
    ) -> Result<FrequencyArtifact> {
        let path = self.paths.frequency();
        if !force && path.exists() {
            tracing::info!(path = %path.display(), "reusing persisted frequency table");
            return Ok(persist::read_json(&path)?);
        }

        let started = Instant::now();
        let tally = match tally {
            Some(tally) => tally,
            None => {
                corpus::collect(
                    &self.source,
                    &self.normalizer,
                    self.config.target_unique_tokens,
                )?
                .tally
            }
        };

        let artifact = FrequencyArtifact {
            metadata: FrequencyMetadata {
                total_tokens: tally.total(),
                unique_words: tally.len(),
                source_corpus_tokens: corpus_artifact.tokens.len(),
            },
            data: frequency_table(&tally),
        };
        persist::write_json(&path, &artifact)?;
        tracing::info!(
            stage = "frequency",
            elapsed_ms = started.elapsed().as_millis() as u64,
            entries = artifact.data.len(),
            "stage persisted"
        );
        Ok(artifact)
    }

    fn build_zipf(&self, frequency: &FrequencyArtifact) -> Result<ZipfArtifact> {
        let started = Instant::now();
        let analysis = zipf::fit(&frequency.data, self.config.max_regression_points);
        let artifact = ZipfArtifact {
            metadata: ZipfMetadata {
                points_count: analysis.points.len(),
                regression: analysis.regression,
            },
            points: analysis.points,
        };
        persist::write_json(&self.paths.zipf(), &artifact)?;
        tracing::info!(
            stage = "zipf",
            elapsed_ms = started.elapsed().as_millis() as u64,
            slope = artifact.metadata.regression.slope,
            r_squared = artifact.metadata.regression.r_squared,
            "stage persisted"
        );
        Ok(artifact)
    }

    fn build_language_core(&self) -> Result<CoreGraphArtifact> {
        let started = Instant::now();
        let scan = graph::collect_neighbor_stats(
            &self.source,
            &self.normalizer,
            self.config.target_unique_tokens,
        )?;
        let core = graph::core::reduce(
            &scan.graph,
            self.normalizer.filter(),
            CoreGraphParams {
                min_frequency: self.config.min_frequency,
                min_connection_weight: self.config.min_connection_weight,
                max_nodes: self.config.max_nodes,
            },
        );
        let artifact = CoreGraphArtifact {
            metadata: CoreGraphMetadata {
                scan: scan.metadata,
                min_frequency: self.config.min_frequency,
                min_connection_weight: self.config.min_connection_weight,
                max_nodes: self.config.max_nodes,
                selected_nodes: core.nodes.len(),
                selected_edges: core.edges.len(),
            },
            nodes: core.nodes,
            edges: core.edges,
        };
        persist::write_json(&self.paths.language_core(), &artifact)?;
        tracing::info!(
            stage = "language_core",
            elapsed_ms = started.elapsed().as_millis() as u64,
            nodes = artifact.nodes.len(),
            edges = artifact.edges.len(),
            "stage persisted"
        );
        Ok(artifact)
    }

    fn build_nouns(&self, frequency: &FrequencyArtifact) -> Result<NounsArtifact> {
        let started = Instant::now();
        let data = translate::noun_table(
            &frequency.data,
            self.normalizer.filter(),
            &self.translator,
            self.config.noun_limit,
        );
        let artifact = NounsArtifact {
            metadata: NounsMetadata {
                limit: self.config.noun_limit,
                source_total_tokens: frequency.metadata.total_tokens,
            },
            data,
        };
        persist::write_json(&self.paths.nouns(), &artifact)?;
        tracing::info!(
            stage = "nouns",
            elapsed_ms = started.elapsed().as_millis() as u64,
            entries = artifact.data.len(),
            "stage persisted"
        );
        Ok(artifact)
    }

    fn build_semantic(&self) -> Result<SemanticArtifact> {
        let started = Instant::now();
        let (stats, scan_metadata) = semantic::collect_bipartite(
            &self.source,
            &self.tagger,
            self.config.target_unique_tokens,
        )?;
        let graphs = semantic::build_graphs(
            &stats,
            self.config.top_n_per_category,
            self.config.semantic_min_connection,
        );
        let artifact = SemanticArtifact {
            metadata: SemanticMetadata {
                scan: scan_metadata,
                top_n: self.config.top_n_per_category,
                min_connection: self.config.semantic_min_connection,
            },
            adjective_noun: graphs.adjective_noun,
            verb_noun: graphs.verb_noun,
        };
        persist::write_json(&self.paths.semantic(), &artifact)?;
        tracing::info!(
            stage = "semantic",
            elapsed_ms = started.elapsed().as_millis() as u64,
            adjective_noun_edges = artifact.adjective_noun.edges.len(),
            verb_noun_edges = artifact.verb_noun.edges.len(),
            "stage persisted"
        );
        Ok(artifact)
    }
}
