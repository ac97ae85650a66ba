//! Batch CLI: run the full analysis pipeline over an NDJSON dump.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexigraph::nlp::normalizer::{DictionaryLemmatizer, IdentityLemmatizer, TextNormalizer};
use lexigraph::nlp::stopwords::StopwordFilter;
use lexigraph::nlp::tagger::LexiconTagger;
use lexigraph::pipeline::{ArtifactPaths, Pipeline};
use lexigraph::source::RecordSource;
use lexigraph::translate::{DictionaryTranslator, NullTranslator, Translator};
use lexigraph::types::AnalysisConfig;

#[derive(Parser, Debug)]
#[command(name = "lexigraph", version, about = "Streaming lexical statistics over an NDJSON dump")]
struct Args {
    /// Root directory scanned recursively for *.ndjson files.
    #[arg(long)]
    input: PathBuf,

    /// Output directory for the JSON artifacts.
    #[arg(long, default_value = "data/processed")]
    out: PathBuf,

    /// Rebuild the corpus and frequency table even when artifacts exist.
    #[arg(long)]
    force: bool,

    /// Three-column `surface<TAB>lemma<TAB>UPOS` lexicon for the POS
    /// tagger. Without it every token tags as `other` and the bipartite
    /// graphs come out empty.
    #[arg(long)]
    pos_lexicon: Option<PathBuf>,

    /// Two-column `surface<TAB>lemma` dictionary for lemmatization.
    /// Without it tokens pass through unlemmatized.
    #[arg(long)]
    lemma_dict: Option<PathBuf>,

    /// Three-column `word<TAB>pl<TAB>en` translation dictionary for the
    /// noun table. Without it translations are left empty.
    #[arg(long)]
    translations: Option<PathBuf>,

    /// Unique-lemma target that bounds the streaming scans.
    #[arg(long, default_value_t = 100_000)]
    target_tokens: usize,

    /// Minimum lemma frequency for a language-core node.
    #[arg(long, default_value_t = 12)]
    min_frequency: u64,

    /// Minimum connection weight for core nodes and edges.
    #[arg(long, default_value_t = 5)]
    min_connection: u64,

    /// Maximum number of nodes in the reduced core graph.
    #[arg(long, default_value_t = 250)]
    max_nodes: usize,

    /// Top-N lemmas per POS category in the bipartite graphs.
    #[arg(long, default_value_t = 100)]
    top_n: usize,

    /// Minimum pair weight for a bipartite edge.
    #[arg(long, default_value_t = 1)]
    semantic_min_connection: u64,

    /// Maximum number of ranked entries fed to the Zipf regression.
    #[arg(long, default_value_t = 2000)]
    max_regression_points: usize,

    /// Number of noun entries looked up against the translator.
    #[arg(long, default_value_t = 50)]
    noun_limit: usize,
}

impl Args {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            target_unique_tokens: self.target_tokens,
            min_frequency: self.min_frequency,
            min_connection_weight: self.min_connection,
            max_nodes: self.max_nodes,
            top_n_per_category: self.top_n,
            semantic_min_connection: self.semantic_min_connection,
            max_regression_points: self.max_regression_points,
            noun_limit: self.noun_limit,
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = RecordSource::discover(&args.input)
        .with_context(|| format!("discovering input under {}", args.input.display()))?;

    let filter = StopwordFilter::curated();
    let normalizer = match &args.lemma_dict {
        Some(path) => TextNormalizer::new(
            Box::new(DictionaryLemmatizer::from_tsv("dictionary", path)?),
            filter,
        ),
        None => TextNormalizer::new(Box::new(IdentityLemmatizer), filter),
    };

    let tagger = match &args.pos_lexicon {
        Some(path) => LexiconTagger::from_tsv("pt", path)?,
        None => {
            tracing::warn!("no POS lexicon given; bipartite graphs will be empty");
            LexiconTagger::from_entries::<_, &str>("none", [])
        }
    };

    let translator: Box<dyn Translator> = match &args.translations {
        Some(path) => Box::new(DictionaryTranslator::from_tsv(path)?),
        None => Box::new(NullTranslator),
    };

    let pipeline = Pipeline::new(
        source,
        normalizer,
        tagger,
        translator,
        args.config(),
        ArtifactPaths::new(args.out.clone()),
    )?;

    let summary = pipeline.run(args.force)?;
    tracing::info!(
        corpus_tokens = summary.corpus_tokens,
        frequency_entries = summary.frequency_entries,
        zipf_points = summary.zipf_points,
        core_nodes = summary.core_nodes,
        core_edges = summary.core_edges,
        noun_entries = summary.noun_entries,
        adjective_noun_edges = summary.adjective_noun_edges,
        verb_noun_edges = summary.verb_noun_edges,
        "all artifacts written"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    run(&args)
}
