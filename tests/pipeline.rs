//! End-to-end pipeline run over a small synthetic NDJSON dump.
//!
//! The dump mixes tagged HTML, entities, a malformed line, and a record
//! without a body, so one run exercises discovery, normalization, every
//! reduction stage, and persistence at once.

use std::io::Write;
use std::path::Path;

use lexigraph::nlp::normalizer::{IdentityLemmatizer, TextNormalizer};
use lexigraph::nlp::stopwords::StopwordFilter;
use lexigraph::nlp::tagger::LexiconTagger;
use lexigraph::pipeline::artifacts::{
    CoreGraphArtifact, CorpusArtifact, FrequencyArtifact, NounsArtifact, SemanticArtifact,
    ZipfArtifact,
};
use lexigraph::pipeline::persist::read_json;
use lexigraph::pipeline::{ArtifactPaths, Pipeline};
use lexigraph::source::RecordSource;
use lexigraph::translate::NullTranslator;
use lexigraph::types::AnalysisConfig;

/// grande/casa/verde, then rio/grande/rio, then casa/grande/casa, with a
/// malformed line and a body-less record interleaved.
fn write_dump(dir: &Path) {
    let mut file = std::fs::File::create(dir.join("dump.ndjson")).unwrap();
    writeln!(
        file,
        r#"{{"article_body": {{"html": "<p>grande casa verde</p><script>var ignored = 1;</script>"}}}}"#
    )
    .unwrap();
    writeln!(file, "this line is not json").unwrap();
    writeln!(file, r#"{{"article_body": {{"html": "rio&nbsp;grande rio"}}}}"#).unwrap();
    writeln!(file, r#"{{"article_body": {{}}}}"#).unwrap();
    writeln!(file, r#"{{"article_body": {{"html": "<b>casa</b> grande casa"}}}}"#).unwrap();
}

fn config(target: usize) -> AnalysisConfig {
    AnalysisConfig {
        target_unique_tokens: target,
        min_frequency: 1,
        min_connection_weight: 1,
        max_nodes: 10,
        top_n_per_category: 10,
        semantic_min_connection: 1,
        max_regression_points: 100,
        noun_limit: 10,
    }
}

fn pipeline(
    input: &Path,
    out: &Path,
    target: usize,
) -> Pipeline<LexiconTagger, NullTranslator> {
    let source = RecordSource::discover(input).unwrap();
    let normalizer = TextNormalizer::new(Box::new(IdentityLemmatizer), StopwordFilter::empty());
    let tagger = LexiconTagger::from_entries(
        "test",
        [
            ("casa", "casa", "NOUN"),
            ("rio", "rio", "NOUN"),
            ("grande", "grande", "ADJ"),
            ("verde", "verde", "ADJ"),
        ],
    );
    Pipeline::new(
        source,
        normalizer,
        tagger,
        NullTranslator,
        config(target),
        ArtifactPaths::new(out),
    )
    .unwrap()
}

#[test]
fn test_full_run_produces_expected_artifacts() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_dump(input.path());

    let p = pipeline(input.path(), out.path(), 100);
    let summary = p.run(true).unwrap();

    // Corpus: first-seen unique order, input exhausted before the target.
    let corpus: CorpusArtifact = read_json(&p.paths().corpus(100)).unwrap();
    assert_eq!(corpus.tokens, vec!["grande", "casa", "verde", "rio"]);
    assert_eq!(corpus.metadata.unique_words, 4);
    assert_eq!(corpus.metadata.total_observed_tokens, 9);
    assert_eq!(corpus.metadata.articles_used, 3);
    assert_eq!(corpus.metadata.malformed_lines, 1);
    assert_eq!(corpus.metadata.missing_html, 1);
    assert!(corpus.metadata.note.is_some());
    assert_eq!(summary.corpus_tokens, 4);

    // Frequency: descending count, insertion order breaks the 3/3 tie.
    let frequency: FrequencyArtifact = read_json(&p.paths().frequency()).unwrap();
    let words: Vec<(&str, u64)> = frequency
        .data
        .iter()
        .map(|entry| (entry.word.as_str(), entry.count))
        .collect();
    assert_eq!(
        words,
        vec![("grande", 3), ("casa", 3), ("rio", 2), ("verde", 1)]
    );
    assert_eq!(frequency.data[0].rank, 1);
    assert!((frequency.data[0].relative_frequency - 3.0 / 9.0).abs() < 1e-12);
    assert_eq!(frequency.metadata.total_tokens, 9);

    // Zipf: a decaying counts profile fits a negative slope.
    let zipf: ZipfArtifact = read_json(&p.paths().zipf()).unwrap();
    assert_eq!(zipf.points.len(), 4);
    assert!(zipf.metadata.regression.slope < 0.0);
    assert!(zipf.metadata.regression.r_squared >= 0.0);
    assert!(zipf.metadata.regression.r_squared <= 1.0);
    assert!(zipf.metadata.regression.expected_frequency_factor > 0.0);

    // Language core: nodes sorted by connection weight then frequency.
    let core: CoreGraphArtifact = read_json(&p.paths().language_core()).unwrap();
    let node_ids: Vec<&str> = core.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, vec!["grande", "casa", "rio", "verde"]);
    assert_eq!(core.nodes[0].connection_weight, 5);
    assert_eq!(core.nodes[0].unique_neighbors, 2);

    let edges: Vec<(&str, &str, u64)> = core
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str(), e.weight))
        .collect();
    assert!(edges.contains(&("grande", "casa", 3)));
    assert!(edges.contains(&("grande", "rio", 2)));
    assert!(edges.contains(&("casa", "verde", 1)));
    assert_eq!(edges.len(), 3);

    // Nouns: translator unset, so translations stay empty.
    let nouns: NounsArtifact = read_json(&p.paths().nouns()).unwrap();
    for entry in &nouns.data {
        assert!(entry.translation_en.is_empty());
    }

    // Semantic: adjacency spans record boundaries (verde..rio), verbs absent.
    let semantic: SemanticArtifact = read_json(&p.paths().semantic()).unwrap();
    let an_edges: Vec<(&str, &str, u64)> = semantic
        .adjective_noun
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str(), e.weight))
        .collect();
    assert!(an_edges.contains(&("grande", "casa", 3)));
    assert!(an_edges.contains(&("grande", "rio", 2)));
    assert!(an_edges.contains(&("verde", "casa", 1)));
    assert!(an_edges.contains(&("verde", "rio", 1)));
    assert_eq!(an_edges.len(), 4);
    assert_eq!(semantic.adjective_noun.metadata.left_label, "adjectives");
    assert_eq!(semantic.adjective_noun.metadata.right_label, "nouns");
    assert!(semantic.verb_noun.edges.is_empty());
    assert!(semantic.verb_noun.left_nodes.is_empty());
    assert_eq!(semantic.metadata.scan.total_tokens_observed, 9);
}

#[test]
fn test_reruns_are_byte_identical() {
    let input = tempfile::tempdir().unwrap();
    write_dump(input.path());

    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();
    pipeline(input.path(), out_a.path(), 100).run(true).unwrap();
    pipeline(input.path(), out_b.path(), 100).run(true).unwrap();

    for name in [
        "corpus_100_tokens.json",
        "frequency_table.json",
        "zipf_analysis.json",
        "language_core_graph.json",
        "nouns_translations.json",
        "semantic_bipartite_graphs.json",
    ] {
        let a = std::fs::read(out_a.path().join(name)).unwrap();
        let b = std::fs::read(out_b.path().join(name)).unwrap();
        assert_eq!(a, b, "artifact {name} differs between identical runs");
    }
}

#[test]
fn test_early_stop_completes_the_crossing_record() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_dump(input.path());

    // Target 2 is crossed inside the first record (3 unique lemmas).
    let p = pipeline(input.path(), out.path(), 2);
    p.run(true).unwrap();

    let corpus: CorpusArtifact = read_json(&p.paths().corpus(2)).unwrap();
    assert_eq!(corpus.tokens, vec!["grande", "casa"]);
    // The crossing record was tallied in full.
    assert_eq!(corpus.metadata.unique_words, 3);
    assert_eq!(corpus.metadata.total_observed_tokens, 3);
    assert_eq!(corpus.metadata.articles_used, 1);
    assert!(corpus.metadata.note.is_none());
}

#[test]
fn test_corpus_artifact_reused_across_input_changes() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_dump(input.path());

    let p = pipeline(input.path(), out.path(), 100);
    p.run(true).unwrap();
    let first: CorpusArtifact = read_json(&p.paths().corpus(100)).unwrap();

    // Grow the input; without force the persisted corpus wins.
    let mut file = std::fs::File::options()
        .append(true)
        .open(input.path().join("dump.ndjson"))
        .unwrap();
    writeln!(file, r#"{{"article_body": {{"html": "monte alto monte"}}}}"#).unwrap();

    let p = pipeline(input.path(), out.path(), 100);
    p.run(false).unwrap();
    let second: CorpusArtifact = read_json(&p.paths().corpus(100)).unwrap();
    assert_eq!(first.tokens, second.tokens);

    // A forced run sees the new records.
    p.run(true).unwrap();
    let third: CorpusArtifact = read_json(&p.paths().corpus(100)).unwrap();
    assert!(third.tokens.contains(&"monte".to_string()));
}
