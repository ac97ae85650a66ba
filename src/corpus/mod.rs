//! Corpus collection: the capped unique-lemma scan.
//!
//! [`collect`] streams records in deterministic order, tallying *every*
//! observed lemma while appending first occurrences to the ordered corpus,
//! and stops as soon as the unique target is reached. The record that
//! crosses the threshold is always processed to completion (its full
//! token list enters the tally), so results never depend on
//! record-internal token order beyond the token that causes the stop.

use serde::{Deserialize, Serialize};

use crate::counting::Tally;
use crate::error::Result;
use crate::nlp::normalizer::TextNormalizer;
use crate::source::{RecordSource, ScanControl};
use crate::types::Lemma;

/// Self-describing corpus metadata persisted with the token list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusMetadata {
    /// Configured unique-lemma target.
    pub target_tokens: usize,
    /// Length of the persisted ordered corpus.
    pub token_count: usize,
    /// Records that produced at least one lemma.
    pub articles_used: usize,
    /// Files opened before the scan ended.
    pub files_considered: usize,
    /// Distinct lemmas observed (may exceed `token_count` because the
    /// triggering record is tallied to completion).
    pub unique_words: usize,
    /// Every token position observed, capped corpus or not.
    pub total_observed_tokens: u64,
    /// Lemmatizer strategy label.
    pub lemma_strategy: String,
    /// Lines that failed to parse as JSON.
    #[serde(default)]
    pub malformed_lines: usize,
    /// Records without an HTML body.
    #[serde(default)]
    pub missing_html: usize,
    /// Present only when the input was exhausted before the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Output of one collection run: the ordered corpus, the full tally, and
/// metadata. Immutable after construction.
#[derive(Debug)]
pub struct CorpusResult {
    pub tokens: Vec<Lemma>,
    pub tally: Tally,
    pub metadata: CorpusMetadata,
}

/// Scan `source` until `target_unique` distinct lemmas have entered the
/// corpus, or the input is exhausted.
///
/// Exhaustion before the target is a success; the metadata records the
/// shortfall in its `note` field rather than failing the run.
pub fn collect(
    source: &RecordSource,
    normalizer: &TextNormalizer,
    target_unique: usize,
) -> Result<CorpusResult> {
    let mut tokens: Vec<Lemma> = Vec::with_capacity(target_unique);
    let mut tally = Tally::new();
    let mut articles_used = 0usize;

    let stats = source.for_each_html(|html| {
        let lemmas = normalizer.normalize(html)?;
        if lemmas.is_empty() {
            return Ok(ScanControl::Continue);
        }
        articles_used += 1;
        // The whole record is tallied even when the target is crossed
        // partway through its token list.
        for lemma in &lemmas {
            let unseen = !tally.contains(lemma);
            tally.increment(lemma);
            if unseen && tokens.len() < target_unique {
                tokens.push(lemma.clone());
            }
        }
        if tokens.len() >= target_unique {
            Ok(ScanControl::Stop)
        } else {
            Ok(ScanControl::Continue)
        }
    })?;

    let reached = tokens.len() >= target_unique;
    let metadata = CorpusMetadata {
        target_tokens: target_unique,
        token_count: tokens.len(),
        articles_used,
        files_considered: stats.files_considered,
        unique_words: tally.len(),
        total_observed_tokens: tally.total(),
        lemma_strategy: normalizer.strategy(),
        malformed_lines: stats.malformed_lines,
        missing_html: stats.missing_html,
        note: (!reached).then(|| "input exhausted before reaching the unique target".to_string()),
    };

    tracing::info!(
        target_tokens = metadata.target_tokens,
        token_count = metadata.token_count,
        articles_used = metadata.articles_used,
        total_observed = metadata.total_observed_tokens,
        "corpus collected"
    );

    Ok(CorpusResult {
        tokens,
        tally,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::normalizer::IdentityLemmatizer;
    use crate::nlp::stopwords::StopwordFilter;
    use std::io::Write;
    use std::path::Path;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(Box::new(IdentityLemmatizer), StopwordFilter::empty())
    }

    fn write_dump(dir: &Path, name: &str, bodies: &[&str]) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        for body in bodies {
            writeln!(file, r#"{{"article_body": {{"html": "{body}"}}}}"#).unwrap();
        }
    }

    #[test]
    fn test_collect_counts_everything_and_caps_corpus() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path(), "a.ndjson", &["alfa beta alfa gama", "beta gama beta"]);
        let source = RecordSource::discover(dir.path()).unwrap();

        let result = collect(&source, &normalizer(), 100).unwrap();
        assert_eq!(result.tokens, vec!["alfa", "beta", "gama"]);
        assert_eq!(result.tally.get("alfa"), 2);
        assert_eq!(result.tally.get("beta"), 3);
        assert_eq!(result.tally.get("gama"), 2);
        assert_eq!(result.metadata.total_observed_tokens, 7);
        assert_eq!(result.metadata.articles_used, 2);
        assert!(result.metadata.note.is_some());
    }

    #[test]
    fn test_early_stop_mid_record_completes_the_tally() {
        let dir = tempfile::tempdir().unwrap();
        // The second record crosses a target of 3 at "delta", with "eco"
        // still to come. The corpus must stop at exactly 3 tokens while
        // the tally still includes every token of the record.
        write_dump(
            dir.path(),
            "a.ndjson",
            &["alfa beta", "gama delta eco eco", "nunca visto"],
        );
        let source = RecordSource::discover(dir.path()).unwrap();

        let result = collect(&source, &normalizer(), 3).unwrap();
        assert_eq!(result.tokens, vec!["alfa", "beta", "gama"]);
        assert_eq!(result.metadata.token_count, 3);
        // Full tally of the triggering record, not a prefix of it.
        assert_eq!(result.tally.get("delta"), 1);
        assert_eq!(result.tally.get("eco"), 2);
        // The record after the stop was never scanned.
        assert_eq!(result.tally.get("nunca"), 0);
        assert!(result.metadata.note.is_none());
        // Unique observation kept counting through the triggering record.
        assert_eq!(result.metadata.unique_words, 5);
    }

    #[test]
    fn test_collect_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path(), "b.ndjson", &["um dois tres"]);
        write_dump(dir.path(), "a.ndjson", &["quatro cinco"]);
        let source = RecordSource::discover(dir.path()).unwrap();

        let first = collect(&source, &normalizer(), 4).unwrap();
        let second = collect(&source, &normalizer(), 4).unwrap();
        assert_eq!(first.tokens, second.tokens);
        // Sorted-path order: a.ndjson before b.ndjson.
        assert_eq!(first.tokens[0], "quatro");
    }
}
