//! Text normalization: HTML → lemma sequence.
//!
//! The [`TextNormalizer`] turns a raw HTML body into the filtered lemma
//! sequence consumed by every counting stage. Lemmatization sits behind
//! the [`Lemmatizer`] trait so the morphological backend is an injected
//! collaborator with an explicit lifecycle (constructed once, passed to
//! each stage) rather than hidden process-wide state.
//!
//! Two outcomes are kept distinct on purpose: a token *rejected by the
//! filters* simply disappears from the stream, while a token the
//! lemmatizer *cannot handle* fails the whole run
//! ([`LexigraphError::Lemmatize`]).

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::{LexigraphError, Result};
use crate::nlp::html::html_to_text;
use crate::nlp::stopwords::StopwordFilter;
use crate::types::Lemma;

/// Word token pattern: letters, digits, underscores, apostrophes, hyphens.
const WORD_PATTERN: &str = r"[\w'\-]+";

/// Characters trimmed from token edges before any other rule runs.
const EDGE_TRIM: &[char] = &['_', '\'', '"', '-'];

/// Morphological normalization backend.
///
/// Implementations must be deterministic: the same token always maps to
/// the same lemma. Returning an error aborts the run.
pub trait Lemmatizer {
    /// Reduce a lower-cased token to its lemma.
    fn lemmatize(&self, token: &str) -> Result<Lemma>;

    /// Human-readable strategy label recorded in artifact metadata,
    /// e.g. `"dictionary[pt]"`.
    fn strategy(&self) -> String;
}

/// Lemmatizer that returns every token unchanged.
///
/// Useful for analyses over pre-lemmatized input and in tests.
#[derive(Debug, Clone, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<Lemma> {
        if token.is_empty() {
            return Err(LexigraphError::Lemmatize {
                token: token.to_string(),
            });
        }
        Ok(token.to_string())
    }

    fn strategy(&self) -> String {
        "identity".to_string()
    }
}

/// Dictionary-backed lemmatizer with identity fallback for unknown forms.
#[derive(Debug, Clone)]
pub struct DictionaryLemmatizer {
    map: FxHashMap<String, String>,
    label: String,
}

impl DictionaryLemmatizer {
    /// Build from `(surface form, lemma)` pairs.
    pub fn from_pairs<I, S>(label: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(form, lemma)| (form.into(), lemma.into()))
            .collect();
        Self {
            map,
            label: label.to_string(),
        }
    }

    /// Load a two-column tab-separated `surface<TAB>lemma` file.
    ///
    /// Blank lines and lines starting with `#` are ignored; a line without
    /// a tab is a collaborator error (the dictionary is misconfigured).
    pub fn from_tsv(label: &str, path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut map = FxHashMap::default();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (form, lemma) = line.split_once('\t').ok_or_else(|| {
                LexigraphError::Collaborator(format!(
                    "lemma dictionary {}: line {} has no tab separator",
                    path.display(),
                    lineno + 1
                ))
            })?;
            map.insert(form.to_lowercase(), lemma.to_lowercase());
        }
        Ok(Self {
            map,
            label: label.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<Lemma> {
        if token.is_empty() {
            return Err(LexigraphError::Lemmatize {
                token: token.to_string(),
            });
        }
        Ok(self
            .map
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string()))
    }

    fn strategy(&self) -> String {
        format!("dictionary[{}]", self.label)
    }
}

/// HTML → tokenized, filtered, lemmatized word stream.
pub struct TextNormalizer {
    lemmatizer: Box<dyn Lemmatizer + Send + Sync>,
    filter: StopwordFilter,
    word_re: Regex,
}

impl TextNormalizer {
    pub fn new(lemmatizer: Box<dyn Lemmatizer + Send + Sync>, filter: StopwordFilter) -> Self {
        Self {
            lemmatizer,
            filter,
            // The pattern is a compile-time constant.
            word_re: Regex::new(WORD_PATTERN).expect("word pattern must compile"),
        }
    }

    /// Strategy label of the underlying lemmatizer.
    pub fn strategy(&self) -> String {
        self.lemmatizer.strategy()
    }

    pub fn filter(&self) -> &StopwordFilter {
        &self.filter
    }

    /// Strip HTML and produce the filtered lemma sequence.
    pub fn normalize(&self, html: &str) -> Result<Vec<Lemma>> {
        self.tokenize(&html_to_text(html))
    }

    /// Tokenize plain text into filtered lemmas.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Lemma>> {
        let mut lemmas = Vec::new();
        for found in self.word_re.find_iter(text) {
            if let Some(lemma) = self.normalize_token(found.as_str())? {
                lemmas.push(lemma);
            }
        }
        Ok(lemmas)
    }

    /// Apply the full per-token rule chain.
    ///
    /// `Ok(None)` means the token was rejected by a filter; `Err` means
    /// the lemmatizer failed (run-fatal).
    fn normalize_token(&self, raw: &str) -> Result<Option<Lemma>> {
        let token = raw.trim_matches(EDGE_TRIM);
        if token.is_empty() {
            return Ok(None);
        }
        if token.chars().any(|ch| ch.is_numeric()) {
            return Ok(None);
        }
        if token.chars().count() < 2 {
            return Ok(None);
        }
        if !token.chars().any(|ch| ch.is_alphabetic()) {
            return Ok(None);
        }
        // Hangul syllables from interwiki noise are dropped outright.
        if token.chars().any(is_hangul_syllable) {
            return Ok(None);
        }
        // LaTeX/wiki artifacts.
        if token.starts_with('{') || token.starts_with('\\') || token.contains("displaystyle") {
            return Ok(None);
        }

        let lowered = token.to_lowercase();
        // Stopwords are checked before lemmatization to catch inflected
        // surface forms...
        if self.filter.filters_token(&lowered) {
            return Ok(None);
        }

        let lemma = self.lemmatizer.lemmatize(&lowered)?;

        // ...and again after, because lemmatization can map a content-like
        // form onto a stopword lemma (e.g. "fui" → "ser").
        if self.filter.filters_token(&lemma) {
            return Ok(None);
        }
        if lemma.chars().count() < 2 {
            return Ok(None);
        }
        Ok(Some(lemma))
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("strategy", &self.strategy())
            .field("stopwords", &self.filter.len())
            .finish()
    }
}

fn is_hangul_syllable(ch: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&ch)
}
