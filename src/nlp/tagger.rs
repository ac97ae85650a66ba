//! Part-of-speech tagging seam.
//!
//! The bipartite graph stage consumes `(lemma, POS)` pairs through the
//! [`PosTagger`] trait. A production deployment plugs in a real tagger
//! behind this trait; the crate ships [`LexiconTagger`], a deterministic
//! file-backed implementation, so the stage runs without model inference.
//!
//! A tagger that cannot be constructed is a startup failure
//! ([`LexigraphError::Collaborator`]), never a mid-scan one.

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::{LexigraphError, Result};
use crate::types::{PosTag, TaggedToken};

/// Produces the tagged lemma stream for one plain-text document.
pub trait PosTagger {
    /// Tokenize, lemmatize, and tag `text`.
    ///
    /// Tokens the tagger cannot assign a category to may be omitted or
    /// reported as [`PosTag::Other`]; both are ignored downstream.
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>>;

    /// Strategy label recorded in artifact metadata, e.g. `"lexicon[pt]"`.
    fn strategy(&self) -> String;
}

/// Lexicon-backed tagger: a `surface → (lemma, UPOS)` lookup table.
///
/// Surfaces missing from the lexicon are emitted as their lower-cased
/// form with [`PosTag::Other`], so downstream filters see them but the
/// category tallies do not.
pub struct LexiconTagger {
    entries: FxHashMap<String, (String, PosTag)>,
    label: String,
    word_re: Regex,
}

impl LexiconTagger {
    /// Build from `(surface, lemma, upos)` triples.
    pub fn from_entries<I, S>(label: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(surface, lemma, upos)| {
                (
                    surface.as_ref().to_lowercase(),
                    (
                        lemma.as_ref().to_lowercase(),
                        PosTag::from_upos(upos.as_ref()),
                    ),
                )
            })
            .collect();
        Self {
            entries,
            label: label.to_string(),
            word_re: Regex::new(r"[\w'\-]+").expect("word pattern must compile"),
        }
    }

    /// Load a three-column tab-separated `surface<TAB>lemma<TAB>UPOS` file.
    pub fn from_tsv(label: &str, path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            LexigraphError::Collaborator(format!(
                "cannot read POS lexicon {}: {err}",
                path.display()
            ))
        })?;
        let mut triples = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            match (cols.next(), cols.next(), cols.next()) {
                (Some(surface), Some(lemma), Some(upos)) => {
                    triples.push((surface.to_string(), lemma.to_string(), upos.to_string()));
                }
                _ => {
                    return Err(LexigraphError::Collaborator(format!(
                        "POS lexicon {}: line {} needs three tab-separated columns",
                        path.display(),
                        lineno + 1
                    )));
                }
            }
        }
        Ok(Self::from_entries(label, triples))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let mut tagged = Vec::new();
        for found in self.word_re.find_iter(text) {
            let lowered = found.as_str().to_lowercase();
            match self.entries.get(&lowered) {
                Some((lemma, pos)) => tagged.push(TaggedToken::new(lemma.clone(), *pos)),
                None => tagged.push(TaggedToken::new(lowered, PosTag::Other)),
            }
        }
        Ok(tagged)
    }

    fn strategy(&self) -> String {
        format!("lexicon[{}]", self.label)
    }
}

impl std::fmt::Debug for LexiconTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconTagger")
            .field("label", &self.label)
            .field("entries", &self.entries.len())
            .finish()
    }
}
