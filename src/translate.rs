//! Noun extraction and translation lookup.
//!
//! The translator is an external collaborator behind the [`Translator`]
//! trait (constructed once, injected into the pipeline). The noun
//! heuristic replicates the curated suffix/vowel rules the dataset was
//! built with; it walks the frequency table in rank order and stops once
//! `limit` nouns have been collected.
//!
//! A failed lookup degrades to empty translations with a warning; the
//! remote service being flaky must not abort a batch run.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frequency::FrequencyEntry;
use crate::nlp::stopwords::StopwordFilter;

/// Suffixes the heuristic accepts as noun-like.
const NOUN_SUFFIXES: &[&str] = &[
    "a", "á", "e", "é", "i", "í", "o", "u", "ů", "y", "ý", "ost", "ace", "ce", "ka", "ek", "ník",
    "tel", "ice", "ita", "ismus", "ista", "arium", "izace", "átor", "ista", "ment", "nost",
];

const VOWELS: &str = "aeiouáéíóúâêôãõàü";

/// Target-language translations for one word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    pub pl: String,
    pub en: String,
}

/// Remote translation lookup collaborator.
pub trait Translator {
    /// Translate `word` into the configured target languages.
    fn translate(&self, word: &str) -> Result<Translations>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, word: &str) -> Result<Translations> {
        (**self).translate(word)
    }
}

/// Translator that returns empty strings. Used when no translation
/// service is configured; the noun table still materializes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn translate(&self, _word: &str) -> Result<Translations> {
        Ok(Translations::default())
    }
}

/// Offline translator backed by a `word<TAB>pl<TAB>en` dictionary file.
///
/// Words missing from the dictionary resolve to empty translations, the
/// same degradation a failed remote lookup gets.
pub struct DictionaryTranslator {
    entries: rustc_hash::FxHashMap<String, Translations>,
}

impl DictionaryTranslator {
    pub fn from_tsv(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            crate::error::LexigraphError::Collaborator(format!(
                "cannot read translation dictionary {}: {err}",
                path.display()
            ))
        })?;
        let mut entries = rustc_hash::FxHashMap::default();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            match (cols.next(), cols.next(), cols.next()) {
                (Some(word), Some(pl), Some(en)) => {
                    entries.insert(
                        word.to_lowercase(),
                        Translations {
                            pl: pl.to_string(),
                            en: en.to_string(),
                        },
                    );
                }
                _ => {
                    return Err(crate::error::LexigraphError::Collaborator(format!(
                        "translation dictionary {}: line {} needs three tab-separated columns",
                        path.display(),
                        lineno + 1
                    )));
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for DictionaryTranslator {
    fn translate(&self, word: &str) -> Result<Translations> {
        Ok(self.entries.get(word).cloned().unwrap_or_default())
    }
}

/// Does `word` look like a noun under the curated heuristic?
///
/// The allowlist wins outright; blocklisted words and core stopwords
/// lose; otherwise the word must be alphabetic, at least three
/// characters, contain a vowel, and end in an accepted suffix.
pub fn looks_like_noun(word: &str, filter: &StopwordFilter) -> bool {
    if !word.chars().all(|ch| ch.is_alphabetic()) || word.is_empty() {
        return false;
    }
    if filter.is_allowlisted(word) {
        return true;
    }
    if filter.is_blocked(word) || filter.is_base_stopword(word) {
        return false;
    }
    if word.chars().count() < 3 {
        return false;
    }
    if !word.chars().any(|ch| VOWELS.contains(ch)) {
        return false;
    }
    NOUN_SUFFIXES.iter().any(|suffix| word.ends_with(suffix))
}

/// One row of the noun translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounEntry {
    pub rank: usize,
    pub word: String,
    pub count: u64,
    pub translation_pl: String,
    pub translation_en: String,
}

/// Walk the ranked frequency table, translating the first `limit` words
/// the heuristic accepts.
pub fn noun_table<T: Translator>(
    table: &[FrequencyEntry],
    filter: &StopwordFilter,
    translator: &T,
    limit: usize,
) -> Vec<NounEntry> {
    let mut nouns = Vec::with_capacity(limit);
    for entry in table {
        if nouns.len() >= limit {
            break;
        }
        if !looks_like_noun(&entry.word, filter) {
            continue;
        }
        let translations = match translator.translate(&entry.word) {
            Ok(translations) => translations,
            Err(err) => {
                tracing::warn!(word = %entry.word, error = %err, "translation lookup failed");
                Translations::default()
            }
        };
        nouns.push(NounEntry {
            rank: entry.rank,
            word: entry.word.clone(),
            count: entry.count,
            translation_pl: translations.pl,
            translation_en: translations.en,
        });
    }
    nouns
}
