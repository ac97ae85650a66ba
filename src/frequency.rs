//! Frequency table reduction.
//!
//! Converts a lemma tally into a ranked table with relative frequencies.
//! Pure function of its input; persistence is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::counting::Tally;

/// One row of the ranked frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// 1-based rank, descending count, first-seen tie-break.
    pub rank: usize,
    pub word: String,
    pub count: u64,
    /// `count / total observed tokens`; 0.0 when the tally is empty.
    pub relative_frequency: f64,
}

/// Reduce a tally to its ranked frequency table.
pub fn frequency_table(tally: &Tally) -> Vec<FrequencyEntry> {
    let total = tally.total();
    tally
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(i, (word, count))| FrequencyEntry {
            rank: i + 1,
            word: word.to_string(),
            count,
            relative_frequency: if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect()
}
