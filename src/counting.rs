//! Insertion-ordered counters.
//!
//! All aggregation in the pipeline runs over [`Tally`] and [`PairTally`],
//! which pair an `FxHashMap` index with a `Vec` of entries so that
//! iteration order is always first-seen order. That ordering is what makes
//! rank tie-breaks and edge emission deterministic across runs.

use rustc_hash::FxHashMap;

/// A key → count mapping that remembers insertion order.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    index: FxHashMap<String, u32>,
    entries: Vec<(String, u64)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add `n` to the count for `key`, creating it at the end if unseen.
    pub fn add(&mut self, key: &str, n: u64) {
        if let Some(&slot) = self.index.get(key) {
            self.entries[slot as usize].1 += n;
        } else {
            let slot = self.entries.len() as u32;
            self.index.insert(key.to_string(), slot);
            self.entries.push((key.to_string(), n));
        }
    }

    /// Increment the count for `key` by one.
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn get(&self, key: &str) -> u64 {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot as usize].1)
            .unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries sorted by descending count.
    ///
    /// The sort is stable, so equal counts keep their insertion order,
    /// the tie-break rule the frequency table and top-N selections rely on.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `limit` highest-count entries, insertion-order tie-broken.
    pub fn top(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut ranked = self.ranked();
        ranked.truncate(limit);
        ranked
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.increment(key.as_ref());
        }
        tally
    }
}

/// An ordered-pair → count mapping that remembers insertion order.
///
/// Keys are directed `(left, right)` pairs; callers that need unordered
/// semantics normalize the pair before insertion.
#[derive(Debug, Clone, Default)]
pub struct PairTally {
    index: FxHashMap<(String, String), u32>,
    entries: Vec<((String, String), u64)>,
}

impl PairTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `(left, right)` by one.
    pub fn increment(&mut self, left: &str, right: &str) {
        if let Some(&slot) = self.index.get(&(left.to_string(), right.to_string())) {
            self.entries[slot as usize].1 += 1;
            return;
        }
        let key = (left.to_string(), right.to_string());
        let slot = self.entries.len() as u32;
        self.index.insert(key.clone(), slot);
        self.entries.push((key, 1));
    }

    pub fn get(&self, left: &str, right: &str) -> u64 {
        self.index
            .get(&(left.to_string(), right.to_string()))
            .map(|&slot| self.entries[slot as usize].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(left, right, count)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.entries
            .iter()
            .map(|((left, right), count)| (left.as_str(), right.as_str(), *count))
    }
}
