//! Core types for n-gram density analysis
//!
//! [`ScoreMap`] is the phrase table shared by the extractor (one map per
//! fragment) and the aggregator (one map per analysis run). It remembers the
//! order in which phrases were first inserted so that everything downstream
//! of it, including tie handling in the ranker, is reproducible.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Phrase table with first-insertion iteration order
///
/// Lookups go through an `FxHashMap` from phrase to slot; the slots
/// themselves live in a `Vec`, which fixes the iteration order.
#[derive(Debug, Clone, Default)]
pub struct ScoreMap {
    /// Maps phrase -> slot index
    index: FxHashMap<String, usize>,
    /// Slot storage in first-insertion order
    entries: Vec<(String, f64)>,
}

impl ScoreMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to the score of `phrase`, inserting it at 0.0 if absent
    pub fn add(&mut self, phrase: &str, weight: f64) {
        if let Some(&slot) = self.index.get(phrase) {
            self.entries[slot].1 += weight;
            return;
        }

        let slot = self.entries.len();
        self.index.insert(phrase.to_string(), slot);
        // 0.0 + weight keeps the "absent counts as zero" semantics exact,
        // including for -0.0 weights.
        self.entries.push((phrase.to_string(), 0.0 + weight));
    }

    /// Get the score for a phrase
    pub fn get(&self, phrase: &str) -> Option<f64> {
        self.index
            .get(phrase)
            .map(|&slot| self.entries[slot].1)
    }

    /// Check whether a phrase is present
    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains_key(phrase)
    }

    /// Number of distinct phrases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(phrase, score)` in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(p, s)| (p.as_str(), *s))
    }

    /// Iterate over phrases in first-insertion order
    pub fn phrases(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(p, _)| p.as_str())
    }
}

/// Two maps are equal when they hold the same phrases with the same scores,
/// regardless of insertion order.
impl PartialEq for ScoreMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(phrase, score)| other.get(phrase) == Some(score))
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = ScoreMap::new();
        for (phrase, score) in iter {
            map.add(phrase.as_ref(), score);
        }
        map
    }
}

/// A set of phrases sharing one bit-identical total score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreGroup {
    /// The shared relevance score
    pub score: f64,
    /// Member phrases in first-seen order
    pub phrases: Vec<String>,
}

impl ScoreGroup {
    /// Create a group with a single member
    pub fn new(score: f64, phrase: impl Into<String>) -> Self {
        Self {
            score,
            phrases: vec![phrase.into()],
        }
    }
}

/// Where a text fragment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Url,
    Title,
    Metadata,
    /// Heading level, 1..=4
    Heading(u8),
    Body,
}

impl Source {
    /// Every heading level the pipeline reads, in merge order
    pub const HEADING_LEVELS: std::ops::RangeInclusive<u8> = 1..=4;

    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Url => "url",
            Source::Title => "title",
            Source::Metadata => "metadata",
            Source::Heading(1) => "h1",
            Source::Heading(2) => "h2",
            Source::Heading(3) => "h3",
            Source::Heading(4) => "h4",
            Source::Heading(_) => "heading",
            Source::Body => "body",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut map = ScoreMap::new();
        map.add("ocean view", 1.0);
        map.add("ocean view", 0.5);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("ocean view"), Some(1.5));
        assert_eq!(map.get("city life"), None);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = ScoreMap::new();
        map.add("zebra crossing", 1.0);
        map.add("apple tree", 1.0);
        map.add("zebra crossing", 2.0);
        map.add("mango juice", 1.0);

        let order: Vec<_> = map.phrases().collect();
        assert_eq!(order, vec!["zebra crossing", "apple tree", "mango juice"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: ScoreMap = [("city life", 2.0), ("ocean view", 1.5)].into_iter().collect();
        let b: ScoreMap = [("ocean view", 1.5), ("city life", 2.0)].into_iter().collect();
        let c: ScoreMap = [("ocean view", 1.5)].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_negative_zero_weight_inserts_positive_zero() {
        let mut map = ScoreMap::new();
        map.add("quiet room", -0.0);
        let score = map.get("quiet room").unwrap();
        assert_eq!(score.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_slots_stay_aligned_across_many_phrases() {
        let mut map = ScoreMap::new();
        for i in 0..5_000u32 {
            map.add(&format!("phrase number {i}"), f64::from(i));
        }
        map.add("phrase number 4321", 1.0);

        assert_eq!(map.len(), 5_000);
        assert_eq!(map.get("phrase number 0"), Some(0.0));
        assert_eq!(map.get("phrase number 4321"), Some(4322.0));
        assert_eq!(map.phrases().nth(4321), Some("phrase number 4321"));
    }

    #[test]
    fn test_source_names() {
        assert_eq!(Source::Heading(3).as_str(), "h3");
        assert_eq!(Source::Body.to_string(), "body");
        assert_eq!(Source::HEADING_LEVELS.collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }
}
