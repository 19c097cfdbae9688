//! Global score accumulation
//!
//! The aggregator owns the run-wide [`ScoreMap`]. Fragment maps are folded
//! into it one after another; totals only ever grow by the merged weights
//! and phrases are never removed.
//!
//! Floating-point addition is not associative, so bit-exact totals depend
//! on merge order. The pipeline always merges URL, title, metadata,
//! headings h1..h4 in document order, then body.

use crate::types::{ScoreMap, Source};

/// Accumulates phrase scores across fragments for one analysis run
#[derive(Debug, Default)]
pub struct ScoreAggregator {
    /// Phrase -> total relevance, in first-insertion order
    global: ScoreMap,
    /// Number of fragment maps merged so far
    fragments: usize,
}

impl ScoreAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every phrase weight of `fragment` into the global totals
    pub fn merge(&mut self, fragment: &ScoreMap) {
        merge(&mut self.global, fragment);
        self.fragments += 1;
    }

    /// Merge a fragment map and log where it came from
    pub fn merge_from(&mut self, source: Source, fragment: &ScoreMap) {
        tracing::debug!(
            source = source.as_str(),
            phrases = fragment.len(),
            "merging fragment"
        );
        self.merge(fragment);
    }

    /// Read-only view of the global totals
    pub fn scores(&self) -> &ScoreMap {
        &self.global
    }

    /// Number of fragment maps merged so far
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Number of distinct phrases seen
    pub fn phrase_count(&self) -> usize {
        self.global.len()
    }

    /// Check if nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
    }

    /// Consume the aggregator, returning the global map
    pub fn into_scores(self) -> ScoreMap {
        self.global
    }
}

/// Merge `fragment` into `global` in place
pub fn merge(global: &mut ScoreMap, fragment: &ScoreMap) {
    for (phrase, weight) in fragment.iter() {
        global.add(phrase, weight);
    }
}
