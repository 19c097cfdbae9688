//! Ranking of accumulated phrase scores
//!
//! This module provides the two ranking strategies:
//! - Grouped: phrases with identical totals share one rank
//! - Flat: every phrase gets its own rank

pub mod flat;
pub mod grouped;

use crate::types::{ScoreGroup, ScoreMap};
use serde::{Deserialize, Serialize};

pub use flat::rank_flat;
pub use grouped::rank_grouped;

/// Default relevance floor; phrases must score strictly above it
pub const DEFAULT_FLOOR: f64 = 1.0;

/// Default number of ranks reported
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    #[default]
    Grouped,
    Flat,
}

impl RankingMode {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "flat" | "phrase" | "per_phrase" => RankingMode::Flat,
            _ => RankingMode::Grouped,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMode::Grouped => "grouped",
            RankingMode::Flat => "flat",
        }
    }
}

impl std::str::FromStr for RankingMode {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(RankingMode::parse(value))
    }
}

/// Ranks a global score map into the top-N view
#[derive(Debug, Clone)]
pub struct Ranker {
    /// Phrases must score strictly above this
    pub floor: f64,
    /// Maximum number of ranks returned
    pub top_n: usize,
    /// Grouping strategy
    pub mode: RankingMode,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
            top_n: DEFAULT_TOP_N,
            mode: RankingMode::Grouped,
        }
    }
}

impl Ranker {
    /// Create a ranker with the default floor, top N and grouped mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relevance floor
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Set the number of ranks returned
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the ranking strategy
    pub fn with_mode(mut self, mode: RankingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Rank `scores`, highest first
    ///
    /// An empty result means no phrase scored above the floor.
    pub fn rank(&self, scores: &ScoreMap) -> Vec<ScoreGroup> {
        let ranked = match self.mode {
            RankingMode::Grouped => rank_grouped(scores, self.floor, self.top_n),
            RankingMode::Flat => rank_flat(scores, self.floor, self.top_n),
        };
        tracing::debug!(
            mode = self.mode.as_str(),
            candidates = scores.len(),
            ranks = ranked.len(),
            "ranked phrases"
        );
        ranked
    }
}

/// Rank with the grouped strategy
pub fn rank(scores: &ScoreMap, floor: f64, top_n: usize) -> Vec<ScoreGroup> {
    rank_grouped(scores, floor, top_n)
}
