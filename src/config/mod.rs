//! Analysis configuration.
//!
//! A [`DensityConfig`] carries the extraction, weighting and ranking
//! parameters for one run. Defaults give the standard source weights; a JSON
//! file can override any subset of fields.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "max_words": 4,
//!   "relevance_floor": 1.0,
//!   "top_n": 5,
//!   "ranking": "grouped",
//!   "weights": { "url": 2.0, "title": 3.5, "metadata": 3.0, "heading_base": 1.0, "body": 0.01 },
//!   "fetch_timeout_secs": 7
//! }
//! ```

pub mod validation;

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DensityError, Result};
use crate::phrase::ngram::{
    ExtractorConfig, PhraseExtractor, DEFAULT_MAX_WORDS, DEFAULT_MIN_PHRASE_CHARS,
};
use crate::ranking::{Ranker, RankingMode, DEFAULT_FLOOR, DEFAULT_TOP_N};
use crate::types::Source;

use self::validation::ValidationEngine;

/// Default fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 7;

/// Per-source weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceWeights {
    pub url: f64,
    pub title: f64,
    pub metadata: f64,
    /// Weight of `<h1>`; level `h` gets `heading_base * 2^(1 - h)`.
    pub heading_base: f64,
    pub body: f64,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            url: 2.0,
            title: 3.5,
            metadata: 3.0,
            heading_base: 1.0,
            body: 0.01,
            unknown_fields: HashMap::new(),
        }
    }
}

impl SourceWeights {
    /// Weight applied to every phrase occurrence from `source`
    pub fn weight_for(&self, source: Source) -> f64 {
        match source {
            Source::Url => self.url,
            Source::Title => self.title,
            Source::Metadata => self.metadata,
            Source::Heading(level) => self.heading_base * 2f64.powi(1 - i32::from(level)),
            Source::Body => self.body,
        }
    }
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    /// Maximum phrase length in words (at least 2).
    pub max_words: usize,

    /// Phrases must be strictly longer than this many characters.
    pub min_phrase_chars: usize,

    /// Phrases must score strictly above this to be ranked.
    pub relevance_floor: f64,

    /// Number of ranks reported.
    pub top_n: usize,

    /// Grouped (shared ranks for equal scores) or flat.
    pub ranking: RankingMode,

    pub weights: SourceWeights,

    /// Timeout for fetching the document.
    pub fetch_timeout_secs: u64,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            min_phrase_chars: DEFAULT_MIN_PHRASE_CHARS,
            relevance_floor: DEFAULT_FLOOR,
            top_n: DEFAULT_TOP_N,
            ranking: RankingMode::Grouped,
            weights: SourceWeights::default(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            unknown_fields: HashMap::new(),
        }
    }
}

impl DensityConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| DensityError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Run the default validation rules.
    ///
    /// Warnings are logged; any error turns into
    /// [`DensityError::InvalidConfig`] listing every problem found.
    pub fn validated(self) -> Result<Self> {
        let report = ValidationEngine::with_defaults().validate(&self);
        for warning in report.warnings() {
            tracing::warn!(pointer = %warning.pointer, "{}", warning.message);
        }
        if report.has_errors() {
            return Err(DensityError::InvalidConfig {
                problems: report.errors().map(ToString::to_string).collect(),
            });
        }
        Ok(self)
    }

    /// Fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Build the phrase extractor for this config.
    pub fn extractor(&self) -> PhraseExtractor {
        PhraseExtractor::with_config(ExtractorConfig {
            max_words: self.max_words,
            min_phrase_chars: self.min_phrase_chars,
        })
    }

    /// Build the ranker for this config.
    pub fn ranker(&self) -> Ranker {
        Ranker::new()
            .with_floor(self.relevance_floor)
            .with_top_n(self.top_n)
            .with_mode(self.ranking)
    }
}
