//! N-gram phrase extraction
//!
//! Turns one text fragment into a [`ScoreMap`] of candidate phrases. Every
//! contiguous window of 2..=`max_words` tokens is a candidate; candidates
//! that are too short (in characters) are dropped, and every surviving
//! occurrence adds the fragment weight to its phrase.

use crate::nlp::tokenizer;
use crate::types::ScoreMap;

/// Smallest phrase length in words
pub const MIN_WORDS: usize = 2;

/// Default maximum phrase length in words
pub const DEFAULT_MAX_WORDS: usize = 4;

/// Phrases must be strictly longer than this many characters
pub const DEFAULT_MIN_PHRASE_CHARS: usize = 4;

/// Configuration for n-gram extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Maximum number of words in a phrase
    pub max_words: usize,
    /// Phrases must be strictly longer than this many characters
    pub min_phrase_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            min_phrase_chars: DEFAULT_MIN_PHRASE_CHARS,
        }
    }
}

/// N-gram phrase extractor
#[derive(Debug, Clone)]
pub struct PhraseExtractor {
    config: ExtractorConfig,
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseExtractor {
    /// Create a new extractor with default config
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// Create an extractor with custom config
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Set maximum phrase length in words
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.config.max_words = max_words;
        self
    }

    /// Set the character-length threshold
    pub fn with_min_phrase_chars(mut self, min_phrase_chars: usize) -> Self {
        self.config.min_phrase_chars = min_phrase_chars;
        self
    }

    /// Maximum phrase length in words
    pub fn max_words(&self) -> usize {
        self.config.max_words
    }

    /// Extract weighted phrases from one fragment
    ///
    /// The weight is propagated as-is, including zero and negative values.
    pub fn extract(&self, text: &str, weight: f64) -> ScoreMap {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = tokenizer::words(&lowered).collect();

        let mut phrases = ScoreMap::new();
        if words.len() < MIN_WORDS {
            return phrases;
        }

        let mut buf = String::new();
        for k in MIN_WORDS..=self.config.max_words.min(words.len()) {
            for window in words.windows(k) {
                buf.clear();
                for (j, word) in window.iter().enumerate() {
                    if j > 0 {
                        buf.push(' ');
                    }
                    buf.push_str(word);
                }

                if buf.len() > self.config.min_phrase_chars {
                    phrases.add(&buf, weight);
                }
            }
        }

        phrases
    }
}

/// Extract phrases with the default character threshold
///
/// Shorthand for `PhraseExtractor::new().with_max_words(max_words).extract(text, weight)`.
pub fn extract(text: &str, max_words: usize, weight: f64) -> ScoreMap {
    PhraseExtractor::new()
        .with_max_words(max_words)
        .extract(text, weight)
}
