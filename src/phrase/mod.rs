//! Phrase extraction components
//!
//! This module turns text fragments into weighted n-gram phrase tables.

pub mod ngram;

pub use ngram::{extract, ExtractorConfig, PhraseExtractor};
