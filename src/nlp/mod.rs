//! Natural Language Processing components
//!
//! This module provides ASCII word tokenization.

pub mod tokenizer;
