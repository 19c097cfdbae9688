//! Score accumulation
//!
//! This module merges per-fragment phrase tables into one global table.

pub mod aggregator;

pub use aggregator::{merge, ScoreAggregator};
