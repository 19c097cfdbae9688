//! Per-phrase ranking
//!
//! Every surviving phrase is ranked on its own, with a stable sort on
//! descending score. Ties keep scan order. This sidesteps the exact-equality
//! grouping of [`super::grouped`].

use crate::types::{ScoreGroup, ScoreMap};

/// Rank phrases individually, highest score first
///
/// Each returned group has exactly one member.
pub fn rank_flat(scores: &ScoreMap, floor: f64, top_n: usize) -> Vec<ScoreGroup> {
    let mut ranked: Vec<(&str, f64)> = scores.iter().filter(|&(_, s)| s > floor).collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(phrase, score)| ScoreGroup::new(score, phrase))
        .collect()
}
