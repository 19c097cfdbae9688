//! Score-grouped ranking
//!
//! Phrases whose totals are bit-identical share a [`ScoreGroup`]. Groups are
//! ordered by descending score and truncated to the top N.
//!
//! Grouping on exact `f64` equality is fragile: two phrases that "should"
//! tie can land in different groups after rounding, and unrelated phrases
//! can share a group when their sums happen to coincide. See
//! [`super::flat`] for the per-phrase alternative.

use crate::types::{ScoreGroup, ScoreMap};
use rustc_hash::FxHashMap;

/// Group surviving phrases by exact score, highest score first
///
/// Phrases scoring `<= floor` (and NaN scores) are dropped. Members of a
/// group keep the iteration order of `scores`.
pub fn rank_grouped(scores: &ScoreMap, floor: f64, top_n: usize) -> Vec<ScoreGroup> {
    // score bits -> index into `groups`
    let mut slots: FxHashMap<u64, usize> = FxHashMap::default();
    let mut groups: Vec<ScoreGroup> = Vec::new();

    for (phrase, score) in scores.iter() {
        if !(score > floor) {
            continue;
        }

        match slots.get(&score.to_bits()) {
            Some(&i) => groups[i].phrases.push(phrase.to_string()),
            None => {
                slots.insert(score.to_bits(), groups.len());
                groups.push(ScoreGroup::new(score, phrase));
            }
        }
    }

    // Scores are distinct per group, so the order is total
    groups.sort_by(|a, b| b.score.total_cmp(&a.score));
    groups.truncate(top_n);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> ScoreMap {
        entries.iter().map(|&(p, s)| (p, s)).collect()
    }

    #[test]
    fn test_ocean_city_ranking() {
        let scores = map(&[("ocean view", 1.5), ("city life", 2.0)]);
        let groups = rank_grouped(&scores, 1.0, 5);

        assert_eq!(
            groups,
            vec![
                ScoreGroup::new(2.0, "city life"),
                ScoreGroup::new(1.5, "ocean view"),
            ]
        );
    }

    #[test]
    fn test_floor_is_exclusive() {
        let scores = map(&[("exactly floor", 1.0), ("above floor", 1.01), ("below floor", 0.5)]);
        let groups = rank_grouped(&scores, 1.0, 5);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].phrases, vec!["above floor"]);
    }

    #[test]
    fn test_equal_scores_share_group_in_scan_order() {
        let scores = map(&[
            ("zulu phrase", 3.5),
            ("alpha phrase", 2.0),
            ("mike phrase", 3.5),
            ("bravo phrase", 3.5),
        ]);
        let groups = rank_grouped(&scores, 1.0, 5);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].score, 3.5);
        assert_eq!(
            groups[0].phrases,
            vec!["zulu phrase", "mike phrase", "bravo phrase"]
        );
        assert_eq!(groups[1].phrases, vec!["alpha phrase"]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let scores = map(&[
            ("one one", 2.0),
            ("two two", 3.0),
            ("three three", 4.0),
            ("four four", 5.0),
        ]);
        let groups = rank_grouped(&scores, 1.0, 2);

        let tops: Vec<f64> = groups.iter().map(|g| g.score).collect();
        assert_eq!(tops, vec![5.0, 4.0]);
    }

    #[test]
    fn test_fewer_groups_than_top_n() {
        let scores = map(&[("lonely phrase", 2.0)]);
        assert_eq!(rank_grouped(&scores, 1.0, 5).len(), 1);
    }

    #[test]
    fn test_nothing_qualifies() {
        let scores = map(&[("weak phrase", 0.3), ("nan phrase", f64::NAN)]);
        assert!(rank_grouped(&scores, 1.0, 5).is_empty());
        assert!(rank_grouped(&ScoreMap::new(), 1.0, 5).is_empty());
    }

    #[test]
    fn test_rounding_splits_near_ties() {
        // 0.7 + 0.6 is 1.2999999999999998 in binary floating point
        let mut scores = ScoreMap::new();
        scores.add("summed phrase", 0.7);
        scores.add("summed phrase", 0.6);
        scores.add("direct phrase", 1.3);

        let groups = rank_grouped(&scores, 1.0, 5);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].phrases, vec!["direct phrase"]);
        assert_eq!(groups[1].phrases, vec!["summed phrase"]);
    }

    #[test]
    fn test_does_not_mutate_scores() {
        let scores = map(&[("ocean view", 1.5)]);
        let before = scores.clone();
        let _ = rank_grouped(&scores, 1.0, 5);
        assert_eq!(scores, before);
    }
}
