//! Consensus ranking from several orderings of the same items.
//!
//! Each item gets an affinity: the mean RBO between the singleton ranking
//! `[item]` and every input ranking. That measures how consistently early the
//! item appears across sources. Items are then sorted by descending affinity.
//! This is a heuristic stand-in for searching all permutations for the one
//! with maximal total RBO, which is intractable beyond a handful of items.

use super::rbo::{is_valid_persistence, rbo, DEFAULT_PERSISTENCE};
use super::validate::{check_comparable, RankingError};
use crate::models::Ranking;
use std::cmp::Ordering;
use tracing::debug;

/// An item together with its mean agreement against all input rankings.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAffinity<'a> {
    pub item: &'a str,
    pub affinity: f64,
}

/// Aggregate rankings at the default persistence.
pub fn aggregate(rankings: &[Ranking]) -> Result<Ranking, RankingError> {
    aggregate_with_persistence(rankings, DEFAULT_PERSISTENCE)
}

/// Aggregate rankings into one consensus ordering.
///
/// Zero rankings yield an empty consensus and a single ranking is returned
/// unchanged. Rankings that are not permutations of one item set are
/// rejected with [`RankingError::ShapeMismatch`].
///
/// Equal affinities are ordered by item text, so the result does not depend
/// on the order in which rankings are supplied.
pub fn aggregate_with_persistence(
    rankings: &[Ranking],
    persistence: f64,
) -> Result<Ranking, RankingError> {
    if !is_valid_persistence(persistence) {
        return Err(RankingError::InvalidPersistence(persistence));
    }
    check_comparable(rankings)?;

    match rankings {
        [] => return Ok(Vec::new()),
        [only] => return Ok(only.clone()),
        _ => {}
    }

    let mut scored = item_affinities(rankings, persistence);
    scored.sort_by(compare_affinities);

    debug!(
        "Aggregated {} rankings of {} items (p = {})",
        rankings.len(),
        scored.len(),
        persistence
    );

    Ok(scored.into_iter().map(|s| s.item.to_string()).collect())
}

/// Compute every item's mean affinity, in the order of the first ranking.
///
/// Per-ranking scores are summed smallest first, so the mean is bit-identical
/// however the rankings are ordered.
pub fn item_affinities(rankings: &[Ranking], persistence: f64) -> Vec<ItemAffinity<'_>> {
    let Some(first) = rankings.first() else {
        return Vec::new();
    };

    first
        .iter()
        .map(|item| {
            let mut scores: Vec<f64> = rankings
                .iter()
                .map(|ranking| rbo(std::slice::from_ref(item), ranking.as_slice(), persistence))
                .collect();
            scores.sort_by(f64::total_cmp);

            let affinity = scores.iter().sum::<f64>() / rankings.len() as f64;
            debug!("affinity({}) = {:.6}", item, affinity);

            ItemAffinity {
                item: item.as_str(),
                affinity,
            }
        })
        .collect()
}

/// Highest affinity first; ties by item text ascending.
fn compare_affinities(a: &ItemAffinity<'_>, b: &ItemAffinity<'_>) -> Ordering {
    b.affinity
        .total_cmp(&a.affinity)
        .then_with(|| a.item.cmp(b.item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::ShapeMismatch;

    fn r(items: &[&str]) -> Ranking {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate(&[]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_single_ranking_is_identity() {
        let only = r(&["z", "a", "m"]);
        assert_eq!(aggregate(&[only.clone()]).unwrap(), only);
    }

    #[test]
    fn test_unanimity() {
        let same = r(&["d", "b", "a", "c"]);
        let rankings = vec![same.clone(), same.clone(), same.clone()];
        assert_eq!(aggregate(&rankings).unwrap(), same);
    }

    #[test]
    fn test_golden_three_voters() {
        let rankings = [
            r(&["a", "b", "c"]),
            r(&["b", "a", "c"]),
            r(&["a", "c", "b"]),
        ];
        assert_eq!(aggregate(&rankings).unwrap(), r(&["a", "b", "c"]));
    }

    #[test]
    fn test_golden_rotated_items() {
        let rankings = [
            r(&["c", "a", "b"]),
            r(&["b", "c", "a"]),
            r(&["c", "b", "a"]),
        ];
        assert_eq!(aggregate(&rankings).unwrap(), r(&["c", "b", "a"]));
    }

    #[test]
    fn test_affinity_values() {
        let rankings = [
            r(&["a", "b", "c"]),
            r(&["b", "a", "c"]),
            r(&["a", "c", "b"]),
        ];
        let affinities = item_affinities(&rankings, 0.9);

        // Positions of "a": 0, 1, 0 -> (1.72 + 0.72 + 1.72) * 0.1 / 3
        assert_eq!(affinities[0].item, "a");
        assert!((affinities[0].affinity - 0.416 / 3.0).abs() < 1e-12);
        assert!(affinities[0].affinity > affinities[1].affinity);
        assert!(affinities[1].affinity > affinities[2].affinity);
    }

    #[test]
    fn test_ties_broken_by_item_text() {
        let forward = [r(&["b", "a"]), r(&["a", "b"])];
        let backward = [r(&["a", "b"]), r(&["b", "a"])];

        assert_eq!(aggregate(&forward).unwrap(), r(&["a", "b"]));
        assert_eq!(aggregate(&backward).unwrap(), r(&["a", "b"]));
    }

    #[test]
    fn test_rejects_mismatched_sets() {
        let rankings = [r(&["a", "b"]), r(&["a", "c"])];
        assert!(matches!(
            aggregate(&rankings),
            Err(RankingError::ShapeMismatch(ShapeMismatch::UnknownItem { .. }))
        ));
    }

    #[test]
    fn test_rejects_bad_persistence() {
        let rankings = [r(&["a"]), r(&["a"])];
        assert_eq!(
            aggregate_with_persistence(&rankings, 1.0),
            Err(RankingError::InvalidPersistence(1.0))
        );
    }

    #[test]
    fn test_low_persistence_favours_first_place() {
        // "z" is first twice, "x" once, "y" never.
        let rankings = [
            r(&["x", "y", "z"]),
            r(&["z", "y", "x"]),
            r(&["z", "y", "x"]),
        ];
        let shallow = aggregate_with_persistence(&rankings, 0.1).unwrap();
        assert_eq!(shallow, r(&["z", "x", "y"]));
    }
}
