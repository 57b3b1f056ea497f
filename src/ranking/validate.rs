//! Comparability checks for a set of rankings.

use crate::models::Ranking;
use std::collections::HashSet;
use thiserror::Error;

/// Why a set of rankings cannot be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    /// A ranking has a different length than the first one.
    #[error("list {} has {found} items but list 1 has {expected}", .index + 1)]
    Length {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A ranking repeats an item.
    #[error("list {} contains \"{item}\" more than once", .index + 1)]
    Duplicate { index: usize, item: String },

    /// A ranking contains an item the first ranking lacks.
    #[error("list {} contains \"{item}\", which list 1 does not", .index + 1)]
    UnknownItem { index: usize, item: String },
}

/// Errors raised by the ranking engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// The rankings are not permutations of one common item set.
    #[error("lists are not comparable: {0}")]
    ShapeMismatch(#[from] ShapeMismatch),

    /// Persistence outside the open interval (0, 1).
    #[error("persistence must be strictly between 0 and 1, got {0}")]
    InvalidPersistence(f64),
}

impl RankingError {
    /// Message suitable for showing to the person who supplied the lists.
    pub fn user_message(&self) -> String {
        match self {
            RankingError::ShapeMismatch(reason) => {
                format!("The lists don't contain the same items ({})", reason)
            }
            RankingError::InvalidPersistence(_) => self.to_string(),
        }
    }
}

/// Check that every ranking is duplicate-free and that all rankings are
/// permutations of the first one.
///
/// Zero rankings are trivially comparable.
pub fn check_comparable(rankings: &[Ranking]) -> Result<(), ShapeMismatch> {
    let Some(first) = rankings.first() else {
        return Ok(());
    };
    let expected = first.len();
    let first_set: HashSet<&str> = first.iter().map(String::as_str).collect();

    for (index, ranking) in rankings.iter().enumerate() {
        if ranking.len() != expected {
            return Err(ShapeMismatch::Length {
                index,
                expected,
                found: ranking.len(),
            });
        }

        let mut seen = HashSet::with_capacity(ranking.len());
        for item in ranking {
            if !seen.insert(item.as_str()) {
                return Err(ShapeMismatch::Duplicate {
                    index,
                    item: item.clone(),
                });
            }
            if !first_set.contains(item.as_str()) {
                return Err(ShapeMismatch::UnknownItem {
                    index,
                    item: item.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Whether the rankings can be aggregated. Never fails; callers must check
/// the result before aggregating.
pub fn validate(rankings: &[Ranking]) -> bool {
    check_comparable(rankings).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(items: &[&str]) -> Ranking {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_and_single_are_valid() {
        assert!(validate(&[]));
        assert!(validate(&[r(&["a", "b"])]));
    }

    #[test]
    fn test_permutations_are_valid() {
        assert!(validate(&[
            r(&["a", "b", "c"]),
            r(&["b", "a", "c"]),
            r(&["a", "c", "b"]),
        ]));
    }

    #[test]
    fn test_length_mismatch() {
        let rankings = [r(&["a", "b"]), r(&["a", "b", "c"])];
        assert!(!validate(&rankings));
        assert_eq!(
            check_comparable(&rankings),
            Err(ShapeMismatch::Length {
                index: 1,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_different_item_sets() {
        let rankings = [r(&["a", "b"]), r(&["a", "c"])];
        assert!(!validate(&rankings));
        assert_eq!(
            check_comparable(&rankings),
            Err(ShapeMismatch::UnknownItem {
                index: 1,
                item: "c".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_within_single_ranking() {
        assert!(!validate(&[r(&["a", "a"])]));
    }

    #[test]
    fn test_duplicate_masking_missing_item() {
        // Same length, every item known, but "b" is missing.
        assert!(!validate(&[r(&["a", "b"]), r(&["a", "a"])]));
    }

    #[test]
    fn test_items_are_case_and_whitespace_sensitive() {
        assert!(!validate(&[r(&["Apple", "b"]), r(&["apple", "b"])]));
        assert!(!validate(&[r(&["a ", "b"]), r(&["a", "b"])]));
    }

    #[test]
    fn test_error_messages() {
        let err = RankingError::from(ShapeMismatch::Length {
            index: 2,
            expected: 4,
            found: 3,
        });
        assert_eq!(
            err.to_string(),
            "lists are not comparable: list 3 has 3 items but list 1 has 4"
        );
        assert!(err.user_message().starts_with("The lists don't contain the same items"));
    }
}
