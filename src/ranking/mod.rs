//! Rank aggregation engine.
//!
//! Compares several orderings of the same item set using Rank-Biased
//! Overlap and merges them into one consensus ordering.

pub mod aggregator;
pub mod rbo;
pub mod validate;

pub use aggregator::{aggregate, aggregate_with_persistence, item_affinities, ItemAffinity};
pub use rbo::{is_valid_persistence, rbo, DEFAULT_PERSISTENCE};
pub use validate::{check_comparable, validate, RankingError, ShapeMismatch};
