//! Rank-Biased Overlap between two rankings.
//!
//! At every depth `d` the overlap of the two length-`d` prefixes is divided by
//! `d` and weighted by `p^(d-1)`; the weighted sum is scaled by `(1 - p)`.
//! Shallow agreement therefore counts more than deep agreement, and a larger
//! `p` flattens that decay.
//!
//! Reference: Webber, Moffat & Zobel, "A Similarity Measure for Indefinite
//! Rankings" (2010).

use std::collections::HashSet;

/// Persistence used when none is configured.
pub const DEFAULT_PERSISTENCE: f64 = 0.9;

/// Whether `p` lies in the open interval (0, 1).
pub fn is_valid_persistence(p: f64) -> bool {
    p > 0.0 && p < 1.0
}

/// Score the agreement of two rankings at persistence `p`.
///
/// Rankings may differ in length: a ranking shorter than the current depth
/// contributes its whole content and is never padded. The prefix overlap is
/// maintained incrementally, so the cost is linear in the longer ranking.
/// Both sides are treated identically, which makes the score exactly
/// symmetric.
pub fn rbo<A, B>(a: &[A], b: &[B], p: f64) -> f64
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let depth = a.len().max(b.len());

    let mut seen_a: HashSet<&str> = HashSet::with_capacity(a.len());
    let mut seen_b: HashSet<&str> = HashSet::with_capacity(b.len());
    let mut overlap = 0usize;
    let mut weight = 1.0;
    let mut sum = 0.0;

    for d in 0..depth {
        if let Some(x) = a.get(d).map(AsRef::as_ref) {
            if seen_a.insert(x) && seen_b.contains(x) {
                overlap += 1;
            }
        }
        if let Some(y) = b.get(d).map(AsRef::as_ref) {
            if seen_b.insert(y) && seen_a.contains(y) {
                overlap += 1;
            }
        }

        sum += weight * overlap as f64 / (d + 1) as f64;
        weight *= p;
    }

    sum * (1.0 - p)
}
