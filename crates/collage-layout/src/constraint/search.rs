//! Binary search over interpolated states

use crate::constants::{MAX_SEARCH_ITERATIONS, SEARCH_TOLERANCE};

/// A state that can be blended linearly towards another state of the same shape
pub trait Interpolate: Copy {
    /// The state at `t` of the way from `self` (t = 0) to `target` (t = 1)
    fn interpolate(&self, target: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, target: &Self, t: f64) -> Self {
        self + (target - self) * t
    }
}

/// Find the state closest to `proposed` that still passes `is_valid`.
///
/// `valid` must satisfy the predicate; `proposed` is assumed not to. Both
/// ends are never re-tested. The search narrows `[low, high]` until it is
/// no wider than [`SEARCH_TOLERANCE`] and returns the last valid state it
/// visited, or `valid` when no interpolated state passed.
pub fn find_largest_valid<S, F>(valid: S, proposed: S, mut is_valid: F) -> S
where
    S: Interpolate,
    F: FnMut(&S) -> bool,
{
    let mut low = 0.0;
    let mut high = 1.0;
    let mut best = valid;

    for _ in 0..MAX_SEARCH_ITERATIONS {
        if high - low <= SEARCH_TOLERANCE {
            break;
        }
        let mid = (low + high) / 2.0;
        let candidate = valid.interpolate(&proposed, mid);
        if is_valid(&candidate) {
            low = mid;
            best = candidate;
        } else {
            high = mid;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_boundary_within_tolerance() {
        let best = find_largest_valid(0.0, 100.0, |v| *v <= 37.0);
        assert!(best <= 37.0);
        assert!(37.0 - best <= 100.0 * SEARCH_TOLERANCE);
    }

    #[test]
    fn test_returns_start_when_nothing_valid() {
        let best = find_largest_valid(10.0, 20.0, |v| *v <= 10.0);
        assert_eq!(best, 10.0);
    }

    #[test]
    fn test_search_is_bounded() {
        let mut calls = 0;
        find_largest_valid(0.0, 1.0, |_| {
            calls += 1;
            true
        });
        // 1 / 2^8 < 0.005
        assert_eq!(calls, 8);
    }

    #[test]
    fn test_search_descending_range() {
        let best = find_largest_valid(50.0, -50.0, |v| *v >= 12.5);
        assert!(best >= 12.5);
        assert!(best - 12.5 <= 100.0 * SEARCH_TOLERANCE);
    }
}
