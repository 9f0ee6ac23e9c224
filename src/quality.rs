//! Agreement between an interpolated sequence and the target's own simulated values.

use std::collections::HashMap;
use std::hash::Hash;

use num_traits::Float;

/// Summary of percent differences between simulated and interpolated values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitQuality<T> {
    /// Largest percent difference among compared keys
    pub max_percent_diff: T,
    /// Mean percent difference among compared keys
    pub mean_percent_diff: T,
    /// Number of keys compared
    pub compared: usize,
}

/// Percent difference relative to the mean of the two values,
/// `|a - e| / ((a + e) / 2) * 100`, or zero when `actual` is zero.
#[inline]
pub fn percent_difference<T: Float>(actual: T, estimated: T) -> T {
    if actual == T::zero() {
        return T::zero();
    }
    let two = T::one() + T::one();
    let hundred = T::from(100.0).unwrap_or_else(T::nan);
    (actual - estimated).abs() / ((actual + estimated) / two) * hundred
}

/// Compare estimates against simulated values with the same key.
///
/// Keys whose simulated value is below `floor`, or that are missing from either
/// side, are skipped. Returns `None` if nothing is left to compare.
pub fn fit_quality<K, T>(actual: &[(K, T)], estimated: &[(K, T)], floor: T) -> Option<FitQuality<T>>
where
    K: Eq + Hash,
    T: Float,
{
    let actual: HashMap<&K, T> = actual.iter().map(|(k, v)| (k, *v)).collect();

    let diffs: Vec<T> = estimated
        .iter()
        .filter_map(|(k, e)| actual.get(k).map(|&a| (a, *e)))
        .filter(|&(a, _)| a >= floor)
        .map(|(a, e)| percent_difference(a, e))
        .collect();

    let compared = diffs.len();
    let n = T::from(compared)?;
    let max = diffs.iter().copied().reduce(T::max)?;
    let mean = diffs.iter().fold(T::zero(), |acc, &d| acc + d) / n;

    Some(FitQuality {
        max_percent_diff: max,
        mean_percent_diff: mean,
        compared,
    })
}
