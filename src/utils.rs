//! Utility functions for the beadbox crate

use rand::Rng;

/// Weighted roulette selection over integer-weighted items.
///
/// Draws a uniform integer in `[0, total)` and walks the items,
/// subtracting weights until the threshold crosses zero, so the
/// probability of selecting an item equals `weight / total`.
///
/// Returns `None` when the slice is empty or the total weight is zero.
pub fn weighted_draw<R, T>(rng: &mut R, items: &[(T, u32)]) -> Option<T>
where
    R: Rng,
    T: Copy,
{
    let total: u32 = items.iter().map(|&(_, weight)| weight).sum();
    if total == 0 {
        return None;
    }

    let mut threshold = rng.random_range(0..total);
    for &(item, weight) in items {
        if threshold < weight {
            return Some(item);
        }
        threshold -= weight;
    }

    // Unreachable: the threshold is strictly below the total.
    None
}
