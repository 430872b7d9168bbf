//! Fair draws: shuffling and unique winner selection
//!
//! Both operations run the same index-pool Fisher–Yates loop: pick a random
//! slot from the live pool, emit the item it points to, then move the last
//! live slot into the hole and shrink the pool. Every permutation is equally
//! likely and the cost is O(n).

use crate::picker::PickerError;
use crate::rng::{RandomSource, pick_index};

/// Uniformly shuffled copy of `items`
pub fn shuffle<T: Clone>(items: &[T], rng: &mut dyn RandomSource) -> Vec<T> {
    partial_shuffle(items, items.len(), rng)
}

/// First `count` items of a uniform permutation of `items`
///
/// Equivalent to `shuffle(items)[..count]` but stops drawing early. `count`
/// is capped at `items.len()`.
pub fn partial_shuffle<T: Clone>(items: &[T], count: usize, rng: &mut dyn RandomSource) -> Vec<T> {
    let count = count.min(items.len());
    let mut pool: Vec<usize> = (0..items.len()).collect();
    let mut live = pool.len();
    let mut result = Vec::with_capacity(count);

    while result.len() < count {
        let slot = pick_index(rng, live);
        result.push(items[pool[slot]].clone());
        live -= 1;
        pool.swap(slot, live);
    }

    result
}

/// Draw `count` distinct entries of `names` without replacement
///
/// Distinct means distinct positions: duplicate names in the list are
/// independent entries and may both win.
pub fn draw_winners(
    names: &[String],
    count: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<String>, PickerError> {
    if names.len() < count {
        return Err(PickerError::InsufficientNames {
            required: count,
            available: names.len(),
        });
    }
    Ok(partial_shuffle(names, count, rng))
}
