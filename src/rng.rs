//! Shuffling support for decks and lesson pair sets.

use std::cell::Cell;

/// Shuffle a slice in place with a uniform Fisher–Yates pass: swap from the
/// last index down to 1, each time picking a uniformly random partner in
/// `[0, i]`. Every permutation of the input is equally likely.
pub fn shuffle<T>(items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rand_below(i + 1);
        items.swap(i, j);
    }
}

/// Uniform random index in `[0, bound)`. `bound` must be non-zero.
///
/// Uses OS/browser randomness with rejection sampling so the modulus does not
/// bias small indices. If the entropy source errors we fall back to a weak
/// LCG stream rather than aborting mid-game.
pub fn rand_below(bound: usize) -> usize {
    debug_assert!(bound > 0);
    let bound32 = bound as u32;
    // Largest multiple of `bound` representable in u32; values at or above it
    // are rejected to keep the distribution uniform.
    let zone = (u32::MAX / bound32) * bound32;
    let mut buf = [0u8; 4];
    loop {
        if getrandom::getrandom(&mut buf).is_err() {
            return lcg_next() as usize % bound;
        }
        let v = u32::from_le_bytes(buf);
        if v < zone {
            return (v % bound32) as usize;
        }
    }
}

thread_local! {
    static LCG_STATE: Cell<u32> = const { Cell::new(0x9e37_79b9) };
}

// Not crypto secure; only reached when getrandom itself fails.
fn lcg_next() -> u32 {
    LCG_STATE.with(|s| {
        let next = s.get().wrapping_mul(1664525).wrapping_add(1013904223);
        s.set(next);
        next
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn shuffle_is_a_permutation() {
        let original: Vec<u32> = (0..50).collect();
        let mut shuffled = original.clone();
        shuffle(&mut shuffled);
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original);
    }

    #[test]
    fn shuffle_handles_degenerate_lengths() {
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty);
        let mut one = vec![7u8];
        shuffle(&mut one);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn rand_below_stays_in_range() {
        for bound in [1usize, 2, 3, 10, 255] {
            for _ in 0..200 {
                assert!(rand_below(bound) < bound);
            }
        }
    }

    #[test]
    fn rand_below_eventually_hits_every_index() {
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(rand_below(5));
        }
        assert_eq!(seen.len(), 5);
    }
}
