//! Randomness used by the maze generators.
//!
//! The generators never reach for a thread local or global generator. The caller owns the source of
//! randomness and passes it in, which keeps generation reproducible with a seeded or replayed source.

use rand::Rng;

/// A source of uniformly distributed indices.
///
/// Every `rand::Rng` is a `RandomSource`. Anything else that can hand out indices, e.g. a replay of
/// recorded draws, can implement it directly.
pub trait RandomSource {
    /// A uniformly random value in `[0, bound)`. `bound` must be at least 1.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Fisher-Yates shuffle, in place.
///
/// Each of the `n!` orderings is equally likely given a uniform source. Exactly `n` draws are taken
/// from `rng`, the last one with a bound of 1.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    let mut counter = items.len();
    while counter > 0 {
        let index = rng.next_index(counter);
        counter -= 1;
        items.swap(counter, index);
    }
}

/// Replays a fixed sequence of draws, cycling back to the start once exhausted. Each draw is reduced
/// modulo the requested bound.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ReplaySource {
    draws: Vec<usize>,
    position: usize,
}

#[cfg(test)]
impl ReplaySource {
    pub fn new(draws: &[usize]) -> ReplaySource {
        assert!(!draws.is_empty(), "a replay needs at least one draw");
        ReplaySource {
            draws: draws.to_vec(),
            position: 0,
        }
    }

    pub fn draws_taken(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
impl RandomSource for ReplaySource {
    fn next_index(&mut self, bound: usize) -> usize {
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw % bound
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::utils;

    #[test]
    fn shuffle_empty_and_single_are_noops() {
        let mut rng = ReplaySource::new(&[0]);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        assert_eq!(rng.draws_taken(), 0);

        let mut single = vec![42];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![42]);
        assert_eq!(rng.draws_taken(), 1);
    }

    #[test]
    fn shuffle_takes_one_draw_per_element() {
        let mut rng = ReplaySource::new(&[0]);
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        shuffle(&mut items, &mut rng);
        assert_eq!(rng.draws_taken(), 5);
    }

    #[test]
    fn shuffle_replayed_draws() {
        // counter 4 -> swap(3, 0), counter 3 -> swap(2, 0), counter 2 -> swap(1, 0)
        let mut items = vec!['u', 'r', 'd', 'l'];
        shuffle(&mut items, &mut ReplaySource::new(&[0]));
        assert_eq!(items, vec!['r', 'd', 'l', 'u']);

        // counter 4 -> swap(3, 3), counter 3 -> swap(2, 1), counter 2 -> swap(1, 1)
        let mut items = vec!['u', 'r', 'd', 'l'];
        shuffle(&mut items, &mut ReplaySource::new(&[3, 1, 1, 0]));
        assert_eq!(items, vec!['u', 'd', 'r', 'l']);
    }

    #[test]
    fn shuffle_keeps_all_elements() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..100).collect();
        shuffle(&mut items, &mut rng);
        assert_eq!(items.iter().cloned().sorted().collect::<Vec<_>>(),
                   (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_is_unbiased() {
        const TRIALS: usize = 24_000;
        const PERMUTATIONS: usize = 24;

        let mut rng = XorShiftRng::seed_from_u64(0x5eed);
        let mut counts = utils::fnv_hashmap::<[u8; 4], usize>(PERMUTATIONS);
        for _ in 0..TRIALS {
            let mut items = [0u8, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), PERMUTATIONS);

        let expected = (TRIALS / PERMUTATIONS) as f64;
        let chi_square: f64 = counts.values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        // 23 degrees of freedom, p ~= 0.0001 critical value.
        assert!(chi_square < 56.0, "chi square statistic too large: {}", chi_square);
    }
}
