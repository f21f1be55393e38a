//! Injected randomness for the engines.
//!
//! Engines never reach for an ambient generator. They take a [`RandomSource`]
//! at construction so a caller can hand in a seeded `StdRng` for play or a
//! [`ScriptedRandom`] when the exact draws matter.

use rand::Rng;

/// A source of uniform integer draws
pub trait RandomSource {
    /// Uniform draw in `0..upper`. `upper` is never zero.
    fn below(&mut self, upper: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Replays a fixed sequence of draws, cycling when it runs out.
///
/// Each value is reduced modulo the requested bound, so `ScriptedRandom::new([2])`
/// always picks the third option of a three-way draw.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        let values: Vec<usize> = values.into_iter().collect();
        assert!(!values.is_empty(), "scripted random needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Number of draws served so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: usize) -> usize {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_scripted_replays_and_cycles() {
        let mut rng = ScriptedRandom::new([0, 4, 2]);
        assert_eq!(rng.below(3), 0);
        assert_eq!(rng.below(3), 1);
        assert_eq!(rng.below(3), 2);
        assert_eq!(rng.below(10), 0);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_rng_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rng.below(16) < 16);
        }
    }
}
