//! Move selection policies for sampled search.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks one move out of a non-empty candidate list by returning its index.
///
/// Choosers may keep their own randomness but must not depend on or modify
/// search state. Any `FnMut(&[M]) -> usize` closure is a chooser.
pub trait Chooser<M> {
    fn choose(&mut self, candidates: &[M]) -> usize;
}

impl<M, F> Chooser<M> for F
where
    F: FnMut(&[M]) -> usize,
{
    fn choose(&mut self, candidates: &[M]) -> usize {
        self(candidates)
    }
}

/// Always takes the first candidate. Makes sampled searches deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl<M> Chooser<M> for FirstChooser {
    fn choose(&mut self, _candidates: &[M]) -> usize {
        0
    }
}

/// Uniformly random choice.
#[derive(Debug, Clone)]
pub struct RandomChooser<R = ChaCha8Rng> {
    rng: R,
}

impl RandomChooser<ChaCha8Rng> {
    /// Reproducible across runs and platforms for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomChooser<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<M, R: Rng> Chooser<M> for RandomChooser<R> {
    fn choose(&mut self, candidates: &[M]) -> usize {
        self.rng.gen_range(0..candidates.len())
    }
}
