//! Seeded simulation RNG.
//!
//! # Determinism strategy
//!
//! One `SimRng` is created per simulation and owned by the capacity grid; it
//! is passed explicitly wherever randomness is needed, never reached through
//! global state.  A nonzero seed fully determines every draw, so two runs
//! with the same seed, density, and layout produce identical flows.
//!
//! A seed of `0` means "not reproducible": the generator is seeded from OS
//! entropy instead.
//!
//! Only two primitives are exposed to the rest of the workspace: sampling
//! without replacement over an index range, and uniform integer draws.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG for cell sampling and volume draws.
///
/// Used only in single-threaded contexts; the simulator never shares it.
pub struct SimRng {
    rng:  SmallRng,
    seed: Option<u64>,
}

impl SimRng {
    /// Seed from `seed`, or from OS entropy when `seed == 0`.
    pub fn new(seed: u64) -> Self {
        if seed == 0 {
            Self::from_entropy()
        } else {
            Self {
                rng:  SmallRng::seed_from_u64(seed),
                seed: Some(seed),
            }
        }
    }

    /// A non-reproducible generator.
    pub fn from_entropy() -> Self {
        Self {
            rng:  SmallRng::from_entropy(),
            seed: None,
        }
    }

    /// The seed this generator was created with, or `None` if it was seeded
    /// from entropy.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// `true` when every draw is reproducible from [`seed`](Self::seed).
    #[inline]
    pub fn is_reproducible(&self) -> bool {
        self.seed.is_some()
    }

    /// Draw `amount` distinct indices uniformly from `0..len`.
    ///
    /// Returns `None` if `amount > len`.  The result is in draw order, not
    /// sorted.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Option<Vec<usize>> {
        if amount > len {
            return None;
        }
        Some(rand::seq::index::sample(&mut self.rng, len, amount).into_vec())
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.rng.gen_range(range)
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimRng").field("seed", &self.seed).finish_non_exhaustive()
    }
}
