//! Uniform random draws over closed ranges.
//!
//! [`UniformSource`] is implemented for every [`rand::Rng`], so the simulation
//! core can take `&mut impl Rng` and unit tests can drive it with a seeded
//! [`StdRng`].  The running app owns one [`SimRng`] resource.

use crate::geometry::Range;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::{Deref, DerefMut};

/// Uniform draws over a closed interval.
pub trait UniformSource {
    /// Uniform in `[min, max]`.  Returns `min` when the bounds are equal.
    fn next_between(&mut self, min: f32, max: f32) -> f32;

    fn next_in(&mut self, range: Range) -> f32 {
        self.next_between(range.min, range.max)
    }
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn next_between(&mut self, min: f32, max: f32) -> f32 {
        debug_assert!(min <= max, "inverted range [{min}, {max}]");
        self.gen_range(min..=max)
    }
}

/// The simulation's random source.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub StdRng);

impl SimRng {
    /// Deterministic when `seed` is set, entropy-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed(None)
    }
}

impl Deref for SimRng {
    type Target = StdRng;
    fn deref(&self) -> &StdRng {
        &self.0
    }
}

impl DerefMut for SimRng {
    fn deref_mut(&mut self) -> &mut StdRng {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_inside_the_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = Range::new(-2.5, 2.5);
        for _ in 0..1000 {
            let v = rng.next_in(range);
            assert!(range.contains(v), "{v} escaped {range:?}");
        }
    }

    #[test]
    fn degenerate_range_returns_its_bound() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(rng.next_between(0.3, 0.3), 0.3);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::from_seed(Some(42));
        let mut b = SimRng::from_seed(Some(42));
        for _ in 0..16 {
            assert_eq!(a.next_between(0.0, 1.0), b.next_between(0.0, 1.0));
        }
    }
}
