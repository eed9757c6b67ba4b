//! Pinned-progress sources
//!
//! An expanded card rests at a progress drawn once per expansion. The draw is
//! injectable so tests can fix it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Picks the resting progress for a newly expanded card
pub trait PinSource {
    /// A value inside `range`
    fn pin(&mut self, range: RangeInclusive<f32>) -> f32;
}

/// Uniform random draw
#[derive(Debug)]
pub struct RandomPin {
    rng: StdRng,
}

impl RandomPin {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of draws
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PinSource for RandomPin {
    fn pin(&mut self, range: RangeInclusive<f32>) -> f32 {
        let (lo, hi) = (*range.start(), *range.end());
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(range)
    }
}

/// Always the same value, clamped into the requested range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPin(pub f32);

impl PinSource for FixedPin {
    fn pin(&mut self, range: RangeInclusive<f32>) -> f32 {
        self.0.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pin_stays_in_range() {
        let mut pins = RandomPin::seeded(7);
        for _ in 0..1000 {
            let value = pins.pin(0.4..=0.7);
            assert!((0.4..=0.7).contains(&value), "{value}");
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomPin::seeded(42);
        let mut b = RandomPin::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.pin(0.4..=0.7), b.pin(0.4..=0.7));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut pins = RandomPin::seeded(1);
        assert_eq!(pins.pin(0.5..=0.5), 0.5);
    }

    #[test]
    fn test_fixed_pin_clamps() {
        assert_eq!(FixedPin(0.55).pin(0.4..=0.7), 0.55);
        assert_eq!(FixedPin(0.9).pin(0.4..=0.7), 0.7);
        assert_eq!(FixedPin(0.1).pin(0.4..=0.7), 0.4);
    }
}
