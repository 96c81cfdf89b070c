//! Seedable pseudo-random number generation for walks.
//!
//! Every worker owns its own [`Rng`]; nothing in the crate keeps global random
//! state. Use [`derive_seed`] to hand out independent seeds to parallel workers.

use core::f32::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng};

/// Small, fast, non-cryptographic generator.
#[derive(Clone, Debug)]
pub struct Rng {
    inner: SmallRng,
}

impl Rng {
    /// Seed the generator deterministically.
    #[inline]
    pub fn seed_from(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn uniform_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform in `(0, 1]`; never returns zero.
    #[inline]
    pub fn uniform_open_closed_f32(&mut self) -> f32 {
        1.0 - self.uniform_f32()
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        TAU * self.uniform_f32()
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::seed_from(0xA5A5_A5A5_1234_5678)
    }
}

/// SplitMix64 mixer used to derive well-separated seeds for parallel workers.
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed for the `index`-th independent stream under a shared `base` seed.
#[inline]
pub fn derive_seed(base: u64, index: u64) -> u64 {
    splitmix64(base ^ splitmix64(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Rng::seed_from(9);
        let mut b = Rng::seed_from(9);
        for _ in 0..32 {
            assert_eq!(a.uniform_f32().to_bits(), b.uniform_f32().to_bits());
        }
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = Rng::seed_from(3);
        for _ in 0..10_000 {
            let u = rng.uniform_f32();
            assert!((0.0..1.0).contains(&u));
            let v = rng.uniform_open_closed_f32();
            assert!(v > 0.0 && v <= 1.0);
            let a = rng.angle();
            assert!((0.0..TAU).contains(&a) || a == TAU);
        }
    }

    #[test]
    fn derived_seeds_differ() {
        let s: [u64; 4] = core::array::from_fn(|i| derive_seed(42, i as u64));
        for i in 0..s.len() {
            for j in (i + 1)..s.len() {
                assert_ne!(s[i], s[j]);
            }
        }
    }
}
