// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Random node heights.
//!
//! Every node participates in level 0. A node reaches level `k` with
//! probability `2^-k`, so each level holds about half the nodes of the level
//! below it. Heights are capped at the list's maximum level, and the cap
//! absorbs the remaining probability mass:
//!
//! ```text
//! P(height = k)         = 2^-k        for k < max_level
//! P(height = max_level) = 2^-(max_level - 1)
//! ```

use rand_core::OsRng;
use rand_core::RngCore;

/// Chooses the height of each newly inserted node.
pub trait LevelGenerator {
    /// Produce a height in `[1, max_level]`.
    fn random_level(&mut self, max_level: usize) -> usize;
}

/// Geometric level generator with a promotion probability of 1/2.
///
/// Starting at height 1, one random bit is drawn per level: a 1 promotes the
/// node, a 0 stops. Bits are pulled from the source 64 at a time and every
/// bit is used.
#[derive(Debug, Clone, Default)]
pub struct CoinFlip<R = OsRng> {
    rng: R,
    bits: u64,
    remaining: u32,
}

impl<R: RngCore> CoinFlip<R> {
    /// Create a generator drawing bits from `rng`.
    pub fn new(rng: R) -> CoinFlip<R> {
        return CoinFlip {
            rng,
            bits: 0,
            remaining: 0,
        };
    }

    /// Draw one uniformly random bit.
    ///
    /// # Panics
    ///
    /// Panics if the random source fails. The list has no other way to pick a
    /// height.
    fn flip(&mut self) -> bool {
        if self.remaining == 0 {
            let mut buf = [0u8; 8];
            if let Err(err) = self.rng.try_fill_bytes(&mut buf) {
                panic!("error getting random level: {}", err);
            }
            self.bits = u64::from_le_bytes(buf);
            self.remaining = u64::BITS;
        }
        let bit = self.bits & 1 == 1;
        self.bits >>= 1;
        self.remaining -= 1;
        return bit;
    }
}

impl<R: RngCore> LevelGenerator for CoinFlip<R> {
    fn random_level(&mut self, max_level: usize) -> usize {
        let mut level = 1;
        while level < max_level && self.flip() {
            level += 1;
        }
        return level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::num::NonZeroU32;

    /// A random source that always fails.
    struct Broken;

    impl RngCore for Broken {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            let code = NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
            return Err(rand_core::Error::from(code));
        }
    }

    #[test]
    fn heights_stay_in_range() {
        let mut levels = CoinFlip::new(StdRng::seed_from_u64(7));
        for max_level in 1..12 {
            for _ in 0..1000 {
                let height = levels.random_level(max_level);
                assert!(height >= 1 && height <= max_level, "height {} for max {}", height, max_level);
            }
        }
    }

    #[test]
    fn max_level_one_is_always_one() {
        let mut levels = CoinFlip::new(StdRng::seed_from_u64(1));
        for _ in 0..1000 {
            assert_eq!(levels.random_level(1), 1);
        }
    }

    #[test]
    fn os_rng_default() {
        let mut levels = CoinFlip::<OsRng>::default();
        let height = levels.random_level(10);
        assert!((1..=10).contains(&height));
    }

    #[test]
    fn geometric_distribution() {
        const SAMPLES: usize = 100_000;
        const MAX_LEVEL: usize = 10;

        let mut levels = CoinFlip::new(StdRng::seed_from_u64(0x5eed));
        let mut counts = [0usize; MAX_LEVEL + 1];
        for _ in 0..SAMPLES {
            counts[levels.random_level(MAX_LEVEL)] += 1;
        }
        assert_eq!(counts[0], 0);

        for k in 1..=MAX_LEVEL {
            let expected = if k < MAX_LEVEL {
                0.5f64.powi(k as i32)
            } else {
                0.5f64.powi(MAX_LEVEL as i32 - 1)
            };
            let actual = counts[k] as f64 / SAMPLES as f64;
            // Four standard deviations of a binomial proportion.
            let tolerance = 4.0 * (expected * (1.0 - expected) / SAMPLES as f64).sqrt();
            assert!(
                (actual - expected).abs() <= tolerance.max(0.001),
                "height {}: expected {:.5}, got {:.5}",
                k,
                expected,
                actual
            );
        }
    }

    #[test]
    #[should_panic(expected = "error getting random level")]
    fn rng_failure_is_fatal() {
        let mut levels = CoinFlip::new(Broken);
        levels.random_level(4);
    }

    #[test]
    fn no_flips_needed_at_max_level_one() {
        // The source is never touched when there is nothing to decide.
        let mut levels = CoinFlip::new(Broken);
        assert_eq!(levels.random_level(1), 1);
    }
}
