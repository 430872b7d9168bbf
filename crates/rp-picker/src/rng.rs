//! Randomness source injected into the picker

use rand::{Rng, RngCore};

/// Source of uniform random numbers in `[0, 1)`
///
/// Every `rand` generator is a source, so seeded generators (`StdRng`,
/// `ChaCha8Rng`) make draws reproducible. Hosts with their own entropy
/// (e.g. `Math.random()` in a browser) implement `RngCore` for a wrapper.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Uniform index in `0..n` from a `[0, 1)` source
///
/// `n` must be non-zero. Out-of-range values from a misbehaving source are
/// clamped into the valid range.
pub fn pick_index(rng: &mut dyn RandomSource, n: usize) -> usize {
    debug_assert!(n > 0);
    let r = rng.next_f64();
    ((r * n as f64) as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Always returns the same value
    struct Fixed(f64);

    impl RngCore for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            // `random::<f64>()` keeps the top 53 bits
            ((self.0 * (1u64 << 53) as f64) as u64) << 11
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..32 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_pick_index_bounds() {
        assert_eq!(pick_index(&mut Fixed(0.0), 5), 0);
        assert_eq!(pick_index(&mut Fixed(0.5), 5), 2);
        assert_eq!(pick_index(&mut Fixed(0.999_999), 5), 4);
        assert_eq!(pick_index(&mut Fixed(0.7), 1), 0);
    }
}
