//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! Substrate initialization and the disturbance operator both need a fast,
//! seedable generator whose sequence is identical on every platform. The
//! core algorithm is pure integer arithmetic; floating-point conversion
//! only happens at the output boundary.

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed 0 is replaced with a
/// non-zero fallback to avoid the all-zeros fixed point of the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback used when the caller provides seed 0.
    const FALLBACK_SEED: u64 = 0x5EED_0BAD_CAFE_D00D;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [-amplitude, amplitude).
    ///
    /// This is the noise draw used by the disturbance operator.
    pub fn next_symmetric(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_7() {
        // Golden value for xorshift64(seed=7, shifts=13,7,17). If this test
        // breaks, the algorithm changed and saved run specs no longer replay.
        let mut rng = Xorshift64::new(7);
        assert_eq!(rng.next_u64(), 7_575_888_327);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0, "seed=0 guard failed");
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_produces_identical_sequences() {
        let mut rng_a = Xorshift64::new(42);
        let mut rng_b = Xorshift64::new(42);
        for i in 0..1000 {
            assert_eq!(
                rng_a.next_u64(),
                rng_b.next_u64(),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn next_f64_always_in_unit_interval() {
        let mut rng = Xorshift64::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "next_f64() = {v} out of [0, 1)");
        }
    }

    #[test]
    fn next_symmetric_stays_within_amplitude() {
        let mut rng = Xorshift64::new(9999);
        for _ in 0..10_000 {
            let v = rng.next_symmetric(0.55);
            assert!(
                (-0.55..0.55).contains(&v),
                "next_symmetric(0.55) = {v} out of bounds"
            );
        }
    }

    #[test]
    fn next_symmetric_produces_both_signs() {
        let mut rng = Xorshift64::new(3);
        let draws: Vec<f64> = (0..1000).map(|_| rng.next_symmetric(1.0)).collect();
        assert!(draws.iter().any(|&v| v > 0.0));
        assert!(draws.iter().any(|&v| v < 0.0));
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(
                rng.next_u64(),
                restored.next_u64(),
                "sequences diverged after deserialization at index {i}"
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }

            #[test]
            fn next_symmetric_in_bounds_for_any_seed_and_amplitude(
                seed: u64,
                amplitude in 0.0_f64..100.0,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_symmetric(amplitude);
                    prop_assert!(v.abs() <= amplitude);
                }
            }

            #[test]
            fn next_f64_approximate_uniformity(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let v = rng.next_f64();
                    buckets[(v * 10.0).min(9.0) as usize] += 1;
                }
                // Loose bound (expected ~1000 per bucket) to avoid flakiness.
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(count >= 500, "bucket {i} has only {count} values");
                }
            }
        }
    }
}
