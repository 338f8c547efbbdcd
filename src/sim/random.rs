//! Inclusive integer ranges for spawn timing and obstacle sizing

use rand::Rng;

/// Uniform integer in the closed interval `[min, max]`.
///
/// Callers only pass `min <= max`; `min == max` returns that value.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    debug_assert!(min <= max, "random_int called with min {min} > max {max}");
    rng.random_range(min..=max)
}
