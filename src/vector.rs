//! RNG and small math helpers shared across the growth engine.

use glam::{IVec3, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

/// Round each component of `v` to the nearest integer (round-half-away-from-zero
/// via `f32::round`, matching `std::roundf` in the original source).
#[inline]
pub fn round_vec3(v: Vec3) -> IVec3 {
  IVec3::new(v.x.round() as i32, v.y.round() as i32, v.z.round() as i32)
}

/// Splitmix64-style integer hash, used to derive a deterministic per-cell RNG
/// seed from `(rng_seed, cell_id)` when reproducibility is requested.
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
  x = x.wrapping_add(0x9E3779B97F4A7C15);
  let mut z = x;
  z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
  z ^ (z >> 31)
}

thread_local! {
  static THREAD_RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Uniform sample in `[0, 1)`.
///
/// Defaults to a per-thread, non-deterministically
/// seeded generator (seeded from OS entropy rather than a wall clock, which
/// `rand::SmallRng::from_os_rng` provides without reaching for `std::time`).
/// When the caller wants reproducibility, use [`deterministic_unit_sample`]
/// instead, seeded per cell id.
#[inline]
pub fn thread_unit_sample() -> f32 {
  THREAD_RNG.with(|rng| rng.borrow_mut().random_range(0.0f32..1.0))
}

/// Uniform sample in `[0, 1)` from a seed derived from `(seed, cell_id)`.
///
/// Used when [`crate::config::GrowthConfig::rng_seed`] is set, making food
/// accrual (and therefore division timing) reproducible across runs with
/// identical initial state.
#[inline]
pub fn deterministic_unit_sample(seed: u64, cell_id: u32, call_index: u64) -> f32 {
  let mixed = splitmix64(seed ^ splitmix64(cell_id as u64) ^ splitmix64(call_index));
  // Take the top 24 bits for a well-distributed f32 in [0, 1).
  ((mixed >> 40) as f32) / ((1u64 << 24) as f32)
}

#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;
