//! Lightweight, runtime-toggleable growth counters.
//!
//! Tracks iterations run, divisions performed, and index regrowth events -
//! no meshing throughput or LOD histograms, since there is no LOD concept in
//! a vertex/link growth engine.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static COLLECT: AtomicBool = AtomicBool::new(false);
static ITERATIONS: AtomicU64 = AtomicU64::new(0);
static DIVISIONS: AtomicU64 = AtomicU64::new(0);
static INDEX_REGROWTHS: AtomicU64 = AtomicU64::new(0);

/// Enable or disable metrics collection globally. Disabled by default so the
/// hot per-cell loop never pays for an atomic increment unless asked.
pub fn set_collecting(enabled: bool) {
  COLLECT.store(enabled, Ordering::Relaxed);
}

pub fn is_collecting() -> bool {
  COLLECT.load(Ordering::Relaxed)
}

pub(crate) fn record_iteration() {
  if is_collecting() {
    ITERATIONS.fetch_add(1, Ordering::Relaxed);
  }
}

pub(crate) fn record_divisions(count: u64) {
  if count > 0 && is_collecting() {
    DIVISIONS.fetch_add(count, Ordering::Relaxed);
  }
}

pub(crate) fn record_index_regrowth() {
  if is_collecting() {
    INDEX_REGROWTHS.fetch_add(1, Ordering::Relaxed);
  }
}

/// A point-in-time snapshot of the counters, for logging or display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthMetrics {
  pub iterations: u64,
  pub divisions: u64,
  pub index_regrowths: u64,
}

pub fn snapshot() -> GrowthMetrics {
  GrowthMetrics {
    iterations: ITERATIONS.load(Ordering::Relaxed),
    divisions: DIVISIONS.load(Ordering::Relaxed),
    index_regrowths: INDEX_REGROWTHS.load(Ordering::Relaxed),
  }
}
