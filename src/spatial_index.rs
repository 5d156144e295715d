//! 3D spatial hash index with halo-insertion.
//!
//! Registers every id into the 3x3x3 neighborhood of grid cells around its
//! point's key, so a single lookup at a query point's own grid cell returns
//! every id within Chebyshev distance 1 - which covers the Euclidean ball of
//! radius `radius_of_influence` when `cell_size ~= 1.2 * radius_of_influence`.
//!
//! Backing storage is a dense, growable array, so growth is a single
//! reallocate-and-copy and `Nearby` is an index rather than a hash lookup.
//! Concurrent structural edits during `Update` are guarded by a striped set
//! of mutexes, each owning a partition of the dense array, so that two
//! `Update` calls touching unrelated cells never block each other.

use glam::{IVec3, Vec3};
use parking_lot::Mutex;
use smallvec::SmallVec;

/// Small bag of cell ids registered to a single grid cell.
pub type CellBag = SmallVec<[u32; 8]>;

const STRIPE_COUNT: usize = 1024;
const GROWTH_PADDING: f32 = 0.25;

/// Halo-insertion spatial hash over 3D points.
pub struct SpatialIndex {
  cell_size: f32,
  origin: IVec3,
  dims: IVec3,
  stripes: Vec<Mutex<Vec<CellBag>>>,
}

impl SpatialIndex {
  /// Create an empty index with the given grid cell side length. The
  /// backing array is allocated lazily by the first [`SpatialIndex::ensure`]
  /// call.
  pub fn new(cell_size: f32) -> Self {
    Self {
      cell_size,
      origin: IVec3::ZERO,
      dims: IVec3::ZERO,
      stripes: Vec::new(),
    }
  }

  pub fn cell_size(&self) -> f32 {
    self.cell_size
  }

  /// Current backing-array dimensions, for detecting grow events from
  /// outside (e.g. to log/count index regrowth).
  pub(crate) fn dims_snapshot(&self) -> IVec3 {
    self.dims
  }

  /// Grid key for a world-space point: componentwise `round(p / cell_size)`.
  #[inline]
  pub fn key_for_point(&self, point: Vec3) -> IVec3 {
    crate::vector::round_vec3(point / self.cell_size)
  }

  /// Widen backing storage, if needed, so every key within the halo of
  /// `min` and `max` is addressable. Pads by 25% on each axis when growth
  /// is required, so growth is rare relative to the number of iterations
  /// that reuse it.
  pub fn ensure(&mut self, min: Vec3, max: Vec3) {
    let min_key = self.key_for_point(min) - IVec3::ONE;
    let max_key = self.key_for_point(max) + IVec3::ONE;
    if self.dims != IVec3::ZERO && self.covers(min_key) && self.covers(max_key) {
      return;
    }

    let current_max = if self.dims == IVec3::ZERO {
      self.origin
    } else {
      self.origin + self.dims - IVec3::ONE
    };
    let new_min = self.origin.min(min_key);
    let new_max = current_max.max(max_key);

    let span = (new_max - new_min + IVec3::ONE).max(IVec3::ONE);
    let pad = ((span.as_vec3() * GROWTH_PADDING).ceil().as_ivec3()).max(IVec3::ONE);
    let grown_min = new_min - pad;
    let grown_max = new_max + pad;
    self.reallocate(grown_min, grown_max);
  }

  fn covers(&self, key: IVec3) -> bool {
    self.dims != IVec3::ZERO
      && key.cmpge(self.origin).all()
      && key.cmplt(self.origin + self.dims).all()
  }

  fn reallocate(&mut self, new_min: IVec3, new_max: IVec3) {
    let new_dims = new_max - new_min + IVec3::ONE;
    let total = Self::total_cells(new_dims);
    let slots_per_stripe = total.div_ceil(STRIPE_COUNT);
    let mut new_stripes: Vec<Mutex<Vec<CellBag>>> = (0..STRIPE_COUNT)
      .map(|_| Mutex::new(vec![CellBag::new(); slots_per_stripe]))
      .collect();

    if self.dims != IVec3::ZERO {
      let old_total = Self::total_cells(self.dims);
      for flat in 0..old_total {
        let (stripe, slot) = Self::stripe_and_slot(flat);
        let bag = std::mem::take(&mut self.stripes[stripe].get_mut()[slot]);
        if bag.is_empty() {
          continue;
        }
        let key = self.origin + Self::unflatten(self.dims, flat);
        let new_local = key - new_min;
        let new_flat = Self::flatten(new_dims, new_local);
        let (new_stripe, new_slot) = Self::stripe_and_slot(new_flat);
        new_stripes[new_stripe].get_mut()[new_slot] = bag;
      }
    }

    self.origin = new_min;
    self.dims = new_dims;
    self.stripes = new_stripes;
  }

  fn total_cells(dims: IVec3) -> usize {
    dims.x as usize * dims.y as usize * dims.z as usize
  }

  fn flatten(dims: IVec3, local: IVec3) -> usize {
    local.x as usize
      + local.y as usize * dims.x as usize
      + local.z as usize * (dims.x as usize * dims.y as usize)
  }

  fn unflatten(dims: IVec3, flat: usize) -> IVec3 {
    let plane = dims.x as usize * dims.y as usize;
    let z = flat / plane;
    let rem = flat % plane;
    let y = rem / dims.x as usize;
    let x = rem % dims.x as usize;
    IVec3::new(x as i32, y as i32, z as i32)
  }

  fn stripe_and_slot(flat: usize) -> (usize, usize) {
    (flat % STRIPE_COUNT, flat / STRIPE_COUNT)
  }

  fn halo(key: IVec3) -> [IVec3; 27] {
    let mut out = [IVec3::ZERO; 27];
    let mut i = 0;
    for dx in -1..=1 {
      for dy in -1..=1 {
        for dz in -1..=1 {
          out[i] = key + IVec3::new(dx, dy, dz);
          i += 1;
        }
      }
    }
    out
  }

  fn with_slot<R>(&self, key: IVec3, f: impl FnOnce(&mut CellBag) -> R) -> Option<R> {
    if !self.covers(key) {
      debug_assert!(false, "spatial index access out of bounds; Ensure was not called to cover this point");
      return None;
    }
    let flat = Self::flatten(self.dims, key - self.origin);
    let (stripe, slot) = Self::stripe_and_slot(flat);
    let mut guard = self.stripes[stripe].lock();
    Some(f(&mut guard[slot]))
  }

  /// Insert `id` into every grid cell in the 3x3x3 halo around `point`'s key.
  pub fn add(&self, point: Vec3, id: u32) {
    let key = self.key_for_point(point);
    for cell in Self::halo(key) {
      self.with_slot(cell, |bag| {
        if !bag.contains(&id) {
          bag.push(id);
        }
      });
    }
  }

  /// Remove `id` from every grid cell in the 3x3x3 halo around `point`'s key.
  pub fn remove(&self, point: Vec3, id: u32) {
    let key = self.key_for_point(point);
    for cell in Self::halo(key) {
      self.with_slot(cell, |bag| {
        if let Some(pos) = bag.iter().position(|&v| v == id) {
          bag.swap_remove(pos);
        }
      });
    }
  }

  /// Move `id` from the halo of `p0` to the halo of `p1` via symmetric
  /// difference. Returns `true` if any cells actually changed (the two
  /// points hash to different grid keys).
  pub fn update(&self, p0: Vec3, p1: Vec3, id: u32) -> bool {
    let k0 = self.key_for_point(p0);
    let k1 = self.key_for_point(p1);
    if k0 == k1 {
      return false;
    }
    let old_halo = Self::halo(k0);
    let new_halo = Self::halo(k1);
    for cell in old_halo {
      if !new_halo.contains(&cell) {
        self.with_slot(cell, |bag| {
          if let Some(pos) = bag.iter().position(|&v| v == id) {
            bag.swap_remove(pos);
          }
        });
      }
    }
    for cell in new_halo {
      if !old_halo.contains(&cell) {
        self.with_slot(cell, |bag| {
          if !bag.contains(&id) {
            bag.push(id);
          }
        });
      }
    }
    true
  }

  /// All ids registered to `point`'s own grid cell - a superset of every id
  /// within `radius_of_influence` of `point`.
  pub fn nearby(&self, point: Vec3) -> CellBag {
    let key = self.key_for_point(point);
    self
      .with_slot(key, |bag| bag.clone())
      .unwrap_or_default()
  }
}

#[cfg(test)]
#[path = "spatial_index_test.rs"]
mod spatial_index_test;
