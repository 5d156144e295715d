//! Mesh / cell store.
//!
//! Parallel arrays indexed by a dense cell id: no pointer graph, all
//! adjacency is by index into these same arrays. Appending a new cell (via
//! division) appends to all five arrays at once.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::GrowthError;
use crate::triangle::Triangle;

/// Axis-aligned bounding box over a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  pub min: Vec3,
  pub max: Vec3,
}

impl Aabb {
  fn empty() -> Self {
    Self {
      min: Vec3::splat(f32::INFINITY),
      max: Vec3::splat(f32::NEG_INFINITY),
    }
  }

  fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }
}

/// The triangulated manifold of cells. Positions, normals, food, alive, and
/// links are index-parallel.
pub struct Cells {
  pub(crate) positions: Vec<Vec3>,
  pub(crate) normals: Vec<Vec3>,
  pub(crate) food: Vec<f32>,
  pub(crate) alive: Vec<bool>,
  pub(crate) links: Vec<Vec<u32>>,

  /// Double-buffer write targets for the force step:
  /// resized to match the live arrays at the start of every iteration, then
  /// swapped into `positions`/`normals` at commit.
  pub(crate) new_positions: Vec<Vec3>,
  pub(crate) new_normals: Vec<Vec3>,
}

/// Hashable bit-pattern key for deduplicating float positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey(u32, u32, u32);

impl From<Vec3> for PointKey {
  fn from(v: Vec3) -> Self {
    Self(v.x.to_bits(), v.y.to_bits(), v.z.to_bits())
  }
}

impl Cells {
  /// Build the initial cell set from a closed triangle set: extract unique vertices, then for each vertex walk its incident
  /// triangles into a single CCW-ordered ring using `Triangle::vertex_after`/
  /// `vertex_before`.
  pub fn from_triangles(triangles: &[Triangle]) -> Result<Self, GrowthError> {
    if triangles.is_empty() {
      return Err(GrowthError::EmptySeed);
    }

    let mut indexes: HashMap<PointKey, u32> = HashMap::new();
    let mut positions: Vec<Vec3> = Vec::new();
    for t in triangles {
      for v in [t.a(), t.b(), t.c()] {
        indexes.entry(v.into()).or_insert_with(|| {
          let id = positions.len() as u32;
          positions.push(v);
          id
        });
      }
    }

    let mut incident: Vec<Vec<Triangle>> = vec![Vec::new(); positions.len()];
    for t in triangles {
      for v in [t.a(), t.b(), t.c()] {
        let id = indexes[&PointKey::from(v)] as usize;
        incident[id].push(*t);
      }
    }

    let mut links = Vec::with_capacity(positions.len());
    for (id, faces) in incident.iter().enumerate() {
      links.push(build_ring(positions[id], faces, &indexes)?);
    }

    let mut normals = Vec::with_capacity(positions.len());
    for (id, position) in positions.iter().enumerate() {
      let ring: Vec<Vec3> = links[id].iter().map(|&n| positions[n as usize]).collect();
      normals.push(ring_normal(*position, &ring, Vec3::Z));
    }

    let food = vec![0.0; positions.len()];
    let alive = vec![true; positions.len()];
    let new_positions = positions.clone();
    let new_normals = normals.clone();

    Ok(Self {
      positions,
      normals,
      food,
      alive,
      links,
      new_positions,
      new_normals,
    })
  }

  /// Grow the double buffers to match the live arrays, ahead of a force
  /// step. Cheap when already sized correctly.
  pub(crate) fn resize_buffers(&mut self) {
    self.new_positions.resize(self.positions.len(), Vec3::ZERO);
    self.new_normals.resize(self.normals.len(), Vec3::ZERO);
  }

  /// Swap the committed arrays with the double buffer.
  pub(crate) fn commit(&mut self) {
    std::mem::swap(&mut self.positions, &mut self.new_positions);
    std::mem::swap(&mut self.normals, &mut self.new_normals);
  }

  /// Append a freshly divided cell; extends every parallel array, including
  /// the double buffers so their length stays in sync.
  pub(crate) fn push_cell(&mut self, position: Vec3, normal: Vec3, links: Vec<u32>) -> u32 {
    let id = self.positions.len() as u32;
    self.positions.push(position);
    self.normals.push(normal);
    self.food.push(0.0);
    self.alive.push(true);
    self.links.push(links);
    self.new_positions.push(position);
    self.new_normals.push(normal);
    id
  }

  pub fn len(&self) -> usize {
    self.positions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  pub fn positions(&self) -> &[Vec3] {
    &self.positions
  }

  pub fn normals(&self) -> &[Vec3] {
    &self.normals
  }

  pub fn food(&self) -> &[f32] {
    &self.food
  }

  pub fn alive(&self) -> &[bool] {
    &self.alive
  }

  pub fn links(&self) -> &[Vec<u32>] {
    &self.links
  }

  pub fn is_alive(&self, id: u32) -> bool {
    self.alive[id as usize]
  }

  /// Axis-aligned bounding box over alive cells.
  pub fn bounds(&self) -> Aabb {
    let mut aabb = Aabb::empty();
    for (i, p) in self.positions.iter().enumerate() {
      if self.alive[i] {
        aabb.encapsulate(*p);
      }
    }
    aabb
  }

  /// Derive the triangle list: for every alive cell `i`,
  /// for every consecutive link pair `(u, v)` with `i < u` and `i < v`,
  /// emit `(i, u, v)` - each face exactly once. Triangles touching a dead
  /// cell are skipped.
  pub fn triangulate(&self) -> Vec<(u32, u32, u32)> {
    let mut out = Vec::new();
    self.for_each_face(|i, u, v| out.push((i, u, v)));
    out
  }

  /// Append one `(u32, u32, u32)` triple per face to `out`.
  pub fn triangle_indexes(&self, out: &mut Vec<(u32, u32, u32)>) {
    self.for_each_face(|i, u, v| out.push((i, u, v)));
  }

  fn for_each_face(&self, mut emit: impl FnMut(u32, u32, u32)) {
    for (i, ring) in self.links.iter().enumerate() {
      let i = i as u32;
      if !self.alive[i as usize] {
        continue;
      }
      let n = ring.len();
      for k in 0..n {
        let u = ring[k];
        let v = ring[(k + 1) % n];
        if i < u && i < v && self.alive[u as usize] && self.alive[v as usize] {
          emit(i, u, v);
        }
      }
    }
  }

  /// Append `7 * n_cells` floats: `(px, py, pz, nx, ny, nz, food /
  /// split_threshold)` per cell, including dead cells (index parity
  /// preserved for the renderer).
  pub fn vertex_attributes(&self, split_threshold: f32, out: &mut Vec<f32>) {
    out.reserve(self.positions.len() * 7);
    for i in 0..self.positions.len() {
      let p = self.positions[i];
      let n = self.normals[i];
      out.push(p.x);
      out.push(p.y);
      out.push(p.z);
      out.push(n.x);
      out.push(n.y);
      out.push(n.z);
      out.push(self.food[i] / split_threshold);
    }
  }
}

/// Sum of unnormalized triangle-ring normals `(P, L_u, L_v)` over consecutive
/// pairs in the CCW ring, normalized; falls back to `fallback` when the ring
/// is degenerate (near-zero accumulated normal).
pub(crate) fn ring_normal(position: Vec3, ring: &[Vec3], fallback: Vec3) -> Vec3 {
  let n = ring.len();
  if n == 0 {
    return fallback;
  }
  let mut sum = Vec3::ZERO;
  for i in 0..n {
    let u = ring[i];
    let v = ring[(i + 1) % n];
    sum += (u - position).cross(v - position);
  }
  sum.try_normalize().unwrap_or(fallback)
}

/// Walk one vertex's incident triangles into a single CCW ring, resolved via
/// the "next-in-ring" rule:
/// starting from an arbitrary incident triangle, repeatedly find the
/// triangle whose `vertex_before(vertex)` matches the last-placed neighbor,
/// appending its `vertex_after(vertex)`, until every incident triangle has
/// been consumed.
fn build_ring(
  vertex: Vec3,
  incident: &[Triangle],
  indexes: &HashMap<PointKey, u32>,
) -> Result<Vec<u32>, GrowthError> {
  if incident.len() < 3 {
    return Err(GrowthError::invariant(
      "seed_mesh",
      "a cell must have at least 3 incident triangles",
    ));
  }

  let mut remaining: Vec<Triangle> = incident.to_vec();
  let first = remaining.remove(0);
  let start = first.vertex_after(vertex)?;
  let mut ring_points = vec![start];
  let mut current = start;

  while !remaining.is_empty() {
    let idx = remaining
      .iter()
      .position(|t| matches!(t.vertex_before(vertex), Ok(v) if v == current))
      .ok_or_else(|| GrowthError::invariant("seed_mesh", "incomplete link ring"))?;
    let t = remaining.remove(idx);
    current = t.vertex_after(vertex)?;
    ring_points.push(current);
  }

  ring_points
    .into_iter()
    .map(|p| {
      indexes
        .get(&PointKey::from(p))
        .copied()
        .ok_or_else(|| GrowthError::invariant("seed_mesh", "ring vertex missing from index"))
    })
    .collect()
}

#[cfg(test)]
#[path = "cells_test.rs"]
mod cells_test;
