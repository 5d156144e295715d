//! Division operator: splits a saturated cell into a parent/child pair,
//! rewriting the local ring and the spatial index so the mesh remains a
//! valid triangulation.

use glam::Vec3;

use crate::cells::{ring_normal, Cells};
use crate::error::GrowthError;
use crate::spatial_index::SpatialIndex;

/// Split `parent` into itself and a freshly appended child cell.
///
/// `n = links[parent].len()` must be at least 4 - there is no opposite-pair
/// hinge on a degree-3 ring. This can only happen if an upstream invariant
/// was already broken, since division itself never produces a ring smaller
/// than 4 and the mesh starts with a minimum degree of 5 (icosahedron).
pub(crate) fn divide(
  cells: &mut Cells,
  index: &SpatialIndex,
  parent: u32,
) -> Result<(), GrowthError> {
  let ring = cells.links[parent as usize].clone();
  let n = ring.len();
  if n < 4 {
    return Err(GrowthError::invariant(
      "division",
      "cannot split a ring with fewer than 4 links",
    ));
  }

  let half = n / 2;
  let mut i0 = 0usize;
  let mut best = f32::INFINITY;
  for i in 0..n {
    let opposite = (i + half) % n;
    let d = cells.positions[ring[i] as usize].distance(cells.positions[ring[opposite] as usize]);
    if d < best {
      best = d;
      i0 = i;
    }
  }
  let i1 = i0 + half;

  let hinge_a = ring[i0 % n];
  let hinge_b = ring[i1 % n];
  let child_id = cells.positions.len() as u32;

  let mut parent_ring: Vec<u32> = (i0..=i1).map(|k| ring[k % n]).collect();
  let mut child_ring: Vec<u32> = (i1..=(i0 + n)).map(|k| ring[k % n]).collect();
  parent_ring.push(child_id);
  child_ring.push(parent);

  // Strictly-child-side neighbors (between the hinges, exclusive of both):
  // their entry for `parent` now points at the child instead.
  for k in (i1 + 1)..(i0 + n) {
    let neighbor = ring[k % n];
    let neighbor_ring = &mut cells.links[neighbor as usize];
    if let Some(pos) = neighbor_ring.iter().position(|&x| x == parent) {
      neighbor_ring[pos] = child_id;
    }
  }

  // Hinge neighbors keep `parent` and additionally gain `child`, adjacent to
  // it, so the two new seam triangles close correctly.
  {
    let a_ring = &mut cells.links[hinge_a as usize];
    if let Some(pos) = a_ring.iter().position(|&x| x == parent) {
      a_ring.insert(pos + 1, child_id);
    }
  }
  {
    let b_ring = &mut cells.links[hinge_b as usize];
    if let Some(pos) = b_ring.iter().position(|&x| x == parent) {
      b_ring.insert(pos, child_id);
    }
  }

  let old_position = cells.positions[parent as usize];
  let old_normal = cells.normals[parent as usize];

  cells.push_cell(old_position, old_normal, child_ring.clone());

  let parent_ring_positions: Vec<Vec3> = parent_ring
    .iter()
    .map(|&id| cells.positions[id as usize])
    .collect();
  let child_ring_positions: Vec<Vec3> = child_ring
    .iter()
    .map(|&id| cells.positions[id as usize])
    .collect();

  let new_parent_position = centroid_with_self(old_position, &parent_ring_positions);
  let new_child_position = centroid_with_self(old_position, &child_ring_positions);
  let new_parent_normal = ring_normal(new_parent_position, &parent_ring_positions, old_normal);
  let new_child_normal = ring_normal(new_child_position, &child_ring_positions, old_normal);

  cells.links[parent as usize] = parent_ring;
  cells.positions[parent as usize] = new_parent_position;
  cells.normals[parent as usize] = new_parent_normal;
  cells.positions[child_id as usize] = new_child_position;
  cells.normals[child_id as usize] = new_child_normal;
  cells.food[parent as usize] = 0.0;

  index.update(old_position, new_parent_position, parent);
  index.add(new_child_position, child_id);

  Ok(())
}

/// Centroid of `self_position` and every position in `ring`.
fn centroid_with_self(self_position: Vec3, ring: &[Vec3]) -> Vec3 {
  let sum = ring.iter().fold(self_position, |acc, p| acc + *p);
  sum / (ring.len() as f32 + 1.0)
}

#[cfg(test)]
#[path = "division_test.rs"]
mod division_test;
