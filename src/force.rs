//! Force step: the per-iteration kernel that repositions
//! every cell under spring/planar/bulge/repulsion terms, plus the
//! surrounding double-buffer, recenter, and index-rewrite phases.

use glam::Vec3;
use rayon::prelude::*;

use crate::cells::{ring_normal, Cells};
use crate::config::GrowthConfig;
use crate::spatial_index::SpatialIndex;

/// Run one full force step: resize the double buffer, dispatch the parallel
/// force kernel, recenter, dispatch the parallel index rewrite, then commit.
/// Division is the caller's responsibility.
pub fn step(
  cells: &mut Cells,
  index: &SpatialIndex,
  config: &GrowthConfig,
  pool: &rayon::ThreadPool,
) {
  cells.resize_buffers();

  run_force_phase(
    &cells.positions,
    &cells.normals,
    &cells.links,
    &cells.alive,
    index,
    config,
    &mut cells.new_positions,
    &mut cells.new_normals,
    pool,
  );

  recenter(&cells.positions, &mut cells.new_positions, &cells.alive);

  update_index_phase(index, &cells.positions, &cells.new_positions, &cells.alive, pool);

  cells.commit();
}

/// Dispatch the per-cell kernel across the pool. Each worker reads only the
/// stable input arrays and writes its own disjoint slot of the output
/// buffers; `rayon`'s parallel iterator over the output slices gives this
/// disjoint-write guarantee directly; in place of a manual stride partition,
/// work-stealing still assigns each index to exactly one worker.
#[allow(clippy::too_many_arguments)]
fn run_force_phase(
  positions: &[Vec3],
  normals: &[Vec3],
  links: &[Vec<u32>],
  alive: &[bool],
  index: &SpatialIndex,
  config: &GrowthConfig,
  new_positions: &mut [Vec3],
  new_normals: &mut [Vec3],
  pool: &rayon::ThreadPool,
) {
  pool.install(|| {
    new_positions
      .par_iter_mut()
      .zip(new_normals.par_iter_mut())
      .enumerate()
      .for_each(|(i, (new_p, new_n))| {
        if !alive[i] {
          *new_p = positions[i];
          *new_n = normals[i];
          return;
        }
        let (p, n) = force_kernel(i as u32, positions, normals, links, index, config);
        *new_p = p;
        *new_n = n;
      });
  });
}

/// The per-cell kernel. Returns the updated
/// position and normal for cell `i`; does not mutate anything.
fn force_kernel(
  i: u32,
  positions: &[Vec3],
  normals: &[Vec3],
  links: &[Vec<u32>],
  index: &SpatialIndex,
  config: &GrowthConfig,
) -> (Vec3, Vec3) {
  let p = positions[i as usize];
  let n = normals[i as usize];
  let ring = &links[i as usize];
  let degree = ring.len() as f32;
  let roi = config.radius_of_influence;
  let rest = config.link_rest_length;

  let mut spring_sum = Vec3::ZERO;
  let mut planar_sum = Vec3::ZERO;
  let mut bulge_sum = 0.0f32;
  let mut repulsion = Vec3::ZERO;

  for &j in ring {
    let lj = positions[j as usize];
    let d = lj - p;
    let dist = d.length();
    let dir = if dist > 1e-8 { d / dist } else { Vec3::ZERO };

    spring_sum += lj - dir * rest;
    planar_sum += lj;

    if dist < rest {
      let dn = d.dot(n);
      let radicand = (rest * rest - dist * dist + dn * dn).max(0.0);
      bulge_sum += radicand.sqrt() + dn;
    }

    if dist < roi {
      repulsion += dir * (roi * roi - dist * dist) / (roi * roi);
    }
  }

  let spring_target = spring_sum / degree;
  let planar_target = planar_sum / degree;
  let bulge_distance = bulge_sum / degree;

  for j in index.nearby(p) {
    if j == i {
      continue;
    }
    let pj = positions[j as usize];
    let d = p - pj;
    let dist = d.length();
    if dist < roi && dist > 1e-8 {
      repulsion += (d / dist) * (roi * roi - dist * dist) / (roi * roi);
    }
  }

  let new_p = p
    + config.spring_factor * (spring_target - p)
    + config.planar_factor * (planar_target - p)
    + (config.bulge_factor * bulge_distance) * n
    + config.repulsion_factor * repulsion;

  let ring_positions: Vec<Vec3> = ring.iter().map(|&k| positions[k as usize]).collect();
  let new_n = ring_normal(p, &ring_positions, n);

  (new_p, new_n)
}

/// Subtract the mean position delta over alive cells from every new
/// position. A pure translation, since
/// the force terms are themselves translation-invariant.
fn recenter(positions: &[Vec3], new_positions: &mut [Vec3], alive: &[bool]) {
  let mut sum = Vec3::ZERO;
  let mut count = 0u32;
  for i in 0..positions.len() {
    if alive[i] {
      sum += new_positions[i] - positions[i];
      count += 1;
    }
  }
  if count == 0 {
    return;
  }
  let mean = sum / count as f32;
  for p in new_positions.iter_mut() {
    *p -= mean;
  }
}

/// Dispatch an index update for every alive cell across the pool.
/// Correctness relies only on each id having at most one in-flight update,
/// guaranteed by partitioning over ids.
fn update_index_phase(
  index: &SpatialIndex,
  positions: &[Vec3],
  new_positions: &[Vec3],
  alive: &[bool],
  pool: &rayon::ThreadPool,
) {
  pool.install(|| {
    (0..positions.len()).into_par_iter().for_each(|i| {
      if alive[i] {
        index.update(positions[i], new_positions[i], i as u32);
      }
    });
  });
}

#[cfg(test)]
#[path = "force_test.rs"]
mod force_test;
