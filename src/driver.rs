//! Driver loop: owns the worker pool and the spatial index, and ties the
//! force step and division operator together into a single `step`.

use glam::Vec3;
use tracing::{debug, info};

use crate::cells::Cells;
use crate::config::GrowthConfig;
use crate::error::GrowthError;
use crate::force;
use crate::metrics;
use crate::spatial_index::SpatialIndex;
use crate::vector::{deterministic_unit_sample, thread_unit_sample};

/// Growth session: the cell store plus the owned spatial index and worker
/// pool that every iteration needs.
pub struct Driver {
  cells: Cells,
  index: SpatialIndex,
  pool: rayon::ThreadPool,
  config: GrowthConfig,
  iteration: u64,
}

impl Driver {
  /// Build a driver from a seed triangle set and a validated configuration.
  pub fn new(seed_triangles: &[crate::triangle::Triangle], config: GrowthConfig) -> Result<Self, GrowthError> {
    config.validate()?;
    let cells = Cells::from_triangles(seed_triangles)?;
    let mut index = SpatialIndex::new(config.index_cell_size());
    let aabb = cells.bounds();
    let pad = 10.0 * config.link_rest_length.max(config.radius_of_influence);
    index.ensure(aabb.min - Vec3::splat(pad), aabb.max + Vec3::splat(pad));

    for (i, p) in cells.positions().iter().enumerate() {
      index.add(*p, i as u32);
    }

    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(config.worker_count)
      .build()
      .map_err(|e| GrowthError::InvalidConfig(format!("failed to build worker pool: {e}")))?;

    Ok(Self {
      cells,
      index,
      pool,
      config,
      iteration: 0,
    })
  }

  pub fn cells(&self) -> &Cells {
    &self.cells
  }

  pub fn config(&self) -> &GrowthConfig {
    &self.config
  }

  pub fn iteration(&self) -> u64 {
    self.iteration
  }

  /// Run one full iteration: extend and ensure
  /// the spatial index, force step, recenter, index rewrite, commit, and -
  /// when `split` is true - food accrual and division.
  pub fn step(&mut self, split: bool) -> Result<(), GrowthError> {
    let aabb = self.cells.bounds();
    let pad = 10.0 * self.config.link_rest_length.max(self.config.radius_of_influence);
    let before_dims = self.index.dims_snapshot();
    self.index.ensure(aabb.min - Vec3::splat(pad), aabb.max + Vec3::splat(pad));
    if self.index.dims_snapshot() != before_dims {
      metrics::record_index_regrowth();
      debug!(iteration = self.iteration, "spatial index regrown");
    }

    force::step(&mut self.cells, &self.index, &self.config, &self.pool);

    let divisions = if split {
      self.accrue_food_and_divide()?
    } else {
      0
    };

    metrics::record_iteration();
    metrics::record_divisions(divisions as u64);
    self.iteration += 1;

    if divisions > 0 {
      info!(
        iteration = self.iteration,
        divisions,
        cells = self.cells.len(),
        "growth iteration complete"
      );
    }

    Ok(())
  }

  /// Run `count` seeding iterations with division disabled, letting the
  /// initial icosphere relax before growth begins.
  pub fn seed(&mut self, count: u32) -> Result<(), GrowthError> {
    for _ in 0..count {
      self.step(false)?;
    }
    Ok(())
  }

  /// Food accrual + division. Every alive cell's food is
  /// incremented by a uniform `[0, 1)` sample; any cell whose food then
  /// exceeds `split_threshold` divides, in ascending id order. New cells
  /// appended mid-scan are never themselves divided in the same pass, since
  /// the loop bound is captured before any division runs.
  fn accrue_food_and_divide(&mut self) -> Result<u32, GrowthError> {
    let n = self.cells.len();
    let mut saturated = Vec::new();
    for i in 0..n {
      if !self.cells.is_alive(i as u32) {
        continue;
      }
      let sample = match self.config.rng_seed {
        Some(seed) => deterministic_unit_sample(seed, i as u32, self.iteration),
        None => thread_unit_sample(),
      };
      self.cells.food[i] += sample;
      if self.cells.food[i] > self.config.split_threshold {
        saturated.push(i as u32);
      }
    }

    for parent in saturated.iter().copied() {
      crate::division::divide(&mut self.cells, &self.index, parent)?;
    }
    Ok(saturated.len() as u32)
  }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;
