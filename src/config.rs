//! Growth engine configuration.

use crate::error::GrowthError;

/// Recognized parameters for the growth engine.
#[derive(Clone, Debug)]
pub struct GrowthConfig {
  /// Food level above which a cell divides. Larger -> fewer, larger cells.
  pub split_threshold: f32,

  /// Preferred edge length. Sets the scale of the mesh.
  pub link_rest_length: f32,

  /// Non-linked repulsion radius; also drives the spatial index cell size.
  pub radius_of_influence: f32,

  /// Weight of the repulsion term per iteration (typical 0.0-0.5).
  pub repulsion_factor: f32,

  /// Weight of the edge-spring term.
  pub spring_factor: f32,

  /// Weight of the ring-centroid attraction term.
  pub planar_factor: f32,

  /// Weight of the normal-direction bulge term.
  pub bulge_factor: f32,

  /// Worker pool size. Defaults to the number of available hardware threads.
  pub worker_count: usize,

  /// Force-only iterations run before division is enabled.
  pub seed_iterations: u32,

  /// When set, food accrual is seeded deterministically per cell id instead
  /// of from a per-thread clock seed, making division timing reproducible.
  pub rng_seed: Option<u64>,
}

impl Default for GrowthConfig {
  fn default() -> Self {
    Self {
      split_threshold: 1000.0,
      link_rest_length: 1.0,
      radius_of_influence: 1.5,
      repulsion_factor: 0.2,
      spring_factor: 0.4,
      planar_factor: 0.4,
      bulge_factor: 0.2,
      worker_count: rayon::current_num_threads(),
      seed_iterations: 100,
      rng_seed: None,
    }
  }
}

impl GrowthConfig {
  /// Create a default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_split_threshold(mut self, value: f32) -> Self {
    self.split_threshold = value;
    self
  }

  pub fn with_link_rest_length(mut self, value: f32) -> Self {
    self.link_rest_length = value;
    self
  }

  pub fn with_radius_of_influence(mut self, value: f32) -> Self {
    self.radius_of_influence = value;
    self
  }

  pub fn with_repulsion_factor(mut self, value: f32) -> Self {
    self.repulsion_factor = value;
    self
  }

  pub fn with_spring_factor(mut self, value: f32) -> Self {
    self.spring_factor = value;
    self
  }

  pub fn with_planar_factor(mut self, value: f32) -> Self {
    self.planar_factor = value;
    self
  }

  pub fn with_bulge_factor(mut self, value: f32) -> Self {
    self.bulge_factor = value;
    self
  }

  pub fn with_worker_count(mut self, value: usize) -> Self {
    self.worker_count = value;
    self
  }

  pub fn with_seed_iterations(mut self, value: u32) -> Self {
    self.seed_iterations = value;
    self
  }

  pub fn with_rng_seed(mut self, value: u64) -> Self {
    self.rng_seed = Some(value);
    self
  }

  /// Side length of a spatial index grid cell: `1.2 * radius_of_influence`.
  pub fn index_cell_size(&self) -> f32 {
    1.2 * self.radius_of_influence
  }

  /// Validate the configuration, rejecting non-positive scale parameters and
  /// a zero-size worker pool.
  pub fn validate(&self) -> Result<(), GrowthError> {
    if self.link_rest_length <= 0.0 {
      return Err(GrowthError::InvalidConfig(
        "link_rest_length must be positive".into(),
      ));
    }
    if self.radius_of_influence <= 0.0 {
      return Err(GrowthError::InvalidConfig(
        "radius_of_influence must be positive".into(),
      ));
    }
    if self.split_threshold <= 0.0 {
      return Err(GrowthError::InvalidConfig(
        "split_threshold must be positive".into(),
      ));
    }
    if self.worker_count == 0 {
      return Err(GrowthError::InvalidConfig(
        "worker_count must be at least 1".into(),
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
