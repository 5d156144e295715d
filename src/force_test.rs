use super::*;
use crate::sphere::sphere_triangles;

fn rig(detail: u32, cell_size: f32) -> (Cells, SpatialIndex, rayon::ThreadPool) {
  let triangles = sphere_triangles(detail);
  let cells = Cells::from_triangles(&triangles).unwrap();
  let mut index = SpatialIndex::new(cell_size);
  let aabb = cells.bounds();
  index.ensure(aabb.min, aabb.max);
  for (i, p) in cells.positions().iter().enumerate() {
    index.add(*p, i as u32);
  }
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(2)
    .build()
    .unwrap();
  (cells, index, pool)
}

#[test]
fn zero_factors_leave_positions_and_normals_unchanged() {
  // Scenario S2.
  let (mut cells, index, pool) = rig(1, 2.0);
  let config = GrowthConfig::new()
    .with_spring_factor(0.0)
    .with_planar_factor(0.0)
    .with_bulge_factor(0.0)
    .with_repulsion_factor(0.0);

  let original_positions = cells.positions().to_vec();
  let original_normals = cells.normals().to_vec();

  for _ in 0..100 {
    step(&mut cells, &index, &config, &pool);
  }

  for (got, want) in cells.positions().iter().zip(&original_positions) {
    assert!(got.distance(*want) < 1e-4, "{got:?} vs {want:?}");
  }
  for (got, want) in cells.normals().iter().zip(&original_normals) {
    assert!(got.distance(*want) < 1e-4, "{got:?} vs {want:?}");
  }
}

#[test]
fn spring_only_pulls_edges_toward_rest_length() {
  // Scenario S3.
  let (mut cells, index, pool) = rig(1, 2.0);
  let config = GrowthConfig::new()
    .with_spring_factor(0.5)
    .with_planar_factor(0.0)
    .with_bulge_factor(0.0)
    .with_repulsion_factor(0.0)
    .with_link_rest_length(1.0);

  for _ in 0..100 {
    step(&mut cells, &index, &config, &pool);
  }

  for i in 0..cells.len() {
    for &j in &cells.links()[i] {
      if (i as u32) < j {
        let d = cells.positions()[i].distance(cells.positions()[j as usize]);
        assert!(
          (d - 1.0).abs() / 1.0 < 0.05,
          "edge {i}-{j} length {d} not within 5% of rest length"
        );
      }
    }
  }
}

#[test]
fn force_step_is_deterministic_given_identical_inputs() {
  let (mut a, index_a, pool_a) = rig(1, 2.0);
  let (mut b, index_b, pool_b) = rig(1, 2.0);
  let config = GrowthConfig::default();

  for _ in 0..10 {
    step(&mut a, &index_a, &config, &pool_a);
    step(&mut b, &index_b, &config, &pool_b);
  }

  for (pa, pb) in a.positions().iter().zip(b.positions()) {
    assert!(pa.distance(*pb) < 1e-5);
  }
}

#[test]
fn recenter_keeps_mean_delta_near_zero() {
  let (mut cells, index, pool) = rig(1, 2.0);
  let config = GrowthConfig::default();

  let before: Vec<Vec3> = cells.positions().to_vec();
  step(&mut cells, &index, &config, &pool);

  let mut sum = Vec3::ZERO;
  for (after, before) in cells.positions().iter().zip(&before) {
    sum += *after - *before;
  }
  let mean = sum / cells.len() as f32;
  assert!(mean.length() < 1e-3);
}
