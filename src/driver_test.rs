use super::*;
use crate::sphere::sphere_triangles;
use serial_test::serial;

fn small_driver(config: GrowthConfig) -> Driver {
  let triangles = sphere_triangles(1);
  Driver::new(&triangles, config).unwrap()
}

#[test]
fn new_rejects_empty_seed() {
  let err = Driver::new(&[], GrowthConfig::default()).unwrap_err();
  assert!(matches!(err, GrowthError::EmptySeed));
}

#[test]
fn new_rejects_invalid_config() {
  let triangles = sphere_triangles(0);
  let err = Driver::new(&triangles, GrowthConfig::default().with_link_rest_length(0.0)).unwrap_err();
  assert!(matches!(err, GrowthError::InvalidConfig(_)));
}

#[test]
fn icosphere_seed_has_42_cells_and_80_faces() {
  // Scenario S1.
  let driver = small_driver(GrowthConfig::default());
  assert_eq!(driver.cells().len(), 42);
  assert_eq!(driver.cells().triangulate().len(), 80);
  let degree_5 = driver.cells().links().iter().filter(|r| r.len() == 5).count();
  let degree_6 = driver.cells().links().iter().filter(|r| r.len() == 6).count();
  assert_eq!(degree_5, 12);
  assert_eq!(degree_6, 30);
}

#[test]
#[serial(metrics_counters)]
fn seed_phase_disables_division() {
  let mut driver = small_driver(
    GrowthConfig::default()
      .with_split_threshold(0.001)
      .with_rng_seed(7),
  );
  let before = driver.cells().len();
  driver.seed(20).unwrap();
  assert_eq!(driver.cells().len(), before, "no division during seeding");
  assert_eq!(driver.iteration(), 20);
}

#[test]
#[serial(metrics_counters)]
fn step_with_split_grows_cell_count_with_low_threshold() {
  let mut driver = small_driver(
    GrowthConfig::default()
      .with_split_threshold(0.001)
      .with_rng_seed(11),
  );
  let before = driver.cells().len();
  for _ in 0..5 {
    driver.step(true).unwrap();
  }
  assert!(driver.cells().len() > before, "saturated cells should divide");
}

#[test]
#[serial(metrics_counters)]
fn face_count_matches_euler_formula_as_the_mesh_grows() {
  let mut driver = small_driver(
    GrowthConfig::default()
      .with_split_threshold(0.001)
      .with_rng_seed(13),
  );
  for _ in 0..10 {
    driver.step(true).unwrap();
    let v = driver.cells().len();
    let f = driver.cells().triangulate().len();
    assert_eq!(f, 2 * v - 4, "closed triangulated sphere: F = 2V - 4");
  }
}

#[test]
#[serial(metrics_counters)]
fn deterministic_seed_reproduces_identical_growth() {
  let mut a = small_driver(GrowthConfig::default().with_split_threshold(0.001).with_rng_seed(42));
  let mut b = small_driver(GrowthConfig::default().with_split_threshold(0.001).with_rng_seed(42));

  for _ in 0..8 {
    a.step(true).unwrap();
    b.step(true).unwrap();
  }

  assert_eq!(a.cells().len(), b.cells().len());
  for (pa, pb) in a.cells().positions().iter().zip(b.cells().positions()) {
    assert!(pa.distance(*pb) < 1e-4);
  }
}
