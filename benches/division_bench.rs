//! Division benchmarks across a few mesh sizes.
//!
//! The division operator itself is crate-private (it mutates `Cells` and
//! `SpatialIndex` invariants that only `Driver` is trusted to hold together),
//! so this benchmarks it through `Driver::step(true)` with a near-zero
//! `split_threshold`: every alive cell saturates and divides on every call,
//! which isolates the division-heavy path from the seeding-only force step.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cellular_forms::sphere::sphere_triangles;
use cellular_forms::{Driver, GrowthConfig};

fn rig(detail: u32) -> Driver {
  let seed = sphere_triangles(detail);
  let config = GrowthConfig::default()
    .with_split_threshold(1e-4)
    .with_rng_seed(42);
  let mut driver = Driver::new(&seed, config).unwrap();
  driver.seed(2).unwrap();
  driver
}

fn division_benchmark(c: &mut Criterion) {
  let mut group = c.benchmark_group("division");

  for detail in [1u32, 2] {
    group.bench_with_input(
      BenchmarkId::from_parameter(format!("detail{detail}")),
      &detail,
      |b, &detail| {
        b.iter_batched(
          || rig(detail),
          |mut driver| {
            driver.step(black_box(true)).unwrap();
            black_box(driver.cells().len());
          },
          criterion::BatchSize::SmallInput,
        );
      },
    );
  }

  group.finish();
}

criterion_group!(benches, division_benchmark);
criterion_main!(benches);
