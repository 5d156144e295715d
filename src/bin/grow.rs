//! CLI entry point: runs the growth engine for a fixed iteration count and
//! writes periodic binary STL snapshots.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use cellular_forms::{sphere_triangles, write_binary_stl, Driver, GrowthConfig};

/// Grow a cellular form and write binary STL snapshots.
#[derive(Parser, Debug)]
#[command(name = "grow", version, about = "Cellular-forms growth engine CLI")]
struct Args {
  /// Number of growth iterations to run after seeding.
  #[arg(long, default_value_t = 2000)]
  iterations: u32,

  /// Force-only iterations run before division is enabled.
  #[arg(long)]
  seed_iterations: Option<u32>,

  /// Worker pool size. Defaults to the number of available hardware threads.
  #[arg(long)]
  workers: Option<usize>,

  /// Directory to write periodic STL snapshots into.
  #[arg(long, default_value = "out")]
  out_dir: PathBuf,

  /// Write a snapshot every N iterations.
  #[arg(long, default_value_t = 100)]
  snapshot_every: u32,

  /// Optional TOML config file overriding the recognized growth parameters.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Optional deterministic seed for food-accrual RNG.
  #[arg(long)]
  rng_seed: Option<u64>,

  /// Icosphere subdivision detail for the seed mesh.
  #[arg(long, default_value_t = 1)]
  detail: u32,

  /// Write logs to `grow.log` in addition to stderr.
  #[arg(long)]
  log_file: bool,
}

/// On-disk representation of the recognized parameter table, loaded via `toml` + `serde`. The in-memory engine's own
/// [`GrowthConfig`] is never serde-derived - only this CLI-facing mirror is.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
  split_threshold: Option<f32>,
  link_rest_length: Option<f32>,
  radius_of_influence: Option<f32>,
  repulsion_factor: Option<f32>,
  spring_factor: Option<f32>,
  planar_factor: Option<f32>,
  bulge_factor: Option<f32>,
}

impl ConfigFile {
  fn apply(self, mut config: GrowthConfig) -> GrowthConfig {
    if let Some(v) = self.split_threshold {
      config = config.with_split_threshold(v);
    }
    if let Some(v) = self.link_rest_length {
      config = config.with_link_rest_length(v);
    }
    if let Some(v) = self.radius_of_influence {
      config = config.with_radius_of_influence(v);
    }
    if let Some(v) = self.repulsion_factor {
      config = config.with_repulsion_factor(v);
    }
    if let Some(v) = self.spring_factor {
      config = config.with_spring_factor(v);
    }
    if let Some(v) = self.planar_factor {
      config = config.with_planar_factor(v);
    }
    if let Some(v) = self.bulge_factor {
      config = config.with_bulge_factor(v);
    }
    config
  }
}

fn configure_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
  let env_filter = tracing_subscriber::EnvFilter::from_default_env();
  if args.log_file {
    let file_appender = tracing_appender::rolling::never(".", "grow.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let _ = tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_writer(nb_writer)
      .try_init();
    Some(guard)
  } else {
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    None
  }
}

fn main() -> Result<()> {
  let args = Args::parse();
  let _log_guard = configure_logging(&args);

  if let Err(err) = run(args) {
    tracing::error!(error = %err, "growth run failed");
    return Err(err);
  }
  Ok(())
}

fn run(args: Args) -> Result<()> {
  let mut config = GrowthConfig::new();
  if let Some(path) = &args.config {
    let text = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&text)
      .with_context(|| format!("parsing config file {}", path.display()))?;
    config = file.apply(config);
  }
  if let Some(workers) = args.workers {
    config = config.with_worker_count(workers);
  }
  let seed_iterations = args.seed_iterations.unwrap_or(config.seed_iterations);
  config = config.with_seed_iterations(seed_iterations);
  if let Some(seed) = args.rng_seed {
    config = config.with_rng_seed(seed);
  }

  let seed_triangles = sphere_triangles(args.detail);
  info!(
    seed_cells = seed_triangles.len() / 2 + 2,
    workers = config.worker_count,
    "starting growth run"
  );

  let mut driver = Driver::new(&seed_triangles, config)?;

  std::fs::create_dir_all(&args.out_dir)
    .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;

  driver.seed(seed_iterations)?;
  info!(iteration = driver.iteration(), cells = driver.cells().len(), "seeding complete");

  for i in 1..=args.iterations {
    driver.step(true)?;
    if i % args.snapshot_every == 0 || i == args.iterations {
      write_snapshot(&driver, &args.out_dir, i)?;
    }
  }

  info!(cells = driver.cells().len(), "growth run complete");
  Ok(())
}

fn write_snapshot(driver: &Driver, out_dir: &std::path::Path, iteration: u32) -> Result<()> {
  let cells = driver.cells();
  let triangles: Vec<_> = cells
    .triangulate()
    .into_iter()
    .map(|(a, b, c)| {
      (
        cells.positions()[a as usize],
        cells.positions()[b as usize],
        cells.positions()[c as usize],
      )
    })
    .collect();

  let path = out_dir.join(format!("iteration_{iteration:06}.stl"));
  let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
  let mut writer = BufWriter::new(file);
  write_binary_stl(&mut writer, &triangles)
    .with_context(|| format!("writing STL to {}", path.display()))?;
  info!(path = %path.display(), cells = cells.len(), triangles = triangles.len(), "snapshot written");
  Ok(())
}
