//! cellular_forms - a growth engine for triangulated-manifold cellular forms.
//!
//! Simulates the growth of a closed triangulated surface whose vertices
//! ("cells") move under local spring/planar/bulge/repulsion rules,
//! accumulate a scalar "food" quantity, and mitotically divide when
//! saturated - so the mesh grows in vertex count while preserving manifold
//! topology.
//!
//! The core subsystems are the mesh/cell store ([`cells`]), the spatial
//! hash used to make short-range repulsion tractable ([`spatial_index`]),
//! the per-iteration force step ([`force`]), and the cell-division operator
//! ([`division`]). [`driver::Driver`] ties them together into a runnable
//! growth loop.
//!
//! # Example
//!
//! ```
//! use cellular_forms::{Driver, GrowthConfig, sphere_triangles};
//!
//! let seed = sphere_triangles(1);
//! let config = GrowthConfig::default();
//! let mut driver = Driver::new(&seed, config).expect("valid seed and config");
//!
//! driver.seed(5).expect("seeding iterations do not divide");
//! driver.step(true).expect("iteration completes");
//! ```

pub mod cells;
pub mod config;
pub mod division;
pub mod driver;
pub mod error;
pub mod force;
pub mod metrics;
pub mod spatial_index;
pub mod sphere;
pub mod stl;
pub mod triangle;
pub mod vector;

pub use cells::{Aabb, Cells};
pub use config::GrowthConfig;
pub use driver::Driver;
pub use error::GrowthError;
pub use spatial_index::SpatialIndex;
pub use sphere::{icosahedron_triangles, sphere_triangles};
pub use stl::write_binary_stl;
pub use triangle::Triangle;
