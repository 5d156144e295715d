//! Icosphere seeder.
//!
//! Generates the initial closed triangle set by recursively subdividing an
//! icosahedron. Each new midpoint is projected back onto the unit sphere.

use glam::Vec3;

use crate::triangle::Triangle;

/// The 20 faces of a regular icosahedron with unit circumradius.
pub fn icosahedron_triangles() -> Vec<Triangle> {
  const A: f32 = 0.8506507174597755;
  const B: f32 = 0.5257312591858783;

  let vertices = [
    Vec3::new(-A, -B, 0.0),
    Vec3::new(-A, B, 0.0),
    Vec3::new(-B, 0.0, -A),
    Vec3::new(-B, 0.0, A),
    Vec3::new(0.0, -A, -B),
    Vec3::new(0.0, -A, B),
    Vec3::new(0.0, A, -B),
    Vec3::new(0.0, A, B),
    Vec3::new(B, 0.0, -A),
    Vec3::new(B, 0.0, A),
    Vec3::new(A, -B, 0.0),
    Vec3::new(A, B, 0.0),
  ];

  const INDICES: [[usize; 3]; 20] = [
    [0, 3, 1],
    [1, 3, 7],
    [2, 0, 1],
    [2, 1, 6],
    [4, 0, 2],
    [4, 5, 0],
    [5, 3, 0],
    [6, 1, 7],
    [6, 7, 11],
    [7, 3, 9],
    [8, 2, 6],
    [8, 4, 2],
    [8, 6, 11],
    [8, 10, 4],
    [8, 11, 10],
    [9, 3, 5],
    [10, 5, 4],
    [10, 9, 5],
    [11, 7, 9],
    [11, 9, 10],
  ];

  INDICES
    .iter()
    .map(|i| Triangle::new(vertices[i[0]], vertices[i[1]], vertices[i[2]]))
    .collect()
}

/// Recursively subdivide the icosahedron `detail` times, projecting every new
/// midpoint back onto the unit sphere. `detail = 1` yields 80 triangles over
/// 42 unique vertices.
pub fn sphere_triangles(detail: u32) -> Vec<Triangle> {
  let mut triangles = Vec::with_capacity(20 * 4usize.pow(detail));
  for t in icosahedron_triangles() {
    subdivide(detail, t.a(), t.b(), t.c(), &mut triangles);
  }
  triangles
}

fn subdivide(detail: u32, v1: Vec3, v2: Vec3, v3: Vec3, out: &mut Vec<Triangle>) {
  if detail == 0 {
    out.push(Triangle::new(v1, v2, v3));
    return;
  }
  let v12 = ((v1 + v2) * 0.5).normalize();
  let v13 = ((v1 + v3) * 0.5).normalize();
  let v23 = ((v2 + v3) * 0.5).normalize();
  subdivide(detail - 1, v1, v12, v13, out);
  subdivide(detail - 1, v2, v23, v12, out);
  subdivide(detail - 1, v3, v13, v23, out);
  subdivide(detail - 1, v12, v23, v13, out);
}

#[cfg(test)]
#[path = "sphere_test.rs"]
mod sphere_test;
