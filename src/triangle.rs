//! A single face, used only by the icosphere seeder to build the initial
//! link rings. The mesh itself never stores triangles - they are always
//! derived from [`crate::cells::Cells::triangulate`].

use glam::Vec3;

use crate::error::GrowthError;

/// A single triangular face with CCW-wound vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  a: Vec3,
  b: Vec3,
  c: Vec3,
}

impl Triangle {
  pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
    Self { a, b, c }
  }

  pub fn a(&self) -> Vec3 {
    self.a
  }

  pub fn b(&self) -> Vec3 {
    self.b
  }

  pub fn c(&self) -> Vec3 {
    self.c
  }

  /// Unnormalized-then-normalized face normal via the cross product of two
  /// edges, CCW-wound.
  pub fn normal(&self) -> Vec3 {
    (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
  }

  /// The vertex that follows `point` in CCW winding order.
  pub fn vertex_after(&self, point: Vec3) -> Result<Vec3, GrowthError> {
    if point == self.a {
      Ok(self.b)
    } else if point == self.b {
      Ok(self.c)
    } else if point == self.c {
      Ok(self.a)
    } else {
      Err(GrowthError::invariant(
        "triangle",
        "point not found in vertex_after",
      ))
    }
  }

  /// The vertex that precedes `point` in CCW winding order.
  pub fn vertex_before(&self, point: Vec3) -> Result<Vec3, GrowthError> {
    if point == self.a {
      Ok(self.c)
    } else if point == self.b {
      Ok(self.a)
    } else if point == self.c {
      Ok(self.b)
    } else {
      Err(GrowthError::invariant(
        "triangle",
        "point not found in vertex_before",
      ))
    }
  }

  /// True if `point` is one of this triangle's three vertices.
  pub fn contains(&self, point: Vec3) -> bool {
    point == self.a || point == self.b || point == self.c
  }
}

#[cfg(test)]
#[path = "triangle_test.rs"]
mod triangle_test;
