//! Binary STL writer.
//!
//! Writes the conventional binary STL layout: an 80-byte header, a
//! little-endian `u32` triangle count, then 50 bytes per triangle (normal,
//! three vertices, a zero attribute-byte-count), via a buffered
//! `std::io::Write`.

use std::io::{self, Write};

use glam::Vec3;

const HEADER_SIZE: usize = 80;

/// Write `triangles` as a binary STL to `writer`. Each triangle is
/// `(A, B, C)`; the per-triangle normal is computed from its own vertices
/// via the same cross-product formula the original's `triangleNormal` uses.
pub fn write_binary_stl<W: Write>(writer: &mut W, triangles: &[(Vec3, Vec3, Vec3)]) -> io::Result<()> {
  let mut header = [0u8; HEADER_SIZE];
  let banner = b"binary STL written by the cellular-forms growth engine";
  header[..banner.len()].copy_from_slice(banner);
  writer.write_all(&header)?;
  writer.write_all(&(triangles.len() as u32).to_le_bytes())?;

  for &(a, b, c) in triangles {
    let normal = (b - a).cross(c - a).normalize_or_zero();
    write_vec3(writer, normal)?;
    write_vec3(writer, a)?;
    write_vec3(writer, b)?;
    write_vec3(writer, c)?;
    writer.write_all(&0u16.to_le_bytes())?;
  }
  Ok(())
}

fn write_vec3<W: Write>(writer: &mut W, v: Vec3) -> io::Result<()> {
  writer.write_all(&v.x.to_le_bytes())?;
  writer.write_all(&v.y.to_le_bytes())?;
  writer.write_all(&v.z.to_le_bytes())?;
  Ok(())
}

#[cfg(test)]
mod stl_test {
  use super::*;

  #[test]
  fn empty_triangle_list_writes_header_and_zero_count() {
    let mut out = Vec::new();
    write_binary_stl(&mut out, &[]).unwrap();
    assert_eq!(out.len(), HEADER_SIZE + 4);
    let count = u32::from_le_bytes(out[HEADER_SIZE..HEADER_SIZE + 4].try_into().unwrap());
    assert_eq!(count, 0);
  }

  #[test]
  fn single_triangle_writes_exactly_50_bytes_after_the_preamble() {
    let triangle = (
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(0.0, 1.0, 0.0),
    );
    let mut out = Vec::new();
    write_binary_stl(&mut out, &[triangle]).unwrap();
    assert_eq!(out.len(), HEADER_SIZE + 4 + 50);

    let count = u32::from_le_bytes(out[HEADER_SIZE..HEADER_SIZE + 4].try_into().unwrap());
    assert_eq!(count, 1);

    let body = &out[HEADER_SIZE + 4..];
    let normal = Vec3::new(
      f32::from_le_bytes(body[0..4].try_into().unwrap()),
      f32::from_le_bytes(body[4..8].try_into().unwrap()),
      f32::from_le_bytes(body[8..12].try_into().unwrap()),
    );
    assert!(normal.distance(Vec3::Z) < 1e-6);

    let attribute_bytes = u16::from_le_bytes(body[48..50].try_into().unwrap());
    assert_eq!(attribute_bytes, 0);
  }

  #[test]
  fn triangle_count_matches_input_len() {
    let triangle = (Vec3::ZERO, Vec3::X, Vec3::Y);
    let mut out = Vec::new();
    write_binary_stl(&mut out, &[triangle, triangle, triangle]).unwrap();
    let count = u32::from_le_bytes(out[HEADER_SIZE..HEADER_SIZE + 4].try_into().unwrap());
    assert_eq!(count, 3);
  }
}
