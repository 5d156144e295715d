use super::*;

fn sample() -> Triangle {
  Triangle::new(
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
  )
}

#[test]
fn normal_points_along_z_for_ccw_xy_triangle() {
  let t = sample();
  let n = t.normal();
  assert!((n - Vec3::Z).length() < 1e-6);
}

#[test]
fn vertex_after_walks_ccw() {
  let t = sample();
  assert_eq!(t.vertex_after(t.a()).unwrap(), t.b());
  assert_eq!(t.vertex_after(t.b()).unwrap(), t.c());
  assert_eq!(t.vertex_after(t.c()).unwrap(), t.a());
}

#[test]
fn vertex_before_walks_cw() {
  let t = sample();
  assert_eq!(t.vertex_before(t.a()).unwrap(), t.c());
  assert_eq!(t.vertex_before(t.b()).unwrap(), t.a());
  assert_eq!(t.vertex_before(t.c()).unwrap(), t.b());
}

#[test]
fn vertex_after_rejects_foreign_point() {
  let t = sample();
  assert!(t.vertex_after(Vec3::new(9.0, 9.0, 9.0)).is_err());
}
