use crate::errors::CobjError;
use crate::models::{CollisionObject, Shape, ShapeKind};
use crate::transform::*;
use crate::{assert_float_eq, assert_point_eq};
use approx::assert_relative_eq;
use std::f64::consts::{FRAC_PI_2, PI};

const GRAVITY_DIR: (f64, f64, f64) = (0.0, 0.0, -1.0);

fn unit_square_pts() -> Vec<(f64, f64, f64)> {
    vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 1.0, 0.0), (0.0, 1.0, 0.0)]
}

#[test]
fn test_center_of_mass_simple_shapes() {
    let cube = CollisionObject::new_cube((0.0, 0.0, 0.0), (2.0, 4.0, 6.0)).unwrap();
    assert_point_eq(cube.center_of_mass(), (1.0, 2.0, 3.0), 1e-12, None);

    let cylin = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 0.0, 4.0), 1.0, 1.0).unwrap();
    assert_point_eq(cylin.center_of_mass(), (0.0, 0.0, 2.0), 1e-12, None);
}

#[test]
fn test_center_of_mass_vertical_cone() {
    let cone = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 0.0, 4.0), 1.0, 0.0).unwrap();
    assert_eq!(cone.kind(), ShapeKind::Cylinder);
    assert_point_eq(cone.center_of_mass(), (0.0, 0.0, 1.0), 1e-12, None);
}

#[test]
fn test_center_of_mass_trapezoid_weights_by_area() {
    let quad = CollisionObject::new_polygon(
        vec![(0.0, 0.0, 0.0), (3.0, 0.0, 0.0), (1.0, 1.0, 0.0), (0.0, 1.0, 0.0)],
        0.0,
    )
    .unwrap();
    assert_point_eq(quad.center_of_mass(), (13.0 / 12.0, 5.0 / 12.0, 0.0), 1e-12, None);

    let tri = CollisionObject::new_polygon(vec![(0.0, 0.0, 0.0), (3.0, 0.0, 0.0), (0.0, 3.0, 0.0)], 0.0).unwrap();
    assert_point_eq(tri.center_of_mass(), (1.0, 1.0, 0.0), 1e-12, None);
}

#[test]
fn test_rotate_zero_angle_is_noop() {
    let mut cube = CollisionObject::new_cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)).unwrap();
    let before = cube.clone();
    cube.rotate_about((0.0, 0.0, 0.0), (0.0, 0.0, 1.0), 0.0).unwrap();
    assert_eq!(cube, before);
}

#[test]
fn test_rotate_zero_axis_is_rejected() {
    let mut sphere = CollisionObject::new_sphere((1.0, 0.0, 0.0), 0.5).unwrap();
    let before = sphere.clone();
    assert_eq!(sphere.rotate_about((0.0, 0.0, 0.0), (0.0, 0.0, 0.0), 1.0), Err(CobjError::ZeroRotationAxis));
    assert_eq!(sphere, before);
}

#[test]
fn test_rotate_cube_becomes_extruded_polygon() {
    let mut cube = CollisionObject::new_cube((0.0, 0.0, 0.0), (2.0, 2.0, 1.0)).unwrap();
    let volume = cube.volume();
    cube.rotate_about((1.0, 1.0, 0.5), (1.0, 0.0, 0.0), FRAC_PI_2).unwrap();

    let Shape::Polygon(poly) = &cube.shape else {
        panic!("expected a polygon, got {:?}", cube.kind());
    };
    assert!(poly.was_cube);
    assert_float_eq(poly.thickness, 1.0, 1e-12, None);
    assert_float_eq(poly.normal.2, 0.0, 1e-9, None);
    assert_relative_eq!(cube.volume(), volume, epsilon = 1e-9);

    assert_point_eq(cube.bbox.min(), (0.0, 0.5, -0.5), 1e-9, None);
    assert_point_eq(cube.bbox.max(), (2.0, 1.5, 1.5), 1e-9, None);
    assert_point_eq(cube.center_of_mass(), (1.0, 1.0, 0.5), 1e-9, None);
}

#[test]
fn test_rotate_vertical_cylinder_becomes_rotated() {
    let mut cylin = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 0.0, 2.0), 0.5, 0.25).unwrap();
    cylin.rotate_about((0.0, 0.0, 0.0), (0.0, 1.0, 0.0), FRAC_PI_2).unwrap();
    assert_eq!(cylin.kind(), ShapeKind::RotatedCylinder);

    let c = cylin.cylinder().unwrap();
    assert_point_eq(c.p2, (2.0, 0.0, 0.0), 1e-9, None);
    assert_float_eq(c.r2, 0.25, 1e-12, None);
    assert_float_eq(cylin.bbox.d[0][1], 2.0, 1e-9, None);
    assert_float_eq(cylin.bbox.d[2][0], -0.5, 1e-9, None);
}

#[test]
fn test_full_turn_restores_position() {
    let mut sphere = CollisionObject::new_sphere((3.0, 1.0, 2.0), 0.5).unwrap();
    sphere.rotate_about((1.0, 1.0, 1.0), (1.0, 2.0, 3.0), 2.0 * PI).unwrap();
    assert_point_eq(sphere.center_pt(), (3.0, 1.0, 2.0), 1e-9, None);
}

#[test]
fn test_convex_hull_drops_interior_points() {
    let mut pts = unit_square_pts();
    pts.insert(2, (0.5, 0.5, 0.0));
    pts.push((0.5, 0.0, 0.0));

    let hull = convex_hull(&pts, (0.0, 0.0, 1.0));
    assert_eq!(hull.len(), 4);
    assert!(!hull.contains(&(0.5, 0.5, 0.0)));

    // counter-clockwise about +z: positive signed area
    let n = hull.len();
    let area: f64 = (0..n).map(|i| {
        let (a, b) = (hull[i], hull[(i + 1) % n]);
        a.0 * b.1 - b.0 * a.1
    }).sum();
    assert!(area > 0.0);
}

#[test]
fn test_is_point_supported() {
    let cube = CollisionObject::new_cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)).unwrap();
    assert!(is_point_supported(&cube, (0.5, 0.5, 5.0)));
    assert!(!is_point_supported(&cube, (1.5, 0.5, 5.0)));

    // top radius is what counts
    let cylin = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 0.0, 1.0), 1.0, 0.5).unwrap();
    assert!(is_point_supported(&cylin, (0.4, 0.0, 2.0)));
    assert!(!is_point_supported(&cylin, (0.6, 0.0, 2.0)));

    let sphere = CollisionObject::new_sphere((0.0, 0.0, 0.0), 1.0).unwrap();
    assert!(!is_point_supported(&sphere, (0.0, 0.0, 2.0)));
    assert!(is_rolling_cobj(&sphere));
    assert!(!is_rolling_cobj(&cube));

    let floor = CollisionObject::new_polygon(unit_square_pts(), 0.0).unwrap();
    assert!(is_point_supported(&floor, (0.5, 0.5, 1.0)));

    let ramp = CollisionObject::new_polygon(
        vec![(0.0, 0.0, 0.0), (1.0, 0.0, 1.0), (1.0, 1.0, 1.0), (0.0, 1.0, 0.0)],
        0.0,
    )
    .unwrap();
    assert!(!is_point_supported(&ramp, (0.5, 0.5, 2.0)));
}

#[test]
fn test_rot_axis_none_when_supported() {
    let pivot = get_cobj_rot_axis(&unit_square_pts(), (0.0, 0.0, 1.0), (0.5, 0.5, 1.0), GRAVITY_DIR, 1e-6);
    assert!(pivot.is_none());
}

#[test]
fn test_rot_axis_for_overhang() {
    let pivot = get_cobj_rot_axis(&unit_square_pts(), (0.0, 0.0, 1.0), (1.5, 0.5, 1.0), GRAVITY_DIR, 1e-6).unwrap();
    assert_point_eq(pivot.pt, (1.0, 0.5, 0.0), 1e-12, None);
    assert_point_eq(pivot.axis, (0.0, 1.0, 0.0), 1e-12, None);
}

#[test]
fn test_rot_axis_few_support_points() {
    // balanced on a single point
    assert!(get_cobj_rot_axis(&[(0.0, 0.0, 0.0)], (0.0, 0.0, 1.0), (0.0, 0.0, 1.0), GRAVITY_DIR, 1e-6).is_none());
    assert!(get_cobj_rot_axis(&[], (0.0, 0.0, 1.0), (0.0, 0.0, 1.0), GRAVITY_DIR, 1e-6).is_none());

    let edge = [(0.0, 0.0, 0.0), (2.0, 0.0, 0.0)];
    let pivot = get_cobj_rot_axis(&edge, (0.0, 0.0, 1.0), (1.0, 1.0, 1.0), GRAVITY_DIR, 1e-6).unwrap();
    assert_point_eq(pivot.pt, (1.0, 0.0, 0.0), 1e-12, None);
    assert_point_eq(pivot.axis, (-1.0, 0.0, 0.0), 1e-12, None);
}

#[test]
fn test_hull_closest_pt() {
    let hull = unit_square_pts();
    assert_point_eq(get_hull_closest_pt(&hull, (2.0, 2.0, 0.0)), (1.0, 1.0, 0.0), 1e-12, None);
    assert_point_eq(get_hull_closest_pt(&hull, (0.5, -3.0, 0.0)), (0.5, 0.0, 0.0), 1e-12, None);
    assert_point_eq(get_hull_closest_pt(&[], (0.5, -3.0, 0.0)), (0.5, -3.0, 0.0), 1e-12, None);
}
