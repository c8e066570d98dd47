use crate::errors::CobjError;
use crate::models::*;
use crate::{assert_float_eq, assert_point_eq};
use approx::assert_relative_eq;
use std::f64::consts::{FRAC_PI_2, PI};

#[test]
fn test_bounding_box_new_orders_corners() {
    let bbox = BoundingBox::new((1.0, -1.0, 3.0), (0.0, 2.0, 1.0));
    assert_point_eq(bbox.min(), (0.0, -1.0, 1.0), 1e-12, None);
    assert_point_eq(bbox.max(), (1.0, 2.0, 3.0), 1e-12, None);
    assert_point_eq(bbox.center(), (0.5, 0.5, 2.0), 1e-12, None);
    assert_float_eq(bbox.height(), 2.0, 1e-12, None);
}

#[test]
fn test_bounding_box_touching_needs_negative_toler() {
    let a = BoundingBox::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
    let b = BoundingBox::new((1.0, 0.0, 0.0), (2.0, 1.0, 1.0));
    assert!(!a.intersects(&b, 0.0));
    assert!(!a.intersects(&b, 1e-6));
    assert!(a.intersects(&b, -1e-6));
    assert!(a.intersects(&b.translated((-0.5, 0.0, 0.0)), 1e-6));
}

#[test]
fn test_bounding_box_helpers() {
    let bbox = BoundingBox::new((0.0, 0.0, 0.0), (1.0, 2.0, 2.0));
    assert!(bbox.contains_pt((1.0, 2.0, 0.0)));
    assert!(!bbox.contains_pt((1.0, 2.0, 2.1)));
    assert!(bbox.contains_pt_xy((0.5, 0.5, 100.0)));
    assert_point_eq(bbox.closest_point((3.0, 1.0, -1.0)), (1.0, 1.0, 0.0), 1e-12, None);
    assert_float_eq(bbox.diagonal_length(), 3.0, 1e-12, None);

    let corners = bbox.corners();
    assert_eq!(BoundingBox::from_points(&corners), bbox);

    let grown = bbox.expanded_by(0.5);
    assert_point_eq(grown.min(), (-0.5, -0.5, -0.5), 1e-12, None);
    let joined = bbox.union_with(&BoundingBox::from_sphere((5.0, 0.0, 0.0), 1.0));
    assert_point_eq(joined.max(), (6.0, 2.0, 2.0), 1e-12, None);
}

#[test]
fn test_quaternion_rotation() {
    let q = Quaternion::from_axis_angle((0.0, 0.0, 2.0), FRAC_PI_2).unwrap();
    assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-12);
    assert_point_eq(q.rotate_vector((1.0, 0.0, 0.0)), (0.0, 1.0, 0.0), 1e-12, None);
    assert_point_eq(q.rotate_point_about((2.0, 1.0, 5.0), (1.0, 1.0, 0.0)), (1.0, 2.0, 5.0), 1e-12, None);

    let half = q.multiply(&q);
    assert_point_eq(half.rotate_vector((1.0, 0.0, 0.0)), (-1.0, 0.0, 0.0), 1e-12, None);
    assert!(Quaternion::from_axis_angle((0.0, 0.0, 0.0), 1.0).is_none());
}

#[test]
fn test_new_cube_rejects_flat_box() {
    assert_eq!(CollisionObject::new_cube((0.0, 0.0, 0.0), (1.0, 1.0, 0.0)), Err(CobjError::InvalidDimensions));
    let cube = CollisionObject::new_cube((0.0, 0.0, 0.0), (1.0, 2.0, 3.0)).unwrap();
    assert_eq!(cube.kind(), ShapeKind::Cube);
    assert_float_eq(cube.volume(), 6.0, 1e-12, None);
    assert!(cube.is_flat_top());
    assert!(!cube.is_movable());
    assert!(cube.is_active());
}

#[test]
fn test_new_cylinder_vertical_puts_bottom_first() {
    let cobj = CollisionObject::new_cylinder((1.0, 1.0, 4.0), (1.0, 1.0, 2.0), 0.5, 0.25).unwrap();
    assert_eq!(cobj.kind(), ShapeKind::Cylinder);
    let c = cobj.cylinder().unwrap();
    assert_float_eq(c.p1.2, 2.0, 1e-12, None);
    assert_float_eq(c.r1, 0.25, 1e-12, None);
    assert_float_eq(cobj.bottom(), 2.0, 1e-12, None);
    assert_float_eq(cobj.top(), 4.0, 1e-12, None);
    assert_float_eq(cobj.bbox.d[0][0], 0.5, 1e-12, None);
}

#[test]
fn test_rotated_cylinder_bbox_is_tight() {
    let cobj = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (2.0, 0.0, 0.0), 1.0, 1.0).unwrap();
    assert_eq!(cobj.kind(), ShapeKind::RotatedCylinder);
    assert_point_eq(cobj.bbox.min(), (0.0, -1.0, -1.0), 1e-12, None);
    assert_point_eq(cobj.bbox.max(), (2.0, 1.0, 1.0), 1e-12, None);
    assert_relative_eq!(cobj.volume(), 2.0 * PI, epsilon = 1e-12);
    assert!(!cobj.is_flat_top());
}

#[test]
fn test_invalid_shapes() {
    assert!(CollisionObject::new_sphere((0.0, 0.0, 0.0), 0.0).is_err());
    assert!(CollisionObject::new_sphere((f64::NAN, 0.0, 0.0), 1.0).is_err());
    assert!(CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 0.0, 0.0), 1.0, 1.0).is_err());
    assert!(CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 0.0, 1.0), 0.0, 0.0).is_err());
    assert_eq!(
        CollisionObject::new_polygon(vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)], 0.0),
        Err(CobjError::UnsupportedPointCount(2))
    );
    assert_eq!(
        CollisionObject::new_polygon(vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)], 0.0),
        Err(CobjError::DegeneratePolygon)
    );
    let sphere = CollisionObject::new_sphere((0.0, 0.0, 0.0), 1.0).unwrap();
    assert_eq!(sphere.with_density(0.0), Err(CobjError::InvalidDensity));
}

#[test]
fn test_capsule_bbox_and_volume() {
    let cobj = CollisionObject::new_capsule((0.0, 0.0, 0.0), (0.0, 0.0, 2.0), 0.5, 0.5).unwrap();
    assert_float_eq(cobj.bottom(), -0.5, 1e-12, None);
    assert_float_eq(cobj.top(), 2.5, 1e-12, None);
    let expected = PI * 0.25 * 2.0 + 4.0 / 3.0 * PI * 0.125;
    assert_relative_eq!(cobj.volume(), expected, epsilon = 1e-12);
    assert_float_eq(cobj.bsphere_radius(), 1.5, 1e-12, None);
}

#[test]
fn test_thick_polygon_bbox_includes_both_faces() {
    let cobj = CollisionObject::new_polygon(
        vec![(0.0, 0.0, 1.0), (1.0, 0.0, 1.0), (1.0, 1.0, 1.0), (0.0, 1.0, 1.0)],
        0.2,
    )
    .unwrap();
    assert_float_eq(cobj.bottom(), 0.9, 1e-12, None);
    assert_float_eq(cobj.top(), 1.1, 1e-12, None);
    assert!(cobj.is_flat_top());
    assert_relative_eq!(cobj.volume(), 0.2, epsilon = 1e-12);
}

#[test]
fn test_shift_by_moves_geometry_and_bbox() {
    let mut sphere = CollisionObject::new_sphere((0.0, 0.0, 1.0), 1.0).unwrap().with_density(2.0).unwrap();
    sphere.shift_by((1.0, 2.0, 3.0));
    assert_point_eq(sphere.center_pt(), (1.0, 2.0, 4.0), 1e-12, None);
    assert_eq!(sphere.bbox, sphere.calc_bbox());
    assert_relative_eq!(sphere.mass(), 2.0 * 4.0 / 3.0 * PI, epsilon = 1e-12);

    let mut poly = CollisionObject::new_polygon(vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)], 0.0).unwrap();
    poly.shift_by((0.0, 0.0, 2.0));
    assert_eq!(poly.bbox, poly.calc_bbox());
    assert_float_eq(poly.bottom(), 2.0, 1e-12, None);
}

#[test]
fn test_shape_kind_order() {
    assert!(ShapeKind::Cube < ShapeKind::Cylinder);
    assert!(ShapeKind::Cylinder < ShapeKind::Sphere);
    assert!(ShapeKind::Sphere < ShapeKind::RotatedCylinder);
    assert!(ShapeKind::RotatedCylinder < ShapeKind::Polygon);
    assert!(ShapeKind::Polygon < ShapeKind::Capsule);
}
