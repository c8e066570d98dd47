use crate::intersection::{cube_polygon_intersect, intersects_cobj, Intersection};
use crate::models::{BoundingBox, CollisionObject, Polygon, ShapeKind};

const TOLER: f64 = 1e-6;

fn cube(a: (f64, f64, f64), b: (f64, f64, f64)) -> CollisionObject {
    CollisionObject::new_cube(a, b).unwrap()
}

fn sphere(center: (f64, f64, f64), radius: f64) -> CollisionObject {
    CollisionObject::new_sphere(center, radius).unwrap()
}

fn square(z: f64, thickness: f64) -> CollisionObject {
    CollisionObject::new_polygon(vec![(0.0, 0.0, z), (1.0, 0.0, z), (1.0, 1.0, z), (0.0, 1.0, z)], thickness).unwrap()
}

/// One object of every kind, clustered so most pairs overlap in their boxes.
fn mixed_scene() -> Vec<CollisionObject> {
    vec![
        cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
        CollisionObject::new_cylinder((1.2, 0.5, 0.0), (1.2, 0.5, 1.0), 0.4, 0.4).unwrap(),
        sphere((0.5, 1.3, 0.5), 0.5),
        CollisionObject::new_cylinder((0.0, 0.0, 0.8), (1.5, 1.5, 1.2), 0.3, 0.2).unwrap(),
        square(0.9, 0.1),
        CollisionObject::new_capsule((-0.5, 0.5, 0.5), (0.5, -0.5, 1.5), 0.3, 0.3).unwrap(),
        sphere((5.0, 5.0, 5.0), 0.5),
        CollisionObject::new_polygon(vec![(0.5, 0.2, -0.5), (0.5, 0.8, -0.5), (0.5, 0.8, 0.5), (0.5, 0.2, 0.5)], 0.0).unwrap(),
    ]
}

#[test]
fn test_intersection_is_symmetric() {
    let scene = mixed_scene();
    for a in &scene {
        for b in &scene {
            assert_eq!(
                intersects_cobj(a, b, TOLER),
                intersects_cobj(b, a, TOLER),
                "asymmetric result for {:?} / {:?}",
                a.kind(),
                b.kind()
            );
        }
    }
}

#[test]
fn test_far_apart_objects_never_intersect() {
    let scene = mixed_scene();
    let far = &scene[6];
    for other in scene.iter().filter(|c| c.bbox != far.bbox) {
        assert_eq!(intersects_cobj(far, other, TOLER), Intersection::No);
    }
}

#[test]
fn test_cube_cube_touching_and_overlapping() {
    let a = cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
    let touching = cube((1.0, 0.0, 0.0), (2.0, 1.0, 1.0));
    let overlapping = cube((0.9, 0.0, 0.0), (2.0, 1.0, 1.0));
    assert_eq!(a.intersects_cobj(&touching, TOLER), Intersection::No);
    assert_eq!(a.intersects_cobj(&touching, -TOLER), Intersection::Yes);
    assert_eq!(a.intersects_cobj(&overlapping, TOLER), Intersection::Yes);
}

#[test]
fn test_sphere_tolerance_boundaries() {
    let a = sphere((0.0, 0.0, 0.0), 1.0);
    let b = sphere((2.0, 0.0, 0.0), 1.0);
    assert_eq!(a.intersects_cobj(&b, TOLER), Intersection::No);
    assert_eq!(a.intersects_cobj(&b, 0.0), Intersection::No);
    assert_eq!(a.intersects_cobj(&b, -TOLER), Intersection::Yes);

    let box_a = cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
    let side = sphere((2.0, 0.5, 0.5), 1.0);
    assert_eq!(box_a.intersects_cobj(&side, 0.0), Intersection::No);
    assert_eq!(box_a.intersects_cobj(&side, -TOLER), Intersection::Yes);
}

#[test]
fn test_cube_vs_round_shapes_near_corner() {
    let a = cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
    // boxes overlap but the shapes don't
    assert_eq!(a.intersects_cobj(&sphere((1.5, 1.5, 1.5), 0.8), TOLER), Intersection::No);
    let cylin = CollisionObject::new_cylinder((1.5, 1.5, 0.0), (1.5, 1.5, 1.0), 0.6, 0.6).unwrap();
    assert_eq!(a.intersects_cobj(&cylin, TOLER), Intersection::No);
    let cylin = CollisionObject::new_cylinder((1.5, 1.5, 0.0), (1.5, 1.5, 1.0), 0.75, 0.75).unwrap();
    assert_eq!(a.intersects_cobj(&cylin, TOLER), Intersection::Yes);
}

#[test]
fn test_vertical_cylinders() {
    let a = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 0.0, 2.0), 1.0, 1.0).unwrap();
    let touching = CollisionObject::new_cylinder((2.0, 0.0, 0.0), (2.0, 0.0, 2.0), 1.0, 1.0).unwrap();
    let close = CollisionObject::new_cylinder((1.5, 0.0, 1.0), (1.5, 0.0, 3.0), 1.0, 1.0).unwrap();
    assert_eq!(a.intersects_cobj(&touching, TOLER), Intersection::No);
    assert_eq!(a.intersects_cobj(&close, TOLER), Intersection::Yes);
    assert_eq!(a.intersects_cobj(&sphere((1.4, 0.0, 1.0), 0.5), TOLER), Intersection::Yes);
    assert_eq!(a.intersects_cobj(&sphere((1.6, 0.0, 1.0), 0.5), TOLER), Intersection::No);
}

#[test]
fn test_skew_rotated_cylinders_are_unresolved() {
    let a = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (2.0, 2.0, 0.0), 0.5, 0.5).unwrap();
    let b = CollisionObject::new_cylinder((0.0, 2.0, 0.8), (2.0, 0.0, 0.8), 0.5, 0.5).unwrap();
    let result = a.intersects_cobj(&b, TOLER);
    assert_eq!(result, Intersection::Maybe);
    assert!(result.is_possible());

    // axis passes through the other body
    let c = CollisionObject::new_cylinder((0.0, 2.0, 0.2), (2.0, 0.0, 0.2), 0.5, 0.5).unwrap();
    assert_eq!(a.intersects_cobj(&c, TOLER), Intersection::Yes);
}

#[test]
fn test_sphere_against_tilted_cone_side() {
    let cone = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.001, 0.0, 2.0), 1.0, 0.0).unwrap();
    assert_eq!(cone.kind(), ShapeKind::RotatedCylinder);

    // closer to the slanted side than the radial gap suggests
    let near = sphere((0.9, 0.0, 1.0), 0.37);
    assert_eq!(cone.intersects_cobj(&near, TOLER), Intersection::Yes);
    assert_eq!(near.intersects_cobj(&cone, TOLER), Intersection::Yes);
    assert!(cone.sphere_intersects((0.9, 0.0, 1.0), 0.37));

    assert_eq!(cone.intersects_cobj(&sphere((0.9, 0.0, 1.0), 0.34), TOLER), Intersection::No);

    let cap = CollisionObject::new_capsule((0.9, 0.0, 1.0), (2.5, 0.0, 1.0), 0.37, 0.37).unwrap();
    assert_eq!(cone.intersects_cobj(&cap, TOLER), Intersection::Yes);
}

#[test]
fn test_capsule_end_caps() {
    let cap = CollisionObject::new_capsule((0.0, 0.0, 0.0), (2.0, 0.0, 0.0), 0.5, 0.5).unwrap();
    assert_eq!(cap.intersects_cobj(&sphere((-0.8, 0.0, 0.0), 0.4), TOLER), Intersection::Yes);
    assert_eq!(cap.intersects_cobj(&sphere((-1.0, 0.0, 0.0), 0.4), TOLER), Intersection::No);
    assert_eq!(cap.intersects_cobj(&cube((2.3, -0.1, -0.1), (3.0, 0.1, 0.1)), TOLER), Intersection::Yes);
}

#[test]
fn test_polygon_pairs() {
    let floor = square(0.0, 0.0);
    let wall =
        CollisionObject::new_polygon(vec![(0.5, 0.2, -0.5), (0.5, 0.8, -0.5), (0.5, 0.8, 0.5), (0.5, 0.2, 0.5)], 0.0).unwrap();
    let high_wall =
        CollisionObject::new_polygon(vec![(0.5, 0.2, 0.5), (0.5, 0.8, 0.5), (0.5, 0.8, 1.5), (0.5, 0.2, 1.5)], 0.0).unwrap();
    assert_eq!(floor.intersects_cobj(&wall, TOLER), Intersection::Yes);
    assert_eq!(floor.intersects_cobj(&high_wall, TOLER), Intersection::No);

    let slab = square(0.0, 0.2);
    assert_eq!(slab.intersects_cobj(&sphere((0.5, 0.5, 0.5), 0.45), TOLER), Intersection::Yes);
    assert_eq!(slab.intersects_cobj(&sphere((0.5, 0.5, 0.5), 0.3), TOLER), Intersection::No);
}

#[test]
fn test_cube_inside_thick_polygon() {
    let slab = Polygon::new(vec![(-5.0, -5.0, 0.0), (5.0, -5.0, 0.0), (5.0, 5.0, 0.0), (-5.0, 5.0, 0.0)], 2.0).unwrap();
    assert!(cube_polygon_intersect(&BoundingBox::new((0.0, 0.0, 0.2), (0.1, 0.1, 0.3)), &slab));
    assert!(!cube_polygon_intersect(&BoundingBox::new((0.0, 0.0, 1.2), (0.1, 0.1, 1.3)), &slab));
    assert!(cube_polygon_intersect(&BoundingBox::new((4.5, 4.5, 0.9), (6.0, 6.0, 2.0)), &slab));
}

#[test]
fn test_line_intersect_per_shape() {
    let through = ((-3.0, 0.5, 0.5), (3.0, 0.5, 0.5));
    let above = ((-3.0, 0.5, 3.5), (3.0, 0.5, 3.5));

    let shapes = vec![
        cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
        sphere((0.0, 0.5, 0.5), 0.5),
        CollisionObject::new_cylinder((0.0, 0.5, 0.0), (0.0, 0.5, 1.0), 0.5, 0.5).unwrap(),
        CollisionObject::new_cylinder((0.0, 0.0, 0.0), (0.0, 1.0, 1.0), 0.2, 0.2).unwrap(),
        CollisionObject::new_capsule((0.0, 0.5, -1.0), (0.0, 0.5, 0.0), 0.6, 0.6).unwrap(),
        CollisionObject::new_polygon(vec![(0.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 1.0, 1.0), (0.0, 0.0, 1.0)], 0.0).unwrap(),
        square(0.5, 0.2),
    ];
    for cobj in &shapes {
        assert!(cobj.line_intersect(through.0, through.1), "{:?} missed", cobj.kind());
        assert!(!cobj.line_intersect(above.0, above.1), "{:?} hit", cobj.kind());
    }
}

#[test]
fn test_sphere_intersects() {
    let a = cube((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
    assert!(a.sphere_intersects((1.2, 0.5, 0.5), 0.3));
    assert!(!a.sphere_intersects((1.4, 0.5, 0.5), 0.3));

    let floor = square(0.0, 0.0);
    assert!(floor.sphere_intersects((0.5, 0.5, 0.2), 0.3));
    assert!(!floor.sphere_intersects((0.5, 0.5, 0.4), 0.3));
}
