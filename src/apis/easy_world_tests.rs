use crate::apis::easy_world::EasyWorld;
use crate::errors::CobjError;
use crate::intersection::Intersection;
use crate::simulation::DropState;
use crate::{assert_float_eq, assert_point_eq};

#[test]
fn test_dropped_crate_comes_to_rest() {
    let mut world = EasyWorld::new();
    let id = world.add_cube((0.0, 0.0, 2.0), (1.0, 1.0, 3.0), 0.5, true).unwrap();
    world.set_moving(id).unwrap();

    for _ in 0..600 {
        world.step().unwrap();
    }
    assert_float_eq(world.bottom(id).unwrap(), 0.0, 1e-9, None);
    assert_float_eq(world.v_fall(id).unwrap(), 0.0, 1e-12, None);
    assert_eq!(world.step().unwrap(), vec![(id, DropState::RestingOnSurface)]);
}

#[test]
fn test_push_then_fall_off_a_table() {
    let mut world = EasyWorld::with_custom_constants(2.0, 1.0, 0.6, 0.0, None).unwrap();
    world.add_cube((0.0, 0.0, 0.0), (2.0, 2.0, 1.0), 1.0, false).unwrap();
    let id = world.add_cube((0.5, 0.5, 1.0), (1.5, 1.5, 2.0), 0.5, true).unwrap();

    let moved = world.push(id, 2.0, 0.0).unwrap().unwrap();
    assert_float_eq(moved.0, 2.0, 1e-12, None);
    assert_eq!(world.moving_count(), 1);

    for _ in 0..5 {
        world.step().unwrap();
    }
    assert_float_eq(world.bottom(id).unwrap(), 0.0, 1e-12, None);
    assert_point_eq(world.position(id).unwrap(), (3.0, 1.0, 0.5), 1e-12, None);
}

#[test]
fn test_floating_in_custom_pond() {
    let mut world = EasyWorld::with_custom_constants(2.0, 1.0, 0.6, -10.0, Some(0.0)).unwrap();
    let id = world.add_sphere((0.0, 0.0, 0.5), 0.5, 0.3, true).unwrap();
    world.set_moving(id).unwrap();

    let mut last = Vec::new();
    for _ in 0..100 {
        last = world.step().unwrap();
    }
    assert_eq!(last, vec![(id, DropState::SubmergedFloating)]);
    assert_float_eq(world.bottom(id).unwrap(), -0.3, 1e-3, None);
}

#[test]
fn test_shapes_rotation_and_intersection() {
    let mut world = EasyWorld::new();
    let a = world.add_cube((0.0, 0.0, 0.0), (2.0, 2.0, 0.2), 1.0, false).unwrap();
    let b = world.add_cylinder((1.0, 1.0, 0.2), (1.0, 1.0, 1.2), 0.3, 1.0, false).unwrap();
    let c = world.add_polygon(vec![(5.0, 0.0, 0.0), (6.0, 0.0, 0.0), (5.0, 1.0, 0.0)], 0.1).unwrap();

    assert_eq!(world.intersects(a, b).unwrap(), Intersection::No);
    world.rotate(b, (1.0, 1.0, 0.7), (1.0, 0.0, 0.0), std::f64::consts::FRAC_PI_2).unwrap();
    assert_eq!(world.intersects(a, b).unwrap(), Intersection::No);
    assert_eq!(world.intersects(a, c).unwrap(), Intersection::No);
    assert!(world.simulation().world.get_cobj(c).unwrap().bottom() < 0.0);

    world.destroy(c).unwrap();
    assert!(!world.simulation().world.get_cobj(c).unwrap().is_active());
}

#[test]
fn test_errors_are_reported() {
    let mut world = EasyWorld::default();
    assert_eq!(world.set_moving(3), Err(CobjError::UnknownCobj(3)));
    assert_eq!(world.add_sphere((0.0, 0.0, 0.0), 1.0, -1.0, true), Err(CobjError::InvalidDensity));
    assert_eq!(world.add_cube((0.0, 0.0, 0.0), (0.0, 1.0, 1.0), 1.0, true), Err(CobjError::InvalidDimensions));
    assert!(EasyWorld::with_custom_constants(9.8, 0.0, 0.6, 0.0, None).is_err());

    let id = world.add_sphere((0.0, 0.0, 5.0), 1.0, 1.0, true).unwrap();
    assert_eq!(world.rotate(id, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0), 1.0), Err(CobjError::ZeroRotationAxis));
    assert_eq!(world.push(id, 0.0, 0.0).unwrap(), None);
}
