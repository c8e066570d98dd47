use crate::models::CollisionObject;
use crate::utils::{scale_vector, Point};

/// Initial bisection resolution of `binary_step_moving_cobj_delta`.
pub const INITIAL_STEP_THRESH: f64 = 0.001;

/// Largest fraction `t` of `delta` that `c1` can be translated by without
/// intersecting `c2`, found by bisection.
///
/// The search starts at `t = 0.5` with a step of `0.25`, halving the step until it
/// drops to `step_thresh`. `Maybe` results count as intersecting.
///
/// # Returns
/// The last collision-free `t` visited, or `0.0` if none was.
pub fn get_max_cobj_move_delta(c1: &CollisionObject, c2: &CollisionObject, delta: Point, step_thresh: f64, toler: f64) -> f64 {
    let mut valid_t = 0.0;
    let mut t = 0.5;
    let mut step = 0.25;

    while step > step_thresh {
        let mut test_cobj = c1.clone();
        test_cobj.shift_by(scale_vector(delta, t));

        if test_cobj.intersects_cobj(c2, toler).is_possible() {
            t -= step;
        } else {
            valid_t = t;
            t += step;
        }
        step *= 0.5;
    }
    valid_t
}

/// Shortens `delta` so `cobj` can move along it without hitting any obstruction.
///
/// Obstructions are handled greedily in the order given: each one shrinks the
/// running `delta` before the next is tested, so the result depends on the
/// order. The bisection threshold is divided by every `t` found so small
/// remaining deltas are still resolved.
///
/// # Returns
/// `false` if the object already intersects an obstruction or can't move at all
/// (`delta` is then partially shortened and should be discarded).
pub fn binary_step_moving_cobj_delta(cobj: &CollisionObject, obstructions: &[&CollisionObject], delta: &mut Point, toler: f64) -> bool {
    let mut step_thresh = INITIAL_STEP_THRESH;

    for c in obstructions {
        if cobj.intersects_cobj(c, toler).is_possible() {
            return false; // stuck
        }
        let valid_t = get_max_cobj_move_delta(cobj, c, *delta, step_thresh, toler);

        if valid_t == 0.0 {
            return false;
        }
        step_thresh /= valid_t;
        *delta = scale_vector(*delta, valid_t);
    }
    true
}
