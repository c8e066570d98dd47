use crate::models::BoundingBox;
use crate::utils::{
    add_vectors, coord, distance_squared, dot_product, lerp_points, magnitude_squared, scale_vector,
    sub_vectors, Point, GEOM_EPSILON,
};

/// Closest points between segments `[p1, q1]` and `[p2, q2]`.
///
/// # Returns
/// `(dist_sq, s, t)` where `s` and `t` are the parameters of the closest points on
/// the first and second segment.
pub fn closest_pts_segment_segment(p1: Point, q1: Point, p2: Point, q2: Point) -> (f64, f64, f64) {
    let d1 = sub_vectors(q1, p1);
    let d2 = sub_vectors(q2, p2);
    let r = sub_vectors(p1, p2);
    let a = magnitude_squared(d1);
    let e = magnitude_squared(d2);
    let f = dot_product(d2, r);

    let (s, t) = if a <= GEOM_EPSILON && e <= GEOM_EPSILON {
        (0.0, 0.0)
    } else if a <= GEOM_EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = dot_product(d1, r);

        if e <= GEOM_EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = dot_product(d1, d2);
            let denom = a * e - b * b;
            // parallel segments: pick any s and let the t clamp below fix it up
            let mut s = if denom > GEOM_EPSILON { ((b * f - c * e) / denom).clamp(0.0, 1.0) } else { 0.0 };
            let mut t = (b * s + f) / e;

            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };
    let c1 = add_vectors(p1, scale_vector(d1, s));
    let c2 = add_vectors(p2, scale_vector(d2, t));
    (distance_squared(c1, c2), s, t)
}

/// Shortest distance between two line segments.
pub fn line_line_dist(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    closest_pts_segment_segment(a1, a2, b1, b2).0.sqrt()
}

pub fn closest_pt_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = sub_vectors(b, a);
    let len_sq = magnitude_squared(ab);
    if len_sq < GEOM_EPSILON {
        return a;
    }
    let t = (dot_product(sub_vectors(p, a), ab) / len_sq).clamp(0.0, 1.0);
    lerp_points(a, b, t)
}

pub fn pt_line_seg_dist(p: Point, a: Point, b: Point) -> f64 {
    distance_squared(p, closest_pt_on_segment(p, a, b)).sqrt()
}

pub fn pt_line_seg_dist_less_than(p: Point, a: Point, b: Point, dist: f64) -> bool {
    dist > 0.0 && distance_squared(p, closest_pt_on_segment(p, a, b)) < dist * dist
}

/// Whether segment `[p1, p2]` passes through (or touches) the box.
pub fn check_line_clip(p1: Point, p2: Point, bbox: &BoundingBox) -> bool {
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for dim in 0..3 {
        let (a, b) = (coord(p1, dim), coord(p2, dim));
        let (lo, hi) = (bbox.d[dim][0], bbox.d[dim][1]);
        let dir = b - a;

        if dir.abs() < GEOM_EPSILON {
            if a < lo || a > hi {
                return false;
            }
            continue;
        }
        let (mut ta, mut tb) = ((lo - a) / dir, (hi - a) / dir);
        if ta > tb {
            std::mem::swap(&mut ta, &mut tb);
        }
        t0 = t0.max(ta);
        t1 = t1.min(tb);
        if t0 > t1 {
            return false;
        }
    }
    true
}

/// Strict segment/sphere overlap.
pub fn line_sphere_intersect(p1: Point, p2: Point, center: Point, radius: f64) -> bool {
    pt_line_seg_dist_less_than(center, p1, p2, radius)
}
