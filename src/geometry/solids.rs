use crate::geometry::pt_line_seg_dist_less_than;
use crate::models::{BoundingBox, Cylinder};
use crate::utils::{
    add_vectors, coord, dist_less_than, distance_squared, dot_product, magnitude_squared,
    scale_vector, sub_vectors, Point, GEOM_EPSILON,
};

fn range_dist(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo - v
    } else if v > hi {
        v - hi
    } else {
        0.0
    }
}

/// Circle of `radius` around `center`, projected along axis `dim`, against the box's
/// rectangle in the other two dimensions.
pub fn circle_rect_intersect(center: Point, radius: f64, bbox: &BoundingBox, dim: usize) -> bool {
    if radius <= 0.0 {
        return false;
    }
    let (d1, d2) = ((dim + 1) % 3, (dim + 2) % 3);
    let dx = range_dist(coord(center, d1), bbox.d[d1][0], bbox.d[d1][1]);
    let dy = range_dist(coord(center, d2), bbox.d[d2][0], bbox.d[d2][1]);
    dx * dx + dy * dy < radius * radius
}

pub fn sphere_cube_intersect(center: Point, radius: f64, bbox: &BoundingBox) -> bool {
    radius > 0.0 && distance_squared(center, bbox.closest_point(center)) < radius * radius
}

/// Sphere against a solid (possibly tapered) cylinder from `cp1` (radius `r1`) to
/// `cp2` (radius `r2`).
///
/// The frustum is rotationally symmetric, so the test runs in the (axial, radial)
/// half-plane: the sphere centre maps to a point there and the frustum to a
/// trapezoid bounded by the two cap radii and the slanted side. The distance
/// from that point to the trapezoid is the exact 3D distance to the solid.
pub fn sphere_intersect_cylinder(sc: Point, sr: f64, cp1: Point, cp2: Point, r1: f64, r2: f64) -> bool {
    let axis = sub_vectors(cp2, cp1);
    let len_sq = magnitude_squared(axis);

    if len_sq < GEOM_EPSILON {
        return dist_less_than(sc, cp1, sr + r1.max(r2));
    }
    let len = len_sq.sqrt();
    let t = dot_product(sub_vectors(sc, cp1), axis) / len_sq;
    let foot = add_vectors(cp1, scale_vector(axis, t));
    let q = (t * len, distance_squared(sc, foot).sqrt(), 0.0);

    if (0.0..=1.0).contains(&t) && q.1 <= r1 + (r2 - r1) * t {
        return sr > 0.0;
    }
    let (base_axis, base_rim) = ((0.0, 0.0, 0.0), (0.0, r1, 0.0));
    let (top_axis, top_rim) = ((len, 0.0, 0.0), (len, r2, 0.0));

    [(base_axis, base_rim), (top_axis, top_rim), (base_rim, top_rim)]
        .iter()
        .any(|&(a, b)| pt_line_seg_dist_less_than(q, a, b, sr))
}

/// Exact segment test against the solid frustum of `cylin`.
///
/// Along the segment `P(s)`, "inside" means the axial coordinate lies within the
/// cylinder and the squared radial distance is below the squared (interpolated)
/// radius; the difference of those squares is quadratic in `s`, so its minimum
/// over the admissible interval decides the test.
pub fn line_cylinder_intersect(p1: Point, p2: Point, cylin: &Cylinder) -> bool {
    let axis = sub_vectors(cylin.p2, cylin.p1);
    let len = magnitude_squared(axis).sqrt();

    if len < GEOM_EPSILON {
        return false;
    }
    let u = scale_vector(axis, 1.0 / len);
    let d = sub_vectors(p2, p1);
    let w0 = sub_vectors(p1, cylin.p1);
    let (a0, ad) = (dot_product(w0, u), dot_product(d, u));
    let k = (cylin.r2 - cylin.r1) / len;
    let (r0, rd) = (cylin.r1 + k * a0, k * ad);

    let qa = magnitude_squared(d) - ad * ad - rd * rd;
    let qb = 2.0 * (dot_product(w0, d) - a0 * ad - r0 * rd);
    let qc = magnitude_squared(w0) - a0 * a0 - r0 * r0;

    let (mut s_lo, mut s_hi) = (0.0_f64, 1.0_f64);

    if ad.abs() < GEOM_EPSILON {
        if a0 < 0.0 || a0 > len {
            return false;
        }
    } else {
        let (mut sa, mut sb) = (-a0 / ad, (len - a0) / ad);
        if sa > sb {
            std::mem::swap(&mut sa, &mut sb);
        }
        s_lo = s_lo.max(sa);
        s_hi = s_hi.min(sb);
        if s_lo > s_hi {
            return false;
        }
    }
    let f = |s: f64| (qa * s + qb) * s + qc;
    let mut f_min = f(s_lo).min(f(s_hi));

    if qa > GEOM_EPSILON {
        let s_vertex = -qb / (2.0 * qa);
        if s_vertex > s_lo && s_vertex < s_hi {
            f_min = f_min.min(f(s_vertex));
        }
    }
    f_min < 0.0
}
