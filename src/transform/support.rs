// src/transform/support.rs
//
// Support and balance helpers: which objects offer a flat resting surface under a
// point, and where an unbalanced object would pivot.

use crate::geometry::{
    closest_pt_on_segment, get_poly_norm, point_in_convex_planar_polygon, point_in_polygon_2d,
    pt_line_seg_dist, thick_poly_to_sides,
};
use crate::models::{CollisionObject, Shape};
use crate::utils::{
    cross_product, dist_less_than, dist_xy_less_than, dot_product, normalize_vector, sub_vectors,
    Point, PLUS_X, PLUS_Z, ZERO_VECTOR,
};

/// Polygons steeper than this (by |normal.z|) don't count as flat supports.
const FLAT_NORMAL_Z: f64 = 0.9;

/// Pivot point and axis an unbalanced object would rotate about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPivot {
    pub pt: Point,
    pub axis: Point,
}

/// Whether `support` has a flat top surface directly under `pos` (xy only).
///
/// Spheres, capsules and tilted cylinders are never flat supports. Polygons
/// support when their face is nearly horizontal; a thick tilted polygon may
/// still support on one of its side faces.
pub fn is_point_supported(support: &CollisionObject, pos: Point) -> bool {
    match &support.shape {
        Shape::Cube => support.bbox.contains_pt_xy(pos),
        Shape::Cylinder(c) => dist_xy_less_than(pos, c.p1, c.r2),
        Shape::RotatedCylinder(c) => {
            if !c.is_vertical() {
                return false;
            }
            let top_radius = if c.p1.2 < c.p2.2 { c.r2 } else { c.r1 };
            dist_xy_less_than(pos, c.p1, top_radius)
        }
        Shape::Sphere(_) | Shape::Capsule(_) => false,
        Shape::Polygon(poly) => {
            if poly.normal.2.abs() >= FLAT_NORMAL_Z {
                return point_in_polygon_2d(pos.0, pos.1, &poly.points);
            }
            if !poly.is_thick() {
                return false;
            }
            thick_poly_to_sides(&poly.points, poly.normal, poly.thickness)
                .iter()
                .filter(|side| get_poly_norm(side).map_or(false, |n| n.2.abs() >= FLAT_NORMAL_Z))
                .any(|side| point_in_polygon_2d(pos.0, pos.1, side))
        }
    }
}

/// Objects that roll off a supporter when their centre of mass overhangs it.
pub fn is_rolling_cobj(cobj: &CollisionObject) -> bool {
    matches!(cobj.shape, Shape::Sphere(_))
}

/// Convex hull of points lying in a plane with the given `normal`, returned
/// counter-clockwise about the normal (Andrew's monotone chain).
///
/// Three or fewer points are returned unchanged.
pub fn convex_hull(pts: &[Point], normal: Point) -> Vec<Point> {
    if pts.len() <= 3 {
        return pts.to_vec();
    }
    // in-plane basis (u, v) with u x v along the normal
    let n = normalize_vector(normal).unwrap_or(PLUS_Z);
    let helper = if n.0.abs() < 0.9 { PLUS_X } else { (0.0, 1.0, 0.0) };
    let u = normalize_vector(cross_product(helper, n)).unwrap_or(PLUS_X);
    let v = cross_product(n, u);

    let mut sorted: Vec<(f64, f64, Point)> = pts.iter().map(|&p| (dot_product(p, u), dot_product(p, v), p)).collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let cross = |o: &(f64, f64, Point), a: &(f64, f64, Point), b: &(f64, f64, Point)| {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };
    let mut hull: Vec<(f64, f64, Point)> = Vec::with_capacity(2 * sorted.len());

    for p in sorted.iter() {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower_len = hull.len() + 1;

    for p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull.into_iter().map(|(_, _, p)| p).collect()
}

/// Axis an object tips about when its centre of mass hangs off `support_pt`.
/// Zero when the centre of mass lies along `gravity` from the support.
pub fn get_lever_rot_axis(support_pt: Point, center_of_mass: Point, gravity: Point) -> Point {
    normalize_vector(cross_product(sub_vectors(center_of_mass, support_pt), gravity)).unwrap_or(ZERO_VECTOR)
}

/// Closest point to `pt` on the boundary of `hull`.
pub fn get_hull_closest_pt(hull: &[Point], pt: Point) -> Point {
    let Some(&last) = hull.last() else {
        return pt;
    };
    let mut prev = last;
    let mut best = (f64::INFINITY, prev);

    for &cur in hull {
        let dist = pt_line_seg_dist(pt, prev, cur);
        if dist < best.0 {
            best = (dist, closest_pt_on_segment(pt, prev, cur));
        }
        prev = cur;
    }
    best.1
}

/// Pivot about which an object resting on `support_pts` would tip under
/// `gravity`, or `None` when the centre of mass is supported (or balanced
/// exactly over the pivot).
pub fn get_cobj_rot_axis(
    support_pts: &[Point],
    normal: Point,
    center_of_mass: Point,
    gravity: Point,
    toler: f64,
) -> Option<RotationPivot> {
    let closest_pt = match support_pts {
        [] => return None,
        [p] => *p,
        [a, b] => closest_pt_on_segment(center_of_mass, *a, *b),
        _ => {
            let hull = convex_hull(support_pts, normal);
            if point_in_convex_planar_polygon(&hull, normal, center_of_mass) {
                return None;
            }
            get_hull_closest_pt(&hull, center_of_mass)
        }
    };
    if dist_less_than(closest_pt, center_of_mass, toler) {
        return None;
    }
    let axis = get_lever_rot_axis(closest_pt, center_of_mass, gravity);
    if axis == ZERO_VECTOR {
        return None;
    }
    Some(RotationPivot { pt: closest_pt, axis })
}
