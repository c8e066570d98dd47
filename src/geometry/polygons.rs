use crate::geometry::{closest_pts_segment_segment, pt_line_seg_dist};
use crate::models::BoundingBox;
use crate::utils::{
    add_vectors, coord, cross_product, dot_product, lerp_points, max_dim, normalize_vector,
    scale_vector, sub_vectors, vector_magnitude, Point, GEOM_EPSILON, MIN_POLY_THICK,
};

/// Unnormalized Newell normal; its length is twice the polygon area.
fn newell_normal(points: &[Point]) -> Point {
    let mut n = (0.0, 0.0, 0.0);
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        n.0 += (a.1 - b.1) * (a.2 + b.2);
        n.1 += (a.2 - b.2) * (a.0 + b.0);
        n.2 += (a.0 - b.0) * (a.1 + b.1);
    }
    n
}

/// Unit normal of a planar polygon (right-hand winding), or `None` if degenerate.
pub fn get_poly_norm(points: &[Point]) -> Option<Point> {
    if points.len() < 3 {
        return None;
    }
    normalize_vector(newell_normal(points)).ok()
}

pub fn polygon_area(points: &[Point]) -> f64 {
    0.5 * vector_magnitude(newell_normal(points))
}

pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * vector_magnitude(cross_product(sub_vectors(b, a), sub_vectors(c, a)))
}

pub fn triangle_centroid(a: Point, b: Point, c: Point) -> Point {
    scale_vector(add_vectors(add_vectors(a, b), c), 1.0 / 3.0)
}

fn point_in_polygon_dims(u: f64, v: f64, points: &[Point], du: usize, dv: usize) -> bool {
    let mut inside = false;
    let n = points.len();
    let mut j = n - 1;

    for i in 0..n {
        let (ui, vi) = (coord(points[i], du), coord(points[i], dv));
        let (uj, vj) = (coord(points[j], du), coord(points[j], dv));

        if (vi > v) != (vj > v) && u < (uj - ui) * (v - vi) / (vj - vi) + ui {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Even-odd point-in-polygon test in the xy plane.
pub fn point_in_polygon_2d(x: f64, y: f64, points: &[Point]) -> bool {
    !points.is_empty() && point_in_polygon_dims(x, y, points, 0, 1)
}

/// Point-in-polygon for a point assumed to lie in the polygon's plane; projects
/// out the dominant axis of `normal`.
pub fn point_in_planar_polygon(p: Point, points: &[Point], normal: Point) -> bool {
    if points.is_empty() {
        return false;
    }
    let drop = max_dim(normal);
    let (du, dv) = ((drop + 1) % 3, (drop + 2) % 3);
    point_in_polygon_dims(coord(p, du), coord(p, dv), points, du, dv)
}

/// The two faces of an extruded polygon, offset by half the thickness to either
/// side of the defining points.
pub fn gen_poly_planes(points: &[Point], normal: Point, thickness: f64) -> [Vec<Point>; 2] {
    let offset = scale_vector(normal, 0.5 * thickness);
    [
        points.iter().map(|&p| sub_vectors(p, offset)).collect(),
        points.iter().map(|&p| add_vectors(p, offset)).collect(),
    ]
}

/// All faces of an extruded polygon: both caps followed by one quad per edge.
pub fn thick_poly_to_sides(points: &[Point], normal: Point, thickness: f64) -> Vec<Vec<Point>> {
    let [bot, top] = gen_poly_planes(points, normal, thickness);
    let n = points.len();
    let mut sides = Vec::with_capacity(n + 2);

    for i in 0..n {
        let j = (i + 1) % n;
        sides.push(vec![bot[i], bot[j], top[j], top[i]]);
    }
    sides.push(bot);
    sides.push(top);
    sides
}

/// Sutherland-Hodgman clip of a polygon against the six half-spaces of a box.
/// An empty result means the polygon is entirely outside.
pub fn clip_polygon_to_cube(bbox: &BoundingBox, points: &[Point]) -> Vec<Point> {
    let mut poly: Vec<Point> = points.to_vec();

    for dim in 0..3 {
        for side in 0..2 {
            if poly.is_empty() {
                return poly;
            }
            let bound = bbox.d[dim][side];
            let inside = |p: Point| if side == 0 { coord(p, dim) >= bound } else { coord(p, dim) <= bound };
            let input = std::mem::take(&mut poly);
            let n = input.len();

            for i in 0..n {
                let cur = input[i];
                let prev = input[(i + n - 1) % n];
                let (cur_in, prev_in) = (inside(cur), inside(prev));

                if cur_in != prev_in {
                    let (vp, vc) = (coord(prev, dim), coord(cur, dim));
                    let t = (bound - vp) / (vc - vp);
                    poly.push(lerp_points(prev, cur, t));
                }
                if cur_in {
                    poly.push(cur);
                }
            }
        }
    }
    poly
}

/// Segment against a thin planar polygon.
pub fn line_poly_intersect(p1: Point, p2: Point, points: &[Point], normal: Point) -> bool {
    let d1 = dot_product(sub_vectors(p1, points[0]), normal);
    let d2 = dot_product(sub_vectors(p2, points[0]), normal);

    if (d1 > GEOM_EPSILON && d2 > GEOM_EPSILON) || (d1 < -GEOM_EPSILON && d2 < -GEOM_EPSILON) {
        return false;
    }
    if (d1 - d2).abs() < GEOM_EPSILON {
        // segment lies in the polygon plane
        if point_in_planar_polygon(p1, points, normal) || point_in_planar_polygon(p2, points, normal) {
            return true;
        }
        let n = points.len();
        return (0..n).any(|i| closest_pts_segment_segment(p1, p2, points[i], points[(i + 1) % n]).0 < GEOM_EPSILON);
    }
    let hit = lerp_points(p1, p2, d1 / (d1 - d2));
    point_in_planar_polygon(hit, points, normal)
}

/// Sphere against a polygon extruded by `thickness` along its normal (centered on
/// the defining points). With `radius == 0` this is a point-in-prism test, which
/// is always false for thin polygons.
pub fn sphere_ext_poly_intersect(points: &[Point], normal: Point, center: Point, radius: f64, thickness: f64) -> bool {
    if points.len() < 3 {
        return false;
    }
    let half = if thickness > MIN_POLY_THICK { 0.5 * thickness } else { 0.0 };
    let h = dot_product(sub_vectors(center, points[0]), normal);
    let hz = (h.abs() - half).max(0.0);
    let proj = sub_vectors(center, scale_vector(normal, h));
    let inside = point_in_planar_polygon(proj, points, normal);

    if radius <= 0.0 {
        return half > 0.0 && hz <= 0.0 && inside;
    }
    if hz >= radius {
        return false;
    }
    if inside {
        return true;
    }
    let n = points.len();
    let edge_dist = (0..n)
        .map(|i| pt_line_seg_dist(proj, points[i], points[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min);
    edge_dist * edge_dist + hz * hz < radius * radius
}

/// Segment against a polygon extruded by `thickness`.
pub fn line_thick_poly_intersect(p1: Point, p2: Point, points: &[Point], normal: Point, thickness: f64) -> bool {
    if sphere_ext_poly_intersect(points, normal, p1, 0.0, thickness)
        || sphere_ext_poly_intersect(points, normal, p2, 0.0, thickness)
    {
        return true;
    }
    thick_poly_to_sides(points, normal, thickness).iter().any(|face| {
        get_poly_norm(face).map_or(false, |face_norm| line_poly_intersect(p1, p2, face, face_norm))
    })
}

/// Whether `p`, projected along `normal`, lies inside the convex polygon `hull`
/// (either winding).
pub fn point_in_convex_planar_polygon(hull: &[Point], normal: Point, p: Point) -> bool {
    if hull.len() < 3 {
        return false;
    }
    let n = hull.len();
    let (mut pos, mut neg) = (false, false);

    for i in 0..n {
        let (a, b) = (hull[i], hull[(i + 1) % n]);
        let side = dot_product(normal, cross_product(sub_vectors(b, a), sub_vectors(p, a)));
        if side > 0.0 {
            pos = true;
        } else if side < 0.0 {
            neg = true;
        }
        if pos && neg {
            return false;
        }
    }
    true
}
