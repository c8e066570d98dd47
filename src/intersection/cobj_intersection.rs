use crate::geometry::{
    check_line_clip, circle_rect_intersect, clip_polygon_to_cube, gen_poly_planes, line_cylinder_intersect,
    line_line_dist, line_poly_intersect, line_sphere_intersect, line_thick_poly_intersect,
    pt_line_seg_dist_less_than, sphere_cube_intersect, sphere_ext_poly_intersect, sphere_intersect_cylinder,
    thick_poly_to_sides,
};
use crate::models::{BoundingBox, CollisionObject, Cylinder, Polygon, Shape, ShapeKind};
use crate::utils::{coord, dist_less_than, dist_xy_less_than, dot_product, Point};

/// Result of a shape/shape overlap test.
///
/// `Maybe` means the pair could not be proven disjoint; callers that need a safe
/// answer treat it as intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    No,
    Yes,
    Maybe,
}

impl Intersection {
    /// True for `Yes` and `Maybe`.
    pub fn is_possible(self) -> bool {
        self != Intersection::No
    }
}

impl From<bool> for Intersection {
    fn from(hit: bool) -> Self {
        if hit { Intersection::Yes } else { Intersection::No }
    }
}

fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Exact box/polygon overlap, including extruded polygons.
pub fn cube_polygon_intersect(bbox: &BoundingBox, poly: &Polygon) -> bool {
    if poly.points.iter().any(|&p| bbox.contains_pt(p)) {
        return true;
    }
    if edges(&poly.points).any(|(a, b)| check_line_clip(a, b, bbox)) {
        return true;
    }
    if !clip_polygon_to_cube(bbox, &poly.points).is_empty() {
        return true;
    }
    if !poly.is_thick() {
        return false;
    }
    let planes = gen_poly_planes(&poly.points, poly.normal, poly.thickness);

    if planes.iter().any(|face| edges(face).any(|(a, b)| check_line_clip(a, b, bbox))) {
        return true;
    }
    // box entirely inside the slab
    if sphere_ext_poly_intersect(&poly.points, poly.normal, bbox.center(), 0.0, poly.thickness) {
        return true;
    }
    thick_poly_to_sides(&poly.points, poly.normal, poly.thickness)
        .iter()
        .any(|side| !clip_polygon_to_cube(bbox, side).is_empty())
}

/// Projected circle/rectangle test for cylinders aligned with x, y or z. Any
/// other orientation is unresolved.
fn cylin_cube_int_aa_via_circle_rect(bbox: &BoundingBox, cylin: &Cylinder) -> Intersection {
    for dim in 0..3 {
        let (d1, d2) = ((dim + 1) % 3, (dim + 2) % 3);
        let aligned = coord(cylin.p1, d1) == coord(cylin.p2, d1) && coord(cylin.p1, d2) == coord(cylin.p2, d2);

        if !aligned {
            continue;
        }
        if circle_rect_intersect(cylin.p1, cylin.min_radius(), bbox, dim) {
            return Intersection::Yes;
        }
        if !circle_rect_intersect(cylin.p1, cylin.max_radius(), bbox, dim) {
            return Intersection::No;
        }
    }
    Intersection::Maybe
}

fn cylinder_of(cobj: &CollisionObject) -> &Cylinder {
    match &cobj.shape {
        Shape::Cylinder(c) | Shape::RotatedCylinder(c) | Shape::Capsule(c) => c,
        _ => unreachable!("cylinder test on a non-cylinder shape"),
    }
}

fn polygon_of(cobj: &CollisionObject) -> &Polygon {
    match &cobj.shape {
        Shape::Polygon(p) => p,
        _ => unreachable!("polygon test on a non-polygon shape"),
    }
}

fn cylin_cylin_int(a: &CollisionObject, b: &CollisionObject) -> Intersection {
    let (ca, cb) = (cylinder_of(a), cylinder_of(b));

    if line_line_dist(ca.p1, ca.p2, cb.p1, cb.p2) > ca.max_radius() + cb.max_radius() {
        return Intersection::No;
    }
    if a.line_intersect(cb.p1, cb.p2) || b.line_intersect(ca.p1, ca.p2) {
        return Intersection::Yes;
    }
    if cylin_cube_int_aa_via_circle_rect(&a.bbox, cb) == Intersection::No
        || cylin_cube_int_aa_via_circle_rect(&b.bbox, ca) == Intersection::No
    {
        return Intersection::No;
    }
    Intersection::Maybe
}

fn poly_cylin_int(p: &CollisionObject, c: &CollisionObject) -> Intersection {
    let (poly, cylin) = (polygon_of(p), cylinder_of(c));

    if p.line_intersect(cylin.p1, cylin.p2) {
        return Intersection::Yes;
    }
    if edges(&poly.points).any(|(e1, e2)| c.line_intersect(e1, e2)) {
        return Intersection::Yes;
    }
    if !cube_polygon_intersect(&c.bbox, poly) {
        return Intersection::No;
    }
    if cylin_cube_int_aa_via_circle_rect(&p.bbox, cylin) == Intersection::No {
        return Intersection::No;
    }
    Intersection::Maybe
}

/// Edges (and extruded side edges) of `p1` against `p2`, then containment of `p2`
/// inside thick `p1`.
fn poly_poly_int_test(p1: &CollisionObject, p2: &CollisionObject) -> bool {
    let (poly1, poly2) = (polygon_of(p1), polygon_of(p2));

    if edges(&poly1.points).any(|(a, b)| p2.line_intersect(a, b)) {
        return true;
    }
    if !poly1.is_thick() {
        return false;
    }
    let sides = thick_poly_to_sides(&poly1.points, poly1.normal, poly1.thickness);

    if sides.iter().any(|side| edges(side).any(|(a, b)| p2.line_intersect(a, b))) {
        return true;
    }
    sphere_ext_poly_intersect(&poly1.points, poly1.normal, poly2.points[0], 0.0, poly1.thickness)
}

fn poly_poly_int(a: &CollisionObject, b: &CollisionObject, toler: f64) -> Intersection {
    let (pa, pb) = (polygon_of(a), polygon_of(b));

    if pa.is_thick() && !cube_polygon_intersect(&b.bbox, pa) {
        return Intersection::No;
    }
    if pb.is_thick() && !cube_polygon_intersect(&a.bbox, pb) {
        return Intersection::No;
    }
    // nearly coplanar neighbours (roof panels and the like) count as connected
    let tilt = 1.0 - dot_product(pa.normal, pb.normal).abs();
    let poly_toler = toler.max((pa.thickness + pb.thickness) * tilt);

    if poly_toler > 0.0 {
        for &q in &pb.points {
            if pa.points.iter().any(|&p| dist_less_than(p, q, poly_toler)) {
                return Intersection::Yes;
            }
        }
        for (q1, q2) in edges(&pb.points) {
            for (p1, p2) in edges(&pa.points) {
                if pt_line_seg_dist_less_than(q1, p1, p2, poly_toler) || pt_line_seg_dist_less_than(p1, q1, q2, poly_toler) {
                    return Intersection::Yes;
                }
            }
        }
    }
    (poly_poly_int_test(b, a) || poly_poly_int_test(a, b)).into()
}

/// Sphere against the cylinder-family object `c`: box first, then the body.
fn coll_sphere_cylin_int(center: Point, radius: f64, c: &CollisionObject) -> bool {
    if !sphere_cube_intersect(center, radius, &c.bbox) {
        return false;
    }
    let cylin = cylinder_of(c);
    sphere_intersect_cylinder(center, radius, cylin.p1, cylin.p2, cylin.r1, cylin.r2)
}

/// Definite hit for a sphere whose centre lies within the z range of a vertical cylinder.
fn sphere_def_coll_vert_cylin(center: Point, radius: f64, cylin: &Cylinder, cylin_radius: f64) -> bool {
    let (z1, z2) = (cylin.p1.2.min(cylin.p2.2), cylin.p1.2.max(cylin.p2.2));
    center.2 >= z1 && center.2 <= z2 && dist_xy_less_than(center, cylin.p1, radius + cylin_radius)
}

/// Overlap test between two collision objects.
///
/// `toler` is signed: positive values shrink the effective shapes so touching
/// objects don't count, negative values grow them so they do. The result is
/// symmetric in its arguments.
///
/// # Arguments
/// * `a`, `b` - The objects to test
/// * `toler` - Signed slack applied to the box test and the radii
///
/// # Returns
/// `No`, `Yes` or, for the unresolved rotated-cylinder cases, `Maybe`.
pub fn intersects_cobj(a: &CollisionObject, b: &CollisionObject, toler: f64) -> Intersection {
    if b.kind() < a.kind() {
        return intersects_cobj(b, a, toler);
    }
    if !a.bbox.intersects(&b.bbox, toler) {
        return Intersection::No;
    }

    match (&a.shape, &b.shape) {
        (Shape::Cube, Shape::Cube) => Intersection::Yes,
        (Shape::Cube, Shape::Cylinder(c)) => circle_rect_intersect(c.p1, c.max_radius() - toler, &a.bbox, 2).into(),
        (Shape::Cube, Shape::Sphere(s)) => sphere_cube_intersect(s.center, s.radius - toler, &a.bbox).into(),
        (Shape::Cube, Shape::RotatedCylinder(c)) | (Shape::Cube, Shape::Capsule(c)) => {
            if b.kind() == ShapeKind::Capsule
                && (sphere_cube_intersect(c.p1, c.r1 - toler, &a.bbox) || sphere_cube_intersect(c.p2, c.r2 - toler, &a.bbox))
            {
                return Intersection::Yes;
            }
            if check_line_clip(c.p1, c.p2, &a.bbox) {
                return Intersection::Yes;
            }
            cylin_cube_int_aa_via_circle_rect(&a.bbox, c)
        }
        (Shape::Cube, Shape::Polygon(p)) => cube_polygon_intersect(&a.bbox, p).into(),

        (Shape::Cylinder(ca), Shape::Cylinder(cb)) => {
            // the box test already guarantees z overlap
            dist_xy_less_than(ca.p1, cb.p1, ca.max_radius() + cb.max_radius() - toler).into()
        }
        (Shape::Cylinder(c), Shape::Sphere(s)) | (Shape::Sphere(s), Shape::RotatedCylinder(c)) => {
            let sr = s.radius - toler;
            if a.kind() == ShapeKind::Cylinder && sphere_def_coll_vert_cylin(s.center, sr, c, c.max_radius() - toler) {
                return Intersection::Yes;
            }
            let cylin_obj = if a.kind() == ShapeKind::Sphere { b } else { a };
            coll_sphere_cylin_int(s.center, sr, cylin_obj).into()
        }
        (Shape::Cylinder(c), Shape::Capsule(cap)) | (Shape::RotatedCylinder(c), Shape::Capsule(cap)) => {
            let (sr1, sr2) = (cap.r1 - toler, cap.r2 - toler);

            if a.kind() == ShapeKind::Cylinder
                && (sphere_def_coll_vert_cylin(cap.p1, sr1, c, c.max_radius())
                    || sphere_def_coll_vert_cylin(cap.p2, sr2, c, c.max_radius()))
            {
                return Intersection::Yes;
            }
            if coll_sphere_cylin_int(cap.p1, sr1, a) || coll_sphere_cylin_int(cap.p2, sr2, a) {
                return Intersection::Yes;
            }
            cylin_cylin_int(b, a)
        }
        (Shape::Cylinder(_), Shape::RotatedCylinder(_)) | (Shape::RotatedCylinder(_), Shape::RotatedCylinder(_)) => {
            cylin_cylin_int(b, a)
        }
        (Shape::Cylinder(_), Shape::Polygon(_)) | (Shape::RotatedCylinder(_), Shape::Polygon(_)) => poly_cylin_int(b, a),

        (Shape::Sphere(sa), Shape::Sphere(sb)) => dist_less_than(sa.center, sb.center, sa.radius + sb.radius - toler).into(),
        (Shape::Sphere(s), Shape::Capsule(cap)) => {
            if dist_less_than(s.center, cap.p1, cap.r1 - toler + s.radius)
                || dist_less_than(s.center, cap.p2, cap.r2 - toler + s.radius)
            {
                return Intersection::Yes;
            }
            coll_sphere_cylin_int(s.center, s.radius - toler, b).into()
        }
        (Shape::Sphere(s), Shape::Polygon(p)) => {
            sphere_ext_poly_intersect(&p.points, p.normal, s.center, s.radius - toler, p.thickness).into()
        }

        (Shape::Polygon(p), Shape::Capsule(cap)) => {
            if sphere_ext_poly_intersect(&p.points, p.normal, cap.p1, cap.r1 - toler, p.thickness)
                || sphere_ext_poly_intersect(&p.points, p.normal, cap.p2, cap.r2 - toler, p.thickness)
            {
                return Intersection::Yes;
            }
            poly_cylin_int(a, b)
        }
        (Shape::Polygon(_), Shape::Polygon(_)) => poly_poly_int(a, b, toler),

        (Shape::Capsule(ca), Shape::Capsule(cb)) => {
            let sa = [(ca.p1, ca.r1 - toler), (ca.p2, ca.r2 - toler)];
            let sb = [(cb.p1, cb.r1 - toler), (cb.p2, cb.r2 - toler)];

            for &(pa, ra) in &sa {
                if sb.iter().any(|&(pb, rb)| dist_less_than(pa, pb, ra + rb)) {
                    return Intersection::Yes;
                }
            }
            for i in 0..2 {
                if coll_sphere_cylin_int(sa[i].0, sa[i].1, b) || coll_sphere_cylin_int(sb[i].0, sb[i].1, a) {
                    return Intersection::Yes;
                }
            }
            cylin_cylin_int(b, a)
        }
        _ => unreachable!("non-canonical shape pair {:?} / {:?}", a.kind(), b.kind()),
    }
}

impl CollisionObject {
    /// See [`intersects_cobj`].
    pub fn intersects_cobj(&self, other: &CollisionObject, toler: f64) -> Intersection {
        intersects_cobj(self, other, toler)
    }

    /// Whether the segment `[p1, p2]` touches the solid.
    pub fn line_intersect(&self, p1: Point, p2: Point) -> bool {
        if !check_line_clip(p1, p2, &self.bbox) {
            return false;
        }
        match &self.shape {
            Shape::Cube => true,
            Shape::Sphere(s) => line_sphere_intersect(p1, p2, s.center, s.radius),
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) => line_cylinder_intersect(p1, p2, c),
            Shape::Capsule(c) => {
                line_sphere_intersect(p1, p2, c.p1, c.r1)
                    || line_sphere_intersect(p1, p2, c.p2, c.r2)
                    || line_cylinder_intersect(p1, p2, c)
            }
            Shape::Polygon(poly) if poly.is_thick() => {
                line_thick_poly_intersect(p1, p2, &poly.points, poly.normal, poly.thickness)
            }
            Shape::Polygon(poly) => line_poly_intersect(p1, p2, &poly.points, poly.normal),
        }
    }

    /// Whether a sphere overlaps the solid.
    pub fn sphere_intersects(&self, center: Point, radius: f64) -> bool {
        match &self.shape {
            Shape::Cube => sphere_cube_intersect(center, radius, &self.bbox),
            Shape::Sphere(s) => dist_less_than(center, s.center, radius + s.radius),
            Shape::Cylinder(_) | Shape::RotatedCylinder(_) => coll_sphere_cylin_int(center, radius, self),
            Shape::Capsule(c) => {
                dist_less_than(center, c.p1, radius + c.r1)
                    || dist_less_than(center, c.p2, radius + c.r2)
                    || coll_sphere_cylin_int(center, radius, self)
            }
            Shape::Polygon(poly) => sphere_ext_poly_intersect(&poly.points, poly.normal, center, radius, poly.thickness),
        }
    }
}
