use crate::errors::CobjError;
use crate::geometry::{gen_poly_planes, get_poly_norm, polygon_area};
use crate::models::BoundingBox;
use crate::utils::{
    add_vectors, coord, distance_squared, lerp_points, magnitude_squared, sub_vectors, Point,
    GEOM_EPSILON, MIN_POLY_THICK,
};
use std::f64::consts::PI;

/// Shape kinds in canonical dispatch order. Pair tests are only implemented for
/// `(a, b)` with `a <= b`; the other half is reached by swapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Cube,
    Cylinder,
    Sphere,
    RotatedCylinder,
    Polygon,
    Capsule,
}

/// Axis segment `p1 -> p2` with an end radius at each point. Used by the
/// vertical, rotated and capsule variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub p1: Point,
    pub p2: Point,
    pub r1: f64,
    pub r2: f64,
}

impl Cylinder {
    pub fn max_radius(&self) -> f64 {
        self.r1.max(self.r2)
    }

    pub fn min_radius(&self) -> f64 {
        self.r1.min(self.r2)
    }

    pub fn length(&self) -> f64 {
        distance_squared(self.p1, self.p2).sqrt()
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.0 == self.p2.0 && self.p1.1 == self.p2.1
    }

    pub fn is_tapered(&self) -> bool {
        self.r1 != self.r2
    }

    fn shift_by(&mut self, delta: Point) {
        self.p1 = add_vectors(self.p1, delta);
        self.p2 = add_vectors(self.p2, delta);
    }

    /// Exact box of the frustum: each end disc with radius `r` and unit axis `u`
    /// extends `r * sqrt(1 - u_i^2)` along dimension `i`.
    fn frustum_bbox(&self) -> BoundingBox {
        let axis = sub_vectors(self.p2, self.p1);
        let len_sq = magnitude_squared(axis);
        let mut bbox = BoundingBox::from_points(&[self.p1, self.p2]);

        for dim in 0..3 {
            let u = if len_sq > GEOM_EPSILON { coord(axis, dim).powi(2) / len_sq } else { 0.0 };
            let spread = (1.0 - u).max(0.0).sqrt();
            let (v1, v2) = (coord(self.p1, dim), coord(self.p2, dim));
            bbox.d[dim][0] = (v1 - self.r1 * spread).min(v2 - self.r2 * spread);
            bbox.d[dim][1] = (v1 + self.r1 * spread).max(v2 + self.r2 * spread);
        }
        bbox
    }

    /// Volume of the (possibly tapered) body.
    pub fn frustum_volume(&self) -> f64 {
        PI * self.length() * (self.r1 * self.r1 + self.r1 * self.r2 + self.r2 * self.r2) / 3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point,
    pub radius: f64,
}

/// Planar triangle or quad, optionally extruded symmetrically along its normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub normal: Point,
    pub thickness: f64,
    /// Set when the polygon was produced by rotating a cube.
    pub was_cube: bool,
}

impl Polygon {
    pub fn new(points: Vec<Point>, thickness: f64) -> Result<Self, CobjError> {
        if points.len() < 3 || points.len() > 4 {
            return Err(CobjError::UnsupportedPointCount(points.len()));
        }
        if !(thickness >= 0.0) || !thickness.is_finite() {
            return Err(CobjError::InvalidDimensions);
        }
        let normal = get_poly_norm(&points).ok_or(CobjError::DegeneratePolygon)?;
        Ok(Polygon { points, normal, thickness, was_cube: false })
    }

    pub fn is_thick(&self) -> bool {
        self.thickness > MIN_POLY_THICK
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Every corner of the solid: both faces when thick, the points otherwise.
    pub fn all_points(&self) -> Vec<Point> {
        if !self.is_thick() {
            return self.points.clone();
        }
        let [bot, top] = gen_poly_planes(&self.points, self.normal, self.thickness);
        bot.into_iter().chain(top).collect()
    }

    /// Whether the face is horizontal, so objects can rest flat on it.
    pub fn is_horizontal(&self) -> bool {
        self.normal.0 == 0.0 && self.normal.1 == 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// The geometry is the object's bounding box.
    Cube,
    /// Vertical cylinder; `p1` is the bottom end.
    Cylinder(Cylinder),
    RotatedCylinder(Cylinder),
    Sphere(Sphere),
    Polygon(Polygon),
    /// Two sphere caps joined by a (possibly tapered) body.
    Capsule(Cylinder),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CobjStatus {
    Static,
    Destroyed,
}

/// A collision object: one solid shape plus the state the movable-object
/// simulators need.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionObject {
    /// Stable id assigned by the world; 0 until added.
    pub id: usize,
    pub shape: Shape,
    pub bbox: BoundingBox,
    pub density: f64,
    /// Vertical velocity, negative when falling.
    pub v_fall: f64,
    pub movable: bool,
    pub status: CobjStatus,
    pub platform_id: Option<usize>,
}

fn check_finite(points: &[Point]) -> Result<(), CobjError> {
    if points.iter().all(|p| p.0.is_finite() && p.1.is_finite() && p.2.is_finite()) {
        Ok(())
    } else {
        Err(CobjError::InvalidDimensions)
    }
}

fn check_radii(r1: f64, r2: f64) -> Result<(), CobjError> {
    if !(r1 >= 0.0 && r2 >= 0.0) || !(r1.max(r2) > 0.0) || !r1.is_finite() || !r2.is_finite() {
        return Err(CobjError::InvalidDimensions);
    }
    Ok(())
}

impl CollisionObject {
    fn from_shape(shape: Shape) -> Self {
        let mut cobj = CollisionObject {
            id: 0,
            shape,
            bbox: BoundingBox::new((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            density: 1.0,
            v_fall: 0.0,
            movable: false,
            status: CobjStatus::Static,
            platform_id: None,
        };
        cobj.bbox = cobj.calc_bbox();
        cobj
    }

    /// Axis-aligned box between two corners. Every extent must be positive.
    pub fn new_cube(a: Point, b: Point) -> Result<Self, CobjError> {
        check_finite(&[a, b])?;
        let bbox = BoundingBox::new(a, b);
        if (0..3).any(|dim| bbox.extent(dim) <= 0.0) {
            return Err(CobjError::InvalidDimensions);
        }
        let mut cobj = Self::from_shape(Shape::Cube);
        cobj.bbox = bbox;
        Ok(cobj)
    }

    pub fn new_sphere(center: Point, radius: f64) -> Result<Self, CobjError> {
        check_finite(&[center])?;
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(CobjError::InvalidDimensions);
        }
        Ok(Self::from_shape(Shape::Sphere(Sphere { center, radius })))
    }

    /// Cylinder from `p1` (radius `r1`) to `p2` (radius `r2`). A vertical axis
    /// gives a `Cylinder` with its bottom end first; any other axis gives a
    /// `RotatedCylinder`.
    pub fn new_cylinder(p1: Point, p2: Point, r1: f64, r2: f64) -> Result<Self, CobjError> {
        check_finite(&[p1, p2])?;
        check_radii(r1, r2)?;
        if distance_squared(p1, p2) < GEOM_EPSILON {
            return Err(CobjError::InvalidDimensions);
        }
        let cylin = Cylinder { p1, p2, r1, r2 };

        if cylin.is_vertical() {
            let cylin = if p1.2 > p2.2 { Cylinder { p1: p2, p2: p1, r1: r2, r2: r1 } } else { cylin };
            Ok(Self::from_shape(Shape::Cylinder(cylin)))
        } else {
            Ok(Self::from_shape(Shape::RotatedCylinder(cylin)))
        }
    }

    pub fn new_capsule(p1: Point, p2: Point, r1: f64, r2: f64) -> Result<Self, CobjError> {
        check_finite(&[p1, p2])?;
        check_radii(r1, r2)?;
        Ok(Self::from_shape(Shape::Capsule(Cylinder { p1, p2, r1, r2 })))
    }

    /// Triangle or quad; `thickness` of zero makes a thin polygon.
    pub fn new_polygon(points: Vec<Point>, thickness: f64) -> Result<Self, CobjError> {
        check_finite(&points)?;
        Ok(Self::from_shape(Shape::Polygon(Polygon::new(points, thickness)?)))
    }

    pub fn with_density(mut self, density: f64) -> Result<Self, CobjError> {
        if !(density > 0.0) || !density.is_finite() {
            return Err(CobjError::InvalidDensity);
        }
        self.density = density;
        Ok(self)
    }

    pub fn movable(mut self) -> Self {
        self.movable = true;
        self
    }

    pub fn with_platform(mut self, platform_id: usize) -> Self {
        self.platform_id = Some(platform_id);
        self
    }

    pub fn kind(&self) -> ShapeKind {
        match self.shape {
            Shape::Cube => ShapeKind::Cube,
            Shape::Cylinder(_) => ShapeKind::Cylinder,
            Shape::RotatedCylinder(_) => ShapeKind::RotatedCylinder,
            Shape::Sphere(_) => ShapeKind::Sphere,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Capsule(_) => ShapeKind::Capsule,
        }
    }

    /// The cylinder payload of the vertical, rotated and capsule variants.
    pub fn cylinder(&self) -> Option<&Cylinder> {
        match &self.shape {
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) | Shape::Capsule(c) => Some(c),
            _ => None,
        }
    }

    /// Tight axis-aligned box of the current geometry.
    pub fn calc_bbox(&self) -> BoundingBox {
        match &self.shape {
            Shape::Cube => self.bbox,
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) => c.frustum_bbox(),
            Shape::Sphere(s) => BoundingBox::from_sphere(s.center, s.radius),
            Shape::Capsule(c) => {
                BoundingBox::from_sphere(c.p1, c.r1).union_with(&BoundingBox::from_sphere(c.p2, c.r2))
            }
            Shape::Polygon(poly) => BoundingBox::from_points(&poly.all_points()),
        }
    }

    /// Translates the geometry and its box. Indexed objects must be moved through
    /// the world instead.
    pub fn shift_by(&mut self, delta: Point) {
        match &mut self.shape {
            Shape::Cube => {}
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) | Shape::Capsule(c) => c.shift_by(delta),
            Shape::Sphere(s) => s.center = add_vectors(s.center, delta),
            Shape::Polygon(poly) => {
                for p in poly.points.iter_mut() {
                    *p = add_vectors(*p, delta);
                }
            }
        }
        self.bbox = self.bbox.translated(delta);
    }

    pub fn center_pt(&self) -> Point {
        match &self.shape {
            Shape::Sphere(s) => s.center,
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) | Shape::Capsule(c) => lerp_points(c.p1, c.p2, 0.5),
            _ => self.bbox.center(),
        }
    }

    /// Radius of a sphere around `center_pt()` that encloses the object.
    pub fn bsphere_radius(&self) -> f64 {
        match &self.shape {
            Shape::Sphere(s) => s.radius,
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) => {
                (0.25 * c.length().powi(2) + c.max_radius().powi(2)).sqrt()
            }
            Shape::Capsule(c) => 0.5 * c.length() + c.max_radius(),
            _ => 0.5 * self.bbox.diagonal_length(),
        }
    }

    pub fn volume(&self) -> f64 {
        match &self.shape {
            Shape::Cube => (0..3).map(|dim| self.bbox.extent(dim)).product(),
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) => c.frustum_volume(),
            Shape::Sphere(s) => 4.0 / 3.0 * PI * s.radius.powi(3),
            Shape::Capsule(c) => c.frustum_volume() + 2.0 / 3.0 * PI * (c.r1.powi(3) + c.r2.powi(3)),
            Shape::Polygon(poly) => poly.area() * poly.thickness.max(MIN_POLY_THICK),
        }
    }

    pub fn mass(&self) -> f64 {
        self.density * self.volume()
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn is_active(&self) -> bool {
        self.status == CobjStatus::Static
    }

    pub fn top(&self) -> f64 {
        self.bbox.d[2][1]
    }

    pub fn bottom(&self) -> f64 {
        self.bbox.d[2][0]
    }

    pub fn height(&self) -> f64 {
        self.bbox.height()
    }

    /// Whether the top face is flat and horizontal: cubes, vertical cylinders and
    /// horizontal polygons.
    pub fn is_flat_top(&self) -> bool {
        match &self.shape {
            Shape::Cube | Shape::Cylinder(_) => true,
            Shape::Polygon(poly) => poly.is_horizontal(),
            _ => false,
        }
    }
}
