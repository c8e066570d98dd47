// src/utils/vector_math.rs
//
// Tuple-based 3D vector helpers used throughout the geometry and simulation code.

use crate::utils::GEOM_EPSILON;

/// A point or vector in world space.
pub type Point = (f64, f64, f64);

pub const ZERO_VECTOR: Point = (0.0, 0.0, 0.0);
pub const PLUS_X: Point = (1.0, 0.0, 0.0);
pub const PLUS_Y: Point = (0.0, 1.0, 0.0);
pub const PLUS_Z: Point = (0.0, 0.0, 1.0);

/// Calculates the cross product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_cobj_physics::utils::cross_product;
///
/// let v1 = (1.0, 0.0, 0.0);
/// let v2 = (0.0, 1.0, 0.0);
/// let result = cross_product(v1, v2);
///
/// assert_eq!(result, (0.0, 0.0, 1.0));
/// ```
pub fn cross_product(v1: Point, v2: Point) -> Point {
    (
        v1.1 * v2.2 - v1.2 * v2.1,
        v1.2 * v2.0 - v1.0 * v2.2,
        v1.0 * v2.1 - v1.1 * v2.0
    )
}

/// Calculates the dot product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_cobj_physics::utils::dot_product;
///
/// assert_eq!(dot_product((1.0, 2.0, 3.0), (4.0, 5.0, 6.0)), 32.0);
/// ```
pub fn dot_product(v1: Point, v2: Point) -> f64 {
    v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2
}

/// Calculates the magnitude (length) of a 3D vector.
pub fn vector_magnitude(v: Point) -> f64 {
    dot_product(v, v).sqrt()
}

/// Normalizes a 3D vector (makes it a unit vector).
///
/// # Errors
/// Returns an error if the input is a zero vector.
///
/// # Example
/// ```
/// use rs_cobj_physics::utils::normalize_vector;
///
/// let normalized = normalize_vector((3.0, 0.0, 4.0)).unwrap();
///
/// assert!((normalized.0 - 0.6).abs() < 1e-10);
/// assert!((normalized.2 - 0.8).abs() < 1e-10);
/// ```
pub fn normalize_vector(v: Point) -> Result<Point, &'static str> {
    let magnitude = vector_magnitude(v);

    if magnitude < GEOM_EPSILON {
        return Err("Cannot normalize a zero vector");
    }

    Ok(scale_vector(v, 1.0 / magnitude))
}

pub fn add_vectors(a: Point, b: Point) -> Point {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

pub fn sub_vectors(a: Point, b: Point) -> Point {
    (a.0 - b.0, a.1 - b.1, a.2 - b.2)
}

pub fn scale_vector(v: Point, s: f64) -> Point {
    (v.0 * s, v.1 * s, v.2 * s)
}

pub fn negate_vector(v: Point) -> Point {
    (-v.0, -v.1, -v.2)
}

/// Linear interpolation `a + t (b - a)`.
pub fn lerp_points(a: Point, b: Point, t: f64) -> Point {
    add_vectors(a, scale_vector(sub_vectors(b, a), t))
}

pub fn magnitude_squared(v: Point) -> f64 {
    dot_product(v, v)
}

pub fn distance_squared(a: Point, b: Point) -> f64 {
    magnitude_squared(sub_vectors(a, b))
}

/// Strict `|a - b| < dist`.
pub fn dist_less_than(a: Point, b: Point, dist: f64) -> bool {
    dist > 0.0 && distance_squared(a, b) < dist * dist
}

/// Strict `|a - b| < dist` measured in the xy plane only.
pub fn dist_xy_less_than(a: Point, b: Point, dist: f64) -> bool {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    dist > 0.0 && dx * dx + dy * dy < dist * dist
}

/// Component `dim` (0 = x, 1 = y, 2 = z) of a point.
pub fn coord(p: Point, dim: usize) -> f64 {
    match dim {
        0 => p.0,
        1 => p.1,
        _ => p.2,
    }
}

/// Returns `p` with component `dim` replaced by `val`.
pub fn with_coord(p: Point, dim: usize, val: f64) -> Point {
    match dim {
        0 => (val, p.1, p.2),
        1 => (p.0, val, p.2),
        _ => (p.0, p.1, val),
    }
}

/// Index of the largest-magnitude component of `v`.
pub fn max_dim(v: Point) -> usize {
    let (ax, ay, az) = (v.0.abs(), v.1.abs(), v.2.abs());
    if ax >= ay && ax >= az {
        0
    } else if ay >= az {
        1
    } else {
        2
    }
}
