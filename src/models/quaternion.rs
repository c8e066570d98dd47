use crate::utils::{add_vectors, sub_vectors, vector_magnitude, Point, GEOM_EPSILON};

/// Unit quaternion used to rotate collision object points about arbitrary axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Creates a new identity quaternion (no rotation)
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a quaternion from axis-angle representation.
    ///
    /// Returns `None` for a zero-length axis, since no rotation is defined about it.
    pub fn from_axis_angle(axis: Point, angle: f64) -> Option<Self> {
        let magnitude = vector_magnitude(axis);

        if magnitude < GEOM_EPSILON {
            return None;
        }
        let half_angle = angle / 2.0;
        let sin_half = half_angle.sin();

        Some(Quaternion {
            w: half_angle.cos(),
            x: axis.0 / magnitude * sin_half,
            y: axis.1 / magnitude * sin_half,
            z: axis.2 / magnitude * sin_half,
        })
    }

    /// Returns the length/magnitude of the quaternion
    pub fn magnitude(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a normalized version of the quaternion
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < GEOM_EPSILON {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Multiplies two quaternions (composition of rotations)
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Rotates a vector about the origin: q * p * q^-1
    pub fn rotate_vector(&self, v: Point) -> Point {
        let p = Quaternion { w: 0.0, x: v.0, y: v.1, z: v.2 };
        let q = self.normalized();
        let rotated = q.multiply(&p).multiply(&q.conjugate());

        (rotated.x, rotated.y, rotated.z)
    }

    /// Rotates a point about `pivot`.
    pub fn rotate_point_about(&self, point: Point, pivot: Point) -> Point {
        add_vectors(self.rotate_vector(sub_vectors(point, pivot)), pivot)
    }
}
