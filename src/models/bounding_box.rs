use crate::utils::{coord, Point};

/// Axis-aligned box stored per dimension as `d[dim] = [min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub d: [[f64; 2]; 3],
}

impl BoundingBox {
    /// Creates a box from two opposite corners (in any order).
    pub fn new(a: Point, b: Point) -> Self {
        let mut d = [[0.0; 2]; 3];
        for (dim, range) in d.iter_mut().enumerate() {
            let (va, vb) = (coord(a, dim), coord(b, dim));
            *range = [va.min(vb), va.max(vb)];
        }
        BoundingBox { d }
    }

    /// Tight box around a set of points; a single point yields a zero-size box.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bbox = BoundingBox { d: [[f64::INFINITY, f64::NEG_INFINITY]; 3] };
        for &p in points {
            bbox.add_point(p);
        }
        bbox
    }

    /// Box around a sphere.
    pub fn from_sphere(center: Point, radius: f64) -> Self {
        BoundingBox::new(
            (center.0 - radius, center.1 - radius, center.2 - radius),
            (center.0 + radius, center.1 + radius, center.2 + radius),
        )
    }

    pub fn add_point(&mut self, p: Point) {
        for dim in 0..3 {
            let v = coord(p, dim);
            self.d[dim][0] = self.d[dim][0].min(v);
            self.d[dim][1] = self.d[dim][1].max(v);
        }
    }

    pub fn min(&self) -> Point {
        (self.d[0][0], self.d[1][0], self.d[2][0])
    }

    pub fn max(&self) -> Point {
        (self.d[0][1], self.d[1][1], self.d[2][1])
    }

    pub fn center(&self) -> Point {
        (
            0.5 * (self.d[0][0] + self.d[0][1]),
            0.5 * (self.d[1][0] + self.d[1][1]),
            0.5 * (self.d[2][0] + self.d[2][1]),
        )
    }

    pub fn extent(&self, dim: usize) -> f64 {
        self.d[dim][1] - self.d[dim][0]
    }

    pub fn height(&self) -> f64 {
        self.extent(2)
    }

    /// Overlap test with signed slack: positive `toler` shrinks (touching boxes
    /// don't intersect), negative grows (touching boxes do).
    pub fn intersects(&self, other: &BoundingBox, toler: f64) -> bool {
        for dim in 0..3 {
            if other.d[dim][0] >= self.d[dim][1] - toler || other.d[dim][1] <= self.d[dim][0] + toler {
                return false;
            }
        }
        true
    }

    /// Inclusive containment.
    pub fn contains_pt(&self, p: Point) -> bool {
        (0..3).all(|dim| {
            let v = coord(p, dim);
            v >= self.d[dim][0] && v <= self.d[dim][1]
        })
    }

    pub fn contains_pt_xy(&self, p: Point) -> bool {
        p.0 >= self.d[0][0] && p.0 <= self.d[0][1] && p.1 >= self.d[1][0] && p.1 <= self.d[1][1]
    }

    /// Closest point of the box to `p` (`p` itself when inside).
    pub fn closest_point(&self, p: Point) -> Point {
        (
            p.0.clamp(self.d[0][0], self.d[0][1]),
            p.1.clamp(self.d[1][0], self.d[1][1]),
            p.2.clamp(self.d[2][0], self.d[2][1]),
        )
    }

    pub fn translated(&self, delta: Point) -> Self {
        let mut out = *self;
        for dim in 0..3 {
            let v = coord(delta, dim);
            out.d[dim][0] += v;
            out.d[dim][1] += v;
        }
        out
    }

    pub fn union_with(&self, other: &BoundingBox) -> Self {
        let mut out = *self;
        for dim in 0..3 {
            out.d[dim][0] = out.d[dim][0].min(other.d[dim][0]);
            out.d[dim][1] = out.d[dim][1].max(other.d[dim][1]);
        }
        out
    }

    /// Grows every face outward by `amount` (shrinks for negative values).
    pub fn expanded_by(&self, amount: f64) -> Self {
        let mut out = *self;
        for range in out.d.iter_mut() {
            range[0] -= amount;
            range[1] += amount;
        }
        out
    }

    pub fn corners(&self) -> [Point; 8] {
        let mut corners = [(0.0, 0.0, 0.0); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = (self.d[0][i & 1], self.d[1][(i >> 1) & 1], self.d[2][(i >> 2) & 1]);
        }
        corners
    }

    pub fn diagonal_length(&self) -> f64 {
        (0..3).map(|dim| self.extent(dim).powi(2)).sum::<f64>().sqrt()
    }
}
