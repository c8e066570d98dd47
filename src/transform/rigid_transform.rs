use crate::errors::CobjError;
use crate::geometry::{get_poly_norm, triangle_area, triangle_centroid};
use crate::models::{CollisionObject, Polygon, Quaternion, Shape};
use crate::utils::{add_vectors, lerp_points, scale_vector, Point};
use log::warn;

impl CollisionObject {
    /// Centre of mass, assuming uniform density.
    ///
    /// Exact for cubes, spheres and uniform cylinders. Tapered cylinders use the
    /// frustum centroid (also applied to tapered capsules, where it is only
    /// approximate); quads are split into two triangles whose centroids are
    /// weighted by area.
    ///
    /// # Example
    /// ```
    /// use rs_cobj_physics::models::CollisionObject;
    ///
    /// let cone = CollisionObject::new_cylinder((0.0, 0.0, 0.0), (1.0, 0.0, 1.0), 1.0, 0.0).unwrap();
    /// let com = cone.center_of_mass();
    ///
    /// // a cone's centroid sits a quarter of the way up from the base
    /// assert!((com.0 - 0.25).abs() < 1e-12);
    /// ```
    pub fn center_of_mass(&self) -> Point {
        match &self.shape {
            Shape::RotatedCylinder(c) | Shape::Capsule(c) | Shape::Cylinder(c) if c.is_tapered() => {
                let (r1s, r2s, r1r2) = (c.r1 * c.r1, c.r2 * c.r2, c.r1 * c.r2);
                let t = (r1s + 2.0 * r1r2 + 3.0 * r2s) / (4.0 * (r1s + r1r2 + r2s));
                lerp_points(c.p1, c.p2, t)
            }
            Shape::Polygon(poly) if poly.was_cube => self.center_pt(),
            Shape::Polygon(poly) => {
                let p = &poly.points;
                let ca = triangle_centroid(p[0], p[1], p[2]);

                if p.len() < 4 {
                    return ca;
                }
                let cb = triangle_centroid(p[2], p[3], p[0]);
                let (aa, ab) = (triangle_area(p[0], p[1], p[2]), triangle_area(p[2], p[3], p[0]));
                scale_vector(add_vectors(scale_vector(ca, aa), scale_vector(cb, ab)), 1.0 / (aa + ab))
            }
            _ => self.center_pt(),
        }
    }

    /// Rotates the object by `angle` radians about `axis` through `pt`.
    ///
    /// Cubes and vertical cylinders can't hold a rotation, so they are re-tagged
    /// first: a cube becomes an extruded quad and a cylinder becomes a rotated
    /// cylinder. The bounding box (and polygon normal) are recomputed. An
    /// `angle` of exactly zero is a no-op.
    ///
    /// This mutates geometry directly; objects registered in a world must be
    /// rotated through `CobjWorld::rotate_cobj`.
    ///
    /// # Errors
    /// `CobjError::ZeroRotationAxis` if `axis` has (near) zero length.
    pub fn rotate_about(&mut self, pt: Point, axis: Point, angle: f64) -> Result<(), CobjError> {
        if angle == 0.0 {
            return Ok(());
        }
        let q = Quaternion::from_axis_angle(axis, angle).ok_or_else(|| {
            warn!("Rejected rotation of cobj {} about a zero axis", self.id);
            CobjError::ZeroRotationAxis
        })?;

        match &self.shape {
            Shape::Cube => self.shape = Shape::Polygon(self.cube_to_ext_polygon()),
            Shape::Cylinder(c) => self.shape = Shape::RotatedCylinder(*c),
            _ => {}
        }
        match &mut self.shape {
            Shape::Cube => {}
            Shape::Sphere(s) => s.center = q.rotate_point_about(s.center, pt),
            Shape::Cylinder(c) | Shape::RotatedCylinder(c) | Shape::Capsule(c) => {
                c.p1 = q.rotate_point_about(c.p1, pt);
                c.p2 = q.rotate_point_about(c.p2, pt);
            }
            Shape::Polygon(poly) => {
                for p in poly.points.iter_mut() {
                    *p = q.rotate_point_about(*p, pt);
                }
                poly.normal = get_poly_norm(&poly.points).unwrap_or_else(|| q.rotate_vector(poly.normal));
            }
        }
        self.bbox = self.calc_bbox();
        Ok(())
    }

    /// Mid-plane quad across the thinnest axis of the box, extruded by that extent.
    fn cube_to_ext_polygon(&self) -> Polygon {
        let b = &self.bbox;
        let dim = (0..3)
            .min_by(|&x, &y| b.extent(x).total_cmp(&b.extent(y)))
            .unwrap_or(2);
        let (d1, d2) = ((dim + 1) % 3, (dim + 2) % 3);
        let mid = 0.5 * (b.d[dim][0] + b.d[dim][1]);

        let corner = |i1: usize, i2: usize| {
            let mut v = [0.0; 3];
            v[dim] = mid;
            v[d1] = b.d[d1][i1];
            v[d2] = b.d[d2][i2];
            (v[0], v[1], v[2])
        };
        let points = vec![corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1)];
        let mut normal = (0.0, 0.0, 0.0);
        match dim {
            0 => normal.0 = 1.0,
            1 => normal.1 = 1.0,
            _ => normal.2 = 1.0,
        }
        Polygon { points, normal, thickness: b.extent(dim), was_cube: true }
    }
}
