//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use super::intersection::{Intersectable, Intersection};
use lux_math::{Interval, Ray, Vec3};

/// Below this determinant the ray is treated as parallel to the triangle.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle given by three vertices.
///
/// Winding is counter-clockwise: the face normal is `(v1 - v0) x (v2 - v0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit face normal. Zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).normalize_or_zero()
    }

    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    pub fn area(&self) -> f32 {
        0.5 * (self.v1 - self.v0).cross(self.v2 - self.v0).length()
    }

    /// Whether `p` (assumed to lie in the triangle's plane) is inside the
    /// triangle, edges included.
    pub fn contains_point(&self, p: Vec3) -> bool {
        let n = self.normal();
        let c0 = (self.v1 - self.v0).cross(p - self.v0);
        let c1 = (self.v2 - self.v1).cross(p - self.v1);
        let c2 = (self.v0 - self.v2).cross(p - self.v2);
        n.dot(c0) >= 0.0 && n.dot(c1) >= 0.0 && n.dot(c2) >= 0.0
    }
}

impl Intersectable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn intersect(&self, ray: &Ray, ray_t: Interval, hit: &mut Intersection) -> bool {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to triangle (or triangle is degenerate)
        if det.abs() < PARALLEL_EPSILON {
            return false;
        }

        let f = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * edge2.dot(q);
        if !ray_t.accepts(t) {
            return false;
        }

        hit.distance = t;
        hit.set_face_normal(ray, edge1.cross(edge2).normalize());

        true
    }
}
