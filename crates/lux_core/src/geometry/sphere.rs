//! Sphere primitive.

use super::intersection::{Intersectable, Intersection};
use lux_math::{Interval, Ray, Vec3};
use std::f32::consts::PI;

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere. The radius is stored as given; objects reject
    /// non-positive radii when they are validated.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// The sphere's centroid (its center).
    pub fn centroid(&self) -> Vec3 {
        self.center
    }

    /// Surface area.
    pub fn area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }

    /// Outward unit normal at a point on the surface.
    pub fn outward_normal(&self, p: Vec3) -> Vec3 {
        (p - self.center) / self.radius
    }
}

impl Intersectable for Sphere {
    fn intersect(&self, ray: &Ray, ray_t: Interval, hit: &mut Intersection) -> bool {
        // Half-b form of |O + tD - C|^2 = r^2
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root in range, else the far one (ray starts inside)
        let mut root = (h - sqrtd) / a;
        if !ray_t.accepts(root) {
            root = (h + sqrtd) / a;
            if !ray_t.accepts(root) {
                return false;
            }
        }

        hit.distance = root;
        hit.set_face_normal(ray, self.outward_normal(ray.at(root)));

        true
    }
}
