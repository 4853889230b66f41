//! Hit record and the intersection capability shared by all shapes.

use lux_math::{Interval, Ray, Vec3};

/// Distance reported by a hit record that has not recorded a hit.
pub const NO_HIT: f32 = f32::MAX;

/// Tolerance for the front/back face classification.
pub const FACE_EPSILON: f32 = 1e-6;

/// Record of a ray-surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the hit (a world-space distance, rays are unit length)
    pub distance: f32,
    /// Surface normal at the hit, oriented against the incoming ray
    pub normal: Vec3,
    /// Whether the ray arrived from the inside of the surface
    pub is_back_face: bool,
}

impl Default for Intersection {
    fn default() -> Self {
        Self {
            distance: NO_HIT,
            normal: Vec3::ZERO,
            is_back_face: false,
        }
    }
}

impl Intersection {
    /// Whether this record holds a hit.
    pub fn is_hit(&self) -> bool {
        self.distance < NO_HIT
    }

    /// Set the normal from the geometric outward normal.
    ///
    /// The stored normal always opposes the ray direction; `is_back_face`
    /// remembers whether it had to be flipped.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.is_back_face = ray.direction().dot(outward_normal) > FACE_EPSILON;
        self.normal = if self.is_back_face {
            -outward_normal
        } else {
            outward_normal
        };
    }
}

/// Anything a ray can be tested against.
pub trait Intersectable: Send + Sync {
    /// Test the ray against this surface for parameters in `ray_t`
    /// (lower bound inclusive, upper bound exclusive).
    ///
    /// Fills `hit` and returns true on a hit. `hit` is left untouched on a
    /// miss. Implementations are pure: identical inputs give identical output.
    fn intersect(&self, ray: &Ray, ray_t: Interval, hit: &mut Intersection) -> bool;
}
