use crate::Vec3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized once at construction, so intersection code can
/// treat ray parameters as world-space distances. Rays are immutable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    ///
    /// `direction` must have non-zero length; it is normalized here.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at distance t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), Vec3::Y);
    }

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0));
        assert!((ray.direction().length() - 1.0).abs() < 1e-6);
        assert!((ray.direction() - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X * 5.0);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::new(Vec3::ZERO, Vec3::Y);
        let ray2 = ray1; // Copy, not move

        assert_eq!(ray1.origin(), ray2.origin());
        assert_eq!(ray1.at(1.0), ray2.at(1.0));
    }
}
