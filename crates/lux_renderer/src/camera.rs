//! Camera for ray generation.

use crate::sampler::{in_unit_disk, Sampler};
use lux_math::{Ray, Vec3};

/// Pinhole camera with optional thin-lens depth of field.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,

    // Orthonormal view basis
    forward: Vec3,
    right: Vec3,
    up: Vec3,

    /// Half-extent of the image plane at unit distance, vertically
    fov: f32,
    aspect: f32,

    // Lens settings
    lens_radius: f32, // 0 disables depth of field
    focus_dist: f32,  // Distance from camera to plane of perfect focus
}

impl Camera {
    /// Create a camera at `position` looking at `look_at`.
    ///
    /// `fov` is the tangent of the vertical half-angle of view and `aspect`
    /// is width / height. `position` and `look_at` must differ. If `up` is
    /// parallel to the view direction an arbitrary perpendicular up is used.
    pub fn new(position: Vec3, look_at: Vec3, up: Vec3, fov: f32, aspect: f32) -> Self {
        let forward = (look_at - position).normalize();

        let mut right = forward.cross(up);
        if right.length_squared() < 1e-12 {
            log::warn!("Camera up {up:?} is parallel to the view direction, picking another");
            right = forward.cross(forward.any_orthonormal_vector());
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();

        Self {
            position,
            forward,
            right,
            up,
            fov,
            aspect,
            lens_radius: 0.0,
            focus_dist: 1.0,
        }
    }

    /// Set lens settings.
    pub fn with_lens(mut self, lens_radius: f32, focus_dist: f32) -> Self {
        self.lens_radius = lens_radius.max(0.0);
        self.focus_dist = focus_dist;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Generate a ray through normalized image coordinates `(u, v)`.
    ///
    /// `(0, 0)` is the top-left corner of the image and `(1, 1)` the
    /// bottom-right. The sampler is only used when depth of field is on.
    pub fn generate_ray(&self, u: f32, v: f32, sampler: &mut Sampler) -> Ray {
        let px = (2.0 * u - 1.0) * self.fov * self.aspect;
        let py = (1.0 - 2.0 * v) * self.fov;
        let dir = (self.forward + self.right * px + self.up * py).normalize();

        if self.lens_radius <= 0.0 {
            return Ray::new(self.position, dir);
        }

        let lens = in_unit_disk(sampler) * self.lens_radius;
        let origin = self.position + self.right * lens.x + self.up * lens.y;
        let focal_point = self.position + dir * self.focus_dist;

        Ray::new(origin, focal_point - origin)
    }
}
