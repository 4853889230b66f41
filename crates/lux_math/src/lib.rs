// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod color;
mod interval;
mod ray;
mod vector;

pub use color::{clamp_color, linear_to_gamma, luminance, Color};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{orthonormal_basis, reflect};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_normalized_is_unit_length() {
        let samples = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1e-3, 2e-3, 5e-4),
            Vec3::new(1e4, -2e4, 3e4),
            Vec3::new(0.0, 0.0, -7.5),
        ];

        for v in samples {
            assert!((v.normalize().length() - 1.0).abs() < 1e-5, "{v:?}");
        }
    }

    #[test]
    fn test_lerp() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
