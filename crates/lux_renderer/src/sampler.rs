//! Random sampling for the path tracer.
//!
//! Each render worker owns one `Sampler`; nothing here is shared between
//! threads. Streams are ChaCha8, so a given `(seed, stream)` pair yields the
//! same numbers on every platform.

use lux_math::{orthonormal_basis, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::PI;

/// Seedable uniform random source.
#[derive(Clone, Debug)]
pub struct Sampler {
    rng: ChaCha8Rng,
}

impl Sampler {
    /// Create a sampler from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a sampler on an independent stream of the same seed.
    ///
    /// Different streams never overlap, which makes them suitable for handing
    /// one to each worker.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }

    /// Uniform float in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Two uniform floats in [0, 1).
    #[inline]
    pub fn next_2d(&mut self) -> Vec2 {
        Vec2::new(self.next_f32(), self.next_f32())
    }
}

/// Express a local direction `(x, y, z)` in the frame whose z axis is `w`.
#[inline]
fn to_world(w: Vec3, local: Vec3) -> Vec3 {
    let (u, v) = orthonormal_basis(w);
    (u * local.x + v * local.y + w * local.z).normalize()
}

/// Uniformly distributed direction in the hemisphere around `normal`.
///
/// pdf = 1 / (2 pi)
pub fn uniform_hemisphere(normal: Vec3, sampler: &mut Sampler) -> Vec3 {
    let cos_theta = sampler.next_f32();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * sampler.next_f32();
    to_world(
        normal,
        Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta),
    )
}

/// Cosine-weighted direction in the hemisphere around `normal`.
///
/// pdf = cos(theta) / pi, which cancels the Lambertian cosine term.
pub fn cosine_hemisphere(normal: Vec3, sampler: &mut Sampler) -> Vec3 {
    let r1 = sampler.next_f32();
    let r2 = sampler.next_f32();

    let phi = 2.0 * PI * r1;
    let cos_theta = (1.0 - r2).sqrt();
    let sin_theta = r2.sqrt();

    to_world(
        normal,
        Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta),
    )
}

/// Uniformly distributed direction within `max_angle` radians of `axis`.
pub fn cone(axis: Vec3, max_angle: f32, sampler: &mut Sampler) -> Vec3 {
    let cos_theta = 1.0 - sampler.next_f32() * (1.0 - max_angle.cos());
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * sampler.next_f32();
    to_world(
        axis.normalize(),
        Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta),
    )
}

/// Uniformly distributed point inside a sphere of `radius` at the origin.
pub fn in_sphere(radius: f32, sampler: &mut Sampler) -> Vec3 {
    let theta = 2.0 * PI * sampler.next_f32();
    let phi = (2.0 * sampler.next_f32() - 1.0).acos();
    let r = sampler.next_f32().cbrt() * radius;

    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Uniformly distributed point on the unit disk.
pub fn in_unit_disk(sampler: &mut Sampler) -> Vec2 {
    let r = sampler.next_f32().sqrt();
    let theta = 2.0 * PI * sampler.next_f32();
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 20_000;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Sampler::new(7);
        let mut b = Sampler::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn test_streams_differ() {
        let mut a = Sampler::with_stream(7, 0);
        let mut b = Sampler::with_stream(7, 1);
        let xs: Vec<f32> = (0..8).map(|_| a.next_f32()).collect();
        let ys: Vec<f32> = (0..8).map(|_| b.next_f32()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_uniform_range_and_mean() {
        let mut s = Sampler::new(1);
        let mut sum = 0.0f64;
        for _ in 0..N {
            let x = s.next_f32();
            assert!((0.0..1.0).contains(&x));
            sum += x as f64;
        }
        assert!((sum / N as f64 - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_uniform_hemisphere() {
        let mut s = Sampler::new(2);
        let normal = Vec3::new(0.3, -0.4, 0.866).normalize();
        let mut mean_cos = 0.0f64;
        for _ in 0..N {
            let d = uniform_hemisphere(normal, &mut s);
            assert!((d.length() - 1.0).abs() < 1e-4);
            assert!(d.dot(normal) >= -1e-5);
            mean_cos += d.dot(normal) as f64;
        }
        // E[cos] = 1/2 for uniform hemisphere sampling
        assert!((mean_cos / N as f64 - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_cosine_hemisphere() {
        let mut s = Sampler::new(3);
        let normal = -Vec3::Y;
        let mut mean_cos = 0.0f64;
        for _ in 0..N {
            let d = cosine_hemisphere(normal, &mut s);
            assert!((d.length() - 1.0).abs() < 1e-4);
            assert!(d.dot(normal) >= -1e-5);
            mean_cos += d.dot(normal) as f64;
        }
        // E[cos] = 2/3 for cosine-weighted sampling
        assert!((mean_cos / N as f64 - 2.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn test_cone() {
        let mut s = Sampler::new(4);
        let axis = Vec3::new(1.0, 1.0, 0.0);
        let max_angle = 0.2f32;
        for _ in 0..1000 {
            let d = cone(axis, max_angle, &mut s);
            assert!((d.length() - 1.0).abs() < 1e-4);
            let angle = d.dot(axis.normalize()).clamp(-1.0, 1.0).acos();
            assert!(angle <= max_angle + 1e-3, "angle {angle}");
        }
    }

    #[test]
    fn test_in_sphere() {
        let mut s = Sampler::new(5);
        let mut mean = Vec3::ZERO;
        for _ in 0..N {
            let p = in_sphere(2.0, &mut s);
            assert!(p.length() <= 2.0 + 1e-4);
            mean += p;
        }
        assert!((mean / N as f32).length() < 0.05);
    }

    #[test]
    fn test_in_unit_disk() {
        let mut s = Sampler::new(6);
        for _ in 0..1000 {
            assert!(in_unit_disk(&mut s).length() <= 1.0 + 1e-5);
        }
    }
}
