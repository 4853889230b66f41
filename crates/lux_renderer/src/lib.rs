//! Lux Renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over a `lux_core::Scene`:
//! - Iterative light transport with emission, diffuse/mirror mixing,
//!   Russian roulette and exponential fog
//! - Pinhole or thin-lens camera
//! - Row-band scheduling on rayon, reproducible for a given seed
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lux_core::{Material, Scene, Sphere, Texture};
//! use lux_math::{Color, Vec3};
//! use lux_renderer::{render, Camera, RenderSettings};
//!
//! let mut scene = Scene::new();
//! let grey = Arc::new(Material::diffuse(Color::splat(0.5)).unwrap());
//! scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0), &grey).unwrap();
//!
//! let camera = Camera::new(Vec3::ZERO, -Vec3::Z, Vec3::Y, 0.5, 1.0);
//! let settings = RenderSettings { samples_per_pixel: 2, ..Default::default() };
//! let mut framebuffer = Texture::new(8, 8);
//!
//! let stats = render(&scene, &camera, &settings, &mut framebuffer).unwrap();
//! assert_eq!(stats.rows, 8);
//! ```

mod camera;
mod error;
mod integrator;
pub mod sampler;
mod scheduler;
mod settings;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use integrator::{
    trace, DEPTH_DEBUG_RANGE, ROULETTE_DEPTH, SURFACE_OFFSET, THROUGHPUT_CUTOFF,
};
pub use sampler::Sampler;
pub use scheduler::{generate_bands, render, render_pixel, Band, RenderStats};
pub use settings::{DebugMode, RenderSettings};
