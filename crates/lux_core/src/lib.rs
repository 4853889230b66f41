//! Lux Core - scene description and image I/O for the Lux path tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: triangles, spheres and triangle meshes with their ray
//!   intersection routines
//! - **Scene**: objects, materials, environment and the nearest-hit query
//! - **Images**: the `Texture` color grid and a 24-bit BMP codec
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lux_core::{Material, Scene, Sphere};
//! use lux_math::{Color, Ray, Vec3};
//!
//! let mut scene = Scene::new();
//! let grey = Arc::new(Material::diffuse(Color::splat(0.5))?);
//! scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0), &grey)?;
//!
//! let hit = scene.nearest_hit(&Ray::new(Vec3::ZERO, -Vec3::Z)).unwrap();
//! assert!((hit.intersection.distance - 2.0).abs() < 1e-4);
//! # Ok::<(), lux_core::SceneError>(())
//! ```

pub mod bmp;
pub mod geometry;
pub mod material;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use bmp::{BmpError, BmpResult};
pub use geometry::{Intersectable, Intersection, Mesh, Sphere, Triangle};
pub use material::Material;
pub use scene::{Environment, Object, Scene, SceneError, SceneHit, SceneResult, Shape};
pub use texture::Texture;
