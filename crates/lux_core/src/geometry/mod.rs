//! Geometric primitives and their ray intersection routines.

mod intersection;
mod mesh;
mod sphere;
mod triangle;

pub use intersection::{Intersectable, Intersection, FACE_EPSILON, NO_HIT};
pub use mesh::Mesh;
pub use sphere::Sphere;
pub use triangle::{Triangle, PARALLEL_EPSILON};
