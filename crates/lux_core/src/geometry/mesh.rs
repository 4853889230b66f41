//! Triangle mesh shape.
//!
//! A mesh is just a list of triangles sharing one material. There is no
//! acceleration structure: intersection scans every triangle.

use super::intersection::{Intersectable, Intersection};
use super::triangle::Triangle;
use lux_math::{Interval, Ray, Vec3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Build a mesh from a vertex list and triangle index triples.
    ///
    /// Returns `None` if any index is out of range.
    pub fn from_indexed(vertices: &[Vec3], indices: &[[usize; 3]]) -> Option<Self> {
        let triangles = indices
            .iter()
            .map(|&[a, b, c]| {
                Some(Triangle::new(
                    *vertices.get(a)?,
                    *vertices.get(b)?,
                    *vertices.get(c)?,
                ))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { triangles })
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn area(&self) -> f32 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Area-weighted centroid. Zero for an empty or degenerate mesh.
    pub fn centroid(&self) -> Vec3 {
        let area = self.area();
        if area <= 0.0 {
            return Vec3::ZERO;
        }
        self.triangles
            .iter()
            .map(|t| t.centroid() * t.area())
            .sum::<Vec3>()
            / area
    }
}

impl Intersectable for Mesh {
    fn intersect(&self, ray: &Ray, ray_t: Interval, hit: &mut Intersection) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for triangle in &self.triangles {
            if triangle.intersect(ray, ray_t.with_max(closest_so_far), hit) {
                hit_anything = true;
                closest_so_far = hit.distance;
            }
        }

        hit_anything
    }
}
