//! Scene container for the path tracer.
//!
//! A scene is an ordered list of objects (a shape plus a shared material) and
//! one environment record. It is built once, then only read while rendering,
//! which is what lets render workers share it without locks.

use std::sync::Arc;

use lux_math::{Color, Interval, Ray, Vec3};
use thiserror::Error;

use crate::geometry::{Intersectable, Intersection, Mesh, Sphere, Triangle};
use crate::material::Material;

/// Hits closer than this are ignored, so a ray leaving a surface does not
/// find that surface again.
pub const MIN_HIT_DISTANCE: f32 = 1e-5;

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("reflectivity must be within [0, 1], got {0}")]
    InvalidReflectivity(f32),

    #[error("{what} channels must be finite and non-negative, got {value}")]
    InvalidColor { what: &'static str, value: Color },

    #[error("sphere radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("shape has non-finite coordinates")]
    NonFiniteGeometry,

    #[error("triangle {index} has zero area")]
    DegenerateTriangle { index: usize },

    #[error("mesh has no triangles")]
    EmptyMesh,
}

pub type SceneResult<T> = Result<T, SceneError>;

/// The geometric part of an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Triangle(Triangle),
    Sphere(Sphere),
    Mesh(Mesh),
}

impl Shape {
    /// Check the shape can be rendered: finite coordinates, positive sphere
    /// radius, no zero-area triangles.
    pub fn validate(&self) -> SceneResult<()> {
        match self {
            Shape::Sphere(s) => {
                if !s.center.is_finite() {
                    return Err(SceneError::NonFiniteGeometry);
                }
                if !(s.radius.is_finite() && s.radius > 0.0) {
                    return Err(SceneError::InvalidRadius(s.radius));
                }
                Ok(())
            }
            Shape::Triangle(t) => validate_triangle(t, 0),
            Shape::Mesh(m) => {
                if m.is_empty() {
                    return Err(SceneError::EmptyMesh);
                }
                m.triangles
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, t)| validate_triangle(t, i))
            }
        }
    }

    pub fn centroid(&self) -> Vec3 {
        match self {
            Shape::Triangle(t) => t.centroid(),
            Shape::Sphere(s) => s.centroid(),
            Shape::Mesh(m) => m.centroid(),
        }
    }

    pub fn area(&self) -> f32 {
        match self {
            Shape::Triangle(t) => t.area(),
            Shape::Sphere(s) => s.area(),
            Shape::Mesh(m) => m.area(),
        }
    }
}

fn validate_triangle(t: &Triangle, index: usize) -> SceneResult<()> {
    if !(t.v0.is_finite() && t.v1.is_finite() && t.v2.is_finite()) {
        return Err(SceneError::NonFiniteGeometry);
    }
    if t.area() <= 0.0 {
        return Err(SceneError::DegenerateTriangle { index });
    }
    Ok(())
}

impl Intersectable for Shape {
    #[inline]
    fn intersect(&self, ray: &Ray, ray_t: Interval, hit: &mut Intersection) -> bool {
        match self {
            Shape::Triangle(t) => t.intersect(ray, ray_t, hit),
            Shape::Sphere(s) => s.intersect(ray, ray_t, hit),
            Shape::Mesh(m) => m.intersect(ray, ray_t, hit),
        }
    }
}

impl From<Triangle> for Shape {
    fn from(t: Triangle) -> Self {
        Shape::Triangle(t)
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Mesh> for Shape {
    fn from(m: Mesh) -> Self {
        Shape::Mesh(m)
    }
}

/// A renderable object: shape plus material.
///
/// Materials are shared through `Arc`, so many objects can point at one
/// material without the handle ever dangling.
#[derive(Debug, Clone)]
pub struct Object {
    shape: Shape,
    material: Arc<Material>,
}

impl Object {
    /// Create an object, validating its shape.
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> SceneResult<Self> {
        let shape = shape.into();
        shape.validate()?;
        Ok(Self { shape, material })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Swap in a different material.
    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = material;
    }
}

/// Ambient lighting and participating-medium parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Radiance returned by rays that leave the scene
    pub sky_color: Color,
    /// Color that fog blends toward
    pub fog_color: Color,
    /// Exponential fog density per unit distance (0 disables fog)
    pub fog_density: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            sky_color: Color::new(0.1, 0.1, 0.2),
            fog_color: Color::ZERO,
            fog_density: 0.0,
        }
    }
}

impl Environment {
    /// Radiance seen along a ray that hits nothing.
    pub fn background(&self, _ray: &Ray) -> Color {
        self.sky_color
    }

    /// Fraction of light surviving `distance` units of fog.
    pub fn transmittance(&self, distance: f32) -> f32 {
        if self.fog_density > 0.0 {
            (-self.fog_density * distance).exp()
        } else {
            1.0
        }
    }
}

/// Result of a nearest-hit query.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    /// The winning object
    pub object: &'a Object,
    /// Index of the winning object in storage order
    pub index: usize,
    pub intersection: Intersection,
}

impl SceneHit<'_> {
    pub fn material(&self) -> &Material {
        self.object.material()
    }
}

/// The scene: objects in insertion order plus the environment.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub environment: Environment,
    objects: Vec<Object>,
}

impl Scene {
    /// Create a new empty scene with the default environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with the given environment.
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            environment,
            objects: Vec::new(),
        }
    }

    /// Append an object, returning its index.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Validate and append a shape with a material.
    pub fn add(
        &mut self,
        shape: impl Into<Shape>,
        material: &Arc<Material>,
    ) -> SceneResult<usize> {
        let object = Object::new(shape, Arc::clone(material))?;
        Ok(self.add_object(object))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    /// Find the closest object along the ray.
    ///
    /// Every object is tested (no spatial index). Only a strictly closer hit
    /// replaces the current winner, so on exact ties the object stored first
    /// wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<SceneHit<'_>> {
        let mut nearest: Option<SceneHit<'_>> = None;
        let mut closest_so_far = f32::INFINITY;

        for (index, object) in self.objects.iter().enumerate() {
            let mut hit = Intersection::default();
            let range = Interval::new(MIN_HIT_DISTANCE, closest_so_far);
            if object.shape.intersect(ray, range, &mut hit) {
                closest_so_far = hit.distance;
                nearest = Some(SceneHit {
                    object,
                    index,
                    intersection: hit,
                });
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Arc<Material> {
        Arc::new(Material::diffuse(Color::splat(0.5)).unwrap())
    }

    #[test]
    fn test_add_object_returns_index() {
        let mut scene = Scene::new();
        let mat = grey();

        let a = scene.add(Sphere::new(Vec3::ZERO, 1.0), &mat).unwrap();
        let b = scene
            .add(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y), &mat)
            .unwrap();

        assert_eq!((a, b), (0, 1));
        assert_eq!(scene.object_count(), 2);
        assert!(matches!(scene.objects()[1].shape(), Shape::Triangle(_)));
    }

    #[test]
    fn test_object_validation() {
        let mat = grey();

        let zero_radius = Object::new(Sphere::new(Vec3::ZERO, 0.0), mat.clone());
        assert!(matches!(zero_radius, Err(SceneError::InvalidRadius(_))));

        // The error carries the radius the caller passed
        let negative = Object::new(Sphere::new(Vec3::ZERO, -2.5), mat.clone());
        assert!(matches!(negative, Err(SceneError::InvalidRadius(r)) if r == -2.5));

        let degenerate = Object::new(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X), mat.clone());
        assert!(matches!(
            degenerate,
            Err(SceneError::DegenerateTriangle { index: 0 })
        ));

        let nan = Object::new(Sphere::new(Vec3::splat(f32::NAN), 1.0), mat.clone());
        assert!(matches!(nan, Err(SceneError::NonFiniteGeometry)));

        let empty = Object::new(Mesh::default(), mat);
        assert!(matches!(empty, Err(SceneError::EmptyMesh)));
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let mut scene = Scene::new();
        let mat = grey();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0), &mat).unwrap();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0), &mat).unwrap();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0), &mat).unwrap();

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let hit = scene.nearest_hit(&ray).expect("should hit");

        assert_eq!(hit.index, 1);
        assert!((hit.intersection.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_hit_tie_goes_to_first_object() {
        let mut scene = Scene::new();
        let red = Arc::new(Material::diffuse(Color::X).unwrap());
        let blue = Arc::new(Material::diffuse(Color::Z).unwrap());
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
        );
        scene.add(tri, &red).unwrap();
        scene.add(tri, &blue).unwrap();

        let hit = scene.nearest_hit(&Ray::new(Vec3::ZERO, -Vec3::Z)).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.material().albedo(), Color::X);
    }

    #[test]
    fn test_nearest_hit_miss() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0), &grey()).unwrap();

        assert!(scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
        assert!(Scene::new().nearest_hit(&Ray::default()).is_none());
    }

    #[test]
    fn test_nearest_hit_ignores_self_intersection() {
        let mut scene = Scene::new();
        scene
            .add(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Z), &grey())
            .unwrap();

        // Starting exactly on the surface must not report a hit at t=0
        let ray = Ray::new(Vec3::new(0.2, 0.0, 0.2), Vec3::new(0.0, 1.0, 0.3));
        assert!(scene.nearest_hit(&ray).is_none());
    }

    #[test]
    fn test_objects_mut_and_shared_material() {
        let mut scene = Scene::new();
        let mat = grey();
        scene.add(Sphere::new(Vec3::ZERO, 1.0), &mat).unwrap();
        scene.add(Sphere::new(Vec3::X * 3.0, 1.0), &mat).unwrap();
        assert_eq!(Arc::strong_count(&mat), 3);

        let mirror = Arc::new(Material::mirror(Color::ONE).unwrap());
        scene.objects_mut()[0].set_material(mirror);
        assert_eq!(scene.objects()[0].material().reflectivity(), 1.0);
        assert_eq!(scene.objects()[1].material().reflectivity(), 0.0);
    }

    #[test]
    fn test_environment() {
        let env = Environment::default();
        assert_eq!(env.transmittance(100.0), 1.0);
        assert_eq!(env.background(&Ray::default()), env.sky_color);

        let foggy = Environment {
            fog_density: 0.5,
            ..Default::default()
        };
        assert!((foggy.transmittance(2.0) - (-1.0f32).exp()).abs() < 1e-6);
        assert_eq!(foggy.transmittance(0.0), 1.0);
    }
}
