//! Surface materials.
//!
//! A material mixes an ideal diffuse (Lambertian) bounce with an ideal mirror
//! bounce: `reflectivity` is the probability of taking the mirror branch.
//! Values are checked once when the material is built, so the integrator
//! never has to handle an out-of-range material.

use crate::scene::{SceneError, SceneResult};
use lux_math::Color;

/// Material parameters for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    albedo: Color,
    reflectivity: f32,
    emission: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Color::ONE,
            reflectivity: 0.0,
            emission: Color::ZERO,
        }
    }
}

impl Material {
    /// Create a material.
    ///
    /// Fails if `reflectivity` is outside `[0, 1]`, or if any albedo or
    /// emission channel is negative or not finite.
    pub fn new(albedo: Color, reflectivity: f32, emission: Color) -> SceneResult<Self> {
        if !(0.0..=1.0).contains(&reflectivity) {
            return Err(SceneError::InvalidReflectivity(reflectivity));
        }
        check_channels("albedo", albedo)?;
        check_channels("emission", emission)?;

        Ok(Self {
            albedo,
            reflectivity,
            emission,
        })
    }

    /// Non-emissive diffuse material.
    pub fn diffuse(albedo: Color) -> SceneResult<Self> {
        Self::new(albedo, 0.0, Color::ZERO)
    }

    /// Perfect mirror tinted by `albedo`.
    pub fn mirror(albedo: Color) -> SceneResult<Self> {
        Self::new(albedo, 1.0, Color::ZERO)
    }

    /// Diffuse surface that also emits `emission`.
    pub fn emissive(albedo: Color, emission: Color) -> SceneResult<Self> {
        Self::new(albedo, 0.0, emission)
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn reflectivity(&self) -> f32 {
        self.reflectivity
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    /// Check if this material is emissive.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }
}

fn check_channels(what: &'static str, c: Color) -> SceneResult<()> {
    if c.is_finite() && c.min_element() >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidColor { what, value: c })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let m = Material::default();
        assert_eq!(m.albedo(), Color::ONE);
        assert_eq!(m.reflectivity(), 0.0);
        assert!(!m.is_emissive());
    }

    #[test]
    fn test_constructors() {
        let grey = Color::splat(0.5);
        assert_eq!(Material::diffuse(grey).unwrap().reflectivity(), 0.0);
        assert_eq!(Material::mirror(grey).unwrap().reflectivity(), 1.0);

        let light = Material::emissive(Color::ZERO, Color::splat(4.0)).unwrap();
        assert!(light.is_emissive());
        assert_eq!(light.emission(), Color::splat(4.0));
    }

    #[test]
    fn test_rejects_reflectivity_out_of_range() {
        let grey = Color::splat(0.5);
        for bad in [-0.1, 1.01, f32::NAN, f32::INFINITY] {
            let result = Material::new(grey, bad, Color::ZERO);
            assert!(
                matches!(result, Err(SceneError::InvalidReflectivity(_))),
                "accepted reflectivity {bad}"
            );
        }
        assert!(Material::new(grey, 0.0, Color::ZERO).is_ok());
        assert!(Material::new(grey, 1.0, Color::ZERO).is_ok());
    }

    #[test]
    fn test_rejects_bad_colors() {
        let negative = Material::diffuse(Color::new(0.5, -0.1, 0.5));
        assert!(matches!(
            negative,
            Err(SceneError::InvalidColor { what: "albedo", .. })
        ));

        let nan = Material::emissive(Color::ONE, Color::new(f32::NAN, 1.0, 1.0));
        assert!(matches!(
            nan,
            Err(SceneError::InvalidColor { what: "emission", .. })
        ));
    }
}
