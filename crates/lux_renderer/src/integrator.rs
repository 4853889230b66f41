//! Path tracing integrator.
//!
//! `trace` follows one camera path through the scene. It is the iterative
//! form of the usual recursive estimator: `throughput` carries the product of
//! the surface weights seen so far and `radiance` accumulates what has been
//! collected, so path length never grows the stack.

use crate::sampler::{cosine_hemisphere, uniform_hemisphere, Sampler};
use crate::settings::{DebugMode, RenderSettings};
use lux_core::{Intersection, Material, Scene};
use lux_math::{reflect, Color, Ray, Vec3};

/// Distance a scattered ray's origin is pushed off the surface.
pub const SURFACE_OFFSET: f32 = 1e-4;

/// Bounces after which Russian roulette may end a path.
pub const ROULETTE_DEPTH: u32 = 4;

/// Paths whose surface albedo falls below this are dropped.
pub const THROUGHPUT_CUTOFF: f32 = 0.05;

/// Hit distance that maps to white in the depth debug view.
pub const DEPTH_DEBUG_RANGE: f32 = 1024.0;

/// Estimate the radiance arriving along `ray`.
///
/// Paths longer than `settings.max_bounces` contribute nothing further.
pub fn trace(ray: &Ray, scene: &Scene, settings: &RenderSettings, sampler: &mut Sampler) -> Color {
    let environment = &scene.environment;
    let mut ray = *ray;
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;

    for depth in 0..=settings.max_bounces {
        let Some(hit) = scene.nearest_hit(&ray) else {
            return radiance + throughput * environment.background(&ray);
        };
        let material = hit.material();
        let distance = hit.intersection.distance;

        if settings.debug_mode != DebugMode::Off {
            return debug_color(settings.debug_mode, material, &hit.intersection);
        }

        // Fog between the ray origin and the hit
        let transmittance = environment.transmittance(distance);
        if transmittance < 1.0 {
            radiance += throughput * (1.0 - transmittance) * environment.fog_color;
            throughput *= transmittance;
        }

        radiance += throughput * material.emission();

        let mut albedo = material.albedo();
        if depth > ROULETTE_DEPTH {
            let survival = albedo.max_element();
            if sampler.next_f32() >= survival {
                break;
            }
            albedo /= survival;
        }
        if albedo.max_element() < THROUGHPUT_CUTOFF {
            break;
        }

        let normal = hit.intersection.normal;
        let (direction, weight) = scatter(
            ray.direction(),
            normal,
            material,
            albedo,
            settings.cosine_hemisphere,
            sampler,
        );
        throughput *= weight;
        ray = Ray::new(ray.at(distance) + normal * SURFACE_OFFSET, direction);
    }

    radiance
}

/// Visualization color for the first hit.
fn debug_color(mode: DebugMode, material: &Material, hit: &Intersection) -> Color {
    match mode {
        DebugMode::Albedo => material.albedo(),
        DebugMode::Normal => (hit.normal + Vec3::ONE) * 0.5,
        DebugMode::Depth => Color::splat((hit.distance / DEPTH_DEBUG_RANGE).sqrt()),
        DebugMode::Off => Color::ZERO,
    }
}

/// Pick the next direction at a hit and the weight it carries.
///
/// `normal` faces the incoming ray. The mirror branch is taken with
/// probability `reflectivity`; everything else is a Lambertian bounce.
fn scatter(
    incoming: Vec3,
    normal: Vec3,
    material: &Material,
    albedo: Color,
    cosine_weighted: bool,
    sampler: &mut Sampler,
) -> (Vec3, Color) {
    let reflectivity = material.reflectivity();
    if reflectivity > 0.0 && sampler.next_f32() < reflectivity {
        return (reflect(incoming, normal).normalize(), albedo);
    }

    if cosine_weighted {
        (cosine_hemisphere(normal, sampler), albedo)
    } else {
        // pdf 1/(2pi) against the cos/pi Lambertian term
        let direction = uniform_hemisphere(normal, sampler);
        let cos_theta = direction.dot(normal).max(0.0);
        (direction, albedo * (2.0 * cos_theta))
    }
}
