//! Built-in demo scenes.

use std::sync::Arc;

use lux_core::{Environment, Material, Mesh, Scene, SceneResult, Sphere, Triangle};
use lux_math::{Color, Vec3};
use lux_renderer::Camera;

use crate::cli::SceneChoice;

/// Build the chosen scene and a camera framing it.
pub fn build(choice: SceneChoice, aspect: f32) -> SceneResult<(Scene, Camera)> {
    let (scene, camera) = match choice {
        SceneChoice::Room => room(aspect)?,
        SceneChoice::Spheres => spheres(aspect)?,
        SceneChoice::Furnace => furnace(aspect)?,
    };

    log::debug!(
        "Built {:?} scene: {} objects, {} emissive",
        choice,
        scene.object_count(),
        scene
            .objects()
            .iter()
            .filter(|o| o.material().is_emissive())
            .count()
    );

    Ok((scene, camera))
}

/// Add the two triangles `(a, b, c)` and `(a, c, d)`.
fn add_quad(
    scene: &mut Scene,
    [a, b, c, d]: [Vec3; 4],
    material: &Arc<Material>,
) -> SceneResult<()> {
    scene.add(Triangle::new(a, b, c), material)?;
    scene.add(Triangle::new(a, c, d), material)?;
    Ok(())
}

/// Axis-aligned box as a closed triangle mesh.
fn box_mesh(min: Vec3, max: Vec3) -> Option<Mesh> {
    let corners: Vec<Vec3> = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        })
        .collect();

    let faces = [
        [0, 2, 3, 1], // -z
        [4, 5, 7, 6], // +z
        [0, 1, 5, 4], // -y
        [2, 6, 7, 3], // +y
        [0, 4, 6, 2], // -x
        [1, 3, 7, 5], // +x
    ];
    let indices: Vec<[usize; 3]> = faces
        .iter()
        .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
        .collect();

    Mesh::from_indexed(&corners, &indices)
}

/// A long box open toward the camera. The back wall is a mirror and the
/// underside of a pillar in the middle is the only light.
fn room(aspect: f32) -> SceneResult<(Scene, Camera)> {
    let s = 1.32;
    let depth = 10.0;

    let mut scene = Scene::with_environment(Environment {
        sky_color: Color::ZERO,
        ..Default::default()
    });

    let p0 = Vec3::new(-s, -s, -s);
    let p1 = Vec3::new(s, -s, -s);
    let p2 = Vec3::new(s, s, -s);
    let p3 = Vec3::new(-s, s, -s);
    let p4 = Vec3::new(-s, -s, depth);
    let p5 = Vec3::new(s, -s, depth);
    let p6 = Vec3::new(s, s, depth);
    let p7 = Vec3::new(-s, s, depth);

    let grey = Arc::new(Material::diffuse(Color::splat(0.6))?);
    let white = Arc::new(Material::diffuse(Color::splat(0.9))?);
    let mirror = Arc::new(Material::mirror(Color::splat(0.6))?);

    add_quad(&mut scene, [p0, p4, p5, p1], &grey)?; // floor
    add_quad(&mut scene, [p3, p2, p6, p7], &grey)?; // ceiling
    add_quad(&mut scene, [p4, p0, p3, p7], &white)?; // left
    add_quad(&mut scene, [p1, p5, p6, p2], &grey)?; // right
    add_quad(&mut scene, [p0, p1, p2, p3], &mirror)?; // back

    // Pillar: glowing underside, plain diffuse elsewhere
    let half = 0.4;
    let pillar_color = Color::new(0.8, 0.4, 0.4);
    let pillar = Arc::new(Material::diffuse(pillar_color)?);
    let glow = Arc::new(Material::emissive(pillar_color, Color::splat(25.0))?);

    let c0 = Vec3::new(-half, -half, 2.0);
    let c1 = Vec3::new(half, -half, 2.0);
    let c2 = Vec3::new(half, half, 2.0);
    let c3 = Vec3::new(-half, half, 2.0);
    let c4 = Vec3::new(-half, -half, 5.0);
    let c5 = Vec3::new(half, -half, 5.0);
    let c6 = Vec3::new(half, half, 5.0);
    let c7 = Vec3::new(-half, half, 5.0);

    add_quad(&mut scene, [c0, c3, c2, c1], &glow)?;
    add_quad(&mut scene, [c4, c5, c6, c7], &pillar)?;
    add_quad(&mut scene, [c0, c1, c5, c4], &pillar)?;
    add_quad(&mut scene, [c3, c7, c6, c2], &pillar)?;
    add_quad(&mut scene, [c0, c4, c7, c3], &pillar)?;
    add_quad(&mut scene, [c1, c2, c6, c5], &pillar)?;

    let camera = Camera::new(
        Vec3::new(3.0, 0.0, (1.0 + depth) * 1.35),
        Vec3::new(0.0, 0.0, depth / 1.35),
        Vec3::Y,
        0.5,
        aspect,
    );

    Ok((scene, camera))
}

/// A few spheres and a box resting on a huge ground sphere.
fn spheres(aspect: f32) -> SceneResult<(Scene, Camera)> {
    let mut scene = Scene::with_environment(Environment {
        sky_color: Color::new(0.5, 0.6, 0.8),
        fog_color: Color::new(0.5, 0.6, 0.8),
        fog_density: 0.02,
    });

    let ground = Arc::new(Material::diffuse(Color::splat(0.5))?);
    let red = Arc::new(Material::diffuse(Color::new(0.7, 0.2, 0.1))?);
    let chrome = Arc::new(Material::mirror(Color::new(0.8, 0.8, 0.9))?);
    let satin = Arc::new(Material::new(Color::new(0.2, 0.4, 0.7), 0.3, Color::ZERO)?);
    let lamp = Arc::new(Material::emissive(Color::ZERO, Color::new(8.0, 7.0, 5.0))?);

    scene.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0), &ground)?;
    scene.add(Sphere::new(Vec3::new(-2.2, 1.0, 0.0), 1.0), &red)?;
    scene.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0), &chrome)?;
    scene.add(Sphere::new(Vec3::new(2.2, 1.0, 0.0), 1.0), &satin)?;
    scene.add(Sphere::new(Vec3::new(0.0, 4.0, 1.5), 0.5), &lamp)?;

    if let Some(cube) = box_mesh(Vec3::new(1.0, 0.0, 2.0), Vec3::new(1.8, 0.8, 2.8)) {
        scene.add(cube, &red)?;
    }

    let camera = Camera::new(
        Vec3::new(0.0, 2.0, 9.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::Y,
        0.35,
        aspect,
    )
    .with_lens(0.05, 9.0);

    Ok((scene, camera))
}

/// Closed diffuse sphere that glows uniformly; converges to a flat 2.0.
fn furnace(aspect: f32) -> SceneResult<(Scene, Camera)> {
    let mut scene = Scene::with_environment(Environment {
        sky_color: Color::ZERO,
        ..Default::default()
    });
    let wall = Arc::new(Material::new(Color::splat(0.5), 0.0, Color::ONE)?);
    scene.add(Sphere::new(Vec3::ZERO, 10.0), &wall)?;

    let camera = Camera::new(Vec3::ZERO, -Vec3::Z, Vec3::Y, 0.5, aspect);
    Ok((scene, camera))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::Ray;

    #[test]
    fn test_all_scenes_build() {
        for choice in [SceneChoice::Room, SceneChoice::Spheres, SceneChoice::Furnace] {
            let (scene, _) = build(choice, 1.5).unwrap();
            assert!(!scene.is_empty());
            assert!(scene.objects().iter().any(|o| o.material().is_emissive()));
        }
    }

    #[test]
    fn test_room_camera_sees_the_room() {
        let (scene, camera) = build(SceneChoice::Room, 1.0).unwrap();
        assert_eq!(scene.object_count(), 22);

        let hit = scene
            .nearest_hit(&Ray::new(camera.position(), camera.forward()))
            .expect("centre ray should hit the room");
        assert!(hit.intersection.distance > 0.0);
    }

    #[test]
    fn test_box_mesh_is_closed() {
        let mesh = box_mesh(Vec3::ZERO, Vec3::ONE).unwrap();
        assert_eq!(mesh.len(), 12);
        assert!((mesh.area() - 6.0).abs() < 1e-5);
        assert!((mesh.centroid() - Vec3::splat(0.5)).length() < 1e-5);
    }
}
