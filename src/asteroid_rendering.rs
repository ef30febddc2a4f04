//! Mesh2d-based filled polygon rendering for asteroids.
//!
//! Asteroids live in the [`Simulation`] resource rather than as entities, so
//! each one is mirrored by a lightweight proxy entity carrying a black
//! `Mesh2d` fill.  Proxies are keyed by asteroid id: spawned when an id first
//! appears, re-positioned every frame, and despawned once the asteroid is
//! gone.  The white gizmo outline is drawn on top by
//! [`asteroid_outline_system`](crate::rendering::asteroid_outline_system).
//!
//! Meshes are built in world units and scaled to pixels through the proxy's
//! `Transform`, so a window resize never needs a mesh rebuild.

use crate::simulation::Simulation;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::collections::HashMap;

/// Marks a fill proxy and records which asteroid it mirrors.
#[derive(Component, Debug, Clone, Copy)]
pub struct AsteroidFill(pub u64);

/// Asteroid id → proxy entity, plus the shared fill material.
#[derive(Resource, Default)]
pub struct FillProxies {
    entities: HashMap<u64, Entity>,
    material: Option<Handle<ColorMaterial>>,
}

/// Spawn, move and despawn fill proxies so they track the live asteroids.
pub fn sync_asteroid_fill_system(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut proxies: ResMut<FillProxies>,
    mut q_fills: Query<&mut Transform, With<AsteroidFill>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let scale = sim.viewport().pixels_per_unit();
    let material = proxies
        .material
        .get_or_insert_with(|| materials.add(ColorMaterial::from_color(Color::BLACK)))
        .clone();

    let mut live = HashMap::with_capacity(sim.asteroids().len());
    for asteroid in sim.asteroids() {
        let transform = Transform {
            translation: (asteroid.location() * scale).extend(0.0),
            rotation: Quat::from_rotation_z(asteroid.rotation_radians()),
            scale: Vec3::new(scale, scale, 1.0),
        };

        let entity = match proxies.entities.get(&asteroid.id()) {
            Some(&entity) => {
                if let Ok(mut current) = q_fills.get_mut(entity) {
                    *current = transform;
                }
                entity
            }
            None => {
                if asteroid.vertices().len() < 3 {
                    continue;
                }
                let mesh = meshes.add(filled_polygon_mesh(asteroid.vertices()));
                commands
                    .spawn((
                        AsteroidFill(asteroid.id()),
                        Mesh2d(mesh),
                        MeshMaterial2d(material.clone()),
                        transform,
                    ))
                    .id()
            }
        };
        live.insert(asteroid.id(), entity);
    }

    for (id, entity) in proxies.entities.drain() {
        if !live.contains_key(&id) {
            commands.entity(entity).despawn();
        }
    }
    proxies.entities = live;
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Triangulate a polygon that is star-shaped about the origin into a
/// renderable [`Mesh`].
///
/// Asteroid outlines have one vertex per bearing at a random radius, so they
/// can be concave but every vertex is visible from the centre.  A fan from an
/// extra centre vertex covers them exactly: triangles `(c, i, i+1)` with the
/// last one closing back to vertex 0.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let center = n as u32;
    let mut positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    positions.push([0.0, 0.0, 0.0]);
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n + 1];
    // Local coordinates are within ±0.5 world units.
    let uvs: Vec<[f32; 2]> = positions.iter().map(|p| [p[0] + 0.5, p[1] + 0.5]).collect();

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        indices.extend_from_slice(&[center, i, (i + 1) % n as u32]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_covers_every_edge_from_the_centre() {
        let square = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, -1.0),
        ];
        let mesh = filled_polygon_mesh(&square);
        assert_eq!(mesh.count_vertices(), 5);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(
            indices.as_slice(),
            &[4, 0, 1, 4, 1, 2, 4, 2, 3, 4, 3, 0]
        );
    }
}
