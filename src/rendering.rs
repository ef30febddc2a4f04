//! Immediate-mode drawing of the simulation state.
//!
//! ## Layer Model
//!
//! | Layer             | Technology | Drawn by                          |
//! |-------------------|------------|-----------------------------------|
//! | Asteroid fills    | `Mesh2d`   | `sync_asteroid_fill_system`       |
//! | Asteroid outlines | Gizmos     | `asteroid_outline_system`         |
//! | Particle bursts   | Gizmos     | `particle_render_system`          |
//!
//! Everything is read straight from the [`Simulation`] resource each frame and
//! mapped from world units to camera pixels through its [`Viewport`].
//!
//! [`Viewport`]: crate::viewport::Viewport

use crate::asteroid_rendering::{sync_asteroid_fill_system, FillProxies};
use crate::config::SimConfig;
use crate::simulation::{tick_system, Simulation};
use bevy::prelude::*;

/// Outline colour for every asteroid.
const OUTLINE_COLOR: Color = Color::WHITE;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FillProxies>().add_systems(
            Update,
            (
                sync_asteroid_fill_system,
                asteroid_outline_system,
                particle_render_system,
            )
                .after(tick_system),
        );
    }
}

/// Draw each asteroid as a closed white polyline.
pub fn asteroid_outline_system(mut gizmos: Gizmos, sim: Res<Simulation>) {
    let viewport = sim.viewport();
    for asteroid in sim.asteroids() {
        let mut outline: Vec<Vec2> = asteroid
            .world_vertices()
            .map(|v| viewport.world_to_camera(v))
            .collect();
        let Some(&first) = outline.first() else {
            continue;
        };
        outline.push(first);
        gizmos.linestrip_2d(outline, OUTLINE_COLOR);
    }
}

/// Draw every particle of every live burst as a short dash, faded by the
/// burst's remaining display budget.
pub fn particle_render_system(mut gizmos: Gizmos, sim: Res<Simulation>, config: Res<SimConfig>) {
    let viewport = sim.viewport();
    // Gizmos have no point primitive; a dash one point wide stands in for it.
    let dash = Vec2::new(config.particle_point_px, 0.0);

    for burst in sim.particles() {
        let [r, g, b] = burst.color();
        let color = Color::srgba(r, g, b, burst.opacity());
        for point in burst.render_points() {
            let p = viewport.world_to_camera(point);
            gizmos.line_2d(p, p + dash, color);
        }
    }
}
