use bevy::prelude::*;
use bevy::window::WindowResolution;
use shatter::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use shatter::graphics;
use shatter::input::InteractionPlugin;
use shatter::rendering::RenderingPlugin;
use shatter::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Asteroids".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // SimulationPlugin loads assets/asteroids.toml and seeds the field in
        // Startup before the first tick.
        .add_plugins((SimulationPlugin, InteractionPlugin, RenderingPlugin))
        .add_systems(Startup, graphics::setup_camera)
        .run();
}
