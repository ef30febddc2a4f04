use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The default `Camera2d` maps one world pixel to one logical window pixel
/// with the origin at the window centre, which is what
/// [`Viewport::world_to_camera`](crate::viewport::Viewport::world_to_camera)
/// targets.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}
