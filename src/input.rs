//! Pointer and keyboard input, plus window → viewport synchronisation.
//!
//! | Input              | Command                      |
//! |--------------------|------------------------------|
//! | Left mouse button  | [`SimCommand::Click`] at cursor |
//! | Right mouse button | [`SimCommand::TogglePause`]  |
//! | `P`                | [`SimCommand::TogglePause`]  |
//! | `R`                | [`SimCommand::Reset`]        |
//!
//! All systems run before `apply_commands_system`, so a click is applied in the
//! same frame it happens.

use crate::simulation::{apply_commands_system, SimCommand, Simulation};
use crate::viewport::Viewport;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                viewport_sync_system,
                pointer_input_system,
                keyboard_input_system,
            )
                .chain()
                .before(apply_commands_system),
        );
    }
}

/// Keep the simulation viewport matched to the primary window's logical size.
pub fn viewport_sync_system(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    // Minimised windows report a zero size.
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let viewport = Viewport::from_window_size(width, height);
    if sim.viewport() != viewport {
        debug!("Viewport resized to {width}×{height} px");
        sim.set_viewport(viewport);
    }
}

/// Turn mouse presses into simulation commands.
pub fn pointer_input_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    sim: Res<Simulation>,
    mut commands: MessageWriter<SimCommand>,
) {
    if mouse_buttons.just_pressed(MouseButton::Left) {
        let cursor = q_window.single().ok().and_then(Window::cursor_position);
        if let Some(cursor) = cursor {
            commands.write(SimCommand::Click(sim.viewport().screen_to_world(cursor)));
        }
    }
    if mouse_buttons.just_pressed(MouseButton::Right) {
        commands.write(SimCommand::TogglePause);
    }
}

pub fn keyboard_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: MessageWriter<SimCommand>,
) {
    if keys.just_pressed(KeyCode::KeyP) {
        commands.write(SimCommand::TogglePause);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.write(SimCommand::Reset);
    }
}
