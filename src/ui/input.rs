//! Input handling systems

use bevy::prelude::*;

use super::components::SimWorldResource;
use crate::simulation::{ControlMode, Density, MAX_SPEED, MIN_SPEED};

const SPEED_STEP: f32 = 0.25;

/// Handle basic keyboard input
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

/// Map keys to configuration changes
pub fn handle_config_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
) {
    let world = &mut sim_world.0;

    for (key, density) in [
        (KeyCode::Digit1, Density::Light),
        (KeyCode::Digit2, Density::Medium),
        (KeyCode::Digit3, Density::Heavy),
    ] {
        if keyboard.just_pressed(key) {
            world.set_density(density);
        }
    }

    let mut config = world.config();
    if keyboard.just_pressed(KeyCode::Space) {
        config.running = !config.running;
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        config.speed = (config.speed + SPEED_STEP).min(MAX_SPEED);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        config.speed = (config.speed - SPEED_STEP).max(MIN_SPEED);
    }
    if keyboard.just_pressed(KeyCode::KeyM) {
        config.mode = match config.mode {
            ControlMode::Fixed => ControlMode::Adaptive,
            ControlMode::Adaptive => ControlMode::Fixed,
        };
    }

    if config != world.config() {
        if let Err(e) = world.apply_config(config) {
            bevy::log::warn!("Ignoring configuration change: {:#}", e);
        }
    }
}
