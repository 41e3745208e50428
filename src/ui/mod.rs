//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads a `RenderSnapshot` from `SimWorld` each frame and renders it in 3D.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

use crate::simulation::{SimConfig, SimWorld};

pub use components::{EntityMappings, SimWorldResource};

use input::{handle_config_input, handle_input};
use spawner::{setup_hud, spawn_signal_visuals};
use sync::{sync_signals, sync_vehicles, tick_simulation, update_hud_text};
use world::setup_world;

/// Plugin to register all UI systems
pub struct JunctionSimUIPlugin {
    pub config: SimConfig,
    pub seed: Option<u64>,
}

impl Plugin for JunctionSimUIPlugin {
    fn build(&self, app: &mut App) {
        let world = match SimWorld::with_config(self.config, self.seed) {
            Ok(world) => world,
            Err(e) => {
                bevy::log::error!("Falling back to default simulation: {:#}", e);
                SimWorld::new()
            }
        };

        app.insert_resource(SimWorldResource(world))
            .init_resource::<EntityMappings>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_signal_visuals.after(setup_world),
                    setup_hud,
                ),
            )
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_config_input,
                    sync_vehicles.after(handle_config_input),
                    sync_signals,
                    update_hud_text,
                ),
            );
    }
}
