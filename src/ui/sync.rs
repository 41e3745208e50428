//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    to_world, vehicle_shape, EntityMappings, HudText, SignalLink, SimWorldResource, VehicleLink,
};
use super::spawner::spawn_vehicle_visual;
use crate::simulation::VehicleId;

/// System to run simulation tick
pub fn tick_simulation(time: Res<Time>, mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick(time.delta_secs());
}

/// System to sync vehicle visuals from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(
        Entity,
        &VehicleLink,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let snapshot = sim_world.0.snapshot();
    let mut existing: HashSet<VehicleId> = HashSet::new();

    for (entity, link, mut transform, material_handle) in vehicle_query.iter_mut() {
        let Some(view) = snapshot.vehicles.iter().find(|v| v.id == link.0) else {
            // Vehicle was discarded by a population reset
            commands.entity(entity).despawn();
            mappings.vehicles.remove(&link.0);
            continue;
        };

        existing.insert(view.id);
        let (_, height, _, [r, g, b]) = vehicle_shape(view.kind);
        transform.translation = to_world(&view.position, height / 2.0 + 0.05);
        transform.rotation = Quat::from_rotation_y(-view.rotation);
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = Color::srgba(r, g, b, view.opacity);
        }
    }

    for view in snapshot.vehicles.iter().filter(|v| !existing.contains(&v.id)) {
        spawn_vehicle_visual(&mut commands, &mut meshes, &mut materials, view, &mut mappings);
    }
}

/// System to colour signal heads by phase
pub fn sync_signals(
    sim_world: Res<SimWorldResource>,
    signal_query: Query<(&SignalLink, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (link, material_handle) in signal_query.iter() {
        let phase = sim_world
            .0
            .signals
            .signals()
            .iter()
            .find(|s| s.id == link.0)
            .map(|s| s.phase);

        if let (Some(phase), Some(material)) = (phase, materials.get_mut(&material_handle.0)) {
            let [r, g, b] = crate::simulation::phase_color(phase);
            material.base_color = Color::srgb(r, g, b);
        }
    }
}

/// System to update the status line
pub fn update_hud_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<&mut Text, With<HudText>>,
) {
    let world = &sim_world.0;
    let config = world.config();
    let waiting = world
        .scheduler
        .vehicles()
        .filter(|v| v.waiting_at_light)
        .count();

    for mut text in text_query.iter_mut() {
        **text = format!(
            "{} | {:.2}x | {:?} ({} vehicles, {} waiting) | {:?} | {:.1}s",
            if config.running { "Running" } else { "Paused" },
            config.speed,
            config.density,
            world.scheduler.len(),
            waiting,
            config.mode,
            world.time_ms() as f32 / 1000.0
        );
    }
}
