//! Systems for spawning visual entities from simulation state

use bevy::prelude::*;

use super::components::{
    to_world, vehicle_shape, EntityMappings, HudText, SignalLink, SimSynced, SimWorldResource,
    VehicleLink,
};
use crate::simulation::VehicleView;

const SIGNAL_SIZE: f32 = 1.2;
const SIGNAL_HEIGHT: f32 = 1.5;

/// System to create the signal heads from simulation state
pub fn spawn_signal_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
) {
    let snapshot = sim_world.0.snapshot();

    for signal in &snapshot.signals {
        let [r, g, b] = signal.color;
        let entity = commands
            .spawn((
                SimSynced,
                SignalLink(signal.id),
                Mesh3d(meshes.add(Cuboid::new(SIGNAL_SIZE, SIGNAL_HEIGHT, SIGNAL_SIZE))),
                MeshMaterial3d(materials.add(Color::srgb(r, g, b))),
                Transform::from_translation(to_world(&signal.offset, SIGNAL_HEIGHT / 2.0)),
            ))
            .id();
        mappings.signals.insert(signal.id, entity);
    }
}

/// Spawn a single vehicle visual
pub fn spawn_vehicle_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    view: &VehicleView,
    mappings: &mut ResMut<EntityMappings>,
) {
    let (width, height, length, [r, g, b]) = vehicle_shape(view.kind);

    let entity = commands
        .spawn((
            SimSynced,
            VehicleLink(view.id),
            Mesh3d(meshes.add(Cuboid::new(width, height, length))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(r, g, b, view.opacity),
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(to_world(&view.position, height / 2.0 + 0.05))
                .with_rotation(Quat::from_rotation_y(-view.rotation)),
        ))
        .id();
    mappings.vehicles.insert(view.id, entity);
}

/// System to create the status line
pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        Text::new("Junction"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        HudText,
    ));
}
