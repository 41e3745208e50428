//! World setup systems for camera, lighting, ground and roads

use bevy::prelude::*;

use super::components::{Ground, MainCamera, WORLD_SCALE};
use crate::simulation::{JUNCTION_SIZE, OUTER_LANE_OFFSET, ROAD_EXTENT};

/// System to setup the world environment (ground, lighting, camera, roads)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    const ROAD_HEIGHT: f32 = 0.02;

    // Spawn a 3D camera with top-down view
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 60.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    // Spawn a directional light
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Spawn a ground plane
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));

    // Both roads span the full extent and cross at the junction
    let road_length = ROAD_EXTENT * 2.0 * WORLD_SCALE;
    let road_width = (OUTER_LANE_OFFSET + 10.0) * 2.0 * WORLD_SCALE;
    let road_material = materials.add(Color::srgb(0.2, 0.2, 0.2));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(road_width, ROAD_HEIGHT, road_length))),
        MeshMaterial3d(road_material.clone()),
        Transform::from_translation(Vec3::new(0.0, ROAD_HEIGHT / 2.0, 0.0)),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(road_length, ROAD_HEIGHT, road_width))),
        MeshMaterial3d(road_material),
        Transform::from_translation(Vec3::new(0.0, ROAD_HEIGHT / 2.0, 0.0)),
    ));

    let junction_size = JUNCTION_SIZE * WORLD_SCALE;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(junction_size, ROAD_HEIGHT, junction_size))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.3, 0.3))),
        Transform::from_translation(Vec3::new(0.0, ROAD_HEIGHT, 0.0)),
    ));
}
