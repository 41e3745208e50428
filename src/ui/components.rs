//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{Position, SignalId, SimWorld, VehicleId, VehicleKind};

/// Scale from simulation units to world units
pub const WORLD_SCALE: f32 = 0.1;

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::new())
    }
}

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// Links a Bevy entity to a simulation signal
#[derive(Component)]
pub struct SignalLink(pub SignalId);

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Marker for the status line in the HUD
#[derive(Component)]
pub struct HudText;

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub signals: HashMap<SignalId, Entity>,
    pub vehicles: HashMap<VehicleId, Entity>,
}

/// Convert a simulation position to a point on the ground plane.
///
/// The camera looks straight down with +Z up the screen and -X to the right,
/// so simulation north maps to +Z and east to -X.
pub fn to_world(position: &Position, height: f32) -> Vec3 {
    Vec3::new(-position.x * WORLD_SCALE, height, position.y * WORLD_SCALE)
}

/// Mesh dimensions (width, height, length) and base colour for a vehicle kind
pub fn vehicle_shape(kind: VehicleKind) -> (f32, f32, f32, [f32; 3]) {
    match kind {
        VehicleKind::Car => (0.9, 0.5, 1.6, [0.8, 0.2, 0.2]),
        VehicleKind::Truck => (1.1, 0.8, 2.4, [0.2, 0.4, 0.8]),
        VehicleKind::Bus => (1.2, 0.9, 3.2, [0.95, 0.65, 0.1]),
    }
}
