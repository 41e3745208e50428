//! Read-only view of the simulation for renderers
//!
//! Built once per frame; nothing here mutates simulation state.

use super::types::{
    Direction, Phase, Position, SignalId, VehicleId, VehicleKind, WAITING_OPACITY,
};
use super::world::SimWorld;

/// How a renderer should draw one signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalView {
    pub id: SignalId,
    pub direction: Direction,
    /// Offset from the junction centre
    pub offset: Position,
    pub phase: Phase,
    /// Linear RGB colour for the phase
    pub color: [f32; 3],
}

/// How a renderer should draw one vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleView {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub position: Position,
    /// Radians, north = 0 and clockwise positive
    pub rotation: f32,
    pub opacity: f32,
    pub waiting: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    pub time_ms: u64,
    pub signals: Vec<SignalView>,
    pub vehicles: Vec<VehicleView>,
}

/// Colour used to draw a signal phase
pub fn phase_color(phase: Phase) -> [f32; 3] {
    match phase {
        Phase::Red => [0.9, 0.1, 0.1],
        Phase::Yellow => [0.95, 0.8, 0.1],
        Phase::Green => [0.1, 0.85, 0.2],
    }
}

impl RenderSnapshot {
    pub fn from_world(world: &SimWorld) -> Self {
        let signals = world
            .signals
            .signals()
            .iter()
            .map(|signal| SignalView {
                id: signal.id,
                direction: signal.direction,
                offset: signal.offset,
                phase: signal.phase,
                color: phase_color(signal.phase),
            })
            .collect();

        let vehicles = world
            .scheduler
            .vehicles()
            .map(|vehicle| VehicleView {
                id: vehicle.id,
                kind: vehicle.kind,
                position: vehicle.position,
                rotation: vehicle.direction.heading(),
                opacity: if vehicle.waiting_at_light {
                    WAITING_OPACITY
                } else {
                    1.0
                },
                waiting: vehicle.waiting_at_light,
            })
            .collect();

        Self {
            time_ms: world.time_ms(),
            signals,
            vehicles,
        }
    }
}
