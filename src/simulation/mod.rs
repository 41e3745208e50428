//! Standalone junction simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod config;
mod junction;
mod render;
mod scheduler;
mod signal;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use config::{ControlMode, Density, SimConfig, MAX_SPEED, MIN_SPEED};
#[allow(unused_imports)]
pub use junction::{must_wait, within_approach_buffer};
#[allow(unused_imports)]
pub use render::{phase_color, RenderSnapshot, SignalView, VehicleView};
#[allow(unused_imports)]
pub use scheduler::{SchedulerStats, VehicleScheduler};
#[allow(unused_imports)]
pub use signal::{
    Signal, SignalController, GREEN_DURATION_MS, RED_DURATION_MS, SIGNAL_TICK_MS,
    YELLOW_DURATION_MS,
};
#[allow(unused_imports)]
pub use types::{
    Direction, Lane, Phase, Position, SignalId, VehicleId, VehicleKind, APPROACH_BUFFER,
    BASE_LEG_DURATION_MS, INNER_LANE_OFFSET, JUNCTION_SIZE, LEG_DISTANCE, MAX_LEG_DURATION_MS,
    OUTER_LANE_OFFSET, ROAD_EXTENT, SIGNAL_OFFSET, WAITING_OFFSET, WAITING_OPACITY,
};
#[allow(unused_imports)]
pub use vehicle::{leg_duration_ms, LegPlan, MotionLeg, SimVehicle};
pub use world::{SimStats, SimWorld};
