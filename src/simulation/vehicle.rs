//! Vehicle motion logic for the junction simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::junction;
use super::signal::SignalController;
use super::types::{
    Direction, Lane, Position, VehicleId, VehicleKind, BASE_LEG_DURATION_MS, LEG_DISTANCE,
    MAX_LEG_DURATION_MS, ROAD_EXTENT, WAITING_OFFSET,
};

/// One timed transition of a vehicle from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionLeg {
    pub from: Position,
    pub to: Position,
    /// Simulation time the leg started, in milliseconds
    pub started_at: u64,
    /// Wall-clock length of the leg, in milliseconds
    pub duration_ms: u64,
}

impl MotionLeg {
    pub fn due_at(&self) -> u64 {
        self.started_at.saturating_add(self.duration_ms)
    }

    /// Interpolated position at simulation time `now`
    pub fn position_at(&self, now: u64) -> Position {
        if self.duration_ms == 0 || now >= self.due_at() {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.started_at) as f32;
        self.from.lerp(&self.to, elapsed / self.duration_ms as f32)
    }
}

/// Leg duration for a speed multiplier; higher speed means shorter legs.
/// Always within `1..=MAX_LEG_DURATION_MS`.
pub fn leg_duration_ms(speed: f32) -> u64 {
    let millis = (BASE_LEG_DURATION_MS as f64 / speed as f64).round();
    if millis.is_nan() {
        return MAX_LEG_DURATION_MS;
    }
    millis.clamp(1.0, MAX_LEG_DURATION_MS as f64) as u64
}

/// The outcome of planning a leg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegPlan {
    pub target: Position,
    pub waiting: bool,
}

/// A vehicle in the junction simulation
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub position: Position,
    pub direction: Direction,
    pub lane: Lane,
    pub waiting_at_light: bool,
    /// Target of the current or most recent leg
    pub target: Position,
    /// In-flight leg, if any
    pub leg: Option<MotionLeg>,
}

impl SimVehicle {
    pub fn new(
        id: VehicleId,
        kind: VehicleKind,
        position: Position,
        direction: Direction,
        lane: Lane,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            direction,
            lane,
            waiting_at_light: false,
            target: position,
            leg: None,
        }
    }

    /// Stop position short of the approach buffer on the current lane
    pub fn waiting_position(&self) -> Position {
        Position::on_axis(self.direction, -WAITING_OFFSET, self.lane.offset())
    }

    /// Position one leg further along the current lane
    pub fn progression_position(&self) -> Position {
        let along = self.position.along(self.direction) + LEG_DISTANCE;
        Position::on_axis(self.direction, along, self.lane.offset())
    }

    /// Place a vehicle that has left the road back at the entry of its approach
    pub fn reenter_if_off_road(&mut self) -> bool {
        if self.position.along(self.direction) < ROAD_EXTENT {
            return false;
        }
        self.position = Position::on_axis(self.direction, -ROAD_EXTENT, self.lane.offset());
        true
    }

    /// Decide the next target for the current direction and lane
    pub fn plan(&self, signals: &SignalController) -> LegPlan {
        let progression = self.progression_position();
        if junction::must_wait(self.direction, &progression, signals) {
            LegPlan {
                target: self.waiting_position(),
                waiting: true,
            }
        } else {
            LegPlan {
                target: progression,
                waiting: false,
            }
        }
    }

    /// Commit a planned leg starting at `now`
    pub fn begin_leg(&mut self, plan: LegPlan, now: u64, duration_ms: u64) -> MotionLeg {
        let leg = MotionLeg {
            from: self.position,
            to: plan.target,
            started_at: now,
            duration_ms,
        };
        self.target = plan.target;
        self.waiting_at_light = plan.waiting;
        self.leg = Some(leg);
        leg
    }

    /// Update the position from the in-flight leg
    pub fn sync_position(&mut self, now: u64) {
        if let Some(leg) = &self.leg {
            self.position = leg.position_at(now);
        }
    }

    /// Drop the in-flight leg, keeping the vehicle where it is at `now`
    pub fn cancel_leg(&mut self, now: u64) {
        self.sync_position(now);
        self.leg = None;
    }

    /// Finish the in-flight leg, snapping to its target
    pub fn complete_leg(&mut self) {
        if let Some(leg) = self.leg.take() {
            self.position = leg.to;
        }
    }
}
