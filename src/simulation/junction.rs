//! Junction queueing decision
//!
//! Decides whether a vehicle must hold short of the junction. The decision is
//! made on the vehicle's prospective position, before a new leg is committed,
//! so that a vehicle never overshoots into the junction on a red.

use super::signal::SignalController;
use super::types::{Direction, Position, APPROACH_BUFFER};

/// Whether `next` lies within the approach buffer of the junction centre,
/// measured along the axis of travel for `direction`
pub fn within_approach_buffer(direction: Direction, next: &Position) -> bool {
    next.along(direction).abs() <= APPROACH_BUFFER
}

/// Returns true if a vehicle heading in `direction` towards `next` must wait.
///
/// Outside the approach buffer a vehicle may always proceed. Inside it the
/// governing signal must be green.
pub fn must_wait(direction: Direction, next: &Position, signals: &SignalController) -> bool {
    if !within_approach_buffer(direction, next) {
        return false;
    }
    !signals.phase_for(direction).permits_entry()
}
