//! Signal phase logic for the junction
//!
//! Standalone implementation that doesn't depend on Bevy.

use log::debug;

use super::types::{Direction, Phase, Position, SignalId, SIGNAL_OFFSET};

/// Time a signal stays green, in milliseconds
pub const GREEN_DURATION_MS: u64 = 10_000;

/// Time a signal stays yellow, in milliseconds
pub const YELLOW_DURATION_MS: u64 = 2_000;

/// Time a signal stays red; equals green + yellow of the perpendicular pair
pub const RED_DURATION_MS: u64 = GREEN_DURATION_MS + YELLOW_DURATION_MS;

/// Interval between controller ticks, in milliseconds
pub const SIGNAL_TICK_MS: u64 = 1_000;

/// A signal governing one approach of the junction
#[derive(Debug, Clone)]
pub struct Signal {
    pub id: SignalId,
    /// Direction of travel this signal governs
    pub direction: Direction,
    pub phase: Phase,
    /// Offset from the junction centre, for rendering only
    pub offset: Position,
    /// Milliseconds spent in the current phase
    pub timer_ms: u64,
}

impl Signal {
    pub fn new(id: SignalId, direction: Direction, phase: Phase) -> Self {
        // Head sits at the stop line on the near-right corner of the approach
        let offset = Position::on_axis(direction, -SIGNAL_OFFSET, SIGNAL_OFFSET);
        Self {
            id,
            direction,
            phase,
            offset,
            timer_ms: 0,
        }
    }

    fn phase_duration(&self) -> u64 {
        match self.phase {
            Phase::Green => GREEN_DURATION_MS,
            Phase::Yellow => YELLOW_DURATION_MS,
            Phase::Red => RED_DURATION_MS,
        }
    }

    /// Advance the phase timer by one tick interval.
    /// Returns true if the phase changed.
    pub fn tick(&mut self) -> bool {
        self.timer_ms += SIGNAL_TICK_MS;
        if self.timer_ms < self.phase_duration() {
            return false;
        }

        self.phase = match self.phase {
            Phase::Green => Phase::Yellow,
            Phase::Yellow => Phase::Red,
            Phase::Red => Phase::Green,
        };
        self.timer_ms = 0;
        true
    }
}

/// Owns the four signals of the junction and advances them in lockstep
#[derive(Debug, Clone)]
pub struct SignalController {
    signals: Vec<Signal>,
    ticks: u64,
}

impl Default for SignalController {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalController {
    /// Create the controller with north/south red and east/west green
    pub fn new() -> Self {
        let signals = Direction::ALL
            .iter()
            .enumerate()
            .map(|(index, &direction)| {
                let phase = if direction.is_north_south() {
                    Phase::Red
                } else {
                    Phase::Green
                };
                Signal::new(SignalId(index as u32), direction, phase)
            })
            .collect();

        Self { signals, ticks: 0 }
    }

    /// Advance every signal by one tick interval
    pub fn tick(&mut self) {
        self.ticks += 1;
        for signal in &mut self.signals {
            if signal.tick() {
                debug!(
                    "Signal {:?} ({:?}) changed to {:?}",
                    signal.id.0, signal.direction, signal.phase
                );
            }
        }
    }

    /// The signal governing vehicles travelling in `direction`
    pub fn signal_for(&self, direction: Direction) -> &Signal {
        // Built from Direction::ALL, so every direction is present
        let index = Direction::ALL
            .iter()
            .position(|&d| d == direction)
            .unwrap_or_default();
        &self.signals[index]
    }

    /// Current phase for vehicles travelling in `direction`
    pub fn phase_for(&self, direction: Direction) -> Phase {
        self.signal_for(direction).phase
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Number of ticks processed since creation
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}
