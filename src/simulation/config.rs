//! Simulation configuration supplied by the hosting screen

use anyhow::{ensure, Result};

/// Traffic density level, selecting the population size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Density {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl Density {
    /// Number of vehicles generated for this density
    pub fn vehicle_count(self) -> usize {
        match self {
            Density::Light => 3,
            Density::Medium => 6,
            Density::Heavy => 9,
        }
    }
}

/// Signal control mode
///
/// Only fixed timing is implemented; `Adaptive` is accepted and runs the
/// fixed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlMode {
    #[default]
    Fixed,
    Adaptive,
}

/// Lowest speed multiplier offered by the UI
pub const MIN_SPEED: f32 = 0.5;

/// Highest speed multiplier offered by the UI
pub const MAX_SPEED: f32 = 3.0;

/// Configuration passed into the engine by value whenever it changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub running: bool,
    pub speed: f32,
    pub density: Density,
    pub mode: ControlMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            running: true,
            speed: 1.0,
            density: Density::Medium,
            mode: ControlMode::Fixed,
        }
    }
}

impl SimConfig {
    /// Check that the speed multiplier is usable for scaling leg durations
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.speed.is_finite() && self.speed > 0.0,
            "speed multiplier must be a positive number, got {}",
            self.speed
        );
        Ok(self)
    }

    pub fn with_running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn with_mode(mut self, mode: ControlMode) -> Self {
        self.mode = mode;
        self
    }
}
