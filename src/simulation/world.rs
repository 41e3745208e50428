//! Main simulation world that ties everything together
//!
//! This is the entry point for running the junction simulation
//! without any Bevy dependencies.

use anyhow::Result;
use log::info;

use super::config::{ControlMode, Density, SimConfig};
use super::render::RenderSnapshot;
use super::scheduler::VehicleScheduler;
use super::signal::{SignalController, SIGNAL_TICK_MS};
use super::types::{Phase, VehicleKind, JUNCTION_SIZE, OUTER_LANE_OFFSET, ROAD_EXTENT};

/// Aggregate counters for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub signal_ticks: u64,
    pub legs_completed: u64,
    pub legs_waiting: u64,
    pub legs_cancelled: u64,
    pub respawns: u64,
    pub reentries: u64,
    pub population_resets: u64,
}

/// The main simulation world
pub struct SimWorld {
    /// Signal phases for the four approaches
    pub signals: SignalController,

    /// Vehicle population and motion cycles
    pub scheduler: VehicleScheduler,

    config: SimConfig,

    /// Running simulation time in milliseconds; frozen while paused
    clock_ms: u64,

    /// Running time since the last signal tick
    signal_elapsed_ms: u64,

    /// Sub-millisecond remainder carried between frame deltas
    frame_carry_ms: f32,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(scheduler: VehicleScheduler, config: SimConfig) -> Self {
        let mut world = Self {
            signals: SignalController::new(),
            scheduler,
            config,
            clock_ms: 0,
            signal_elapsed_ms: 0,
            frame_carry_ms: 0.0,
        };
        world.reset_population();
        world
    }

    pub fn new() -> Self {
        Self::new_internal(VehicleScheduler::new(), SimConfig::default())
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(VehicleScheduler::new_with_seed(seed), SimConfig::default())
    }

    /// Create a world from a validated configuration, optionally seeded
    pub fn with_config(config: SimConfig, seed: Option<u64>) -> Result<Self> {
        let config = config.validated()?;
        let scheduler = match seed {
            Some(seed) => VehicleScheduler::new_with_seed(seed),
            None => VehicleScheduler::new(),
        };
        Ok(Self::new_internal(scheduler, config))
    }

    pub fn config(&self) -> SimConfig {
        self.config
    }

    /// Simulation time in milliseconds
    pub fn time_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Apply a new configuration from the hosting screen.
    ///
    /// A density change regenerates the population. Otherwise a change to the
    /// run flag or speed cancels every in-flight leg; running worlds start
    /// fresh cycles immediately, paused worlds stay frozen until resumed.
    pub fn apply_config(&mut self, config: SimConfig) -> Result<()> {
        let config = config.validated()?;
        let previous = self.config;
        self.config = config;

        if config.mode != previous.mode {
            info!("Control mode set to {:?}", config.mode);
            if config.mode == ControlMode::Adaptive {
                info!("Adaptive control runs the fixed signal cycle");
            }
        }

        if config.density != previous.density {
            if !config.running {
                self.signal_elapsed_ms = 0;
                self.frame_carry_ms = 0.0;
            }
            self.reset_population();
            return Ok(());
        }

        let running_changed = config.running != previous.running;
        let speed_changed = config.speed != previous.speed;
        if !running_changed && !speed_changed {
            return Ok(());
        }

        if config.running {
            info!(
                "Simulation {} at {:.2}x speed",
                if running_changed { "resumed" } else { "running" },
                config.speed
            );
            self.scheduler
                .restart_all(self.clock_ms, &self.signals, config.speed);
        } else if running_changed {
            info!("Simulation paused at {}ms", self.clock_ms);
            self.scheduler.cancel_all(self.clock_ms);
            self.signal_elapsed_ms = 0;
            self.frame_carry_ms = 0.0;
        }

        Ok(())
    }

    /// Discard the vehicle population and generate a new one for the current
    /// density, starting fresh cycles if the simulation is running
    pub fn reset_population(&mut self) {
        self.scheduler.reset_population(self.config.density);
        if self.config.running {
            self.scheduler
                .restart_all(self.clock_ms, &self.signals, self.config.speed);
        }
    }

    /// Select a density and regenerate the population, even if the density
    /// is unchanged
    pub fn set_density(&mut self, density: Density) {
        self.config.density = density;
        self.reset_population();
    }

    /// Advance the simulation by a frame delta in seconds
    pub fn tick(&mut self, delta_secs: f32) {
        if !self.config.running || !delta_secs.is_finite() || delta_secs <= 0.0 {
            return;
        }
        self.frame_carry_ms += delta_secs * 1000.0;
        let whole_ms = self.frame_carry_ms.floor();
        self.frame_carry_ms -= whole_ms;
        self.advance(whole_ms as u64);
    }

    /// Advance the simulation clock by `delta_ms` milliseconds.
    ///
    /// Signal ticks fire on every 1,000ms boundary of running time. Legs due
    /// at or before a boundary complete before that tick fires.
    pub fn advance(&mut self, delta_ms: u64) {
        if !self.config.running {
            return;
        }

        let mut remaining = delta_ms;
        while remaining > 0 {
            let step = remaining.min(SIGNAL_TICK_MS - self.signal_elapsed_ms);
            self.clock_ms += step;
            self.signal_elapsed_ms += step;
            remaining -= step;

            self.scheduler
                .step(self.clock_ms, &self.signals, self.config.speed);

            if self.signal_elapsed_ms >= SIGNAL_TICK_MS {
                self.signal_elapsed_ms = 0;
                self.signals.tick();
            }
        }
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::from_world(self)
    }

    pub fn stats(&self) -> SimStats {
        let scheduler = self.scheduler.stats();
        SimStats {
            signal_ticks: self.signals.tick_count(),
            legs_completed: scheduler.legs_completed,
            legs_waiting: scheduler.legs_waiting,
            legs_cancelled: scheduler.legs_cancelled,
            respawns: scheduler.respawns,
            reentries: scheduler.reentries,
            population_resets: scheduler.population_resets,
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Junction Simulation Summary ===");
        println!("Time: {:.2}s", self.clock_ms as f32 / 1000.0);
        println!(
            "Running: {}, Speed: {:.2}x, Density: {:?}, Mode: {:?}",
            self.config.running, self.config.speed, self.config.density, self.config.mode
        );
        println!();

        println!("--- Signals ---");
        for signal in self.signals.signals() {
            println!(
                "  Signal {:?} ({:?}): {:?} for {}ms",
                signal.id.0, signal.direction, signal.phase, signal.timer_ms
            );
        }

        println!("--- Vehicles ---");
        for vehicle in self.scheduler.vehicles() {
            println!(
                "  {:?} {:?}: heading={:?}, lane={:?}, position=({:.1}, {:.1}), target=({:.1}, {:.1}){}",
                vehicle.kind,
                vehicle.id.0,
                vehicle.direction,
                vehicle.lane,
                vehicle.position.x,
                vehicle.position.y,
                vehicle.target.x,
                vehicle.target.y,
                if vehicle.waiting_at_light { " [waiting]" } else { "" }
            );
        }

        let stats = self.stats();
        println!("--- Stats ---");
        println!(
            "  Signal ticks: {}, Legs completed: {} ({} waiting), Respawns: {}, Re-entries: {}, Resets: {}",
            stats.signal_ticks,
            stats.legs_completed,
            stats.legs_waiting,
            stats.respawns,
            stats.reentries,
            stats.population_resets
        );
    }

    /// Draw a visual map of the junction in the terminal
    pub fn draw_map(&self) {
        // Terminal cells are roughly twice as tall as they are wide
        const CELL_X: f32 = 10.0;
        const CELL_Y: f32 = 20.0;
        let half_w = (ROAD_EXTENT / CELL_X) as i32;
        let half_h = (ROAD_EXTENT / CELL_Y) as i32;
        let width = (half_w * 2 + 1) as usize;
        let height = (half_h * 2 + 1) as usize;

        let road_half_width = OUTER_LANE_OFFSET + CELL_X / 2.0;
        let junction_half = JUNCTION_SIZE / 2.0;

        let mut grid = vec![vec![' '; width]; height];

        // Rows run from north (top) to south (bottom)
        let to_grid = |x: f32, y: f32| -> Option<(usize, usize)> {
            let col = (x / CELL_X).round() as i32 + half_w;
            let row = half_h - (y / CELL_Y).round() as i32;
            if col < 0 || row < 0 || col >= width as i32 || row >= height as i32 {
                None
            } else {
                Some((row as usize, col as usize))
            }
        };

        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let x = (col as i32 - half_w) as f32 * CELL_X;
                let y = (half_h - row as i32) as f32 * CELL_Y;
                if x.abs() <= junction_half && y.abs() <= junction_half {
                    *cell = '+';
                } else if x.abs() <= road_half_width || y.abs() <= road_half_width {
                    *cell = '.';
                }
            }
        }

        for signal in self.signals.signals() {
            if let Some((row, col)) = to_grid(signal.offset.x, signal.offset.y) {
                grid[row][col] = match signal.phase {
                    Phase::Red => 'R',
                    Phase::Yellow => 'Y',
                    Phase::Green => 'G',
                };
            }
        }

        for vehicle in self.scheduler.vehicles() {
            if let Some((row, col)) = to_grid(vehicle.position.x, vehicle.position.y) {
                let marker = match vehicle.kind {
                    VehicleKind::Car => 'C',
                    VehicleKind::Truck => 'T',
                    VehicleKind::Bus => 'B',
                };
                grid[row][col] = if vehicle.waiting_at_light {
                    marker.to_ascii_lowercase()
                } else {
                    marker
                };
            }
        }

        println!("\n=== Junction Map ===");
        println!("Legend: R/Y/G=Signal, C/T/B=Car/Truck/Bus (lowercase=waiting), +=Junction, .=Road");
        println!();
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
