use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use junction_sim::simulation::{self, ControlMode, Density, SimConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DensityArg {
    Light,
    Medium,
    Heavy,
}

impl From<DensityArg> for Density {
    fn from(arg: DensityArg) -> Self {
        match arg {
            DensityArg::Light => Density::Light,
            DensityArg::Medium => Density::Medium,
            DensityArg::Heavy => Density::Heavy,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Fixed,
    Adaptive,
}

impl From<ModeArg> for ControlMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Fixed => ControlMode::Fixed,
            ModeArg::Adaptive => ControlMode::Adaptive,
        }
    }
}

#[derive(Parser)]
#[command(name = "junction_sim")]
#[command(about = "Four-way junction signal simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Speed multiplier for vehicle motion
    #[arg(long, default_value = "1.0")]
    speed: f32,

    /// Traffic density
    #[arg(long, value_enum, default_value = "medium")]
    density: DensityArg,

    /// Signal control mode
    #[arg(long, value_enum, default_value = "fixed")]
    mode: ModeArg,

    /// Start with the simulation paused
    #[arg(long)]
    paused: bool,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> Result<SimConfig> {
        SimConfig::default()
            .with_running(!self.paused)
            .with_speed(self.speed)
            .with_density(self.density.into())
            .with_mode(self.mode.into())
            .validated()
            .context("Invalid simulation configuration")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config()?;

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config, cli.seed);
            return Ok(());
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,junction_sim=info"),
    )
    .init();
    run_headless(config, cli.seed, cli.ticks, cli.delta)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(config: SimConfig, seed: Option<u64>, ticks: u32, delta: f32) -> Result<()> {
    anyhow::ensure!(delta > 0.0, "tick delta must be positive, got {}", delta);

    info!("Running junction simulation in headless mode");
    info!("Ticks: {}, Delta: {}s", ticks, delta);

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / delta).ceil() as u32;

    let mut world = simulation::SimWorld::with_config(config, seed)?;

    println!("Initial state:");
    world.print_summary();
    world.draw_map();
    println!();

    let mut tick = 0;
    while tick < ticks {
        let ticks_to_run = ticks_per_second.min(ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(delta);
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            world.time_ms() as f32 / 1000.0
        );
        world.print_summary();
        world.draw_map();
        println!();
    }

    let stats = world.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Signal ticks: {}", stats.signal_ticks);
    info!("Legs completed: {}", stats.legs_completed);
    info!("Legs ended waiting: {}", stats.legs_waiting);
    info!("Respawns: {}", stats.respawns);
    info!("Re-entries: {}", stats.reentries);

    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: SimConfig, seed: Option<u64>) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Junction Sim UI...");
    println!();
    println!("Controls:");
    println!("  Space       - Pause / resume");
    println!("  Up/Down     - Change speed");
    println!("  1/2/3       - Light / medium / heavy traffic");
    println!("  M           - Toggle control mode");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,junction_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Junction Sim".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(junction_sim::ui::JunctionSimUIPlugin { config, seed })
        .run();
}
