use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use skyreach_kernel::{FrameEvent, FrameOutput, SessionConfig};
use skyreach_terrain::{TerrainInstancer, resonance_cluster};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skyreach-cli", about = "Inspect and drive the skyreach archipelago headlessly")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Session config (YAML); defaults apply to anything it omits
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the island list
    Info,
    /// Sample the height field at a point
    Height {
        #[arg(short, long, allow_negative_numbers = true)]
        x: f32,
        #[arg(short, long, allow_negative_numbers = true)]
        z: f32,
    },
    /// Generate terrain décor instances
    Instances {
        /// Print every instance as JSON instead of a per-island summary
        #[arg(long)]
        json: bool,
        /// Seed for the cosmetic scale jitter
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Place the resonance crystal cluster
    Crystals {
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
    /// Drive the movement controller for a number of frames
    Simulate {
        /// Number of frames to step
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Seconds per frame
        #[arg(short, long, default_value = "0.0166667")]
        dt: f32,
        /// Raw key codes held for the whole run (e.g. KeyW,ShiftLeft)
        #[arg(long, value_delimiter = ',')]
        hold: Vec<String>,
        /// Camera yaw in degrees; 0 faces -Z
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        yaw: f32,
        /// Print the final snapshot and events as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SimulationReport {
    frames: u64,
    state_hash: u64,
    output: FrameOutput,
    events: Vec<FrameEvent>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("skyreach-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", skyreach_common::crate_info());
            println!("terrain: {}", skyreach_terrain::crate_info());
            println!("input: {}", skyreach_input::crate_info());
            println!("kernel: {}", skyreach_kernel::crate_info());
            println!("islands:");
            for island in &config.world.islands {
                println!(
                    "  #{} {:<16} center=({:.1}, {:.1}) radius={:.1} base={:.1}",
                    island.id, island.name, island.center.x, island.center.y, island.radius, island.base_height
                );
            }
        }
        Commands::Height { x, z } => {
            let field = config.height_field()?;
            let h = field.height(x, z);
            let over = field.island_at(x, z).map_or("void", |i| i.name.as_str());
            println!("height({x}, {z}) = {h:.4} [{over}]");
            println!("world elevation = {:.4}", h + config.world.height_offset);
        }
        Commands::Instances { json, seed } => {
            let field = config.height_field()?;
            let instancer = TerrainInstancer::new(&field, &config.world);
            let instances = match seed {
                Some(seed) => instancer.generate_with_rng(&mut SmallRng::seed_from_u64(seed)),
                None => instancer.generate(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&instances)?);
            } else {
                println!("{} instances", instances.len());
                for island in field.islands() {
                    let count = instances.iter().filter(|i| i.island == island.id).count();
                    println!("  {:<16} {count}", island.name);
                }
            }
        }
        Commands::Crystals { seed } => {
            let field = config.height_field()?;
            let shards = resonance_cluster(&field, config.world.height_offset, &mut SmallRng::seed_from_u64(seed));
            println!("{}", serde_json::to_string_pretty(&shards)?);
        }
        Commands::Simulate {
            frames,
            dt,
            hold,
            yaw,
            json,
        } => {
            let mut controller = config.controller()?;
            let mut input = config.input_state();
            for code in &hold {
                if input.on_press(code).is_none() {
                    tracing::warn!(code, "key code is not bound to any action");
                }
            }
            let yaw = yaw.to_radians();
            let facing = Vec3::new(yaw.sin(), 0.0, -yaw.cos());

            let mut output = controller.snapshot();
            for _ in 0..frames {
                output = controller.step(dt, &input, facing);
            }

            let report = SimulationReport {
                frames,
                state_hash: controller.state_hash(),
                output,
                events: controller.drain_events(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let p = report.output.player.position;
                let v = report.output.vitals;
                println!("after {frames} frames (hash {:#x}):", report.state_hash);
                println!("  position = ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
                println!("  speed    = {:.3}", report.output.player.planar_speed());
                println!(
                    "  vitals   = health {:.3}, mana {:.3}, energy {:.3}",
                    v.health(),
                    v.mana(),
                    v.energy()
                );
                println!("  events   = {}", report.events.len());
                for event in &report.events {
                    println!("    {event:?}");
                }
            }
        }
    }

    Ok(())
}
