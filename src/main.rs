use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use intersection_sim::{
    config::SimulationConfig,
    detection::{lane_assignment, ClassCountDir, VehicleCountSource},
    render::{ConsoleRenderer, FrameSink, JsonLinesWriter},
    report::SignalReport,
    simulation::{IntersectionSimulator, RunOptions},
};

#[derive(Parser)]
#[command(name = "intersection-sim")]
#[command(about = "Emergency-aware signal priority for a four-way intersection")]
struct Cli {
    /// Enable verbose logging for detailed simulation progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Animate vehicles through the intersection in priority order
    Simulate(SimulateArgs),
    /// Print per-signal statistics and which signal goes first
    Report(ReportArgs),
}

#[derive(Args)]
struct SimulateArgs {
    /// Intersection configuration file
    #[arg(short, long, default_value = "intersection.toml")]
    intersection: PathBuf,

    /// Vehicles configuration file
    #[arg(long, default_value = "vehicles.toml")]
    vehicles: PathBuf,

    /// Directory of per-camera class count JSON files
    #[arg(short, long, default_value = "class_counts")]
    counts_dir: PathBuf,

    /// Random seed for the in-lane vehicle order
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks even if vehicles remain
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write every frame as a JSON line to this file
    #[arg(long)]
    frames_out: Option<PathBuf>,

    /// Run at the configured tick rate instead of as fast as possible
    #[arg(long)]
    realtime: bool,
}

#[derive(Args)]
struct ReportArgs {
    /// Directory of per-camera class count JSON files
    #[arg(short, long, default_value = "class_counts")]
    counts_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();

    match cli.command {
        Command::Simulate(args) => simulate(&args),
        Command::Report(args) => report(&args),
    }
}

fn load_config(intersection: &Path, vehicles: &Path) -> Result<SimulationConfig> {
    if intersection.exists() || vehicles.exists() {
        return SimulationConfig::load_from_files(intersection, vehicles);
    }
    info!("No configuration files found, using built-in defaults");
    Ok(SimulationConfig::default())
}

fn simulate(args: &SimulateArgs) -> Result<()> {
    info!("Starting Intersection Simulator");

    let config = load_config(&args.intersection, &args.vehicles)?;
    let seed = args.seed.or(config.vehicles.random.seed);

    let counts = ClassCountDir::new(&args.counts_dir).lane_counts()?;
    let assignment = lane_assignment(&counts);

    let mut rng = match seed {
        Some(seed) => {
            info!("Random Seed: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut simulator = IntersectionSimulator::shuffled(&config, assignment, &mut rng)?;
    info!("=== Initial Queues ===");
    info!("{}", simulator.frame().board());

    let mut sinks: Vec<Box<dyn FrameSink>> = vec![Box::new(ConsoleRenderer::new(config.intersection.timing.tick_rate as u64))];
    if let Some(path) = &args.frames_out {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        sinks.push(Box::new(JsonLinesWriter::new(BufWriter::new(file))));
        info!("Writing frames to {}", path.display());
    }

    let options = RunOptions {
        max_ticks: args.max_ticks,
        realtime: args.realtime,
    };
    let summary = simulator.run(&mut sinks, &options)?;

    if summary.terminal && args.realtime {
        std::thread::sleep(Duration::from_millis(config.intersection.timing.completion_pause_ms));
    }

    info!("Simulation {}!", if summary.terminal { "complete" } else { "stopped" });
    info!("Total ticks: {}", summary.ticks);
    info!("Vehicles crossed: {}", summary.crossed);
    info!("Right-of-way changes: {}", summary.lane_switches);
    info!("Average tick time: {:.3}ms", summary.average_tick_time.as_secs_f64() * 1000.0);

    Ok(())
}

fn report(args: &ReportArgs) -> Result<()> {
    let counts = ClassCountDir::new(&args.counts_dir).lane_counts()?;
    let report = SignalReport::from_counts(&counts);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
