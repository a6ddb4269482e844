//! gesture-canvas — interactive entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gesture_canvas::app::{run, AppConfig, InputMode};
use hand_gesture::GestureConfig;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gesture-canvas", about = "Hand-gesture driven canvas")]
struct Cli {
    /// TOML file with [thresholds], [stabilizer] and [scene] sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay landmarks from a JSON-lines recording instead of simulating
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Simulated landmark noise, pixels
    #[arg(long, default_value_t = 3.0)]
    jitter: f32,

    /// Seed for the simulated landmark noise
    #[arg(long)]
    seed: Option<u64>,

    /// Landmark frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_gesture=info,gesture_canvas=info".into()),
        )
        .init();

    let gesture = match &cli.config {
        Some(path) => GestureConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GestureConfig::default(),
    };

    let input = match cli.replay {
        Some(path) => InputMode::Replay { path },
        None       => InputMode::Simulated { jitter: cli.jitter.max(0.0), seed: cli.seed },
    };

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║        Gesture Canvas — hand-driven hue & shapes     ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    match &input {
        InputMode::Simulated { .. } => println!("  Mode: keyboard simulation (keys 1-7 pose, 0 hides the hand)"),
        InputMode::Replay { path }  => println!("  Mode: replay of {}", path.display()),
    }
    println!("  C calibrate   R reset   Q quit");
    println!();

    info!("gesture-canvas v{} starting", env!("CARGO_PKG_VERSION"));
    run(AppConfig { gesture, input, fps: cli.fps })
}
