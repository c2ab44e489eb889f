use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kidcam_core::{
    AppConfig, ColorLabel, DetectionFrame, FaceBox, HandDetection, InputEvent, ModeKind,
    ScriptedVision, SessionOrchestrator,
};
use tracing_subscriber::EnvFilter;

fn main() -> kidcam_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { mode, seed, config } => run_play(mode, seed, config.as_deref()),
        Commands::Simulate {
            mode,
            ticks,
            seed,
            snapshot_out,
        } => run_simulate(mode, ticks, seed, snapshot_out.as_deref()),
    }
}

fn run_play(
    mode: Option<ModeKind>,
    seed: Option<u64>,
    config: Option<&std::path::Path>,
) -> kidcam_core::Result<()> {
    let mode = mode.unwrap_or(ModeKind::FaceFun);
    tracing::info!(mode = mode.name(), "starting play session");

    let config = match config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // The real capture/render collaborators plug in here; until then the
    // session runs against a scripted demo feed.
    let ticks = 300;
    let vision = ScriptedVision::new(demo_frames(ticks));
    let mut session = SessionOrchestrator::new(config, vision);
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }

    session.handle_event(InputEvent::Select(mode.name().to_string()))?;
    for _ in 0..ticks {
        session.tick();
    }

    tracing::info!(score = session.score().unwrap_or(0), "play session over");
    session.handle_event(InputEvent::Quit)?;
    Ok(())
}

fn run_simulate(
    mode: ModeKind,
    ticks: u32,
    seed: u64,
    snapshot_out: Option<&std::path::Path>,
) -> kidcam_core::Result<()> {
    tracing::info!(mode = mode.name(), ticks, seed, "running deterministic simulation");

    let vision = ScriptedVision::new(demo_frames(ticks as usize));
    let mut session =
        SessionOrchestrator::new(AppConfig::default(), vision).with_seed(seed);

    session.handle_event(InputEvent::Select(mode.name().to_string()))?;
    for _ in 0..ticks {
        session.tick();
    }

    let snapshot = session
        .snapshot()
        .ok_or_else(|| kidcam_core::KidCamError::msg("simulation produced no snapshot"))?;
    let raw = snapshot.to_json_pretty()?;

    match snapshot_out {
        Some(path) => {
            std::fs::write(path, raw)?;
            tracing::info!(?path, score = snapshot.score, "snapshot written");
        }
        None => println!("{raw}"),
    }
    Ok(())
}

/// Builds the scripted demo feed: a face wanders in and brings a friend, a
/// hand sweeps across the view, and the dominant color cycles through the
/// palette. Every ninth tick the capture misses.
fn demo_frames(ticks: usize) -> Vec<Option<DetectionFrame>> {
    (0..ticks)
        .map(|tick| {
            if tick % 9 == 8 {
                return None;
            }

            let mut frame = DetectionFrame::default();
            if tick >= 30 {
                frame.faces.push(FaceBox {
                    x: 180.0,
                    y: 120.0,
                    width: 140.0,
                    height: 160.0,
                    confidence: 0.9,
                });
            }
            if tick >= 150 {
                frame.faces.push(FaceBox {
                    x: 380.0,
                    y: 140.0,
                    width: 120.0,
                    height: 140.0,
                    confidence: 0.85,
                });
            }

            let sweep = (tick as f32 * 5.0) % 640.0;
            frame.hands.push(HandDetection {
                center: (sweep, 240.0),
                landmarks: vec![(sweep, 240.0)],
            });

            frame.dominant_color = Some(ColorLabel::ALL[(tick / 90) % ColorLabel::ALL.len()]);
            Some(frame)
        })
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Camera mini-games for kids", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an interactive session against the demo detection feed.
    Play {
        /// Game mode to start (face_fun, color_hunt, motion_magic).
        #[arg(short, long)]
        mode: Option<ModeKind>,
        /// Fixed random seed for reproducible runs.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run a deterministic scripted session and dump the final snapshot.
    Simulate {
        /// Game mode to simulate.
        #[arg(short, long)]
        mode: ModeKind,
        /// Number of ticks to run.
        #[arg(short, long, default_value_t = 600)]
        ticks: u32,
        /// Random seed for the run.
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        /// Write the final snapshot JSON here instead of stdout.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },
}
