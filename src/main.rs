//! Pose coaching command line tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use pose_coach::{
    analysis::{BodyPoints, MoveAnalyzer, MoveType, SkillLevel},
    calibration::CalibrationSession,
    config::Config,
    landmarks::{FrameSize, LandmarkSet},
    pose_registry::PoseRegistry,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Additional pose registry file (YAML format)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a user pose against a reference pose
    Compare {
        /// User landmark set (JSON)
        #[arg(short, long)]
        user: PathBuf,

        /// Reference landmark set (JSON)
        #[arg(short, long)]
        reference: PathBuf,

        /// Registered pose name
        #[arg(short, long)]
        pose: String,
    },

    /// Print the joint angles of a landmark set
    Angles {
        /// Landmark set (JSON)
        #[arg(short, long)]
        landmarks: PathBuf,

        /// Frame width in pixels
        #[arg(long, default_value = "640")]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value = "480")]
        height: u32,
    },

    /// Score a stance or kick against martial-arts targets
    Analyze {
        /// Landmark set (JSON)
        #[arg(short, long)]
        landmarks: PathBuf,

        /// Move type (general, front_stance, horse_stance, roundhouse_kick)
        #[arg(short = 'm', long = "move", default_value = "general")]
        move_type: MoveType,

        /// Skill level (beginner, intermediate, advanced)
        #[arg(long, default_value = "beginner")]
        level: SkillLevel,

        /// Frame width in pixels
        #[arg(long, default_value = "640")]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value = "480")]
        height: u32,
    },

    /// List registered poses
    Poses,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            let config = Config::from_file(path).context("Failed to load configuration")?;
            config.validate().context("Invalid configuration")?;
            config
        }
        None => Config::default(),
    };

    let mut registry = PoseRegistry::builtin();
    if let Some(path) = &args.registry {
        info!("Loading pose registry from: {}", path.display());
        registry.extend(PoseRegistry::from_file(path).context("Failed to load pose registry")?);
    }

    match args.command {
        Command::Compare { user, reference, pose } => {
            let user = load_landmarks(&user)?;
            let reference = load_landmarks(&reference)?;
            let result = config
                .comparator()
                .compare_pose(&registry, &pose, Some(&user), Some(&reference))
                .with_context(|| format!("Failed to compare pose '{}'", pose))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Angles { landmarks, width, height } => {
            let set = load_landmarks(&landmarks)?;
            let angles = config.angle_calculator().compute(&set, FrameSize::new(width, height));
            println!("{}", serde_json::to_string_pretty(&angles)?);
        }
        Command::Analyze {
            landmarks,
            move_type,
            level,
            width,
            height,
        } => {
            let set = load_landmarks(&landmarks)?;
            let points = BodyPoints::from_landmarks(
                &set,
                FrameSize::new(width, height),
                config.detection.visibility_threshold,
            )
            .context("Shoulders, hips, knees and ankles must all be visible")?;

            // Calibrated tolerances when a saved profile is configured
            let session = CalibrationSession::start(config.calibration.clone(), config.detection.visibility_threshold)
                .context("Failed to load calibration profile")?;
            let analysis = MoveAnalyzer::new(session.personalized_thresholds()).analyze(&points, move_type, level);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Poses => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn load_landmarks(path: &Path) -> Result<LandmarkSet> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read landmarks from {}", path.display()))?;
    LandmarkSet::from_json(&content).with_context(|| format!("Failed to parse landmarks from {}", path.display()))
}
