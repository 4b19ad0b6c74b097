//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Planetoid command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "planetoid", about = "Headless orbiting-orb simulation")]
pub struct CliArgs {
    /// Initial number of orbs.
    #[arg(long)]
    pub orbs: Option<usize>,

    /// RNG seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the final frame snapshot as JSON to this file.
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Pace frames at 60 Hz against the wall clock.
    #[arg(long)]
    pub realtime: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(n) = args.orbs {
            self.orbs.initial_count = n;
        }
        if let Some(seed) = args.seed {
            self.orbs.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.run.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.dump {
            self.debug.snapshot_path = Some(path.clone());
        }
        if args.realtime {
            self.run.realtime = true;
        }
    }
}
