//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Helios command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "helios", about = "Interactive solar system orrery")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Display refresh rate to pace frames at.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Stop after this many frames (runs until interrupted otherwise).
    #[arg(long)]
    pub frames: Option<u64>,

    /// Directory holding textures and fonts.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Asset loader threads; 0 loads on the main thread.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Seed for orbital angles and star placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration back to the config directory.
    #[arg(long)]
    pub write_config: bool,

    /// Live parameter edits applied after the scene is built, e.g. `planetScale=2`.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fps) = args.fps {
            self.window.target_fps = fps;
        }
        if let Some(ref root) = args.assets {
            self.assets.root = root.clone();
        }
        if let Some(workers) = args.workers {
            self.assets.worker_count = Some(workers);
        }
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
