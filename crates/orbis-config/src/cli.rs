//! Command-line argument parsing for Orbis.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orbis command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orbis", about = "Procedural planet generator")]
pub struct CliArgs {
    /// Vertices per face edge at LOD 0.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Number of LOD levels to build. With LOD enabled this must be one more than the threshold count.
    #[arg(long)]
    pub lod_levels: Option<u32>,

    /// Build face patches on a single thread.
    #[arg(long)]
    pub sequential: bool,

    /// Planet preset to load instead of the configured default.
    #[arg(long)]
    pub preset: Option<String>,

    /// Save the generated planet under this preset name.
    #[arg(long)]
    pub save_preset: Option<String>,

    /// List saved presets and exit.
    #[arg(long)]
    pub list_presets: bool,

    /// Override the number of trees.
    #[arg(long)]
    pub tree_count: Option<u32>,

    /// Replay a forest with this instancing seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pick a fresh random noise offset before generating.
    #[arg(long)]
    pub random_offset: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(resolution) = args.resolution {
            self.generation.base_resolution = resolution;
        }
        if let Some(levels) = args.lod_levels {
            self.generation.lod_levels = levels;
        }
        if args.sequential {
            self.generation.parallel = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
