//! Command-line argument parsing for the Strata tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Settings;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `strata.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Procedural terrain sampler")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads for region generation.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Half-width of the sampled square, in blocks.
    #[arg(long, default_value_t = 256)]
    pub radius: i32,

    /// Centre of the sampled square on the X axis.
    #[arg(long, default_value_t = 0)]
    pub center_x: i32,

    /// Centre of the sampled square on the Z axis.
    #[arg(long, default_value_t = 0)]
    pub center_z: i32,
}

impl Settings {
    /// Apply CLI overrides to loaded settings.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(threads) = args.threads {
            self.generator.worker_threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
