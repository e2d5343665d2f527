//! Strata: samples a square of terrain through the region cache and reports
//! what it found.
//!
//! Run with: `cargo run -p strata-app -- --seed 42 --radius 512`

mod survey;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use strata_config::{CliArgs, Settings, default_config_dir};
use strata_terrain::Heightmap;
use strata_world::{Extent, RegionCache};
use tracing::{error, info};

use crate::survey::Survey;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut settings = Settings::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load settings: {e}, using defaults");
        Settings::default()
    });
    settings.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&settings));

    info!("Strata terrain sampler");
    info!("Config directory: {}", config_dir.display());

    let heightmap = match Heightmap::new(&settings) {
        Ok(heightmap) => Arc::new(heightmap),
        Err(e) => {
            error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let cache = match RegionCache::from_settings(&settings, Arc::clone(&heightmap)) {
        Ok(cache) => cache,
        Err(e) => {
            error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Region cache: {} workers, {} regions capacity",
        cache.worker_count(),
        cache.capacity()
    );

    let (min_x, min_z, max_x, max_z) = sample_bounds(args.center_x, args.center_z, args.radius);
    info!("Sampling [{min_x}, {max_x}) x [{min_z}, {max_z})");

    let levels = *heightmap.levels();
    let mut survey = Survey::default();
    let start = Instant::now();
    if let Err(e) = cache.visit(min_x, min_z, max_x, max_z, |_, _, cell| {
        survey.record(cell, &levels)
    }) {
        error!("Sampling failed: {e}");
        return ExitCode::FAILURE;
    }
    let elapsed = start.elapsed();

    survey.log();
    let stats = cache.stats();
    info!(
        "Done in {:.2?}: {} regions generated, {} cache hits, {} evicted",
        elapsed, stats.generated, stats.hits, stats.evicted
    );

    ExitCode::SUCCESS
}

/// Half-open square of side `2 * radius` around the center, clamped to the
/// `i32` coordinate range.
fn sample_bounds(center_x: i32, center_z: i32, radius: i32) -> (i32, i32, i32, i32) {
    let radius = radius.max(1);
    (
        center_x.saturating_sub(radius),
        center_z.saturating_sub(radius),
        center_x.saturating_add(radius),
        center_z.saturating_add(radius),
    )
}
