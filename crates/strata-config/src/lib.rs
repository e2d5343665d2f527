//! Generator settings for Strata.
//!
//! Provides the validated settings object the sampling pipeline is built from.
//! Settings persist to disk as RON files, accept CLI overrides via clap, and
//! are checked once up front so that no generation work starts from an
//! invalid configuration.

mod cli;
mod error;
mod settings;

pub use cli::CliArgs;
pub use error::ConfigError;
pub use settings::{
    ClimateSettings, ContinentSettings, ControlPoints, DebugSettings, GeneratorSettings,
    MAX_REGION_CHUNKS, RegionWeight, Settings, TerrainSettings, WorldSettings, default_config_dir,
};
