//! Settings structs with tuned defaults, RON persistence and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const SETTINGS_FILE: &str = "strata.ron";

/// Top-level generator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// World seed. Every noise module derives its own seed from this value.
    pub seed: u64,
    /// Vertical extent of the world.
    pub world: WorldSettings,
    /// Continent shape parameters.
    pub continent: ContinentSettings,
    /// Continent-edge thresholds for the ocean/land blends.
    pub control_points: ControlPoints,
    /// Land terrain parameters.
    pub terrain: TerrainSettings,
    /// Climate parameters.
    pub climate: ClimateSettings,
    /// Region tiling and worker pool.
    pub generator: GeneratorSettings,
    /// Debug/development settings.
    pub debug: DebugSettings,
}

/// World height and sea level, in blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldSettings {
    /// Total world height.
    pub world_height: i32,
    /// Absolute Y of the water surface.
    pub sea_level: i32,
    /// Height of the beach band above the water surface.
    pub beach_size: i32,
}

/// Continent generator parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContinentSettings {
    /// Approximate continent radius in blocks. The cell grid frequency is
    /// `1 / (4 * continent_scale)`.
    pub continent_scale: i32,
    /// Edge strength at and above which a column is always land.
    /// Larger values produce more ocean.
    pub ocean_size: f32,
    /// Edge strength at and below which a column is always ocean.
    pub edge_clamp_min: f32,
    /// Feature point jitter inside each grid cell, in `[0, 1]`.
    pub jitter: f32,
    /// Scale of the coordinate domain warp.
    pub warp_scale: i32,
    /// Displacement of the coordinate domain warp, in blocks.
    pub warp_strength: f32,
    /// Scale of the coastline shape noise.
    pub shape_scale: i32,
    /// Displacement applied by each of the two shape warps, in blocks.
    pub shape_warp_strength: f32,
}

/// Continent-edge thresholds, strictly increasing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlPoints {
    /// Below this the column is pure deep ocean.
    pub deep_ocean: f32,
    /// Deep ocean to ocean split.
    pub shallow_ocean: f32,
    /// Ocean to coast split.
    pub beach: f32,
    /// Start of the ocean to land blend.
    pub coast: f32,
    /// Above this the column is pure land.
    pub inland: f32,
}

/// Weighted entry in the terrain region selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionWeight {
    /// Terrain name, e.g. `"hills"`.
    pub terrain: String,
    /// Relative weight. Must be positive.
    pub weight: f32,
}

/// Land terrain parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    /// Size of terrain regions in blocks.
    pub region_size: i32,
    /// Scale of the mountain chain noise.
    pub mountain_scale: i32,
    /// Mountain blend band `(min, max)` on the mountain chain noise.
    pub mountain_fade: (f32, f32),
    /// Width of the fade to plains at terrain region borders, in `[0, 1]`.
    pub region_fade: f32,
    /// Multiplier on land terrain relief.
    pub vertical_scale: f32,
    /// Terrain flavours the region selector chooses among.
    pub regions: Vec<RegionWeight>,
}

/// Climate parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClimateSettings {
    /// Scale of the temperature field.
    pub temperature_scale: i32,
    /// Scale of the moisture field.
    pub moisture_scale: i32,
    /// Size of biome cells.
    pub biome_size: i32,
    /// Scale of the warp used for the offset climate sample.
    pub biome_warp_scale: i32,
    /// Strength of the warp used for the offset climate sample, in blocks.
    pub biome_warp_strength: f32,
    /// Temperature lost per unit of normalized height above water.
    pub lapse_rate: f32,
    /// Moisture above which low-lying plains become wetland.
    pub wetland_moisture: f32,
    /// Moisture below which plains become steppe.
    pub steppe_moisture: f32,
}

/// Region tiling and worker pool parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Chunks per region side. Must be a power of two.
    pub region_chunks: u32,
    /// Worker threads for region generation. `0` derives a count from the CPU.
    pub worker_threads: usize,
    /// Completed regions kept in the cache before the least recently used
    /// ones are evicted.
    pub cache_capacity: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugSettings {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            world_height: 256,
            sea_level: 63,
            beach_size: 3,
        }
    }
}

impl Default for ContinentSettings {
    fn default() -> Self {
        Self {
            continent_scale: 3000,
            ocean_size: 0.25,
            edge_clamp_min: 0.05,
            jitter: 0.7,
            warp_scale: 1000,
            warp_strength: 650.0,
            shape_scale: 1500,
            shape_warp_strength: 300.0,
        }
    }
}

impl Default for ControlPoints {
    fn default() -> Self {
        Self {
            deep_ocean: 0.1,
            shallow_ocean: 0.25,
            beach: 0.327,
            coast: 0.448,
            inland: 0.502,
        }
    }
}

impl Default for TerrainSettings {
    fn default() -> Self {
        let region = |terrain: &str, weight: f32| RegionWeight {
            terrain: terrain.to_string(),
            weight,
        };
        Self {
            region_size: 1200,
            mountain_scale: 1000,
            mountain_fade: (0.3, 0.7),
            region_fade: 0.15,
            vertical_scale: 1.0,
            regions: vec![
                region("plains", 3.0),
                region("hills", 2.0),
                region("dales", 1.0),
                region("plateau", 1.0),
                region("badlands", 1.0),
                region("torridonian", 1.0),
            ],
        }
    }
}

impl Default for ClimateSettings {
    fn default() -> Self {
        Self {
            temperature_scale: 2000,
            moisture_scale: 2000,
            biome_size: 300,
            biome_warp_scale: 150,
            biome_warp_strength: 80.0,
            lapse_rate: 0.5,
            wetland_moisture: 0.72,
            steppe_moisture: 0.3,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            region_chunks: 16,
            worker_threads: 0,
            cache_capacity: 64,
        }
    }
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default directory for `strata.ron`, under the platform config directory.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("strata"))
}

// --- Validation ---

/// Largest accepted region edge in chunks, keeping block coordinates and
/// region areas within `i32`.
pub const MAX_REGION_CHUNKS: u32 = 64;

fn positive(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(())
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid(
            field,
            format!("must be within [0, 1], got {value}"),
        ));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

fn positive_f32(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(())
}

impl Settings {
    /// Check every value the pipeline depends on.
    ///
    /// Called by the pipeline constructors so an invalid configuration fails
    /// before any generation task is scheduled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        positive("world.world_height", world.world_height)?;
        if world.sea_level < 0 || world.sea_level >= world.world_height {
            return Err(ConfigError::invalid(
                "world.sea_level",
                format!(
                    "must be within [0, {}), got {}",
                    world.world_height, world.sea_level
                ),
            ));
        }
        if world.beach_size < 0 {
            return Err(ConfigError::invalid(
                "world.beach_size",
                format!("must be >= 0, got {}", world.beach_size),
            ));
        }

        let continent = &self.continent;
        positive("continent.continent_scale", continent.continent_scale)?;
        positive("continent.warp_scale", continent.warp_scale)?;
        positive("continent.shape_scale", continent.shape_scale)?;
        unit("continent.edge_clamp_min", continent.edge_clamp_min)?;
        unit("continent.jitter", continent.jitter)?;
        if !(continent.ocean_size > continent.edge_clamp_min && continent.ocean_size < 1.0) {
            return Err(ConfigError::invalid(
                "continent.ocean_size",
                format!(
                    "must be within ({}, 1), got {}",
                    continent.edge_clamp_min, continent.ocean_size
                ),
            ));
        }
        non_negative("continent.warp_strength", continent.warp_strength)?;
        non_negative("continent.shape_warp_strength", continent.shape_warp_strength)?;

        let cp = &self.control_points;
        let points = [cp.deep_ocean, cp.shallow_ocean, cp.beach, cp.coast, cp.inland];
        for &p in &points {
            unit("control_points", p)?;
        }
        if points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::invalid(
                "control_points",
                format!("must be strictly increasing, got {points:?}"),
            ));
        }

        let terrain = &self.terrain;
        positive("terrain.region_size", terrain.region_size)?;
        positive("terrain.mountain_scale", terrain.mountain_scale)?;
        let (fade_min, fade_max) = terrain.mountain_fade;
        if !(fade_min.is_finite() && fade_max.is_finite() && fade_min < fade_max) {
            return Err(ConfigError::invalid(
                "terrain.mountain_fade",
                format!("min must be < max, got ({fade_min}, {fade_max})"),
            ));
        }
        unit("terrain.region_fade", terrain.region_fade)?;
        positive_f32("terrain.vertical_scale", terrain.vertical_scale)?;
        if terrain.regions.is_empty() {
            return Err(ConfigError::invalid(
                "terrain.regions",
                "at least one terrain region is required",
            ));
        }
        if let Some(bad) = terrain
            .regions
            .iter()
            .find(|r| !r.weight.is_finite() || r.weight <= 0.0)
        {
            return Err(ConfigError::invalid(
                "terrain.regions",
                format!("weight for `{}` must be > 0, got {}", bad.terrain, bad.weight),
            ));
        }

        let climate = &self.climate;
        positive("climate.temperature_scale", climate.temperature_scale)?;
        positive("climate.moisture_scale", climate.moisture_scale)?;
        positive("climate.biome_size", climate.biome_size)?;
        positive("climate.biome_warp_scale", climate.biome_warp_scale)?;
        unit("climate.wetland_moisture", climate.wetland_moisture)?;
        unit("climate.steppe_moisture", climate.steppe_moisture)?;
        non_negative("climate.biome_warp_strength", climate.biome_warp_strength)?;
        non_negative("climate.lapse_rate", climate.lapse_rate)?;

        let generator = &self.generator;
        if !generator.region_chunks.is_power_of_two()
            || generator.region_chunks > MAX_REGION_CHUNKS
        {
            return Err(ConfigError::invalid(
                "generator.region_chunks",
                format!(
                    "must be a power of two no larger than {MAX_REGION_CHUNKS}, got {}",
                    generator.region_chunks
                ),
            ));
        }
        if generator.cache_capacity == 0 {
            return Err(ConfigError::invalid(
                "generator.cache_capacity",
                "must be > 0",
            ));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Settings {
    /// Load settings from the given directory, or create a default file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(SETTINGS_FILE);

        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
            let settings: Settings = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded settings from {}", path.display());
            Ok(settings)
        } else {
            let settings = Settings::default();
            settings.save(config_dir)?;
            log::info!("Created default settings at {}", path.display());
            Ok(settings)
        }
    }

    /// Save settings to the given directory as `strata.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let path = config_dir.join(SETTINGS_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_settings)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = config_dir.join(SETTINGS_FILE);
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
        let fresh: Settings = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &fresh != self {
            log::info!("Settings reloaded with changes");
            Ok(Some(fresh))
        } else {
            Ok(None)
        }
    }
}
