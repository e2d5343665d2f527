//! The heightmap: one authoritative entry point that runs the whole
//! populator chain for a world column.

use std::sync::Arc;

use strata_config::{ConfigError, Settings};

use crate::blend::{Blender, Lerp, MultiBlender};
use crate::cell::Cell;
use crate::cellular::CellularNoise;
use crate::climate::Climate;
use crate::continent::ContinentGenerator;
use crate::levels::Levels;
use crate::pool;
use crate::populator::{Control, Populator, TerrainPopulator};
use crate::river::{NoRivers, RiverNetwork};
use crate::seed::SeedSequence;
use crate::selector::Selector;
use crate::shapes;
use crate::terrain::{Terrain, TerrainTable};

/// Composes continent, terrain blending, rivers and climate into a single
/// deterministic `apply(cell, x, z)`.
///
/// Immutable after construction; share one instance between threads behind
/// an `Arc`.
pub struct Heightmap {
    levels: Levels,
    terrains: TerrainTable,
    beach_size: i32,
    continent: Arc<ContinentGenerator>,
    continent_stage: Populator,
    root: Populator,
    rivers: Arc<dyn RiverNetwork>,
    climate: Climate,
}

impl Heightmap {
    /// Build the pipeline for `settings` without rivers.
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        Self::with_rivers(settings, Arc::new(NoRivers))
    }

    /// Build the pipeline with a river network hook.
    ///
    /// Fails if the settings do not validate or name an unknown or
    /// unsupported terrain region.
    pub fn with_rivers(
        settings: &Settings,
        rivers: Arc<dyn RiverNetwork>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let levels = Levels::from_settings(&settings.world);
        let terrain_settings = &settings.terrain;
        let terrains = TerrainTable::new(
            &levels,
            settings.world.beach_size,
            terrain_settings.vertical_scale,
        );
        let mut seeds = SeedSequence::new(settings.seed);

        let continent = Arc::new(ContinentGenerator::new(&settings.continent, &mut seeds));

        let leaf = |terrain: Terrain, shape| -> Populator {
            TerrainPopulator::new(terrain, terrains.bounds(terrain), shape).into()
        };

        let cp = &settings.control_points;
        let ocean = MultiBlender::new(
            Control::ContinentEdge,
            leaf(Terrain::DeepOcean, shapes::deep_ocean(&mut seeds)),
            leaf(Terrain::Ocean, shapes::ocean(&mut seeds)),
            leaf(Terrain::Coast, shapes::coast(&mut seeds)),
            cp.deep_ocean,
            cp.shallow_ocean,
            cp.beach,
        );

        let fade_plains = leaf(Terrain::Plains, shapes::plains(&mut seeds));
        let mut choices = Vec::with_capacity(terrain_settings.regions.len());
        for region in &terrain_settings.regions {
            let terrain = Terrain::from_name(&region.terrain).ok_or_else(|| {
                ConfigError::invalid(
                    "terrain.regions",
                    format!("unknown terrain `{}`", region.terrain),
                )
            })?;
            let shape = shapes::region_flavour(terrain, &mut seeds).ok_or_else(|| {
                ConfigError::invalid(
                    "terrain.regions",
                    format!("`{terrain}` cannot be used as a terrain region"),
                )
            })?;
            choices.push((leaf(terrain, shape), region.weight));
        }

        let mountains = leaf(
            Terrain::Mountains,
            shapes::mountains(&mut seeds, terrain_settings.mountain_scale),
        );
        let mountain_chain = shapes::mountain_chain(&mut seeds, terrain_settings.mountain_scale);

        let region_cells = CellularNoise::new(
            seeds.next_i32(),
            1.0 / terrain_settings.region_size as f64,
        );
        let region_edge = shapes::region_edge(&region_cells, terrain_settings.region_fade);
        let regions = Selector::new(region_cells, choices);

        let faded = Lerp::new(Control::Noise(region_edge), fade_plains, regions.into());
        let (fade_min, fade_max) = terrain_settings.mountain_fade;
        let land = Blender::new(
            Control::Noise(mountain_chain),
            faded.into(),
            mountains,
            fade_min,
            fade_max,
            (fade_min + fade_max) * 0.5,
        );

        let root = Blender::new(
            Control::ContinentEdge,
            ocean.into(),
            land.into(),
            cp.beach,
            cp.inland,
            cp.coast,
        )
        .into();

        let climate = Climate::new(&settings.climate, levels, &mut seeds);

        tracing::info!(
            seed = settings.seed,
            regions = terrain_settings.regions.len(),
            world_height = levels.world_height,
            sea_level = levels.water_y,
            "Terrain pipeline built"
        );

        Ok(Self {
            levels,
            terrains,
            beach_size: settings.world.beach_size,
            continent_stage: Populator::Continent(Arc::clone(&continent)),
            continent,
            root,
            rivers,
            climate,
        })
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    pub fn terrains(&self) -> &TerrainTable {
        &self.terrains
    }

    pub fn continent(&self) -> &ContinentGenerator {
        &self.continent
    }

    pub fn climate(&self) -> &Climate {
        &self.climate
    }

    /// Full computation for the column at `(x, z)`.
    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        cell.tag = Terrain::DEFAULT_LAND;
        self.continent_stage.apply(cell, x, z);
        self.root.apply(cell, x, z);

        let before = cell.value;
        self.rivers.carve(cell, x, z);
        cell.value = cell.value.clamp(0.0, before);

        if cell.value <= self.levels.water {
            self.climate.apply(cell, x, z);
            if cell.tag == Terrain::Coast {
                cell.tag = Terrain::Ocean;
            }
        } else {
            let (ox, oz) = self.climate.offset(x, z);
            self.climate.apply(cell, ox, oz);
            self.climate.refine(cell);
            self.climate.apply(cell, x, z);
        }
    }

    /// Classification only: continent and terrain tag, no heights or climate.
    pub fn tag(&self, cell: &mut Cell, x: f32, z: f32) {
        cell.tag = Terrain::DEFAULT_LAND;
        self.continent_stage.tag(cell, x, z);
        self.root.tag(cell, x, z);
    }

    /// Overrides applied after [`Heightmap::apply`] for consumers that read
    /// finished columns: coast just above the water line becomes beach.
    pub fn post_process(&self, cell: &mut Cell) {
        if cell.tag == Terrain::Coast
            && cell.value > self.levels.water
            && cell.value <= self.levels.water(self.beach_size)
        {
            cell.tag = Terrain::Beach;
        }
    }

    /// Sample one column using a pooled cell.
    pub fn sample(&self, x: f32, z: f32) -> Cell {
        pool::with_cell(|cell| {
            self.apply(cell, x, z);
            *cell
        })
    }
}
