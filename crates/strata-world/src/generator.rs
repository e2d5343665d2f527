//! Producers of region contents, run on the cache's worker threads.

use std::sync::Arc;

use strata_terrain::Heightmap;

use crate::error::GenerationError;
use crate::pos::{RegionPos, RegionSize};
use crate::region::Region;

/// Builds the contents of one region.
///
/// Called from worker threads, possibly for many regions at once.
pub trait RegionGenerator: Send + Sync + 'static {
    fn generate(&self, pos: RegionPos, size: RegionSize) -> Result<Region, GenerationError>;
}

impl<F> RegionGenerator for F
where
    F: Fn(RegionPos, RegionSize) -> Result<Region, GenerationError> + Send + Sync + 'static,
{
    fn generate(&self, pos: RegionPos, size: RegionSize) -> Result<Region, GenerationError> {
        self(pos, size)
    }
}

/// Runs the heightmap, with post-processing, over every column of a region.
#[derive(Clone)]
pub struct HeightmapGenerator {
    heightmap: Arc<Heightmap>,
}

impl HeightmapGenerator {
    pub fn new(heightmap: Arc<Heightmap>) -> Self {
        Self { heightmap }
    }

    pub fn heightmap(&self) -> &Arc<Heightmap> {
        &self.heightmap
    }
}

impl RegionGenerator for HeightmapGenerator {
    fn generate(&self, pos: RegionPos, size: RegionSize) -> Result<Region, GenerationError> {
        let heightmap = &self.heightmap;
        Ok(Region::generate(pos, size, |cell, x, z| {
            heightmap.apply(cell, x as f32, z as f32);
            heightmap.post_process(cell);
        }))
    }
}
