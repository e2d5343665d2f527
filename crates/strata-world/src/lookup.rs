//! Single-column lookups that agree with cached regions.

use std::sync::Arc;

use strata_terrain::{Cell, Heightmap};

use crate::cache::RegionCache;
use crate::error::GenerationError;
use crate::extent::{Extent, RegionExtent};

/// Samples single columns with the same post-processing region generation
/// applies, reading from a region cache when the column is already cached.
#[derive(Clone)]
pub struct WorldLookup {
    heightmap: Arc<Heightmap>,
    cache: Option<Arc<RegionCache>>,
}

impl WorldLookup {
    pub fn new(heightmap: Arc<Heightmap>) -> Self {
        Self {
            heightmap,
            cache: None,
        }
    }

    /// Serve columns from `cache` when their region is already complete.
    /// The cache must be generating from the same heightmap.
    pub fn with_cache(heightmap: Arc<Heightmap>, cache: Arc<RegionCache>) -> Self {
        Self {
            heightmap,
            cache: Some(cache),
        }
    }

    pub fn heightmap(&self) -> &Arc<Heightmap> {
        &self.heightmap
    }

    /// The finished sample for column `(x, z)`. Never queues generation.
    pub fn get_cell(&self, x: i32, z: i32) -> Cell {
        if let Some(cache) = &self.cache
            && let Some(region) = cache.cached_region(cache.region_size().region_of_block(x, z))
            && let Some(cell) = region.cell(x, z)
        {
            return *cell;
        }

        let mut cell = self.heightmap.sample(x as f32, z as f32);
        self.heightmap.post_process(&mut cell);
        cell
    }
}

impl Extent for WorldLookup {
    /// Samples every column directly on the calling thread.
    fn visit<F>(
        &self,
        min_x: i32,
        min_z: i32,
        max_x: i32,
        max_z: i32,
        mut visitor: F,
    ) -> Result<(), GenerationError>
    where
        F: FnMut(i32, i32, &Cell),
    {
        for z in min_z..max_z {
            for x in min_x..max_x {
                let cell = self.get_cell(x, z);
                visitor(x, z, &cell);
            }
        }
        Ok(())
    }
}
