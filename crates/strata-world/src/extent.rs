//! Bulk access traits over sampled columns.

use std::sync::Arc;

use strata_terrain::Cell;

use crate::error::GenerationError;
use crate::pos::{ChunkPos, RegionPos, RegionSize};
use crate::region::{Chunk, Region};

/// A source of columns that can be visited in bulk.
pub trait Extent {
    /// Call `visitor(x, z, cell)` exactly once for every column in
    /// `[min_x, max_x) × [min_z, max_z)`. The order of columns is unspecified.
    ///
    /// Stops at the first generation failure and returns it.
    fn visit<F>(
        &self,
        min_x: i32,
        min_z: i32,
        max_x: i32,
        max_z: i32,
        visitor: F,
    ) -> Result<(), GenerationError>
    where
        F: FnMut(i32, i32, &Cell);
}

/// An extent backed by generated regions.
pub trait RegionExtent: Extent {
    fn region_size(&self) -> RegionSize;

    /// The region at `pos`, blocking until it has been generated.
    fn get_region(&self, pos: RegionPos) -> Result<Arc<Region>, GenerationError>;

    /// The chunk at `pos`, blocking until its region has been generated.
    fn get_chunk(&self, pos: ChunkPos) -> Result<Chunk, GenerationError> {
        let region_pos = self.region_size().region_of_chunk(pos);
        let region = self.get_region(region_pos)?;
        Chunk::new(region, pos).ok_or_else(|| GenerationError::Generator {
            region: region_pos,
            message: format!("region does not contain chunk ({}, {})", pos.x, pos.z),
        })
    }
}
