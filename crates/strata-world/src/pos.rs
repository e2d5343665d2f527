//! Chunk and region coordinates.

use std::fmt;

use strata_config::MAX_REGION_CHUNKS;

/// Side length of a chunk in columns.
pub const CHUNK_SIZE: i32 = 16;

/// Columns per chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

const CHUNK_SHIFT: u32 = CHUNK_SIZE.trailing_zeros();

/// Chunk coordinate: world column `(x, z)` lives in chunk `(x >> 4, z >> 4)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing world column `(x, z)`. Floors for negative coordinates.
    pub const fn of_block(x: i32, z: i32) -> Self {
        Self::new(x >> CHUNK_SHIFT, z >> CHUNK_SHIFT)
    }

    /// World coordinates of the chunk's minimum corner.
    pub const fn block_origin(self) -> (i32, i32) {
        (self.x << CHUNK_SHIFT, self.z << CHUNK_SHIFT)
    }
}

/// Region coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionPos {
    pub x: i32,
    pub z: i32,
}

impl RegionPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for RegionPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Side length of a region, in chunks. Always a power of two so that
/// coordinate conversion is a shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionSize {
    shift: u32,
}

impl RegionSize {
    /// `chunks` is rounded up to the next power of two and capped at
    /// [`MAX_REGION_CHUNKS`].
    pub fn new(chunks: u32) -> Self {
        Self {
            shift: chunks
                .clamp(1, MAX_REGION_CHUNKS)
                .next_power_of_two()
                .trailing_zeros(),
        }
    }

    /// Chunks per region side.
    pub const fn chunks(self) -> i32 {
        1 << self.shift
    }

    /// Columns per region side.
    pub const fn blocks(self) -> i32 {
        CHUNK_SIZE << self.shift
    }

    /// Columns per region.
    pub const fn area(self) -> usize {
        (self.blocks() as usize) * (self.blocks() as usize)
    }

    pub const fn region_of_chunk(self, chunk: ChunkPos) -> RegionPos {
        RegionPos::new(chunk.x >> self.shift, chunk.z >> self.shift)
    }

    pub const fn region_of_block(self, x: i32, z: i32) -> RegionPos {
        let shift = self.shift + CHUNK_SHIFT;
        RegionPos::new(x >> shift, z >> shift)
    }

    /// First chunk of `region`.
    pub const fn chunk_origin(self, region: RegionPos) -> ChunkPos {
        ChunkPos::new(region.x << self.shift, region.z << self.shift)
    }

    /// World coordinates of the region's minimum corner.
    pub const fn block_origin(self, region: RegionPos) -> (i32, i32) {
        let shift = self.shift + CHUNK_SHIFT;
        (region.x << shift, region.z << shift)
    }
}
