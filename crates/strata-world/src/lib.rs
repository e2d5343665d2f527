//! Region tiling and the concurrent region cache.
//!
//! Columns are grouped into 16×16 chunks and chunks into square regions.
//! Regions are the unit of cached, asynchronously generated work: each one is
//! generated at most once by a background worker and then served read-only
//! to bulk and per-chunk queries.

mod cache;
mod error;
mod extent;
mod generator;
mod handle;
mod lookup;
mod pos;
mod region;

pub use cache::{CacheStats, RegionCache};
pub use error::GenerationError;
pub use extent::{Extent, RegionExtent};
pub use generator::{HeightmapGenerator, RegionGenerator};
pub use handle::RegionHandle;
pub use lookup::WorldLookup;
pub use pos::{CHUNK_AREA, CHUNK_SIZE, ChunkPos, RegionPos, RegionSize};
pub use region::{Chunk, Region};
