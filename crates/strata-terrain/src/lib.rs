//! Procedural column sampling: continent shape, blended terrain populators,
//! climate, and the heightmap that chains them into one `apply(cell, x, z)`.

mod blend;
mod cell;
mod cellular;
mod climate;
mod continent;
mod heightmap;
mod levels;
mod populator;
mod river;
mod selector;
mod shapes;
mod terrain;

pub mod math;
pub mod pool;
pub mod seed;

pub use blend::{Blender, Lerp, MultiBlender};
pub use cell::Cell;
pub use cellular::{CellReturn, CellSample, CellularNoise, DistanceFn};
pub use climate::Climate;
pub use continent::{ContinentGenerator, ContinentSample, DomainWarp};
pub use heightmap::Heightmap;
pub use levels::Levels;
pub use populator::{Control, Populator, Source, TerrainPopulator};
pub use river::{NoRivers, RiverNetwork};
pub use selector::Selector;
pub use terrain::{Terrain, TerrainBounds, TerrainTable};
