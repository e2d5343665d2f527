//! The per-column sample record threaded through the populator chain.

use crate::terrain::Terrain;

/// Sample state for one world column.
///
/// Every stage of [`crate::Heightmap::apply`] overwrites the fields it owns
/// before any later stage reads them, so a recycled cell never leaks state
/// from a previous column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    /// Per continent pseudo-id in roughly `[0, 2]`. Not spatially continuous.
    pub continent: f32,
    /// `0` is deep ocean, `1` is continent interior.
    pub continent_edge: f32,
    /// Normalized terrain height in `[0, 1]`.
    pub value: f32,
    /// Terrain classification.
    pub tag: Terrain,
    /// Normalized temperature in `[0, 1]`.
    pub temperature: f32,
    /// Normalized moisture in `[0, 1]`.
    pub moisture: f32,
    /// Biome cell id in `[0, 1]`.
    pub biome: f32,
    /// Distance to the nearest biome cell border, `0` on the border.
    pub biome_edge: f32,
    /// Low frequency variation in `[0, 1]` for consumers that vary detail
    /// within a biome.
    pub macro_noise: f32,
}

impl Cell {
    /// Whether the column's surface lies at or below `water`.
    pub fn is_submerged(&self, water: f32) -> bool {
        self.value <= water
    }

    /// Restore the default state.
    pub fn reset(&mut self) {
        *self = Cell::default();
    }
}
