//! Conversions between absolute block heights and normalized `[0, 1]` height.

use strata_config::WorldSettings;

/// World height and sea level constants with helpers for expressing heights
/// relative to the water surface.
///
/// Stateless after construction and freely shared between threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Levels {
    /// Total world height in blocks (at least 1).
    pub world_height: i32,
    /// Absolute Y of the water surface.
    pub water_y: i32,
    /// Absolute Y of the first dry block.
    pub ground_y: i32,
    /// Normalized height of one block.
    pub unit: f32,
    /// Normalized height of the water surface.
    pub water: f32,
    /// Normalized height of the first dry block.
    pub ground: f32,
    /// Normalized span between the water surface and the world top.
    pub elevation_range: f32,
}

impl Levels {
    /// Build levels for a world of `world_height` blocks with water at `sea_level`.
    pub fn new(world_height: i32, sea_level: i32) -> Self {
        let world_height = world_height.max(1);
        let unit = 1.0 / world_height as f32;
        let water_y = sea_level;
        let ground_y = sea_level + 1;
        let water = water_y as f32 * unit;
        Self {
            world_height,
            water_y,
            ground_y,
            unit,
            water,
            ground: ground_y as f32 * unit,
            elevation_range: (1.0 - water).max(unit),
        }
    }

    /// Build levels from world settings.
    pub fn from_settings(settings: &WorldSettings) -> Self {
        Self::new(settings.world_height, settings.sea_level)
    }

    /// Normalize an absolute Y.
    #[inline]
    pub fn scale(&self, y: i32) -> f32 {
        y as f32 * self.unit
    }

    /// Normalized height `offset` blocks above (or below, if negative) the water surface.
    #[inline]
    pub fn water(&self, offset: i32) -> f32 {
        self.scale(self.water_y + offset)
    }

    /// Normalized height `offset` blocks above the first dry block.
    #[inline]
    pub fn ground(&self, offset: i32) -> f32 {
        self.scale(self.ground_y + offset)
    }

    /// Absolute Y of a normalized height.
    #[inline]
    pub fn to_y(&self, value: f32) -> i32 {
        (value * self.world_height as f32) as i32
    }

    /// Fraction of the above-water range a normalized height has climbed,
    /// `0` at or below water.
    #[inline]
    pub fn elevation(&self, value: f32) -> f32 {
        crate::math::clamp01((value - self.water) / self.elevation_range)
    }
}

impl Default for Levels {
    fn default() -> Self {
        Self::from_settings(&WorldSettings::default())
    }
}
