//! Terrain classification and per-terrain height bounds.

use std::fmt;

use crate::levels::Levels;

/// Discrete classification assigned to a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terrain {
    DeepOcean,
    Ocean,
    Coast,
    Beach,
    River,
    RiverBank,
    Lake,
    Wetland,
    Steppe,
    #[default]
    Plains,
    Hills,
    Dales,
    Plateau,
    Badlands,
    Torridonian,
    Mountains,
}

impl Terrain {
    /// Every variant, in declaration order.
    pub const ALL: [Terrain; 16] = [
        Terrain::DeepOcean,
        Terrain::Ocean,
        Terrain::Coast,
        Terrain::Beach,
        Terrain::River,
        Terrain::RiverBank,
        Terrain::Lake,
        Terrain::Wetland,
        Terrain::Steppe,
        Terrain::Plains,
        Terrain::Hills,
        Terrain::Dales,
        Terrain::Plateau,
        Terrain::Badlands,
        Terrain::Torridonian,
        Terrain::Mountains,
    ];

    /// The land terrain a column starts as before any populator runs.
    pub const DEFAULT_LAND: Terrain = Terrain::Plains;

    /// Stable lowercase name used in settings files.
    pub fn name(self) -> &'static str {
        match self {
            Terrain::DeepOcean => "deep_ocean",
            Terrain::Ocean => "ocean",
            Terrain::Coast => "coast",
            Terrain::Beach => "beach",
            Terrain::River => "river",
            Terrain::RiverBank => "river_bank",
            Terrain::Lake => "lake",
            Terrain::Wetland => "wetland",
            Terrain::Steppe => "steppe",
            Terrain::Plains => "plains",
            Terrain::Hills => "hills",
            Terrain::Dales => "dales",
            Terrain::Plateau => "plateau",
            Terrain::Badlands => "badlands",
            Terrain::Torridonian => "torridonian",
            Terrain::Mountains => "mountains",
        }
    }

    /// Parse a name produced by [`Terrain::name`].
    pub fn from_name(name: &str) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Oceans, rivers and lakes.
    pub fn is_water(self) -> bool {
        matches!(
            self,
            Terrain::DeepOcean | Terrain::Ocean | Terrain::River | Terrain::Lake
        )
    }

    /// Sea floor terrains.
    pub fn is_submerged(self) -> bool {
        matches!(self, Terrain::DeepOcean | Terrain::Ocean)
    }

    /// Anything that is not open water.
    pub fn is_land(self) -> bool {
        !self.is_water()
    }

    /// Terrains that may appear as a named region flavour in the selector.
    pub fn is_region_flavour(self) -> bool {
        matches!(
            self,
            Terrain::Steppe
                | Terrain::Plains
                | Terrain::Hills
                | Terrain::Dales
                | Terrain::Plateau
                | Terrain::Badlands
                | Terrain::Torridonian
        )
    }

    /// Block offsets `(min, max)` relative to the water surface.
    fn offsets(self, beach_size: i32) -> (i32, i32) {
        match self {
            Terrain::DeepOcean => (-40, -20),
            Terrain::Ocean => (-20, -6),
            Terrain::Coast => (-6, 2),
            Terrain::Beach => (0, beach_size.max(1)),
            Terrain::River => (-4, 0),
            Terrain::RiverBank => (0, 2),
            Terrain::Lake => (-6, 0),
            Terrain::Wetland => (0, 3),
            Terrain::Steppe => (1, 12),
            Terrain::Plains => (1, 16),
            Terrain::Hills => (2, 40),
            Terrain::Dales => (1, 30),
            Terrain::Plateau => (10, 50),
            Terrain::Badlands => (4, 45),
            Terrain::Torridonian => (2, 45),
            Terrain::Mountains => (8, 140),
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized height range a terrain's populator writes into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainBounds {
    pub min: f32,
    pub max: f32,
}

impl TerrainBounds {
    /// Height at `t` in `[0, 1]` through the range.
    #[inline]
    pub fn at(&self, t: f32) -> f32 {
        crate::math::clamp01(self.min + (self.max - self.min) * t)
    }

    /// Whether `value` lies within the bounds (inclusive).
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Height bounds for every terrain, computed once from the world levels.
#[derive(Clone, Debug)]
pub struct TerrainTable {
    bounds: [TerrainBounds; Terrain::ALL.len()],
}

impl TerrainTable {
    /// Compute bounds for `levels`, scaling land relief by `vertical_scale`.
    pub fn new(levels: &Levels, beach_size: i32, vertical_scale: f32) -> Self {
        let bounds = Terrain::ALL.map(|terrain| {
            let (lo, hi) = terrain.offsets(beach_size);
            let (lo, hi) = if terrain.is_water() || lo < 0 {
                (lo, hi)
            } else {
                (
                    (lo as f32 * vertical_scale) as i32,
                    (hi as f32 * vertical_scale) as i32,
                )
            };
            let min = crate::math::clamp01(levels.water(lo));
            let max = crate::math::clamp01(levels.water(hi)).max(min);
            TerrainBounds { min, max }
        });
        Self { bounds }
    }

    /// Bounds for one terrain.
    pub fn bounds(&self, terrain: Terrain) -> TerrainBounds {
        self.bounds[terrain as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip_for_every_terrain() {
        for terrain in Terrain::ALL {
            assert_eq!(Terrain::from_name(terrain.name()), Some(terrain));
        }
        assert_eq!(Terrain::from_name("swamp"), None);
    }

    #[test]
    fn test_all_is_in_discriminant_order() {
        for (i, terrain) in Terrain::ALL.into_iter().enumerate() {
            assert_eq!(terrain as usize, i);
        }
    }

    #[test]
    fn test_water_classification() {
        assert!(Terrain::DeepOcean.is_water());
        assert!(Terrain::River.is_water());
        assert!(Terrain::Coast.is_land());
        assert!(!Terrain::Mountains.is_water());
        assert!(Terrain::Ocean.is_submerged());
        assert!(!Terrain::Lake.is_submerged());
    }

    #[test]
    fn test_bounds_ordered_and_in_unit_range() {
        let table = TerrainTable::new(&Levels::default(), 3, 1.0);
        for terrain in Terrain::ALL {
            let b = table.bounds(terrain);
            assert!(b.min <= b.max, "{terrain}: {b:?}");
            assert!((0.0..=1.0).contains(&b.min) && (0.0..=1.0).contains(&b.max));
        }
    }

    #[test]
    fn test_ocean_below_water_land_above() {
        let levels = Levels::default();
        let table = TerrainTable::new(&levels, 3, 1.0);
        assert!(table.bounds(Terrain::DeepOcean).max < levels.water);
        assert!(table.bounds(Terrain::Ocean).max < levels.water);
        assert!(table.bounds(Terrain::Plains).min > levels.water);
        assert!(table.bounds(Terrain::Mountains).max > table.bounds(Terrain::Hills).max);
    }

    #[test]
    fn test_vertical_scale_stretches_land_only() {
        let levels = Levels::default();
        let flat = TerrainTable::new(&levels, 3, 1.0);
        let tall = TerrainTable::new(&levels, 3, 1.5);
        assert_eq!(flat.bounds(Terrain::Ocean), tall.bounds(Terrain::Ocean));
        assert!(tall.bounds(Terrain::Hills).max > flat.bounds(Terrain::Hills).max);
    }

    #[test]
    fn test_bounds_at_clamps() {
        let b = TerrainBounds { min: 0.2, max: 0.4 };
        assert_eq!(b.at(0.0), 0.2);
        assert!((b.at(1.0) - 0.4).abs() < 1e-6);
        assert!(b.contains(0.3));
        assert!(!b.contains(0.5));
    }
}
