//! Climate: temperature, moisture and biome cells for land and sea columns.

use noise::{Fbm, MultiFractal, NoiseFn, Simplex};
use strata_config::ClimateSettings;

use crate::cell::Cell;
use crate::cellular::{CellReturn, CellularNoise};
use crate::continent::DomainWarp;
use crate::levels::Levels;
use crate::math::{clamp01, unit};
use crate::seed::SeedSequence;
use crate::terrain::Terrain;

/// Elevation fraction below which humid plains turn to wetland.
const WETLAND_MAX_ELEVATION: f32 = 0.04;

/// Writes the climate attributes of a cell and refines its land tag.
///
/// Temperature and moisture come from two decorrelated multi-octave simplex
/// fields; temperature falls with altitude by `lapse_rate`.
pub struct Climate {
    temperature: Fbm<Simplex>,
    moisture: Fbm<Simplex>,
    biome: CellularNoise,
    biome_edge: CellularNoise,
    macro_noise: Fbm<Simplex>,
    warp: DomainWarp,
    levels: Levels,
    lapse_rate: f32,
    wetland_moisture: f32,
    steppe_moisture: f32,
}

impl Climate {
    pub fn new(settings: &ClimateSettings, levels: Levels, seeds: &mut SeedSequence) -> Self {
        let field = |seed: u32, scale: i32, octaves: usize| {
            Fbm::<Simplex>::new(seed)
                .set_octaves(octaves)
                .set_frequency(1.0 / scale.max(1) as f64)
                .set_persistence(0.5)
        };
        let temperature = field(seeds.next_u32(), settings.temperature_scale, 3);
        let moisture = field(seeds.next_u32(), settings.moisture_scale, 3);
        let macro_noise = field(seeds.next_u32(), settings.biome_size.saturating_mul(8), 2);

        let biome_seed = seeds.next_i32();
        let biome_frequency = 1.0 / settings.biome_size.max(1) as f64;
        let biome = CellularNoise::new(biome_seed, biome_frequency);
        let biome_edge = biome.clone().with_output(CellReturn::EdgeDistance);

        let warp = DomainWarp::new(
            seeds,
            settings.biome_warp_scale,
            2,
            settings.biome_warp_strength as f64,
        );

        Self {
            temperature,
            moisture,
            biome,
            biome_edge,
            macro_noise,
            warp,
            levels,
            lapse_rate: settings.lapse_rate,
            wetland_moisture: settings.wetland_moisture,
            steppe_moisture: settings.steppe_moisture,
        }
    }

    /// Warped position used to pick a column's fine classification.
    pub fn offset(&self, x: f32, z: f32) -> (f32, f32) {
        let (wx, wz) = self.warp.apply(x as f64, z as f64);
        (wx as f32, wz as f32)
    }

    /// Fill the climate fields of `cell` at `(x, z)`. Reads `cell.value`.
    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        let p = [x as f64, z as f64];
        let cooling = self.lapse_rate * self.levels.elevation(cell.value);

        cell.temperature = clamp01(unit(self.temperature.get(p)) - cooling);
        cell.moisture = unit(self.moisture.get(p));
        cell.biome = clamp01(self.biome.get(p) as f32);
        cell.biome_edge = clamp01(self.biome_edge.get(p) as f32);
        cell.macro_noise = unit(self.macro_noise.get(p));
    }

    /// Turn plains into wetland or steppe from the climate currently in `cell`.
    pub fn refine(&self, cell: &mut Cell) {
        if cell.tag != Terrain::Plains {
            return;
        }
        let low = self.levels.elevation(cell.value) <= WETLAND_MAX_ELEVATION;
        if low && cell.moisture >= self.wetland_moisture {
            cell.tag = Terrain::Wetland;
        } else if cell.moisture <= self.steppe_moisture {
            cell.tag = Terrain::Steppe;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn climate(seed: u64) -> Climate {
        Climate::new(
            &ClimateSettings::default(),
            Levels::default(),
            &mut SeedSequence::new(seed),
        )
    }

    #[test]
    fn test_fields_in_unit_range() {
        let climate = climate(3);
        for i in 0..1000 {
            let mut cell = Cell {
                value: (i % 10) as f32 / 9.0,
                ..Default::default()
            };
            climate.apply(&mut cell, i as f32 * 53.0 - 20_000.0, i as f32 * 7.0);
            for (name, v) in [
                ("temperature", cell.temperature),
                ("moisture", cell.moisture),
                ("biome", cell.biome),
                ("biome_edge", cell.biome_edge),
                ("macro_noise", cell.macro_noise),
            ] {
                assert!((0.0..=1.0).contains(&v), "{name} = {v}");
            }
        }
    }

    #[test]
    fn test_higher_ground_is_not_warmer() {
        let climate = climate(5);
        for i in 0..200 {
            let (x, z) = (i as f32 * 101.0, i as f32 * -37.0);
            let mut low = Cell {
                value: 0.3,
                ..Default::default()
            };
            let mut high = Cell {
                value: 0.9,
                ..Default::default()
            };
            climate.apply(&mut low, x, z);
            climate.apply(&mut high, x, z);
            assert!(high.temperature <= low.temperature);
        }
    }

    #[test]
    fn test_refine_plains() {
        let climate = climate(1);
        let levels = Levels::default();

        let mut wet = Cell {
            tag: Terrain::Plains,
            value: levels.water(2),
            moisture: 0.9,
            ..Default::default()
        };
        climate.refine(&mut wet);
        assert_eq!(wet.tag, Terrain::Wetland);

        let mut dry = Cell {
            tag: Terrain::Plains,
            value: levels.water(10),
            moisture: 0.1,
            ..Default::default()
        };
        climate.refine(&mut dry);
        assert_eq!(dry.tag, Terrain::Steppe);

        let mut moderate = Cell {
            tag: Terrain::Plains,
            value: levels.water(10),
            moisture: 0.5,
            ..Default::default()
        };
        climate.refine(&mut moderate);
        assert_eq!(moderate.tag, Terrain::Plains);
    }

    #[test]
    fn test_refine_leaves_other_terrain() {
        let climate = climate(1);
        let mut hills = Cell {
            tag: Terrain::Hills,
            moisture: 0.0,
            ..Default::default()
        };
        climate.refine(&mut hills);
        assert_eq!(hills.tag, Terrain::Hills);
    }

    #[test]
    fn test_offset_moves_position() {
        let climate = climate(8);
        let moved = (0..20).any(|i| {
            let (x, z) = (i as f32 * 500.0, 0.0);
            climate.offset(x, z) != (x, z)
        });
        assert!(moved);
    }
}
