//! Continent generator: macro land/ocean layout from a domain-warped cellular
//! grid, with coastlines broken up by a twice-warped shape field.

use glam::DVec2;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin, Simplex};
use strata_config::ContinentSettings;

use crate::cell::Cell;
use crate::cellular::{DistanceFn, search};
use crate::math::{clamp01, map, unit};
use crate::seed::{SeedSequence, value2};

/// Lower and upper bounds of the normalized shape noise that are stretched
/// to `[0, 1]`. Below the lower bound the shape cuts an ocean hole.
const SHAPE_CLAMP: (f32, f32) = (0.2, 0.5);

/// Displaces coordinates by a pair of multi-octave simplex fields.
pub struct DomainWarp {
    x: Fbm<Simplex>,
    z: Fbm<Simplex>,
    strength: f64,
}

impl DomainWarp {
    /// Warp with features of roughly `scale` blocks, displacing by up to
    /// about `strength` blocks.
    pub fn new(seeds: &mut SeedSequence, scale: i32, octaves: usize, strength: f64) -> Self {
        let frequency = 1.0 / scale.max(1) as f64;
        let field = |seed: u32| {
            Fbm::<Simplex>::new(seed)
                .set_octaves(octaves)
                .set_frequency(frequency)
                .set_persistence(0.5)
                .set_lacunarity(2.0)
        };
        Self {
            x: field(seeds.next_u32()),
            z: field(seeds.next_u32()),
            strength,
        }
    }

    #[inline]
    pub fn apply(&self, x: f64, z: f64) -> (f64, f64) {
        let p = [x, z];
        (
            x + self.x.get(p) * self.strength,
            z + self.z.get(p) * self.strength,
        )
    }
}

/// Continent values for one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContinentSample {
    /// Continent id in roughly `[0, 2]`.
    pub id: f32,
    /// `1 - F1/F2` before thresholding: high near a continent's feature point,
    /// low at cell borders.
    pub edge_strength: f32,
    /// Final continent edge in `[0, 1]`.
    pub edge: f32,
}

/// Generates `continent` and `continent_edge` for every column.
pub struct ContinentGenerator {
    seed: i32,
    frequency: f64,
    jitter: f64,
    edge_min: f32,
    edge_max: f32,
    warp: DomainWarp,
    shape: Fbm<Perlin>,
    shape_warps: [DomainWarp; 2],
}

impl ContinentGenerator {
    pub fn new(settings: &ContinentSettings, seeds: &mut SeedSequence) -> Self {
        let seed = seeds.next_i32();
        let warp = DomainWarp::new(
            seeds,
            settings.warp_scale,
            3,
            settings.warp_strength as f64,
        );
        let shape = Fbm::<Perlin>::new(seeds.next_u32())
            .set_octaves(4)
            .set_frequency(1.0 / settings.shape_scale.max(1) as f64)
            .set_persistence(0.5)
            .set_lacunarity(2.0);
        let shape_strength = settings.shape_warp_strength as f64;
        let shape_warps = [
            DomainWarp::new(seeds, settings.shape_scale / 2, 2, shape_strength),
            DomainWarp::new(seeds, settings.shape_scale / 4, 2, shape_strength * 0.5),
        ];

        Self {
            seed,
            frequency: 1.0 / (4.0 * settings.continent_scale.max(1) as f64),
            jitter: settings.jitter.clamp(0.0, 1.0) as f64,
            edge_min: settings.edge_clamp_min,
            edge_max: settings.ocean_size,
            warp,
            shape,
            shape_warps,
        }
    }

    /// Edge strength at and below which a column is always ocean.
    pub fn edge_min(&self) -> f32 {
        self.edge_min
    }

    /// Edge strength at and above which the shape noise alone decides.
    pub fn edge_max(&self) -> f32 {
        self.edge_max
    }

    /// Shape factor in `[0, 1]` at `(x, z)`.
    pub fn shape(&self, x: f64, z: f64) -> f32 {
        let (x, z) = self.shape_warps[0].apply(x, z);
        let (x, z) = self.shape_warps[1].apply(x, z);
        map(unit(self.shape.get([x, z])), SHAPE_CLAMP.0, SHAPE_CLAMP.1)
    }

    pub fn sample(&self, x: f32, z: f32) -> ContinentSample {
        let (wx, wz) = self.warp.apply(x as f64, z as f64);
        let p = DVec2::new(wx * self.frequency, wz * self.frequency);
        let cell = search(self.seed, self.jitter, DistanceFn::Natural, p);

        let edge_strength = clamp01(1.0 - cell.distance2_div() as f32);
        let mut edge = map(edge_strength, self.edge_min, self.edge_max);
        if edge > 0.0 {
            edge = clamp01(edge * self.shape(x as f64, z as f64));
        }

        let id = value2(self.seed, cell.cell.0, cell.cell.1) + 1.0;

        ContinentSample {
            id,
            edge_strength,
            edge,
        }
    }

    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        let sample = self.sample(x, z);
        cell.continent = sample.id;
        cell.continent_edge = sample.edge;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> ContinentGenerator {
        ContinentGenerator::new(&ContinentSettings::default(), &mut SeedSequence::new(seed))
    }

    #[test]
    fn test_sample_deterministic() {
        let a = generator(42);
        let b = generator(42);
        for i in 0..200 {
            let (x, z) = (i as f32 * 731.0 - 50_000.0, i as f32 * -389.0);
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
    }

    #[test]
    fn test_edge_and_id_ranges() {
        let continent = generator(7);
        for i in 0..2000 {
            let (x, z) = ((i % 50) as f32 * 997.0, (i / 50) as f32 * 1301.0);
            let s = continent.sample(x, z);
            assert!((0.0..=1.0).contains(&s.edge), "edge {}", s.edge);
            assert!((0.0..=1.0).contains(&s.edge_strength));
            assert!((0.0..=2.0).contains(&s.id), "id {}", s.id);
        }
    }

    #[test]
    fn test_low_edge_strength_is_always_ocean() {
        let continent = generator(3);
        let mut seen = 0;
        for i in 0..20_000 {
            let (x, z) = ((i % 200) as f32 * 317.0, (i / 200) as f32 * 317.0);
            let s = continent.sample(x, z);
            if s.edge_strength <= continent.edge_min() {
                seen += 1;
                assert!(
                    s.edge <= continent.edge_min(),
                    "edge {} at low strength {}",
                    s.edge,
                    s.edge_strength
                );
                assert_eq!(s.edge, 0.0);
            }
        }
        assert!(seen > 0, "expected some columns near continent borders");
    }

    #[test]
    fn test_produces_land_and_ocean() {
        let continent = generator(11);
        let (mut land, mut ocean) = (0, 0);
        for i in 0..10_000 {
            let (x, z) = ((i % 100) as f32 * 600.0, (i / 100) as f32 * 600.0);
            let edge = continent.sample(x, z).edge;
            if edge >= 1.0 {
                land += 1;
            } else if edge <= 0.0 {
                ocean += 1;
            }
        }
        assert!(land > 0 && ocean > 0, "land {land} ocean {ocean}");
    }

    #[test]
    fn test_larger_ocean_size_means_less_land() {
        let mut small = ContinentSettings::default();
        small.ocean_size = 0.15;
        let mut large = ContinentSettings::default();
        large.ocean_size = 0.6;
        let small = ContinentGenerator::new(&small, &mut SeedSequence::new(5));
        let large = ContinentGenerator::new(&large, &mut SeedSequence::new(5));

        let (mut land_small, mut land_large) = (0.0, 0.0);
        for i in 0..5_000 {
            let (x, z) = ((i % 70) as f32 * 811.0, (i / 70) as f32 * 811.0);
            land_small += small.sample(x, z).edge;
            land_large += large.sample(x, z).edge;
        }
        assert!(land_large < land_small, "{land_large} >= {land_small}");
    }

    #[test]
    fn test_apply_writes_continent_fields() {
        let continent = generator(9);
        let mut cell = Cell::default();
        continent.apply(&mut cell, 1000.0, -2000.0);
        let s = continent.sample(1000.0, -2000.0);
        assert_eq!(cell.continent, s.id);
        assert_eq!(cell.continent_edge, s.edge);
    }
}
