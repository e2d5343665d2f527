//! Height shapes for each terrain, built from `noise` crate compositions.
//!
//! Every builder returns a [`Source`] whose output lies in `[0, 1]`;
//! [`TerrainPopulator`](crate::TerrainPopulator) then scales it into the
//! terrain's bounds.

use std::sync::Arc;

use noise::{
    Billow, Clamp, Fbm, MultiFractal, NoiseFn, Perlin, RidgedMulti, ScaleBias, Simplex, Terrace,
};

use crate::cellular::{CellReturn, CellularNoise};
use crate::populator::Source;
use crate::seed::SeedSequence;
use crate::terrain::Terrain;

type Normalized<S> = Clamp<f64, ScaleBias<f64, S, 2>, 2>;

/// Map a roughly `[-1, 1]` source into `[0, 1]`.
fn normalize<S: NoiseFn<f64, 2>>(source: S) -> Normalized<S> {
    rescale(source, 0.5, 0.5)
}

fn rescale<S: NoiseFn<f64, 2>>(source: S, scale: f64, bias: f64) -> Normalized<S> {
    Clamp::<f64, _, 2>::new(
        ScaleBias::<f64, _, 2>::new(source)
            .set_scale(scale)
            .set_bias(bias),
    )
    .set_bounds(0.0, 1.0)
}

fn fbm(seeds: &mut SeedSequence, octaves: usize, wavelength: f64) -> Fbm<Perlin> {
    Fbm::<Perlin>::new(seeds.next_u32())
        .set_octaves(octaves)
        .set_frequency(1.0 / wavelength)
        .set_persistence(0.5)
        .set_lacunarity(2.0)
}

fn billow(seeds: &mut SeedSequence, octaves: usize, wavelength: f64) -> Billow<Perlin> {
    Billow::<Perlin>::new(seeds.next_u32())
        .set_octaves(octaves)
        .set_frequency(1.0 / wavelength)
        .set_persistence(0.5)
        .set_lacunarity(2.0)
}

fn ridged(seeds: &mut SeedSequence, octaves: usize, wavelength: f64) -> RidgedMulti<Perlin> {
    RidgedMulti::<Perlin>::new(seeds.next_u32())
        .set_octaves(octaves)
        .set_frequency(1.0 / wavelength)
        .set_lacunarity(2.0)
}

pub fn deep_ocean(seeds: &mut SeedSequence) -> Source {
    Arc::new(normalize(fbm(seeds, 3, 600.0)))
}

pub fn ocean(seeds: &mut SeedSequence) -> Source {
    Arc::new(normalize(fbm(seeds, 4, 300.0)))
}

pub fn coast(seeds: &mut SeedSequence) -> Source {
    Arc::new(normalize(billow(seeds, 3, 200.0)))
}

pub fn plains(seeds: &mut SeedSequence) -> Source {
    Arc::new(normalize(fbm(seeds, 4, 400.0)))
}

/// Long, low swells.
pub fn steppe(seeds: &mut SeedSequence) -> Source {
    let swell = Fbm::<Simplex>::new(seeds.next_u32())
        .set_octaves(3)
        .set_frequency(1.0 / 700.0)
        .set_persistence(0.4);
    Arc::new(rescale(swell, 0.35, 0.4))
}

pub fn hills(seeds: &mut SeedSequence) -> Source {
    Arc::new(normalize(billow(seeds, 4, 250.0)))
}

/// Inverted billow: broad rounded valleys between sharp rims.
pub fn dales(seeds: &mut SeedSequence) -> Source {
    Arc::new(rescale(billow(seeds, 3, 300.0), -0.5, 0.5))
}

/// Stepped mesas.
pub fn plateau(seeds: &mut SeedSequence) -> Source {
    let steps = Terrace::<f64, _, 2>::new(fbm(seeds, 4, 500.0))
        .add_control_point(-1.0)
        .add_control_point(-0.2)
        .add_control_point(0.3)
        .add_control_point(1.0);
    Arc::new(normalize(steps))
}

/// Many narrow terraces over eroded ridges.
pub fn badlands(seeds: &mut SeedSequence) -> Source {
    let steps = Terrace::<f64, _, 2>::new(ridged(seeds, 4, 350.0))
        .add_control_point(-1.0)
        .add_control_point(-0.5)
        .add_control_point(-0.1)
        .add_control_point(0.2)
        .add_control_point(0.5)
        .add_control_point(1.0);
    Arc::new(normalize(steps))
}

/// Isolated knobbly peaks rising from a rough lowland.
pub fn torridonian(seeds: &mut SeedSequence) -> Source {
    let knobs = noise::Add::<f64, _, _, 2>::new(
        ScaleBias::<f64, _, 2>::new(ridged(seeds, 3, 200.0)).set_scale(0.6),
        ScaleBias::<f64, _, 2>::new(fbm(seeds, 5, 600.0)).set_scale(0.4),
    );
    Arc::new(normalize(knobs))
}

pub fn mountains(seeds: &mut SeedSequence, scale: i32) -> Source {
    Arc::new(normalize(ridged(seeds, 5, scale.max(1) as f64 * 0.5)))
}

/// Where mountain chains rise: `0` away from any chain, `1` on the spine.
pub fn mountain_chain(seeds: &mut SeedSequence, scale: i32) -> Source {
    Arc::new(rescale(fbm(seeds, 3, scale.max(1) as f64 * 2.0), 1.0, 0.0))
}

/// `0` on region borders, rising to `1` once `fade` of the way into a cell.
pub fn region_edge(cells: &CellularNoise, fade: f32) -> Source {
    let edge = cells.clone().with_output(CellReturn::EdgeDistance);
    Arc::new(rescale(edge, 1.0 / fade.max(f32::EPSILON) as f64, 0.0))
}

/// Shape for a terrain the region selector may choose.
pub fn region_flavour(terrain: Terrain, seeds: &mut SeedSequence) -> Option<Source> {
    let shape = match terrain {
        Terrain::Steppe => steppe(seeds),
        Terrain::Plains => plains(seeds),
        Terrain::Hills => hills(seeds),
        Terrain::Dales => dales(seeds),
        Terrain::Plateau => plateau(seeds),
        Terrain::Badlands => badlands(seeds),
        Terrain::Torridonian => torridonian(seeds),
        _ => return None,
    };
    Some(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit(name: &str, source: &Source) {
        for i in 0..2000 {
            let p = [i as f64 * 37.3 - 30_000.0, (i % 97) as f64 * 211.0];
            let v = source.get(p);
            assert!((0.0..=1.0).contains(&v), "{name} produced {v} at {p:?}");
        }
    }

    #[test]
    fn test_every_shape_in_unit_range() {
        let mut seeds = SeedSequence::new(1234);
        let shapes: Vec<(&str, Source)> = vec![
            ("deep_ocean", deep_ocean(&mut seeds)),
            ("ocean", ocean(&mut seeds)),
            ("coast", coast(&mut seeds)),
            ("mountains", mountains(&mut seeds, 1000)),
            ("mountain_chain", mountain_chain(&mut seeds, 1000)),
            (
                "region_edge",
                region_edge(&CellularNoise::new(3, 1.0 / 1200.0), 0.15),
            ),
        ];
        for (name, shape) in &shapes {
            assert_unit(name, shape);
        }
        for terrain in Terrain::ALL.into_iter().filter(|t| t.is_region_flavour()) {
            let shape = region_flavour(terrain, &mut seeds);
            assert!(shape.is_some(), "{terrain} should have a shape");
            if let Some(shape) = shape {
                assert_unit(terrain.name(), &shape);
            }
        }
    }

    #[test]
    fn test_non_region_terrain_has_no_flavour() {
        let mut seeds = SeedSequence::new(1);
        assert!(region_flavour(Terrain::Mountains, &mut seeds).is_none());
        assert!(region_flavour(Terrain::Ocean, &mut seeds).is_none());
    }

    #[test]
    fn test_same_seed_same_shape() {
        let a = hills(&mut SeedSequence::new(77));
        let b = hills(&mut SeedSequence::new(77));
        let c = hills(&mut SeedSequence::new(78));
        let p = [1234.5, -678.25];
        assert_eq!(a.get(p).to_bits(), b.get(p).to_bits());
        let differs = (0..50).any(|i| {
            let p = [i as f64 * 91.0, i as f64 * 13.0];
            a.get(p) != c.get(p)
        });
        assert!(differs, "different seeds should give different shapes");
    }

    #[test]
    fn test_region_edge_zero_on_border() {
        let cells = CellularNoise::new(9, 1.0).with_jitter(0.0);
        let edge = region_edge(&cells, 0.2);
        assert!(edge.get([1.0, 0.5]).abs() < 1e-9);
        assert_eq!(edge.get([0.5, 0.5]), 1.0);
    }
}
