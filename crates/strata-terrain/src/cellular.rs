//! Jittered-grid cellular (Voronoi) noise.

use glam::DVec2;
use noise::NoiseFn;

use crate::seed::{det_floor, det_sqrt, jitter_offset, value2};

/// Distance metric between a sample and a feature point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceFn {
    Euclidean,
    Manhattan,
    /// Manhattan plus squared Euclidean. Produces rounder-than-Manhattan
    /// cells with less regular edges than Euclidean.
    Natural,
}

impl DistanceFn {
    #[inline]
    pub fn apply(self, d: DVec2) -> f64 {
        match self {
            DistanceFn::Euclidean => det_sqrt(d.length_squared()),
            DistanceFn::Manhattan => d.x.abs() + d.y.abs(),
            DistanceFn::Natural => d.x.abs() + d.y.abs() + d.length_squared(),
        }
    }
}

/// What a [`CellularNoise`] returns from [`NoiseFn::get`]. All in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellReturn {
    /// Hashed value of the nearest cell, constant across the cell.
    CellValue,
    /// Distance to the nearest feature point.
    Distance,
    /// Ratio of nearest to second nearest distance. `1` on cell borders.
    Distance2Div,
    /// `1 - Distance2Div`: `0` on cell borders, rising towards feature points.
    EdgeDistance,
}

/// Result of a 3×3 neighbourhood search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSample {
    /// Nearest feature point distance.
    pub f1: f64,
    /// Second nearest feature point distance.
    pub f2: f64,
    /// Lattice coordinates of the nearest cell.
    pub cell: (i32, i32),
    /// Nearest feature point, in lattice space.
    pub point: DVec2,
}

impl CellSample {
    /// `f1 / f2` in `[0, 1]`.
    #[inline]
    pub fn distance2_div(&self) -> f64 {
        if self.f2 > 0.0 {
            (self.f1 / self.f2).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Find the two nearest feature points around lattice-space position `p`.
///
/// Each lattice cell carries one feature point at its centre displaced by a
/// hashed offset scaled by `jitter`.
pub fn search(seed: i32, jitter: f64, distance: DistanceFn, p: DVec2) -> CellSample {
    let cx = det_floor(p.x);
    let cz = det_floor(p.y);

    let mut f1 = f64::MAX;
    let mut f2 = f64::MAX;
    let mut cell = (cx, cz);
    let mut point = p;

    for dz in -1..=1 {
        for dx in -1..=1 {
            let nx = cx + dx;
            let nz = cz + dz;
            let feature = DVec2::new(nx as f64 + 0.5, nz as f64 + 0.5)
                + jitter_offset(seed, nx, nz) * jitter;
            let d = distance.apply(feature - p);
            if d < f1 {
                f2 = f1;
                f1 = d;
                cell = (nx, nz);
                point = feature;
            } else if d < f2 {
                f2 = d;
            }
        }
    }

    CellSample { f1, f2, cell, point }
}

/// Cellular noise over world coordinates.
#[derive(Clone, Debug)]
pub struct CellularNoise {
    seed: i32,
    frequency: f64,
    jitter: f64,
    distance: DistanceFn,
    output: CellReturn,
}

impl CellularNoise {
    /// Cells of roughly `1 / frequency` blocks.
    pub fn new(seed: i32, frequency: f64) -> Self {
        Self {
            seed,
            frequency,
            jitter: 0.9,
            distance: DistanceFn::Euclidean,
            output: CellReturn::CellValue,
        }
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_output(mut self, output: CellReturn) -> Self {
        self.output = output;
        self
    }

    /// Neighbourhood search at world position `(x, z)`.
    pub fn sample(&self, x: f64, z: f64) -> CellSample {
        search(
            self.seed,
            self.jitter,
            self.distance,
            DVec2::new(x * self.frequency, z * self.frequency),
        )
    }

    /// Hashed value in `[0, 1]` of a lattice cell.
    pub fn cell_value(&self, cell: (i32, i32)) -> f64 {
        (value2(self.seed, cell.0, cell.1) as f64 + 1.0) * 0.5
    }
}

impl NoiseFn<f64, 2> for CellularNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        let sample = self.sample(point[0], point[1]);
        match self.output {
            CellReturn::CellValue => self.cell_value(sample.cell),
            CellReturn::Distance => sample.f1.clamp(0.0, 1.0),
            CellReturn::Distance2Div => sample.distance2_div(),
            CellReturn::EdgeDistance => 1.0 - sample.distance2_div(),
        }
    }
}
