//! The populator sum type and its leaf variant.
//!
//! A populator computes or refines a [`Cell`] for a world column. All
//! variants are immutable after construction and touch nothing but the cell
//! they are handed, so one tree is shared by every sampling thread.

use std::sync::Arc;

use noise::NoiseFn;

use crate::blend::{Blender, Lerp, MultiBlender};
use crate::cell::Cell;
use crate::continent::ContinentGenerator;
use crate::math::clamp01;
use crate::selector::Selector;
use crate::terrain::{Terrain, TerrainBounds};

/// Shared 2D noise module.
pub type Source = Arc<dyn NoiseFn<f64, 2> + Send + Sync>;

/// Where a blending operator reads its control value from.
#[derive(Clone)]
pub enum Control {
    /// The cell's `continent_edge`, written by the continent stage.
    ContinentEdge,
    /// A noise module sampled at the column.
    Noise(Source),
}

impl Control {
    #[inline]
    pub fn value(&self, cell: &Cell, x: f32, z: f32) -> f32 {
        match self {
            Control::ContinentEdge => cell.continent_edge,
            Control::Noise(source) => source.get([x as f64, z as f64]) as f32,
        }
    }
}

/// A stage of the sampling pipeline.
pub enum Populator {
    /// Continent id and edge.
    Continent(Arc<ContinentGenerator>),
    /// One terrain shape.
    Terrain(TerrainPopulator),
    /// Two-way threshold blend.
    Blend(Box<Blender>),
    /// Three-way threshold blend.
    MultiBlend(Box<MultiBlender>),
    /// Weighted interpolation without thresholds.
    Lerp(Box<Lerp>),
    /// Cellular dispatch to one of N populators.
    Select(Box<Selector>),
}

impl Populator {
    /// Full computation for the column.
    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        match self {
            Populator::Continent(continent) => continent.apply(cell, x, z),
            Populator::Terrain(terrain) => terrain.apply(cell, x, z),
            Populator::Blend(blender) => blender.apply(cell, x, z),
            Populator::MultiBlend(blender) => blender.apply(cell, x, z),
            Populator::Lerp(lerp) => lerp.apply(cell, x, z),
            Populator::Select(selector) => selector.apply(cell, x, z),
        }
    }

    /// Classification only. Writes `tag` without computing height where the
    /// variant allows it.
    pub fn tag(&self, cell: &mut Cell, x: f32, z: f32) {
        match self {
            Populator::Continent(continent) => continent.apply(cell, x, z),
            Populator::Terrain(terrain) => cell.tag = terrain.terrain,
            Populator::Blend(blender) => blender.tag(cell, x, z),
            Populator::MultiBlend(blender) => blender.tag(cell, x, z),
            Populator::Lerp(lerp) => lerp.tag(cell, x, z),
            Populator::Select(selector) => selector.tag(cell, x, z),
        }
    }
}

impl From<TerrainPopulator> for Populator {
    fn from(terrain: TerrainPopulator) -> Self {
        Populator::Terrain(terrain)
    }
}

/// Writes a terrain's height shape, scaled into that terrain's bounds.
#[derive(Clone)]
pub struct TerrainPopulator {
    terrain: Terrain,
    bounds: TerrainBounds,
    shape: Source,
}

impl TerrainPopulator {
    /// `shape` must return values in `[0, 1]`; anything outside is clamped.
    pub fn new(terrain: Terrain, bounds: TerrainBounds, shape: Source) -> Self {
        Self {
            terrain,
            bounds,
            shape,
        }
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn bounds(&self) -> TerrainBounds {
        self.bounds
    }

    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        let t = clamp01(self.shape.get([x as f64, z as f64]) as f32);
        cell.value = self.bounds.at(t);
        cell.tag = self.terrain;
    }
}
