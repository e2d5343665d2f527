//! Cellular dispatch among named terrain region flavours.

use noise::NoiseFn;

use crate::cell::Cell;
use crate::cellular::CellularNoise;
use crate::populator::Populator;

/// Partitions the world into cells and runs exactly one populator per cell.
///
/// The cell's hashed value in `[0, 1]` picks a populator by cumulative
/// weight, so every column inside one cell gets the same flavour.
pub struct Selector {
    cells: CellularNoise,
    choices: Vec<Populator>,
    cumulative: Vec<f32>,
}

impl Selector {
    /// `cells` must return its cell value (the default output).
    ///
    /// Weights that are not positive are treated as zero. If no weight is
    /// positive, choices are picked uniformly.
    pub fn new(cells: CellularNoise, choices: Vec<(Populator, f32)>) -> Self {
        let total: f32 = choices.iter().map(|(_, w)| w.max(0.0)).sum();
        let count = choices.len().max(1) as f32;

        let mut running = 0.0;
        let mut cumulative = Vec::with_capacity(choices.len());
        let mut populators = Vec::with_capacity(choices.len());
        for (populator, weight) in choices {
            running += if total > 0.0 {
                weight.max(0.0) / total
            } else {
                1.0 / count
            };
            cumulative.push(running);
            populators.push(populator);
        }

        Self {
            cells,
            choices: populators,
            cumulative,
        }
    }

    /// Number of populators to choose among.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Index of the populator responsible for `(x, z)`.
    pub fn index(&self, x: f32, z: f32) -> usize {
        let v = self.cells.get([x as f64, z as f64]) as f32;
        self.cumulative
            .iter()
            .position(|&bound| v < bound)
            .unwrap_or(self.choices.len().saturating_sub(1))
    }

    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        if let Some(choice) = self.choices.get(self.index(x, z)) {
            choice.apply(cell, x, z);
        }
    }

    pub fn tag(&self, cell: &mut Cell, x: f32, z: f32) {
        if let Some(choice) = self.choices.get(self.index(x, z)) {
            choice.tag(cell, x, z);
        }
    }
}

impl From<Selector> for Populator {
    fn from(selector: Selector) -> Self {
        Populator::Select(Box::new(selector))
    }
}
