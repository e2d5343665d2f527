//! Terrain statistics gathered over a sampled area.

use rustc_hash::FxHashMap;
use strata_terrain::{Cell, Levels, Terrain};
use tracing::info;

/// Running totals for a bulk visit.
#[derive(Debug, Default)]
pub struct Survey {
    counts: FxHashMap<Terrain, u64>,
    columns: u64,
    land: u64,
    lowest: Option<i32>,
    highest: Option<i32>,
}

impl Survey {
    pub fn record(&mut self, cell: &Cell, levels: &Levels) {
        *self.counts.entry(cell.tag).or_default() += 1;
        self.columns += 1;
        if cell.value > levels.water {
            self.land += 1;
        }
        let y = levels.to_y(cell.value);
        self.lowest = Some(self.lowest.map_or(y, |low| low.min(y)));
        self.highest = Some(self.highest.map_or(y, |high| high.max(y)));
    }

    pub fn columns(&self) -> u64 {
        self.columns
    }

    pub fn count(&self, terrain: Terrain) -> u64 {
        self.counts.get(&terrain).copied().unwrap_or(0)
    }

    /// Share of columns above the water surface.
    pub fn land_fraction(&self) -> f64 {
        if self.columns == 0 {
            0.0
        } else {
            self.land as f64 / self.columns as f64
        }
    }

    /// Terrains seen, most common first.
    pub fn histogram(&self) -> Vec<(Terrain, u64)> {
        let mut rows: Vec<_> = self.counts.iter().map(|(&t, &n)| (t, n)).collect();
        rows.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }

    pub fn log(&self) {
        info!(
            "Sampled {} columns, {:.1}% land, heights {}..={}",
            self.columns,
            self.land_fraction() * 100.0,
            self.lowest.unwrap_or(0),
            self.highest.unwrap_or(0),
        );
        for (terrain, count) in self.histogram() {
            let share = count as f64 * 100.0 / self.columns.max(1) as f64;
            info!("  {terrain:<12} {count:>9} ({share:5.1}%)");
        }
    }
}
