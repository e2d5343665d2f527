//! Immutable regions of precomputed cells and chunk views into them.

use std::sync::Arc;

use strata_terrain::Cell;
use strata_terrain::pool;

use crate::pos::{CHUNK_AREA, CHUNK_SIZE, ChunkPos, RegionPos, RegionSize};

/// A square tile of generated columns.
///
/// Cells are stored chunk-major: all 256 cells of a chunk are contiguous,
/// and chunks follow each other in row order (`z` outer, `x` inner).
#[derive(Clone, Debug)]
pub struct Region {
    pos: RegionPos,
    size: RegionSize,
    cells: Vec<Cell>,
}

impl Region {
    /// Build a region by calling `fill` once per column in raster order.
    ///
    /// `fill` receives a reset cell and the column's world coordinates. One
    /// pooled cell is reused for the whole region.
    pub fn generate(
        pos: RegionPos,
        size: RegionSize,
        mut fill: impl FnMut(&mut Cell, i32, i32),
    ) -> Self {
        let mut cells = Vec::with_capacity(size.area());
        let origin = size.chunk_origin(pos);

        pool::with_cell(|cell| {
            for cz in 0..size.chunks() {
                for cx in 0..size.chunks() {
                    let (bx, bz) = ChunkPos::new(origin.x + cx, origin.z + cz).block_origin();
                    for lz in 0..CHUNK_SIZE {
                        for lx in 0..CHUNK_SIZE {
                            cell.reset();
                            fill(cell, bx + lx, bz + lz);
                            cells.push(*cell);
                        }
                    }
                }
            }
        });

        Self { pos, size, cells }
    }

    pub fn pos(&self) -> RegionPos {
        self.pos
    }

    pub fn size(&self) -> RegionSize {
        self.size
    }

    /// World coordinates of the minimum corner.
    pub fn block_origin(&self) -> (i32, i32) {
        self.size.block_origin(self.pos)
    }

    /// Whether world column `(x, z)` lies inside this region.
    pub fn contains_block(&self, x: i32, z: i32) -> bool {
        self.size.region_of_block(x, z) == self.pos
    }

    fn chunk_offset(&self, chunk: ChunkPos) -> Option<usize> {
        if self.size.region_of_chunk(chunk) != self.pos {
            return None;
        }
        let origin = self.size.chunk_origin(self.pos);
        let cx = (chunk.x - origin.x) as usize;
        let cz = (chunk.z - origin.z) as usize;
        Some((cz * self.size.chunks() as usize + cx) * CHUNK_AREA)
    }

    /// Cells of `chunk`, row-major (`z` outer). `None` if the chunk belongs
    /// to another region.
    pub fn chunk_cells(&self, chunk: ChunkPos) -> Option<&[Cell]> {
        let offset = self.chunk_offset(chunk)?;
        self.cells.get(offset..offset + CHUNK_AREA)
    }

    /// The cell for world column `(x, z)`.
    pub fn cell(&self, x: i32, z: i32) -> Option<&Cell> {
        let cells = self.chunk_cells(ChunkPos::of_block(x, z))?;
        let lx = x.rem_euclid(CHUNK_SIZE) as usize;
        let lz = z.rem_euclid(CHUNK_SIZE) as usize;
        cells.get(lz * CHUNK_SIZE as usize + lx)
    }

    /// Every column of the region with its world coordinates.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32, &Cell)> + '_ {
        let origin = self.size.chunk_origin(self.pos);
        let chunks = self.size.chunks();
        self.cells
            .chunks_exact(CHUNK_AREA)
            .enumerate()
            .flat_map(move |(index, cells)| {
                let index = index as i32;
                let chunk = ChunkPos::new(origin.x + index % chunks, origin.z + index / chunks);
                chunk_columns(chunk, cells)
            })
    }
}

fn chunk_columns(chunk: ChunkPos, cells: &[Cell]) -> impl Iterator<Item = (i32, i32, &Cell)> {
    let (bx, bz) = chunk.block_origin();
    cells.iter().enumerate().map(move |(i, cell)| {
        let i = i as i32;
        (bx + i % CHUNK_SIZE, bz + i / CHUNK_SIZE, cell)
    })
}

/// A read-only chunk of a completed region.
///
/// Holds the region alive, so it can outlive the region's cache entry.
#[derive(Clone, Debug)]
pub struct Chunk {
    region: Arc<Region>,
    pos: ChunkPos,
    offset: usize,
}

impl Chunk {
    /// `None` if `pos` is not inside `region`.
    pub fn new(region: Arc<Region>, pos: ChunkPos) -> Option<Self> {
        let offset = region.chunk_offset(pos)?;
        Some(Self {
            region,
            pos,
            offset,
        })
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    pub fn region(&self) -> &Arc<Region> {
        &self.region
    }

    /// All cells, row-major (`z` outer).
    pub fn cells(&self) -> &[Cell] {
        &self.region.cells[self.offset..self.offset + CHUNK_AREA]
    }

    /// Cell at chunk-local `(lx, lz)`, each in `0..16`.
    pub fn get(&self, lx: usize, lz: usize) -> Option<&Cell> {
        if lx >= CHUNK_SIZE as usize || lz >= CHUNK_SIZE as usize {
            return None;
        }
        self.cells().get(lz * CHUNK_SIZE as usize + lx)
    }

    /// Every column with its world coordinates.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32, &Cell)> + '_ {
        chunk_columns(self.pos, self.cells())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords_region(pos: RegionPos, chunks: u32) -> Region {
        Region::generate(pos, RegionSize::new(chunks), |cell, x, z| {
            cell.value = x as f32;
            cell.temperature = z as f32;
        })
    }

    #[test]
    fn test_generate_visits_every_column_once() {
        let region = coords_region(RegionPos::new(-1, 2), 2);
        let mut seen: Vec<(i32, i32)> = region.columns().map(|(x, z, _)| (x, z)).collect();
        assert_eq!(seen.len(), 32 * 32);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 32 * 32);
        assert!(seen.iter().all(|&(x, z)| region.contains_block(x, z)));
    }

    #[test]
    fn test_columns_report_matching_coordinates() {
        let region = coords_region(RegionPos::new(-2, -1), 2);
        for (x, z, cell) in region.columns() {
            assert_eq!((cell.value, cell.temperature), (x as f32, z as f32));
        }
    }

    #[test]
    fn test_cell_lookup_by_world_coordinate() {
        let region = coords_region(RegionPos::new(-1, 0), 2);
        let cell = region.cell(-7, 20).expect("column inside region");
        assert_eq!((cell.value, cell.temperature), (-7.0, 20.0));
        assert!(region.cell(0, 0).is_none());
        assert_eq!(region.block_origin(), (-32, 0));
    }

    #[test]
    fn test_chunk_view() {
        let region = Arc::new(coords_region(RegionPos::new(0, 0), 2));
        let chunk = Chunk::new(Arc::clone(&region), ChunkPos::new(1, 0)).expect("chunk in region");
        assert_eq!(chunk.cells().len(), CHUNK_AREA);
        let cell = chunk.get(3, 5).expect("in range");
        assert_eq!((cell.value, cell.temperature), (19.0, 5.0));
        assert!(chunk.get(16, 0).is_none());
        assert!(Chunk::new(region, ChunkPos::new(2, 0)).is_none());
        for (x, z, cell) in chunk.columns() {
            assert_eq!((cell.value, cell.temperature), (x as f32, z as f32));
        }
    }

    #[test]
    fn test_fill_receives_reset_cells() {
        let region = Region::generate(RegionPos::new(0, 0), RegionSize::new(1), |cell, _, _| {
            assert_eq!(cell.moisture, 0.0, "cell was not reset");
            cell.moisture = 1.0;
        });
        assert!(region.columns().all(|(_, _, c)| c.moisture == 1.0));
    }
}
