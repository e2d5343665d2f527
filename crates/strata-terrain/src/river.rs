//! Hook for a river network that carves channels into sampled terrain.

use crate::cell::Cell;

/// Carves rivers and lakes into a column after its terrain is computed.
///
/// Implementations may lower `cell.value` and set `cell.tag` to
/// [`River`](crate::Terrain::River), [`RiverBank`](crate::Terrain::RiverBank)
/// or [`Lake`](crate::Terrain::Lake). The heightmap clamps the result so a
/// carve can never raise the column.
pub trait RiverNetwork: Send + Sync {
    fn carve(&self, cell: &mut Cell, x: f32, z: f32);
}

/// A world without rivers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRivers;

impl RiverNetwork for NoRivers {
    #[inline]
    fn carve(&self, _cell: &mut Cell, _x: f32, _z: f32) {}
}
