//! Voxel data type

use serde::{Deserialize, Serialize};

use super::coord::GridCoord;

/// Stable identity the renderer keys its visual resources on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelId(pub u64);

/// A placed unit cube. Its coordinate never changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Voxel {
    id: VoxelId,
    coord: GridCoord,
}

impl Voxel {
    pub(crate) fn new(id: VoxelId, coord: GridCoord) -> Self {
        Self { id, coord }
    }

    /// Identity of this voxel
    pub fn id(&self) -> VoxelId {
        self.id
    }

    /// Grid cell this voxel occupies
    pub fn coord(&self) -> GridCoord {
        self.coord
    }
}
