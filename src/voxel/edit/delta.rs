//! Edit delta representation.

use serde::{Deserialize, Serialize};

use crate::voxel::coord::GridCoord;
use crate::voxel::store::VoxelStore;
use crate::voxel::voxel::{Voxel, VoxelId};

/// One applied change to the voxel set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoxelDelta {
    /// A voxel was created
    Placed {
        id: VoxelId,
        coord: GridCoord,
    },
    /// A voxel was destroyed
    Removed {
        id: VoxelId,
        coord: GridCoord,
    },
}

impl VoxelDelta {
    /// Delta for a freshly placed voxel.
    pub fn placed(voxel: &Voxel) -> Self {
        VoxelDelta::Placed { id: voxel.id(), coord: voxel.coord() }
    }

    /// Delta for a removed voxel.
    pub fn removed(voxel: &Voxel) -> Self {
        VoxelDelta::Removed { id: voxel.id(), coord: voxel.coord() }
    }

    /// Cell touched by this delta.
    pub fn coord(&self) -> GridCoord {
        match self {
            VoxelDelta::Placed { coord, .. } | VoxelDelta::Removed { coord, .. } => *coord,
        }
    }

    /// Voxel identity touched by this delta.
    pub fn id(&self) -> VoxelId {
        match self {
            VoxelDelta::Placed { id, .. } | VoxelDelta::Removed { id, .. } => *id,
        }
    }

    /// Undo this delta against the store.
    ///
    /// Goes through the normal store operations, so the store may refuse
    /// (e.g. reverting a placement that left only one voxel). Returns the
    /// delta the revert produced.
    pub fn revert(&self, store: &mut VoxelStore) -> Option<VoxelDelta> {
        match self {
            VoxelDelta::Placed { coord, .. } => {
                store.take(*coord).map(|v| VoxelDelta::removed(&v))
            }
            VoxelDelta::Removed { coord, .. } => {
                store.add(*coord).ok().map(|v| VoxelDelta::placed(&v))
            }
        }
    }
}
