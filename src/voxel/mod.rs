//! Voxel data structures and operations

pub mod coord;
pub mod voxel;
pub mod store;
pub mod edit;
pub mod persist;

pub use coord::{Face, GridCoord, DEFAULT_GRID_PITCH};
pub use voxel::{Voxel, VoxelId};
pub use store::{Occupied, VoxelStore};
pub use edit::{EditLog, EditRecord, VoxelDelta};
pub use persist::VoxelExport;
