//! Voxel edit deltas and undo history.
//!
//! Every successful place/remove produces a [`VoxelDelta`]; the engine
//! reports them per frame and keeps them in an [`EditLog`] for undo.

pub mod delta;
pub mod log;

pub use delta::VoxelDelta;
pub use log::{EditLog, EditRecord};
