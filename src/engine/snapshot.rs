//! Per-frame read-only state handed to the renderer and UI.

use crate::core::camera_controller::OrbitState;
use crate::voxel::coord::{Face, GridCoord};
use crate::voxel::edit::VoxelDelta;
use crate::voxel::voxel::VoxelId;
use super::targeting::TargetState;

/// Which voxel/face the renderer should emphasize
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub voxel: VoxelId,
    pub coord: GridCoord,
    /// Face to outline; `None` when the voxel is enclosed
    pub face: Option<Face>,
    /// Ghost cube at the placement cell should be drawn
    pub show_placement: bool,
    /// The focused voxel may be removed
    pub deletable: bool,
}

/// Which hands were seen this tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandPresence {
    pub orbit: bool,
    pub build: bool,
}

/// Everything the surrounding application needs after one tick
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Tick counter, starting at 1 for the first tick
    pub frame: u64,
    pub orbit: OrbitState,
    pub target: TargetState,
    pub can_place: bool,
    pub can_delete: bool,
    pub highlight: Option<Highlight>,
    pub voxel_count: usize,
    pub locked: bool,
    pub hands: HandPresence,
    /// Changes applied to the voxel set during this tick
    pub deltas: Vec<VoxelDelta>,
}
