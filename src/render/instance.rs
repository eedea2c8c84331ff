//! GPU-ready records for the external renderer
//!
//! The engine never creates GPU resources. These `Pod` structs let a host
//! renderer upload the voxel set and orbit transform with `bytemuck`.

use bytemuck::{Pod, Zeroable};

use crate::core::camera::OrbitCamera;
use crate::engine::snapshot::FrameSnapshot;
use crate::voxel::store::VoxelStore;

/// Instance flags
pub mod flags {
    /// Voxel is under focus
    pub const FOCUSED: u32 = 1 << 0;
    /// Focused voxel may be deleted
    pub const DELETABLE: u32 = 1 << 1;
    /// Instance is the placement ghost, not a real voxel
    pub const GHOST: u32 = 1 << 2;
    /// Low 3 bits of the face index sit at this shift, valid with FOCUSED
    pub const FACE_SHIFT: u32 = 8;
    /// Set when a face is selected
    pub const HAS_FACE: u32 = 1 << 11;
}

/// One cube instance (16 bytes, matches a vec3 + u32 shader struct)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VoxelInstance {
    /// Cell center in structure-local world units
    pub position: [f32; 3],
    /// See [`flags`]
    pub flags: u32,
}

/// Orbit transform uniform (144 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct OrbitUniform {
    /// Structure rotation (64 bytes, offset 0)
    pub model: [[f32; 4]; 4],
    /// World to camera (64 bytes, offset 64)
    pub view: [[f32; 4]; 4],
    /// Camera distance (4 bytes, offset 128)
    pub distance: f32,
    /// Grid pitch, for cube scale (4 bytes, offset 132)
    pub pitch: f32,
    /// Padding to 16-byte multiple (8 bytes, offset 136)
    pub _pad: [f32; 2],
}

impl OrbitUniform {
    /// Create uniform data from the orbit camera
    pub fn from_camera(camera: &OrbitCamera, pitch: f32) -> Self {
        Self {
            model: camera.model_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            distance: camera.distance,
            pitch,
            _pad: [0.0; 2],
        }
    }
}

/// Fill `out` with one instance per voxel plus a ghost at the placement cell.
///
/// Voxels come out in sorted coordinate order so buffers are stable frame
/// to frame.
pub fn build_instances(store: &VoxelStore, pitch: f32, snapshot: &FrameSnapshot, out: &mut Vec<VoxelInstance>) {
    out.clear();
    out.reserve(store.count() + 1);

    for coord in store.sorted_coords() {
        let mut bits = 0;
        if let Some(h) = snapshot.highlight.filter(|h| h.coord == coord) {
            bits |= flags::FOCUSED;
            if h.deletable {
                bits |= flags::DELETABLE;
            }
            if let Some(face) = h.face {
                bits |= flags::HAS_FACE | ((face.ordinal() as u32) << flags::FACE_SHIFT);
            }
        }
        out.push(VoxelInstance {
            position: coord.to_position(pitch).to_array(),
            flags: bits,
        });
    }

    if let (true, Some(ghost)) = (snapshot.can_place, snapshot.target.placement) {
        out.push(VoxelInstance {
            position: ghost.to_position(pitch).to_array(),
            flags: flags::GHOST,
        });
    }
}
