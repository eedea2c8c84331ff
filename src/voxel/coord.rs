//! Grid coordinates and cube faces

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Vec3};

/// Default edge length of one grid cell
pub const DEFAULT_GRID_PITCH: f32 = 1.0;

/// Integer coordinate identifying one grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoord {
    /// The cell holding the seed voxel
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0, z: 0 };

    /// Create a new grid coordinate
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Snap a position to the nearest cell.
    ///
    /// Each axis is divided by the pitch and rounded half away from zero, so
    /// any two positions inside the same cell produce the same key. Values
    /// beyond the `i32` range saturate; use [`GridCoord::try_from_position`]
    /// to reject them instead.
    pub fn from_position(pos: Vec3, pitch: f32) -> Self {
        let cell = (pos / pitch).round();
        Self::new(cell.x as i32, cell.y as i32, cell.z as i32)
    }

    /// Snap a position, refusing non-finite or out-of-range input
    pub fn try_from_position(pos: Vec3, pitch: f32) -> Option<Self> {
        let cell = (pos / pitch).round();
        let limit = i32::MAX as f32;
        if !cell.is_finite() || cell.abs().max_element() >= limit {
            return None;
        }
        Some(Self::from_position(pos, pitch))
    }

    /// Center of this cell in world units
    pub fn to_position(self, pitch: f32) -> Vec3 {
        self.as_ivec3().as_vec3() * pitch
    }

    /// Adjacent cell across `face`
    pub fn neighbor(self, face: Face) -> Self {
        Self::from(self.as_ivec3() + face.normal())
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl From<IVec3> for GridCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// One of the six axis-aligned faces of a cube
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// +Z, towards the camera at rest
    Front,
    /// -Z
    Back,
    /// +X
    Right,
    /// -X
    Left,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl Face {
    /// Fixed enumeration order used for cycling and tie-breaks
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
    ];

    /// Outward unit normal
    pub fn normal(self) -> IVec3 {
        match self {
            Face::Front => IVec3::Z,
            Face::Back => IVec3::NEG_Z,
            Face::Right => IVec3::X,
            Face::Left => IVec3::NEG_X,
            Face::Top => IVec3::Y,
            Face::Bottom => IVec3::NEG_Y,
        }
    }

    /// Position of this face in [`Face::ALL`]
    pub fn ordinal(self) -> usize {
        self as usize
    }
}
