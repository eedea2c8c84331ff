//! Palm -> focused voxel, selected face and placement cell.
//!
//! Scoring happens in view space: lateral distance between the palm and a
//! voxel's projected center, minus a depth bonus for voxels nearer the
//! camera. Face picking happens in the structure's local frame.

use crate::core::camera::OrbitCamera;
use crate::core::input::{Action, ActionInput};
use crate::core::types::Vec3;
use crate::voxel::coord::{Face, GridCoord};
use crate::voxel::store::VoxelStore;
use super::config::{FaceMode, TargetingConfig};

/// What the build hand is pointing at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetState {
    /// Voxel under focus
    pub focus: Option<GridCoord>,
    /// Selected free face of the focused voxel
    pub face: Option<Face>,
    /// Cell a placement would fill (focus + face normal)
    pub placement: Option<GridCoord>,
}

impl TargetState {
    /// No focus, no face, no placement
    pub const NONE: TargetState = TargetState {
        focus: None,
        face: None,
        placement: None,
    };
}

/// Per-frame targeting
pub struct TargetingEngine {
    config: TargetingConfig,
    state: TargetState,
    can_place: bool,
    can_delete: bool,
}

impl TargetingEngine {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            config,
            state: TargetState::NONE,
            can_place: false,
            can_delete: false,
        }
    }

    /// Re-target for this frame.
    ///
    /// `palm` is the build hand's palm in view space, or `None` when the hand
    /// is absent, which clears everything.
    pub fn update(
        &mut self,
        palm: Option<Vec3>,
        input: &ActionInput,
        camera: &OrbitCamera,
        store: &VoxelStore,
        pitch: f32,
    ) -> &TargetState {
        let Some(palm) = palm else {
            self.clear();
            return &self.state;
        };

        let Some(focus) = self.pick_focus(palm, camera, store, pitch) else {
            self.clear();
            return &self.state;
        };

        let free: Vec<Face> = Face::ALL
            .into_iter()
            .filter(|f| !store.has(focus.neighbor(*f)))
            .collect();

        // The previous face only carries over while the focus stays put
        let anchor = self.state.face.filter(|_| self.state.focus == Some(focus));
        let previous = anchor.filter(|f| free.contains(f));

        let face = if free.is_empty() {
            None
        } else if input.is_just_pressed(Action::CycleFace) {
            Some(next_free(&free, anchor))
        } else {
            let palm_local = camera.view_to_local(palm);
            match self.config.face_mode {
                FaceMode::Nearest if !input.is_held(Action::CycleFace) => {
                    Some(nearest_face(&free, focus, palm_local, pitch))
                }
                FaceMode::Nearest => {
                    previous.or_else(|| Some(nearest_face(&free, focus, palm_local, pitch)))
                }
                FaceMode::Cycle => previous.or_else(|| free.first().copied()),
            }
        };

        let placement = face.map(|f| focus.neighbor(f));
        self.state = TargetState {
            focus: Some(focus),
            face,
            placement,
        };
        self.can_place = placement.is_some_and(|p| !store.has(p));
        self.can_delete = store.can_remove(focus);
        &self.state
    }

    /// Lowest-scoring voxel within reach. Equal scores break on coordinate order.
    fn pick_focus(&self, palm: Vec3, camera: &OrbitCamera, store: &VoxelStore, pitch: f32) -> Option<GridCoord> {
        let mut best: Option<(f32, GridCoord)> = None;
        for voxel in store.iter() {
            let coord = voxel.coord();
            let view = camera.local_to_view(coord.to_position(pitch));
            let lateral = view.truncate().distance(palm.truncate());
            if lateral > self.config.max_focus_distance {
                continue;
            }
            let score = lateral - self.config.depth_weight * view.z;
            let better = match best {
                None => true,
                Some((s, c)) => score < s || (score == s && coord < c),
            };
            if better {
                best = Some((score, coord));
            }
        }
        best.map(|(_, coord)| coord)
    }

    /// Re-check the current target against an edited store without
    /// re-picking. A focus that no longer exists clears everything.
    pub fn refresh(&mut self, store: &VoxelStore) {
        match self.state.focus {
            Some(focus) if store.has(focus) => {
                self.can_place = self.state.placement.is_some_and(|p| !store.has(p));
                self.can_delete = store.can_remove(focus);
            }
            _ => self.clear(),
        }
    }

    fn clear(&mut self) {
        self.state = TargetState::NONE;
        self.can_place = false;
        self.can_delete = false;
    }

    /// Current target
    pub fn state(&self) -> &TargetState {
        &self.state
    }

    /// Placement cell exists and is empty
    pub fn can_place(&self) -> bool {
        self.can_place
    }

    /// Focused voxel exists and is not the last one
    pub fn can_delete(&self) -> bool {
        self.can_delete
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }
}

/// Free face whose center is nearest the palm; ties go to enumeration order
fn nearest_face(free: &[Face], focus: GridCoord, palm_local: Vec3, pitch: f32) -> Face {
    let center = focus.to_position(pitch);
    let mut best = free[0];
    let mut best_dist = f32::INFINITY;
    for &face in free {
        let face_center = center + face.normal().as_vec3() * (pitch * 0.5);
        let dist = face_center.distance_squared(palm_local);
        if dist < best_dist {
            best = face;
            best_dist = dist;
        }
    }
    best
}

/// Next free face after `from` in enumeration order, wrapping around
fn next_free(free: &[Face], from: Option<Face>) -> Face {
    let Some(from) = from else {
        return free[0];
    };
    free.iter()
        .copied()
        .find(|f| f.ordinal() > from.ordinal())
        .unwrap_or(free[0])
}
