//! Gesture-driven construction engine
//!
//! [`ConstructionEngine`] owns every sub-component and advances them once per
//! rendered frame: classify both hands, orbit, re-target, then apply
//! place/delete on pinch rising edges.

pub mod config;
pub mod targeting;
pub mod feed;
pub mod snapshot;

pub use config::{EngineConfig, FaceMode, TargetingConfig};
pub use targeting::{TargetState, TargetingEngine};
pub use feed::LandmarkFeed;
pub use snapshot::{FrameSnapshot, HandPresence, Highlight};

use crate::core::camera_controller::OrbitCameraController;
use crate::core::input::{Action, ActionInput, ActionSet};
use crate::core::types::Result;
use crate::gesture::{GestureBindings, GestureClassifier, GestureState, HandRole, LandmarkFrame};
use crate::voxel::edit::{EditLog, VoxelDelta};
use crate::voxel::persist::VoxelExport;
use crate::voxel::store::VoxelStore;

/// One interactive sculpting session
pub struct ConstructionEngine {
    config: EngineConfig,
    classifier: GestureClassifier,
    orbit: OrbitCameraController,
    targeting: TargetingEngine,
    store: VoxelStore,
    history: EditLog,
    orbit_input: ActionInput,
    build_input: ActionInput,
    /// Newest landmarks seen; reused until something newer arrives
    latest: LandmarkFrame,
    feed: Option<LandmarkFeed>,
    frame: u64,
}

impl ConstructionEngine {
    /// Create a session with a seeded store
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let classifier = GestureClassifier::new(
            config.pinch_threshold,
            config.open_hand_threshold,
            config.palm_scale,
        );
        let orbit = OrbitCameraController::new(config.sensitivity, config.damping, config.zoom);
        let targeting = TargetingEngine::new(config.targeting);
        let history = EditLog::new(config.history_capacity);

        log::info!(
            "Construction engine created (pitch {}, orbit hand {:?}, build hand {:?})",
            config.grid_pitch, config.orbit_hand, config.build_hand
        );

        Ok(Self {
            config,
            classifier,
            orbit,
            targeting,
            store: VoxelStore::new(),
            history,
            orbit_input: ActionInput::new(),
            build_input: ActionInput::new(),
            latest: LandmarkFrame::empty(),
            feed: None,
            frame: 0,
        })
    }

    /// Pull landmarks from `feed` at the start of every tick
    pub fn with_feed(mut self, feed: LandmarkFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Hand over the newest landmarks. Later calls before a tick overwrite earlier ones.
    pub fn submit(&mut self, frame: LandmarkFrame) {
        self.latest = frame;
    }

    /// Submit then tick
    pub fn tick_with(&mut self, frame: LandmarkFrame) -> FrameSnapshot {
        self.submit(frame);
        self.tick()
    }

    /// Advance one frame
    pub fn tick(&mut self) -> FrameSnapshot {
        if let Some(frame) = self.feed.as_ref().and_then(LandmarkFeed::take_latest) {
            self.latest = frame;
        }
        self.frame += 1;

        let orbit_hand = self.classify(HandRole::Orbit);
        let build_hand = self.classify(HandRole::Build);

        let orbit_actions = self.resolve(HandRole::Orbit, orbit_hand.as_ref());
        self.orbit_input.update(orbit_actions);
        self.orbit.update(orbit_hand.map(|g| (g.palm, orbit_actions)));

        let build_actions = self.resolve(HandRole::Build, build_hand.as_ref());
        self.build_input.update(build_actions);
        self.targeting.update(
            build_hand.map(|g| g.palm),
            &self.build_input,
            self.orbit.camera(),
            &self.store,
            self.config.grid_pitch,
        );

        let deltas = self.apply_edits();

        self.snapshot(
            HandPresence {
                orbit: orbit_hand.is_some(),
                build: build_hand.is_some(),
            },
            deltas,
        )
    }

    fn classify(&self, role: HandRole) -> Option<GestureState> {
        if !self.config.is_enabled(role) {
            return None;
        }
        let hand = self.latest.hand(self.config.hand_for(role))?;
        self.classifier.classify(hand)
    }

    fn resolve(&self, role: HandRole, gesture: Option<&GestureState>) -> ActionSet {
        gesture
            .map(|g| self.config.bindings.resolve(role, g))
            .unwrap_or(ActionSet::EMPTY)
    }

    fn apply_edits(&mut self) -> Vec<VoxelDelta> {
        let mut deltas = Vec::new();

        // Refused edits are silent; only applied ones are logged
        if self.build_input.is_just_pressed(Action::Place) && self.targeting.can_place() {
            let placement = self.targeting.state().placement;
            if let Some(voxel) = placement.and_then(|coord| self.store.add(coord).ok()) {
                log::debug!("Placed voxel at {:?}", voxel.coord());
                deltas.push(VoxelDelta::placed(&voxel));
                self.targeting.refresh(&self.store);
            }
        }

        if self.build_input.is_just_pressed(Action::Delete) && self.targeting.can_delete() {
            let focus = self.targeting.state().focus;
            if let Some(voxel) = focus.and_then(|coord| self.store.take(coord)) {
                log::debug!("Removed voxel at {:?}", voxel.coord());
                deltas.push(VoxelDelta::removed(&voxel));
                self.targeting.refresh(&self.store);
            }
        }

        for delta in &deltas {
            self.history.record(*delta, self.frame);
        }
        deltas
    }

    fn snapshot(&self, hands: HandPresence, deltas: Vec<VoxelDelta>) -> FrameSnapshot {
        let target = *self.targeting.state();
        let can_place = self.targeting.can_place();
        let can_delete = self.targeting.can_delete();

        let highlight = target
            .focus
            .and_then(|coord| self.store.get(coord))
            .map(|voxel| Highlight {
                voxel: voxel.id(),
                coord: voxel.coord(),
                face: target.face,
                show_placement: can_place,
                deletable: can_delete,
            });

        FrameSnapshot {
            frame: self.frame,
            orbit: self.orbit.state(),
            target,
            can_place,
            can_delete,
            highlight,
            voxel_count: self.store.count(),
            locked: self.orbit.is_locked(),
            hands,
            deltas,
        }
    }

    /// Revert the most recent edit. Returns the delta the revert applied.
    pub fn undo(&mut self) -> Option<VoxelDelta> {
        let record = self.history.pop()?;
        match record.delta.revert(&mut self.store) {
            Some(delta) => {
                log::debug!("Undid edit #{} ({:?})", record.seq, record.delta);
                self.targeting.refresh(&self.store);
                Some(delta)
            }
            None => {
                log::debug!("Undo of edit #{} refused by store", record.seq);
                self.history.restore(record);
                None
            }
        }
    }

    /// Current occupied cells in the persisted layout
    pub fn export(&self) -> VoxelExport {
        VoxelExport::from_store(&self.store, self.config.grid_pitch)
    }

    /// Replace the voxel set with an export. Undo history is dropped.
    pub fn import(&mut self, export: &VoxelExport) -> Result<usize> {
        let count = export.apply(&mut self.store, self.config.grid_pitch)?;
        self.history.clear();
        self.targeting.refresh(&self.store);
        Ok(count)
    }

    /// Back to a single seed voxel and the initial view
    pub fn reset(&mut self) {
        self.store.clear_and_reseed();
        self.history.clear();
        self.targeting.refresh(&self.store);
        self.orbit.reset();
        log::info!("Session reset");
    }

    /// Change the rotation gain
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_finite() && sensitivity > 0.0 {
            self.config.sensitivity = sensitivity;
            self.orbit.sensitivity = sensitivity;
        }
    }

    /// Enable or disable a hand. A disabled hand is treated as absent.
    pub fn set_hand_enabled(&mut self, role: HandRole, enabled: bool) {
        match role {
            HandRole::Orbit => {
                self.config.orbit_hand_enabled = enabled;
                self.orbit_input.reset();
            }
            HandRole::Build => {
                self.config.build_hand_enabled = enabled;
                self.build_input.reset();
            }
        }
    }

    /// Replace the gesture bindings
    pub fn set_bindings(&mut self, bindings: GestureBindings) {
        self.config.bindings = bindings;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Voxel set for rendering
    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    /// Applied edits, oldest first
    pub fn history(&self) -> &EditLog {
        &self.history
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera_controller::ROTATE_GAIN;
    use crate::gesture::landmarks::synthetic;
    use crate::gesture::{Finger, HandObservation, Handedness};
    use crate::voxel::coord::{Face, GridCoord};

    const PLACE: &[Finger] = &[Finger::Index];
    const DELETE: &[Finger] = &[Finger::Middle];

    /// Build hand whose palm lands on the seed's front face
    fn build(pinched: &[Finger]) -> HandObservation {
        synthetic::hand(Handedness::Right, 0.5, 0.5, -0.05, pinched)
    }

    fn orbit_at(x: f32, pinched: &[Finger]) -> HandObservation {
        synthetic::hand(Handedness::Left, x, 0.5, 0.0, pinched)
    }

    fn frame(hands: Vec<HandObservation>) -> LandmarkFrame {
        LandmarkFrame::new(hands)
    }

    fn engine() -> ConstructionEngine {
        crate::core::logging::try_init();
        ConstructionEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.grid_pitch = -1.0;
        assert!(ConstructionEngine::new(config).is_err());
    }

    #[test]
    fn test_held_pinch_places_once() {
        let mut engine = engine();
        let snap = engine.tick_with(frame(vec![build(&[])]));
        assert!(snap.can_place);

        let mut placed = 0;
        for _ in 0..30 {
            let snap = engine.tick_with(frame(vec![build(PLACE)]));
            placed += snap.deltas.len();
        }
        assert_eq!(placed, 1);
        assert_eq!(engine.store().count(), 2);
    }

    #[test]
    fn test_no_new_landmarks_means_no_new_edge() {
        let mut engine = engine();
        engine.tick_with(frame(vec![build(&[])]));
        engine.tick_with(frame(vec![build(PLACE)]));

        // Detector is slower than the render loop: same landmarks, several ticks
        for _ in 0..5 {
            let snap = engine.tick();
            assert!(snap.deltas.is_empty());
        }
        assert_eq!(engine.store().count(), 2);
    }

    #[test]
    fn test_place_then_delete_scenario() {
        let mut engine = engine();

        let snap = engine.tick_with(frame(vec![build(&[])]));
        assert_eq!(snap.target.focus, Some(GridCoord::ORIGIN));
        assert_eq!(snap.target.face, Some(Face::Front));
        assert_eq!(snap.target.placement, Some(GridCoord::new(0, 0, 1)));
        assert!(snap.can_place);
        assert!(!snap.can_delete);

        let snap = engine.tick_with(frame(vec![build(PLACE)]));
        assert_eq!(snap.voxel_count, 2);
        assert!(matches!(snap.deltas[..], [VoxelDelta::Placed { coord, .. }] if coord == GridCoord::new(0, 0, 1)));

        // Swing the structure a quarter turn so the seed is no longer hidden behind the new voxel
        let quarter = std::f32::consts::FRAC_PI_2 / (ROTATE_GAIN * engine.config().palm_scale);
        engine.tick_with(frame(vec![orbit_at(0.2, PLACE), build(&[])]));
        engine.tick_with(frame(vec![orbit_at(0.2 + quarter, PLACE), build(&[])]));
        let snap = engine.tick_with(frame(vec![orbit_at(0.2 + quarter, PLACE), build(&[])]));
        assert!((snap.orbit.camera.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
        assert_eq!(snap.target.focus, Some(GridCoord::ORIGIN));
        assert!(snap.can_delete);

        let snap = engine.tick_with(frame(vec![build(DELETE)]));
        assert_eq!(snap.voxel_count, 1);
        assert!(matches!(snap.deltas[..], [VoxelDelta::Removed { coord, .. }] if coord == GridCoord::ORIGIN));

        // The sole survivor cannot be deleted
        engine.tick_with(frame(vec![build(&[])]));
        let snap = engine.tick_with(frame(vec![build(DELETE)]));
        assert!(!snap.can_delete);
        assert!(snap.deltas.is_empty());
        assert_eq!(snap.voxel_count, 1);
        assert!(engine.store().has(GridCoord::new(0, 0, 1)));
    }

    #[test]
    fn test_place_and_delete_same_frame() {
        let mut engine = engine();
        engine.tick_with(frame(vec![build(&[])]));

        // Placement lands first, which frees the seed for deletion
        let snap = engine.tick_with(frame(vec![build(&[Finger::Index, Finger::Middle])]));
        assert_eq!(snap.deltas.len(), 2);
        assert!(matches!(snap.deltas[0], VoxelDelta::Placed { .. }));
        assert!(matches!(snap.deltas[1], VoxelDelta::Removed { coord, .. } if coord == GridCoord::ORIGIN));
        assert_eq!(snap.voxel_count, 1);
        assert_eq!(snap.target, TargetState::NONE);
        assert!(engine.store().has(GridCoord::new(0, 0, 1)));
    }

    #[test]
    fn test_refused_pinches_leave_no_trace() {
        let mut engine = engine();
        engine.tick_with(frame(vec![build(&[])]));

        // The seed is the only voxel, so every delete press is refused
        for _ in 0..5 {
            let snap = engine.tick_with(frame(vec![build(DELETE)]));
            assert!(snap.deltas.is_empty());
            engine.tick_with(frame(vec![build(&[])]));
        }
        // Place with the build hand out of reach of every voxel
        let far = synthetic::hand(Handedness::Right, 0.95, 0.05, 0.0, &[]);
        engine.tick_with(frame(vec![far]));
        let placed = synthetic::hand(Handedness::Right, 0.95, 0.05, 0.0, PLACE);
        let snap = engine.tick_with(frame(vec![placed]));
        assert_eq!(snap.target, TargetState::NONE);
        assert!(snap.deltas.is_empty());

        assert_eq!(engine.store().count(), 1);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_absent_build_hand_hides_cursor() {
        let mut engine = engine();
        let snap = engine.tick_with(frame(vec![build(&[])]));
        assert!(snap.highlight.is_some());

        let snap = engine.tick_with(frame(vec![]));
        assert_eq!(snap.target, TargetState::NONE);
        assert!(snap.highlight.is_none());
        assert!(!snap.can_place && !snap.can_delete);
        assert!(!snap.hands.build);
    }

    #[test]
    fn test_malformed_landmarks_treated_as_absent() {
        let mut engine = engine();
        let broken = HandObservation::new(Handedness::Right, vec![[0.5, 0.5, 0.0]; 7]);
        let snap = engine.tick_with(frame(vec![broken]));
        assert!(!snap.hands.build);
        assert_eq!(snap.target, TargetState::NONE);
    }

    #[test]
    fn test_lock_freezes_orbit() {
        let mut engine = engine();
        // Rotate + zoom out, then add the lock pinky while still rotating
        engine.tick_with(frame(vec![orbit_at(0.3, &[Finger::Index, Finger::Ring])]));
        engine.tick_with(frame(vec![orbit_at(0.4, &[Finger::Index, Finger::Ring])]));
        let locked = engine.tick_with(frame(vec![orbit_at(0.5, &[Finger::Index, Finger::Ring, Finger::Pinky])]));
        assert!(locked.locked);

        for i in 0..10 {
            let x = 0.5 + 0.02 * i as f32;
            let snap = engine.tick_with(frame(vec![orbit_at(x, &[Finger::Index, Finger::Middle, Finger::Pinky])]));
            assert_eq!(snap.orbit.camera, locked.orbit.camera);
        }

        let snap = engine.tick_with(frame(vec![orbit_at(0.5, &[])]));
        assert!(!snap.locked);
    }

    #[test]
    fn test_orbit_holds_while_hand_absent() {
        let mut engine = engine();
        engine.tick_with(frame(vec![orbit_at(0.3, &[Finger::Index])]));
        let spinning = engine.tick_with(frame(vec![orbit_at(0.5, &[Finger::Index])]));
        assert!(spinning.orbit.camera.yaw > 0.0);

        for _ in 0..30 {
            let snap = engine.tick_with(LandmarkFrame::empty());
            assert_eq!(snap.orbit.camera, spinning.orbit.camera);
            assert!(!snap.hands.orbit);
        }
    }

    #[test]
    fn test_disabled_hand_is_ignored() {
        let mut engine = engine();
        engine.set_hand_enabled(HandRole::Build, false);
        engine.tick_with(frame(vec![build(&[])]));
        let snap = engine.tick_with(frame(vec![build(PLACE)]));
        assert!(!snap.hands.build);
        assert_eq!(snap.voxel_count, 1);

        engine.set_hand_enabled(HandRole::Build, true);
        let snap = engine.tick_with(frame(vec![build(PLACE)]));
        assert_eq!(snap.voxel_count, 2);
    }

    #[test]
    fn test_feed_drives_ticks() {
        let feed = LandmarkFeed::new();
        let mut engine = engine().with_feed(feed.clone());

        feed.publish(frame(vec![build(&[])]));
        feed.publish(frame(vec![build(PLACE)]));
        let snap = engine.tick();
        assert_eq!(snap.voxel_count, 2);

        // Nothing new published: latest landmarks are reused
        let snap = engine.tick();
        assert!(snap.hands.build);
        assert!(snap.deltas.is_empty());
    }

    #[test]
    fn test_undo() {
        let mut engine = engine();
        engine.tick_with(frame(vec![build(&[])]));
        engine.tick_with(frame(vec![build(PLACE)]));
        assert_eq!(engine.history().len(), 1);

        let undone = engine.undo().unwrap();
        assert!(matches!(undone, VoxelDelta::Removed { .. }));
        assert_eq!(engine.store().count(), 1);
        assert!(engine.undo().is_none());
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut engine = engine();
        engine.tick_with(frame(vec![build(&[])]));
        engine.tick_with(frame(vec![build(PLACE)]));
        let export = engine.export();

        let mut other = ConstructionEngine::new(EngineConfig::default()).unwrap();
        other.reset();
        assert_eq!(other.import(&export).unwrap(), 2);
        assert_eq!(other.store().sorted_coords(), engine.store().sorted_coords());
    }

    #[test]
    fn test_sensitivity_update() {
        let mut engine = engine();
        engine.set_sensitivity(2.0);
        assert_eq!(engine.config().sensitivity, 2.0);
        engine.set_sensitivity(-1.0);
        assert_eq!(engine.config().sensitivity, 2.0);
    }
}
