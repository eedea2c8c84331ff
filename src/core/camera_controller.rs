//! Gesture-driven orbit camera controller
//!
//! Two states: Active and Locked. While Locked the velocities are pinned to
//! zero and every other gesture on the orbit hand is ignored.

use crate::core::camera::OrbitCamera;
use crate::core::input::{Action, ActionSet};
use crate::core::types::{Vec2, Vec3};

/// Per-frame angular gain applied to palm deltas before sensitivity
pub const ROTATE_GAIN: f32 = 0.5;

/// Allowed zoom distances and the per-frame zoom speed
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomBand {
    /// Closest allowed camera distance
    pub min: f32,
    /// Farthest allowed camera distance
    pub max: f32,
    /// Distance at session start
    pub initial: f32,
    /// Zoom velocity set while a zoom gesture is held
    pub step: f32,
}

impl Default for ZoomBand {
    fn default() -> Self {
        Self {
            min: 3.0,
            max: 30.0,
            initial: 10.0,
            step: 0.15,
        }
    }
}

/// Read-only view of the orbit for renderers and targeting
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    /// Current transform
    pub camera: OrbitCamera,
    /// Angular velocity (yaw, pitch) in radians per frame
    pub angular_velocity: Vec2,
    /// Zoom velocity in distance units per frame
    pub zoom_velocity: f32,
    /// Whether the lock gesture is holding the view
    pub locked: bool,
    /// Whether the rotate gesture is driving the view this frame
    pub rotating: bool,
}

/// Orbit controller with inertia and a lock mode
pub struct OrbitCameraController {
    /// Rotation sensitivity (user adjustable)
    pub sensitivity: f32,
    /// Per-frame velocity decay when no gesture drives it
    pub damping: f32,
    zoom: ZoomBand,
    camera: OrbitCamera,
    angular_velocity: Vec2,
    zoom_velocity: f32,
    locked: bool,
    rotating: bool,
    /// Palm position from the previous frame of the current rotate run
    last_palm: Option<Vec3>,
}

impl OrbitCameraController {
    /// Create new controller
    pub fn new(sensitivity: f32, damping: f32, zoom: ZoomBand) -> Self {
        let initial = zoom.initial.clamp(zoom.min, zoom.max);
        Self {
            sensitivity,
            damping,
            zoom,
            camera: OrbitCamera::new(initial),
            angular_velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
            locked: false,
            rotating: false,
            last_palm: None,
        }
    }

    /// Advance one frame.
    ///
    /// `hand` is the orbit hand's palm position and resolved actions, or
    /// `None` when the hand is absent. An absent hand changes nothing: the
    /// view stays put and the lock state is kept.
    pub fn update(&mut self, hand: Option<(Vec3, ActionSet)>) {
        let Some((palm, actions)) = hand else {
            self.rotating = false;
            self.last_palm = None;
            return;
        };

        let lock = actions.contains(Action::Lock);
        if lock != self.locked {
            log::debug!("Orbit {}", if lock { "locked" } else { "unlocked" });
        }
        self.locked = lock;

        if self.locked {
            self.angular_velocity = Vec2::ZERO;
            self.zoom_velocity = 0.0;
            self.rotating = false;
            self.last_palm = None;
            return;
        }

        if actions.contains(Action::Rotate) {
            let delta = match self.last_palm {
                Some(last) => palm - last,
                None => Vec3::ZERO,
            };
            // Moving the hand right spins the structure right; up tips it towards the viewer
            self.angular_velocity = Vec2::new(delta.x, -delta.y) * self.sensitivity * ROTATE_GAIN;
            self.last_palm = Some(palm);
            self.rotating = true;
        } else {
            self.angular_velocity *= self.damping;
            self.last_palm = None;
            self.rotating = false;
        }

        if actions.contains(Action::ZoomIn) {
            self.zoom_velocity = -self.zoom.step;
        } else if actions.contains(Action::ZoomOut) {
            self.zoom_velocity = self.zoom.step;
        } else {
            self.zoom_velocity *= self.damping;
        }

        self.integrate();
    }

    fn integrate(&mut self) {
        self.camera.yaw += self.angular_velocity.x;
        self.camera.pitch += self.angular_velocity.y;

        let distance = self.camera.distance + self.zoom_velocity;
        if distance <= self.zoom.min || distance >= self.zoom.max {
            self.zoom_velocity = 0.0;
        }
        self.camera.distance = distance.clamp(self.zoom.min, self.zoom.max);
    }

    /// Current transform
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Snapshot of the orbit
    pub fn state(&self) -> OrbitState {
        OrbitState {
            camera: self.camera,
            angular_velocity: self.angular_velocity,
            zoom_velocity: self.zoom_velocity,
            locked: self.locked,
            rotating: self.rotating,
        }
    }

    /// Whether the view is locked
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Zoom limits in use
    pub fn zoom_band(&self) -> ZoomBand {
        self.zoom
    }

    /// Return to the initial orientation and zoom, dropping all motion
    pub fn reset(&mut self) {
        *self = Self::new(self.sensitivity, self.damping, self.zoom);
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(1.0, 0.95, ZoomBand::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(list: &[Action]) -> ActionSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_rotate_sets_velocity_from_palm_delta() {
        let mut controller = OrbitCameraController::default();
        let rotate = actions(&[Action::Rotate]);

        // First sample of a run has no previous palm, so no motion
        controller.update(Some((Vec3::ZERO, rotate)));
        assert_eq!(controller.state().angular_velocity, Vec2::ZERO);

        controller.update(Some((Vec3::new(0.2, 0.0, 0.0), rotate)));
        let expected = 0.2 * ROTATE_GAIN;
        assert!((controller.state().angular_velocity.x - expected).abs() < 1e-6);
        assert!((controller.camera().yaw - expected).abs() < 1e-6);

        // Holding still sets velocity back to zero rather than accumulating
        controller.update(Some((Vec3::new(0.2, 0.0, 0.0), rotate)));
        assert_eq!(controller.state().angular_velocity, Vec2::ZERO);
        assert!((controller.camera().yaw - expected).abs() < 1e-6);
    }

    #[test]
    fn test_inertia_after_release() {
        let mut controller = OrbitCameraController::default();
        let rotate = actions(&[Action::Rotate]);
        controller.update(Some((Vec3::ZERO, rotate)));
        controller.update(Some((Vec3::new(0.4, 0.0, 0.0), rotate)));
        let v0 = controller.state().angular_velocity.x;

        controller.update(Some((Vec3::new(0.4, 0.0, 0.0), ActionSet::EMPTY)));
        let v1 = controller.state().angular_velocity.x;
        assert!((v1 - v0 * 0.95).abs() < 1e-6);
        assert!(!controller.state().rotating);

        let yaw_before = controller.camera().yaw;
        controller.update(Some((Vec3::new(0.4, 0.0, 0.0), ActionSet::EMPTY)));
        assert!(controller.camera().yaw > yaw_before);
    }

    #[test]
    fn test_absent_hand_changes_nothing() {
        let mut controller = OrbitCameraController::default();
        let held = actions(&[Action::Rotate, Action::ZoomOut]);
        controller.update(Some((Vec3::ZERO, held)));
        controller.update(Some((Vec3::new(0.4, 0.2, 0.0), held)));
        assert!(controller.state().angular_velocity != Vec2::ZERO);

        let before = *controller.camera();
        for _ in 0..30 {
            controller.update(None);
            assert_eq!(*controller.camera(), before);
        }
        assert!(!controller.state().rotating);
        assert!(!controller.is_locked());
    }

    #[test]
    fn test_lock_freezes_motion() {
        let mut controller = OrbitCameraController::default();
        let rotate = actions(&[Action::Rotate, Action::ZoomOut]);
        controller.update(Some((Vec3::ZERO, rotate)));
        controller.update(Some((Vec3::new(0.5, 0.3, 0.0), rotate)));

        let locked = actions(&[Action::Lock, Action::Rotate, Action::ZoomIn]);
        controller.update(Some((Vec3::new(0.9, 0.3, 0.0), locked)));
        let frozen = *controller.camera();
        assert!(controller.is_locked());

        for i in 0..20 {
            let palm = Vec3::new(i as f32 * 0.1, 0.0, 0.0);
            controller.update(Some((palm, locked)));
            assert_eq!(*controller.camera(), frozen);
        }

        // An absent hand keeps the lock
        controller.update(None);
        assert_eq!(*controller.camera(), frozen);
        assert!(controller.is_locked());

        controller.update(Some((Vec3::ZERO, ActionSet::EMPTY)));
        assert!(!controller.is_locked());
    }

    #[test]
    fn test_zoom_clamped() {
        let mut controller = OrbitCameraController::default();
        let band = controller.zoom_band();

        for _ in 0..1000 {
            controller.update(Some((Vec3::ZERO, actions(&[Action::ZoomIn]))));
            let d = controller.camera().distance;
            assert!(d >= band.min && d <= band.max);
        }
        assert_eq!(controller.camera().distance, band.min);

        for _ in 0..1000 {
            controller.update(Some((Vec3::ZERO, actions(&[Action::ZoomOut]))));
            let d = controller.camera().distance;
            assert!(d >= band.min && d <= band.max);
        }
        assert_eq!(controller.camera().distance, band.max);
    }

    #[test]
    fn test_zoom_coasts_after_release() {
        let mut controller = OrbitCameraController::default();
        controller.update(Some((Vec3::ZERO, actions(&[Action::ZoomIn]))));
        let d0 = controller.camera().distance;
        controller.update(Some((Vec3::ZERO, ActionSet::EMPTY)));
        assert!(controller.camera().distance < d0);
        assert!(controller.state().zoom_velocity < 0.0);
    }
}
