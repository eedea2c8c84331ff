//! Landmark list -> semantic gesture state

use crate::core::types::{Mat3, Quat, Vec3};
use super::landmarks::{index, HandObservation, LANDMARK_COUNT};
use super::Finger;

/// Default thumb-to-fingertip distance that counts as a pinch
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.06;

/// Default wrist-to-fingertip distance that counts as an open hand
pub const DEFAULT_OPEN_THRESHOLD: f32 = 0.15;

/// Default scale from normalized image units to view units
pub const DEFAULT_PALM_SCALE: f32 = 10.0;

/// One hand's gestures for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    /// Pinch flags indexed by [`Finger`]
    pub pinches: [bool; 4],
    /// Wrist position in centered view space (+Y up, +Z towards camera)
    pub palm: Vec3,
    /// Palm frame: X lateral, Y up, Z forward along the hand
    pub orientation: Quat,
    /// Index and middle fingers extended
    pub open: bool,
}

impl GestureState {
    /// Whether the thumb is pinching `finger`
    pub fn is_pinched(&self, finger: Finger) -> bool {
        self.pinches[finger as usize]
    }

    /// Whether any finger is pinched
    pub fn any_pinch(&self) -> bool {
        self.pinches.iter().any(|p| *p)
    }
}

/// Stateless classifier; every frame is judged on its own landmarks
#[derive(Clone, Copy, Debug)]
pub struct GestureClassifier {
    pub pinch_threshold: f32,
    pub open_threshold: f32,
    pub palm_scale: f32,
}

impl GestureClassifier {
    /// Create a classifier with explicit thresholds
    pub fn new(pinch_threshold: f32, open_threshold: f32, palm_scale: f32) -> Self {
        Self {
            pinch_threshold,
            open_threshold,
            palm_scale,
        }
    }

    /// Classify one hand. Malformed landmark lists yield `None` (hand absent).
    pub fn classify(&self, hand: &HandObservation) -> Option<GestureState> {
        let lm = hand.landmarks()?;
        let thumb = lm[index::THUMB_TIP];
        let mut pinches = [false; 4];
        for finger in Finger::ALL {
            let tip = lm[finger.tip_index()];
            pinches[finger as usize] = thumb.distance(tip) < self.pinch_threshold;
        }

        let wrist = lm[index::WRIST];
        let open = wrist.distance(lm[index::INDEX_TIP]) > self.open_threshold
            && wrist.distance(lm[index::MIDDLE_TIP]) > self.open_threshold;

        Some(GestureState {
            pinches,
            palm: self.to_view(wrist),
            orientation: self.palm_orientation(&lm),
            open,
        })
    }

    /// Remap an image-normalized point into centered view space
    pub fn to_view(&self, p: Vec3) -> Vec3 {
        Vec3::new(p.x - 0.5, -(p.y - 0.5), -p.z) * self.palm_scale
    }

    fn palm_orientation(&self, lm: &[Vec3; LANDMARK_COUNT]) -> Quat {
        let wrist = self.to_view(lm[index::WRIST]);
        let forward = (self.to_view(lm[index::MIDDLE_BASE]) - wrist).normalize_or_zero();
        let lateral = (self.to_view(lm[index::PINKY_BASE]) - self.to_view(lm[index::INDEX_BASE]))
            .normalize_or_zero();
        let up = forward.cross(lateral).normalize_or_zero();
        if forward == Vec3::ZERO || up == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        let lateral = up.cross(forward);
        Quat::from_mat3(&Mat3::from_cols(lateral, up, forward)).normalize()
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_THRESHOLD, DEFAULT_OPEN_THRESHOLD, DEFAULT_PALM_SCALE)
    }
}
