//! Hand landmark input contract
//!
//! A detector reports 21 points per hand in a fixed anatomical order, with
//! x and y normalized to the image and z a rough relative depth.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;

/// Number of landmarks per hand
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices in detector order
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_BASE: usize = 5;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_BASE: usize = 9;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_TIP: usize = 16;
    pub const PINKY_BASE: usize = 17;
    pub const PINKY_TIP: usize = 20;
}

/// Left/right label reported by the detector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    /// Which hand the detector thinks this is
    pub handedness: Handedness,
    /// Raw landmark points; anything but 21 of them is treated as no hand
    pub points: Vec<[f32; 3]>,
}

impl HandObservation {
    /// Create an observation from raw points
    pub fn new(handedness: Handedness, points: Vec<[f32; 3]>) -> Self {
        Self { handedness, points }
    }

    /// Landmarks as vectors, or `None` when the list is malformed
    pub fn landmarks(&self) -> Option<[Vec3; LANDMARK_COUNT]> {
        if self.points.len() < LANDMARK_COUNT {
            return None;
        }
        let mut out = [Vec3::ZERO; LANDMARK_COUNT];
        for (dst, src) in out.iter_mut().zip(&self.points) {
            let v = Vec3::from_array(*src);
            if !v.is_finite() {
                return None;
            }
            *dst = v;
        }
        Some(out)
    }
}

/// Everything one detector callback reported
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Detected hands; a missing handedness means that hand is absent
    pub hands: Vec<HandObservation>,
}

impl LandmarkFrame {
    /// Frame with no hands
    pub fn empty() -> Self {
        Self::default()
    }

    /// Frame from a list of observations
    pub fn new(hands: Vec<HandObservation>) -> Self {
        Self { hands }
    }

    /// First observation with the given label
    pub fn hand(&self, handedness: Handedness) -> Option<&HandObservation> {
        self.hands.iter().find(|h| h.handedness == handedness)
    }
}

/// Synthetic hands for tests and benchmarks.
#[doc(hidden)]
pub mod synthetic {
    use super::*;
    use crate::gesture::Finger;

    /// Build an open hand with its wrist at `(x, y, z)` and the given fingers pinched
    pub fn hand(handedness: Handedness, x: f32, y: f32, z: f32, pinched: &[Finger]) -> HandObservation {
        let mut points = vec![[x, y, z]; LANDMARK_COUNT];
        let thumb = [x + 0.1, y - 0.1, z];
        points[index::THUMB_TIP] = thumb;
        points[index::INDEX_BASE] = [x + 0.04, y - 0.1, z];
        points[index::MIDDLE_BASE] = [x, y - 0.11, z];
        points[index::PINKY_BASE] = [x - 0.06, y - 0.09, z];

        let tips = [
            (Finger::Index, index::INDEX_TIP, [x + 0.05, y - 0.25, z]),
            (Finger::Middle, index::MIDDLE_TIP, [x, y - 0.27, z]),
            (Finger::Ring, index::RING_TIP, [x - 0.05, y - 0.25, z]),
            (Finger::Pinky, index::PINKY_TIP, [x - 0.1, y - 0.2, z]),
        ];
        for (finger, idx, open) in tips {
            points[idx] = if pinched.contains(&finger) {
                [thumb[0] + 0.01, thumb[1], thumb[2]]
            } else {
                open
            };
        }

        HandObservation::new(handedness, points)
    }
}
