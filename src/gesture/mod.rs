//! Hand gesture recognition
//!
//! Raw landmark lists are classified per frame into [`GestureState`]s, then
//! resolved through [`GestureBindings`] into actions.

pub mod landmarks;
pub mod classifier;
pub mod bindings;

pub use landmarks::{Handedness, HandObservation, LandmarkFrame, LANDMARK_COUNT};
pub use classifier::{GestureClassifier, GestureState};
pub use bindings::{Finger, GestureBindings, HandRole};
