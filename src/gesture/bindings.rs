//! Pinch -> action bindings
//!
//! Each (hand role, finger) pair maps to at most one [`Action`]. Bindings
//! are resolved once per frame into an [`ActionSet`] so the controllers
//! only ever look at semantic actions.

use serde::{Deserialize, Serialize};

use crate::core::input::{Action, ActionSet};
use super::classifier::GestureState;
use super::landmarks::index;

/// Finger paired with the thumb in a pinch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Finger {
    Index = 0,
    Middle = 1,
    Ring = 2,
    Pinky = 3,
}

impl Finger {
    /// All fingers in pinch-flag order
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Landmark index of this finger's tip
    pub fn tip_index(self) -> usize {
        match self {
            Finger::Index => index::INDEX_TIP,
            Finger::Middle => index::MIDDLE_TIP,
            Finger::Ring => index::RING_TIP,
            Finger::Pinky => index::PINKY_TIP,
        }
    }
}

/// What a hand is used for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandRole {
    /// Orbits, zooms and locks the view
    Orbit,
    /// Targets faces, places and deletes voxels
    Build,
}

/// Binding table for both hands
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureBindings {
    /// Orbit hand bindings indexed by [`Finger`]
    pub orbit: [Option<Action>; 4],
    /// Build hand bindings indexed by [`Finger`]
    pub build: [Option<Action>; 4],
}

impl GestureBindings {
    /// Action bound to a finger, if any
    pub fn get(&self, role: HandRole, finger: Finger) -> Option<Action> {
        self.table(role)[finger as usize]
    }

    /// Rebind a finger; `None` unbinds it
    pub fn bind(&mut self, role: HandRole, finger: Finger, action: Option<Action>) {
        match role {
            HandRole::Orbit => self.orbit[finger as usize] = action,
            HandRole::Build => self.build[finger as usize] = action,
        }
    }

    /// Resolve a hand's pinches into the actions they assert
    pub fn resolve(&self, role: HandRole, gesture: &GestureState) -> ActionSet {
        Finger::ALL
            .into_iter()
            .filter(|f| gesture.is_pinched(*f))
            .filter_map(|f| self.get(role, f))
            .collect()
    }

    fn table(&self, role: HandRole) -> &[Option<Action>; 4] {
        match role {
            HandRole::Orbit => &self.orbit,
            HandRole::Build => &self.build,
        }
    }
}

impl Default for GestureBindings {
    fn default() -> Self {
        Self {
            orbit: [
                Some(Action::Rotate),
                Some(Action::ZoomIn),
                Some(Action::ZoomOut),
                Some(Action::Lock),
            ],
            build: [
                Some(Action::Place),
                Some(Action::Delete),
                Some(Action::CycleFace),
                None,
            ],
        }
    }
}
