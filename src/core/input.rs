//! Action state tracking
//!
//! Gestures are resolved into [`Action`]s once per frame. [`ActionInput`]
//! remembers the previous frame's set so controllers can ask for rising and
//! falling edges instead of levels.

/// Semantic actions a pinch can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// Orbit the view by moving the hand
    Rotate,
    /// Move the camera towards the structure
    ZoomIn,
    /// Move the camera away from the structure
    ZoomOut,
    /// Freeze the orbit while held
    Lock,
    /// Place a voxel on the selected face
    Place,
    /// Remove the focused voxel
    Delete,
    /// Step to the next free face
    CycleFace,
}

impl Action {
    /// Every action, in bit order
    pub const ALL: [Action; 7] = [
        Action::Rotate,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::Lock,
        Action::Place,
        Action::Delete,
        Action::CycleFace,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Small bit set of actions asserted in one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    /// No actions asserted
    pub const EMPTY: ActionSet = ActionSet(0);

    /// Create an empty set
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Add an action
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    /// Remove an action
    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    /// Check if an action is asserted
    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Check if nothing is asserted
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Actions in `self` that are not in `other`
    pub fn difference(&self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }

    /// Iterate asserted actions in bit order
    pub fn iter(&self) -> impl Iterator<Item = Action> {
        let set = *self;
        Action::ALL.into_iter().filter(move |a| set.contains(*a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::new();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Tracks held actions for one hand across frames
#[derive(Clone, Debug, Default)]
pub struct ActionInput {
    /// Actions held this frame
    held: ActionSet,
    /// Actions that went false -> true this frame
    just_pressed: ActionSet,
    /// Actions that went true -> false this frame
    just_released: ActionSet,
}

impl ActionInput {
    /// Create new input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's resolved actions. An absent hand is `ActionSet::EMPTY`.
    pub fn update(&mut self, current: ActionSet) {
        self.just_pressed = current.difference(self.held);
        self.just_released = self.held.difference(current);
        self.held = current;
    }

    /// Forget everything, e.g. when the hand is disabled
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if action is currently held
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    /// Check if action was just pressed this frame
    pub fn is_just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(action)
    }

    /// Check if action was just released this frame
    pub fn is_just_released(&self, action: Action) -> bool {
        self.just_released.contains(action)
    }

    /// Actions held this frame
    pub fn held(&self) -> ActionSet {
        self.held
    }
}
