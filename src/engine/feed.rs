//! Latest-value hand-off from the landmark detector.
//!
//! The detector publishes at camera rate from its own callback; the engine
//! takes whatever is newest at the start of each tick. Older frames are
//! overwritten, never queued.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::gesture::LandmarkFrame;

/// Cloneable single-slot mailbox for landmark frames
#[derive(Clone, Default)]
pub struct LandmarkFeed {
    slot: Arc<Mutex<Option<LandmarkFrame>>>,
}

impl LandmarkFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any unread frame with `frame`
    pub fn publish(&self, frame: LandmarkFrame) {
        *self.lock() = Some(frame);
    }

    /// Take the newest unread frame, if any arrived since the last take
    pub fn take_latest(&self) -> Option<LandmarkFrame> {
        self.lock().take()
    }

    /// Whether a frame is waiting
    pub fn has_pending(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<LandmarkFrame>> {
        // A panicking publisher cannot leave a half-written Option behind
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
