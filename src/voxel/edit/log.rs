//! Bounded history of applied edits.

use std::collections::VecDeque;

use super::delta::VoxelDelta;

/// Default number of edits kept for undo
pub const DEFAULT_HISTORY: usize = 256;

/// A delta with the frame it was applied on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditRecord {
    /// Monotonic sequence number
    pub seq: u64,
    /// Engine frame the edit happened on
    pub frame: u64,
    /// The applied change
    pub delta: VoxelDelta,
}

/// History of edits, oldest first. The oldest entries fall off past capacity.
pub struct EditLog {
    records: VecDeque<EditRecord>,
    capacity: usize,
    next_seq: u64,
}

impl EditLog {
    /// Create an empty log keeping at most `capacity` edits.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY)),
            capacity,
            next_seq: 1,
        }
    }

    /// Append an edit, returning its sequence number.
    pub fn record(&mut self, delta: VoxelDelta, frame: u64) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        if self.capacity == 0 {
            return seq;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(EditRecord { seq, frame, delta });
        seq
    }

    /// Take the newest edit off the log.
    pub fn pop(&mut self) -> Option<EditRecord> {
        self.records.pop_back()
    }

    /// Put an edit back, e.g. after a refused undo.
    pub fn restore(&mut self, record: EditRecord) {
        self.records.push_back(record);
    }

    /// Newest edit.
    pub fn last(&self) -> Option<&EditRecord> {
        self.records.back()
    }

    /// All edits, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EditRecord> {
        self.records.iter()
    }

    /// Get edit count.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all history (e.g. after an import).
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}
