//! Bounded undo/redo history of whole-model snapshots.
//!
//! Derived data such as resolved expressions and validation results is never
//! stored here; callers recompute it after every restore.

use std::collections::VecDeque;

use log::debug;

/// Undo/redo stack holding deep copies of a model.
///
/// # Examples
///
/// ```
/// # use logicpad_core::history::UndoHistory;
/// let mut history = UndoHistory::new(2);
/// history.record(1);
/// history.record(2);
/// history.record(3); // drops 1
///
/// assert_eq!(history.undo(4), Some(3));
/// assert_eq!(history.undo(3), Some(2));
/// assert_eq!(history.undo(2), None);
/// assert_eq!(history.redo(2), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct UndoHistory<T: Clone> {
    capacity: usize,
    undo: VecDeque<T>,
    redo: Vec<T>,
}

impl<T: Clone> UndoHistory<T> {
    /// Number of snapshots kept by the editor session.
    pub const DEFAULT_CAPACITY: usize = 50;

    /// Creates a history keeping at most `capacity` undo snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            undo: VecDeque::new(),
            redo: Vec::new(),
        }
    }

    /// Records the state before a mutation. Clears the redo stack.
    pub fn record(&mut self, snapshot: T) {
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
            debug!(capacity = self.capacity; "Undo history full, dropping oldest snapshot");
        }
        self.undo.push_back(snapshot);
        self.redo.clear();
    }

    /// Steps back. `current` is kept for redo; the restored snapshot is returned.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Steps forward again after an undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl<T: Clone> Default for UndoHistory<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
