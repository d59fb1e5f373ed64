//! Bounded undo stack for a single layer

use std::collections::VecDeque;

use crate::PixelGrid;

/// Maximum number of snapshots kept per layer.
pub const UNDO_CAPACITY: usize = 30;

/// Full-grid snapshots, most recent last.
///
/// Pushing beyond the capacity evicts the oldest snapshot; pushes are never refused.
#[derive(Debug, Clone)]
pub struct GridUndoStack {
    snapshots: VecDeque<PixelGrid>,
    capacity: usize,
    /// Snapshot pushed out by the latest push, kept until the next change.
    evicted: Option<PixelGrid>,
}

impl Default for GridUndoStack {
    fn default() -> Self {
        Self::with_capacity(UNDO_CAPACITY)
    }
}

impl GridUndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
            evicted: None,
        }
    }

    pub fn push(&mut self, snapshot: PixelGrid) {
        self.evicted = if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front()
        } else {
            None
        };
        self.snapshots.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<PixelGrid> {
        self.evicted = None;
        self.snapshots.pop_back()
    }

    /// Drops the most recent snapshot without returning it (used when a gesture changed nothing).
    /// A snapshot evicted by that push comes back.
    pub fn discard_last(&mut self) {
        if self.snapshots.pop_back().is_some() {
            if let Some(evicted) = self.evicted.take() {
                self.snapshots.push_front(evicted);
            }
        }
    }

    pub fn last(&self) -> Option<&PixelGrid> {
        self.snapshots.back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.evicted = None;
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::GridUndoStack;
    use crate::{Color, PixelGrid};

    fn marked(i: u8) -> PixelGrid {
        let mut g = PixelGrid::new(1);
        g.set((0, 0), Some(Color::new(i, 0, 0)));
        g
    }

    #[test]
    fn test_evicts_oldest() {
        let mut stack = GridUndoStack::with_capacity(3);
        for i in 0..5 {
            stack.push(marked(i));
        }
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(marked(4)));
        assert_eq!(stack.pop(), Some(marked(3)));
        assert_eq!(stack.pop(), Some(marked(2)));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_discard_last_restores_evicted() {
        let mut stack = GridUndoStack::with_capacity(3);
        for i in 0..3 {
            stack.push(marked(i));
        }

        stack.push(marked(9));
        stack.discard_last();

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(marked(2)));
        assert_eq!(stack.pop(), Some(marked(1)));
        assert_eq!(stack.pop(), Some(marked(0)));
    }

    #[test]
    fn test_discard_last_after_pop_does_not_resurrect() {
        let mut stack = GridUndoStack::with_capacity(2);
        for i in 0..3 {
            stack.push(marked(i));
        }
        stack.pop();

        stack.discard_last();

        assert_eq!(stack.len(), 0);
    }
}
