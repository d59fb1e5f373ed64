//! A single layer: its live editing grid, properties and undo history.

mod tools;
mod undo_stack;

pub use tools::DrawContext;
pub use undo_stack::{GridUndoStack, UNDO_CAPACITY};

use crate::{Cell, Color, PixelGrid, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerProperties {
    pub title: String,
    pub is_visible: bool,
    /// Animated layers follow the playback cursor, others stay on their frame.
    pub is_animated: bool,
}

impl LayerProperties {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_visible: true,
            is_animated: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerBuffer {
    pub properties: LayerProperties,
    grid: PixelGrid,
    undo_stack: GridUndoStack,
}

impl LayerBuffer {
    pub fn new(title: impl Into<String>, size: i32) -> Self {
        Self {
            properties: LayerProperties::new(title),
            grid: PixelGrid::new(size),
            undo_stack: GridUndoStack::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.properties.title
    }

    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut PixelGrid {
        &mut self.grid
    }

    pub fn cell(&self, pos: impl Into<Position>) -> Cell {
        self.grid.get(pos)
    }

    pub fn set_cell(&mut self, pos: impl Into<Position>, cell: Cell) {
        self.grid.set(pos, cell);
    }

    /// Swaps in a new live grid (e.g. the content of a frame). Undo history is kept.
    pub fn replace_grid(&mut self, grid: PixelGrid) {
        debug_assert_eq!(grid.size(), self.grid.size());
        self.grid = grid;
    }

    /// Records the current grid. Called once at the start of a gesture.
    pub fn push_undo(&mut self) {
        self.undo_stack.push(self.grid.clone());
    }

    /// Restores the most recent snapshot. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        if let Some(grid) = self.undo_stack.pop() {
            self.grid = grid;
            true
        } else {
            false
        }
    }

    /// Forgets the snapshot of a gesture that left the grid untouched.
    pub(crate) fn drop_undo_if_unchanged(&mut self) {
        if self.undo_stack.last() == Some(&self.grid) {
            self.undo_stack.discard_last();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear_undo(&mut self) {
        self.undo_stack.clear();
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn fill(&mut self, color: Color) {
        self.grid.fill(Some(color));
    }

    /// Maps every set cell through `f`; unset cells stay unset.
    pub fn adjust_all(&mut self, f: impl Fn(Color) -> Color) {
        for cell in self.grid.cells_mut().iter_mut() {
            if let Some(color) = cell {
                *color = f(*color);
            }
        }
    }
}
