use std::sync::Arc;

use crate::PixelGrid;

/// An immutable snapshot of one layer's grid.
///
/// Cloning a frame shares the pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    grid: Arc<PixelGrid>,
}

impl Frame {
    pub fn blank(size: i32) -> Self {
        Self::capture(PixelGrid::new(size))
    }

    pub fn capture(grid: PixelGrid) -> Self {
        Self { grid: Arc::new(grid) }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Owned copy of the pixel data.
    pub fn to_grid(&self) -> PixelGrid {
        (*self.grid).clone()
    }

    pub fn is_blank(&self) -> bool {
        self.grid.is_empty()
    }
}
