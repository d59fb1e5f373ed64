use crate::{PixelGrid, Position};

/// Mirrors the grid left to right in place.
pub fn flip_horizontal(grid: &mut PixelGrid) {
    let size = grid.size();
    let max = size / 2;
    for y in 0..size {
        for x in 0..max {
            let pos1 = Position::new(x, y);
            let pos2 = Position::new(size - x - 1, y);
            let c1 = grid.get(pos1);
            let c2 = grid.get(pos2);
            grid.set(pos1, c2);
            grid.set(pos2, c1);
        }
    }
}

/// Mirrors the grid top to bottom in place.
pub fn flip_vertical(grid: &mut PixelGrid) {
    let size = grid.size();
    let max = size / 2;
    for x in 0..size {
        for y in 0..max {
            let pos1 = Position::new(x, y);
            let pos2 = Position::new(x, size - 1 - y);
            let c1 = grid.get(pos1);
            let c2 = grid.get(pos2);
            grid.set(pos1, c2);
            grid.set(pos2, c1);
        }
    }
}
