use std::collections::VecDeque;

use crate::{Cell, PixelGrid, Position};

/// Breadth-first 4-connected fill of the region whose cells equal the seed cell.
///
/// Unset is its own equality class, so filling an unset seed only touches the
/// connected unset area. Returns the number of cells written; 0 if the seed is
/// outside the grid or already holds `replacement`.
pub fn flood_fill(grid: &mut PixelGrid, seed: Position, replacement: Cell) -> usize {
    if !grid.is_valid(seed) {
        return 0;
    }
    let target = grid.get(seed);
    if target == replacement {
        return 0;
    }

    let size = grid.size();
    let mut visited = vec![false; (size * size) as usize];
    let mut queue = VecDeque::new();
    visited[(seed.y * size + seed.x) as usize] = true;
    queue.push_back(seed);

    let mut filled = 0;
    while let Some(pos) = queue.pop_front() {
        grid.set(pos, replacement);
        filled += 1;
        for next in pos.neighbours() {
            if !grid.is_valid(next) {
                continue;
            }
            let idx = (next.y * size + next.x) as usize;
            if visited[idx] || grid.get(next) != target {
                continue;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }
    filled
}
