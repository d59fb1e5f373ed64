use crate::{Cell, PixelGrid, Position};

pub const STAMP_SIZE: i32 = 16;

/// Pattern source for the stamp tool.
///
/// Storage is a fixed 16×16 grid; `cols × rows` is the part in use. It is
/// independent of the canvas size and the layer count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampBuffer {
    cols: i32,
    rows: i32,
    cells: [[Cell; STAMP_SIZE as usize]; STAMP_SIZE as usize],
}

impl Default for StampBuffer {
    fn default() -> Self {
        Self::new(STAMP_SIZE, STAMP_SIZE)
    }
}

impl StampBuffer {
    /// Empty stamp using a `cols × rows` extent, each clamped to `1..=16`.
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols: cols.clamp(1, STAMP_SIZE),
            rows: rows.clamp(1, STAMP_SIZE),
            cells: [[None; STAMP_SIZE as usize]; STAMP_SIZE as usize],
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn set_extent(&mut self, cols: i32, rows: i32) {
        self.cols = cols.clamp(1, STAMP_SIZE);
        self.rows = rows.clamp(1, STAMP_SIZE);
    }

    fn in_extent(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.cols && pos.y < self.rows
    }

    pub fn get(&self, pos: impl Into<Position>) -> Cell {
        let pos = pos.into();
        if self.in_extent(pos) {
            self.cells[pos.y as usize][pos.x as usize]
        } else {
            None
        }
    }

    /// Writes inside the active extent only.
    pub fn set(&mut self, pos: impl Into<Position>, cell: Cell) {
        let pos = pos.into();
        if self.in_extent(pos) {
            self.cells[pos.y as usize][pos.x as usize] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[None; STAMP_SIZE as usize]; STAMP_SIZE as usize];
    }

    /// Replaces the stamp with the `cols × rows` region of `grid` starting at `origin`.
    /// Cells outside the grid are captured as unset.
    pub fn capture_from(&mut self, grid: &PixelGrid, origin: Position, cols: i32, rows: i32) {
        self.clear();
        self.set_extent(cols, rows);
        for y in 0..self.rows {
            for x in 0..self.cols {
                let p = Position::new(x, y);
                self.set(p, grid.get(origin + p));
            }
        }
    }
}
