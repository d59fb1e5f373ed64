use crate::{Cell, Color, Position};

/// A square `size × size` array of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    size: i32,
    cells: Vec<Cell>,
}

impl PixelGrid {
    /// Creates an all-unset grid. Sizes below 1 are raised to 1.
    pub fn new(size: i32) -> Self {
        let size = size.max(1);
        Self {
            size,
            cells: vec![None; (size * size) as usize],
        }
    }

    /// Builds a grid from row-major cells. Returns `None` if the cell count is not `size²`.
    pub fn from_cells(size: i32, cells: Vec<Cell>) -> Option<Self> {
        if size < 1 || cells.len() != (size as usize) * (size as usize) {
            return None;
        }
        Some(Self { size, cells })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size && pos.y < self.size
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y * self.size + pos.x) as usize
    }

    /// Out of bounds reads are unset.
    pub fn get(&self, pos: impl Into<Position>) -> Cell {
        let pos = pos.into();
        if self.is_valid(pos) {
            self.cells[self.index(pos)]
        } else {
            None
        }
    }

    /// Out of bounds writes are ignored.
    pub fn set(&mut self, pos: impl Into<Position>, cell: Cell) {
        let pos = pos.into();
        if self.is_valid(pos) {
            let idx = self.index(pos);
            self.cells[idx] = cell;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn clear(&mut self) {
        self.fill(None);
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.iter_mut().for_each(|c| *c = cell);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Number of set cells.
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Renders to RGBA8, every cell as a `scale × scale` block; unset cells become fully transparent.
    pub fn to_rgba(&self, scale: u32) -> Vec<u8> {
        let scale = scale.max(1) as usize;
        let size = self.size as usize;
        let width = size * scale;
        let mut data = vec![0u8; width * width * 4];
        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(color) = cell else {
                continue;
            };
            let rgba = color.to_rgba();
            let (cx, cy) = (idx % size, idx / size);
            for py in cy * scale..(cy + 1) * scale {
                let row = py * width;
                for px in cx * scale..(cx + 1) * scale {
                    let o = (row + px) * 4;
                    data[o..o + 4].copy_from_slice(&rgba);
                }
            }
        }
        data
    }

    /// Same as `get` but substitutes `background` for unset cells.
    pub fn get_or(&self, pos: Position, background: Color) -> Color {
        self.get(pos).unwrap_or(background)
    }
}
