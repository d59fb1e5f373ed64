use crate::{filters, Cell, Color, Position, StampBuffer};

use super::LayerBuffer;

/// Brush parameters for drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawContext {
    /// Side length of the square brush in cells.
    pub brush_size: i32,
    /// `None` erases.
    pub color: Cell,
}

impl Default for DrawContext {
    fn default() -> Self {
        Self {
            brush_size: 1,
            color: Some(Color::BLACK),
        }
    }
}

impl DrawContext {
    pub fn new(brush_size: i32, color: Cell) -> Self {
        Self {
            brush_size: brush_size.max(1),
            color,
        }
    }

    pub fn with_brush_size(mut self, brush_size: i32) -> Self {
        self.brush_size = brush_size.max(1);
        self
    }

    pub fn with_color(mut self, color: Cell) -> Self {
        self.color = color;
        self
    }

    /// Top left cell of the brush footprint. Even sizes lean to the upper left.
    pub fn brush_origin(&self, center: Position) -> Position {
        let half = self.brush_size.max(1) / 2;
        Position::new(center.x - half, center.y - half)
    }

    /// Block size each stamp cell is replicated to.
    pub fn stamp_scale(&self, stamp: &StampBuffer) -> i32 {
        let extent = stamp.cols().max(stamp.rows()).max(1);
        let scale = (self.brush_size as f32 / extent as f32).round() as i32;
        scale.max(1)
    }
}

impl LayerBuffer {
    /// Sets every cell of the square brush footprint around `center` (clipped to the grid).
    pub fn apply_brush(&mut self, ctx: &DrawContext, center: Position) {
        let origin = ctx.brush_origin(center);
        let size = ctx.brush_size.max(1);
        let grid = self.grid_mut();
        for y in origin.y..origin.y + size {
            for x in origin.x..origin.x + size {
                grid.set(Position::new(x, y), ctx.color);
            }
        }
    }

    /// Stamps the pattern centered on `center`, scaled to the brush size.
    /// Unset stamp cells leave the layer untouched.
    pub fn apply_stamp(&mut self, ctx: &DrawContext, stamp: &StampBuffer, center: Position) {
        let scale = ctx.stamp_scale(stamp);
        let width = stamp.cols() * scale;
        let height = stamp.rows() * scale;
        let origin = Position::new(center.x - width / 2, center.y - height / 2);

        let grid = self.grid_mut();
        for sy in 0..stamp.rows() {
            for sx in 0..stamp.cols() {
                let Some(color) = stamp.get((sx, sy)) else {
                    continue;
                };
                let block = origin + Position::new(sx * scale, sy * scale);
                for dy in 0..scale {
                    for dx in 0..scale {
                        grid.set(block + Position::new(dx, dy), Some(color));
                    }
                }
            }
        }
    }

    /// 4-connected region fill starting at `seed`. See [`filters::flood_fill`].
    pub fn flood_fill(&mut self, seed: Position, replacement: Cell) -> usize {
        filters::flood_fill(self.grid_mut(), seed, replacement)
    }
}
