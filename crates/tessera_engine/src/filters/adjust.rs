use crate::Color;

/// Per-color adjustments applied with `LayerBuffer::adjust_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Invert,
    /// Adds the offset to every channel, clamped.
    Brightness(i32),
    /// Rec. 601 luma.
    Grayscale,
}

impl Adjustment {
    pub fn apply(self, c: Color) -> Color {
        match self {
            Adjustment::Invert => Color::with_alpha(255 - c.r, 255 - c.g, 255 - c.b, c.a),
            Adjustment::Brightness(offset) => {
                let ch = |v: u8| (v as i32 + offset).clamp(0, 255) as u8;
                Color::with_alpha(ch(c.r), ch(c.g), ch(c.b), c.a)
            }
            Adjustment::Grayscale => {
                let y = (0.299 * c.r as f32 + 0.587 * c.g as f32 + 0.114 * c.b as f32).round() as u8;
                Color::with_alpha(y, y, y, c.a)
            }
        }
    }
}
