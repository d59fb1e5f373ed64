use std::path::Path;

use crate::{
    filters::{self, Adjustment, DitherMode},
    LayerBuffer, PixelGrid, Position, Result,
};

use super::{EditorSession, FlipDirection};

impl EditorSession {
    /// Runs a one-shot edit on the active layer as a single undo step and commits it.
    fn edit_active<R>(&mut self, description: &str, edit: impl FnOnce(&mut LayerBuffer) -> R) -> Result<R> {
        self.ensure_idle()?;
        let buffer = self.model.active_buffer_mut();
        buffer.push_undo();
        let result = edit(buffer);
        buffer.drop_undo_if_unchanged();
        self.model.commit_current_edit();
        log::debug!("{description} on layer {}", self.model.active_layer());
        Ok(result)
    }

    /// Flood fills from `pos` with the brush color. Returns the number of cells written.
    pub fn fill_at(&mut self, pos: Position) -> Result<usize> {
        let color = Some(self.color.color());
        self.edit_active("flood fill", |buffer| buffer.flood_fill(pos, color))
    }

    pub fn flip(&mut self, direction: FlipDirection) -> Result<()> {
        self.edit_active("flip", |buffer| match direction {
            FlipDirection::Horizontal => filters::flip_horizontal(buffer.grid_mut()),
            FlipDirection::Vertical => filters::flip_vertical(buffer.grid_mut()),
        })
    }

    /// Gaussian blur of the whole layer with the configured radius.
    pub fn blur(&mut self) -> Result<()> {
        let radius = self.settings.blur_radius;
        let background = self.background;
        self.edit_active("blur", |buffer| filters::gaussian_blur(buffer.grid_mut(), radius, background))
    }

    pub fn motion_blur(&mut self, angle_degrees: f64) -> Result<()> {
        let amount = self.settings.motion_blur_amount;
        self.edit_active("motion blur", |buffer| filters::motion_blur(buffer.grid_mut(), angle_degrees, amount))
    }

    pub fn dither(&mut self, mode: DitherMode) -> Result<()> {
        let background = self.background;
        self.edit_active(mode.display_name(), |buffer| filters::dither(buffer.grid_mut(), mode, background))
    }

    pub fn adjust(&mut self, adjustment: Adjustment) -> Result<()> {
        self.edit_active("adjust colors", |buffer| buffer.adjust_all(|c| adjustment.apply(c)))
    }

    pub fn clear_layer(&mut self) -> Result<()> {
        self.edit_active("clear", LayerBuffer::clear)
    }

    /// Sets every cell of the active layer to the brush color.
    pub fn fill_layer(&mut self) -> Result<()> {
        let color = self.color.color();
        self.edit_active("fill", |buffer| buffer.fill(color))
    }

    /// Copies a region of the active layer into the stamp, starting at `origin`.
    pub fn capture_stamp(&mut self, origin: Position, cols: i32, rows: i32) {
        let grid = self.model.active_buffer().grid();
        self.stamp.capture_from(grid, origin, cols, rows);
    }

    /// Restores the active layer's last snapshot. Returns false if there was none.
    pub fn undo(&mut self) -> Result<bool> {
        self.ensure_idle()?;
        let restored = self.model.active_buffer_mut().undo();
        if restored {
            self.model.commit_current_edit();
            log::debug!("undo on layer {}", self.model.active_layer());
        }
        Ok(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.model.active_buffer().can_undo()
    }

    /// Writes a decoded image into the active layer as one undo step.
    /// The image is checked before anything changes.
    pub fn import_grid(&mut self, grid: PixelGrid) -> Result<()> {
        let size = self.model.grid_size();
        if grid.size() != size {
            return Err(crate::EngineError::GridSizeMismatch {
                expected: size,
                actual: grid.size(),
            });
        }
        self.edit_active("import", |buffer| buffer.replace_grid(grid))
    }

    pub fn import_image(&mut self, path: &Path) -> Result<()> {
        self.ensure_idle()?;
        let grid = crate::load_image_grid(path, self.model.grid_size())?;
        self.import_grid(grid)?;
        log::info!("imported {}", path.display());
        Ok(())
    }

    pub fn import_image_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_idle()?;
        let grid = crate::decode_image_grid(data, self.model.grid_size())?;
        self.import_grid(grid)
    }
}
