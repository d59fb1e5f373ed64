use crate::{EngineError, Result, MAX_GRID_SIZE, MAX_LAYER_COUNT};

use super::EditorSession;

impl EditorSession {
    pub fn active_layer(&self) -> usize {
        self.model.active_layer()
    }

    /// Out of range indices are ignored (returns false).
    pub fn set_active_layer(&mut self, layer: usize) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.model.set_active_layer(layer))
    }

    pub fn toggle_layer_visibility(&mut self, layer: usize) -> bool {
        let Some(buffer) = self.model.layer_mut(layer) else {
            return false;
        };
        buffer.properties.is_visible = !buffer.properties.is_visible;
        true
    }

    pub fn toggle_layer_animated(&mut self, layer: usize) -> bool {
        let Some(buffer) = self.model.layer_mut(layer) else {
            return false;
        };
        buffer.properties.is_animated = !buffer.properties.is_animated;
        true
    }

    pub fn rename_layer(&mut self, layer: usize, title: impl Into<String>) -> bool {
        let Some(buffer) = self.model.layer_mut(layer) else {
            return false;
        };
        buffer.properties.title = title.into();
        true
    }

    /// Swaps the active layer with the one above. No-op at the top.
    pub fn move_layer_up(&mut self) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.model.move_layer_up())
    }

    /// Swaps the active layer with the one below. No-op at the bottom.
    pub fn move_layer_down(&mut self) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.model.move_layer_down())
    }

    /// Recreates every layer with the new count; all content is discarded.
    pub fn set_layer_count(&mut self, count: usize) -> Result<()> {
        self.ensure_idle()?;
        if !(1..=MAX_LAYER_COUNT).contains(&count) {
            return Err(EngineError::InvalidLayerCount { count });
        }
        self.recreate_model(self.model.grid_size(), count);
        log::info!("layer count set to {count}");
        Ok(())
    }

    /// Replaces the canvas with an empty `size × size` one. Invalid sizes leave everything untouched.
    pub fn new_canvas(&mut self, size: i64) -> Result<()> {
        self.ensure_idle()?;
        if size < 1 || size > i64::from(MAX_GRID_SIZE) {
            return Err(EngineError::InvalidCanvasSize { size });
        }
        self.recreate_model(size as i32, self.model.layer_count());
        log::info!("new canvas {size}x{size}");
        Ok(())
    }

    /// [`Self::new_canvas`] for user typed input.
    pub fn new_canvas_from_str(&mut self, size: &str) -> Result<()> {
        let size: i64 = size.trim().parse().map_err(|_| EngineError::CanvasSizeNotNumeric { value: size.to_string() })?;
        self.new_canvas(size)
    }
}
