//! The editor state a front end owns, and the operations it may call.
//!
//! Operations are split by concern over several files, each adding an
//! `impl EditorSession` block. [`EditorApi`] collects them into the surface a
//! presentation layer programs against.

mod api;
mod edit_operations;
mod frame_operations;
mod gesture;
mod io_operations;
mod layer_operations;

use std::{fmt, str::FromStr};

pub use api::EditorApi;
pub use gesture::{GestureKind, StrokeTool};

use crate::{AnimationModel, Color, ColorState, EngineError, EngineSettings, ExportOptions, PixelGrid, PlaybackClock, Result, StampBuffer, MAX_BRUSH_SIZE};

use gesture::Gesture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

impl FromStr for FlipDirection {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(FlipDirection::Horizontal),
            "v" | "vertical" => Ok(FlipDirection::Vertical),
            other => Err(EngineError::generic(format!("unknown flip direction '{other}' (expected h or v)"))),
        }
    }
}

impl fmt::Display for FlipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipDirection::Horizontal => write!(f, "horizontal"),
            FlipDirection::Vertical => write!(f, "vertical"),
        }
    }
}

/// A complete editing session: layers and frames, brush state and the gesture
/// in progress.
///
/// Grids only leave the session as owned copies; every change goes through a
/// method so undo snapshots and frame commits stay consistent. Finished edits
/// are committed into the current frame right away.
#[derive(Debug, Clone)]
pub struct EditorSession {
    settings: EngineSettings,
    model: AnimationModel,
    color: ColorState,
    brush_size: i32,
    stamp: StampBuffer,
    background: Color,
    cell_size: u32,
    gesture: Option<Gesture>,
    clock: PlaybackClock,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl EditorSession {
    pub fn new(settings: EngineSettings) -> Self {
        let settings = settings.normalized();
        let mut model = AnimationModel::new(settings.grid_size, settings.layer_count);
        model.set_frame_rate(settings.frame_rate);
        Self {
            model,
            color: ColorState::from_color(settings.brush_color),
            brush_size: settings.brush_size,
            stamp: StampBuffer::default(),
            background: settings.background,
            cell_size: settings.cell_size,
            gesture: None,
            clock: PlaybackClock::new(settings.frame_rate),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Read access to layers and frames.
    pub fn model(&self) -> &AnimationModel {
        &self.model
    }

    pub fn grid_size(&self) -> i32 {
        self.model.grid_size()
    }

    pub fn layer_count(&self) -> usize {
        self.model.layer_count()
    }

    /// Owned copy of a layer's live grid.
    pub fn layer_grid(&self, layer: usize) -> Option<PixelGrid> {
        self.model.layer(layer).map(|l| l.grid().clone())
    }

    /// Owned copy of the active layer's live grid.
    pub fn active_grid(&self) -> PixelGrid {
        self.model.active_buffer().grid().clone()
    }

    /// What the viewport shows: the visible live grids flattened.
    pub fn composite(&self) -> PixelGrid {
        self.model.composite_current()
    }

    pub fn color_state(&self) -> &ColorState {
        &self.color
    }

    pub fn color_state_mut(&mut self) -> &mut ColorState {
        &mut self.color
    }

    pub fn brush_color(&self) -> Color {
        self.color.color()
    }

    pub fn set_brush_color(&mut self, color: Color) {
        self.color.set_from_color(color);
    }

    pub fn brush_size(&self) -> i32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: i32) {
        self.brush_size = size.clamp(1, MAX_BRUSH_SIZE);
    }

    pub fn stamp(&self) -> &StampBuffer {
        &self.stamp
    }

    pub fn stamp_mut(&mut self) -> &mut StampBuffer {
        &mut self.stamp
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = cell_size.max(1);
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::default().with_scale(self.settings.export_scale)
    }

    pub fn set_export_scale(&mut self, scale: u32) {
        self.settings.export_scale = scale.max(1);
    }

    /// Fails if a gesture is in progress.
    fn ensure_idle(&self) -> Result<()> {
        if let Some(gesture) = &self.gesture {
            let active = gesture.kind().to_string();
            log::warn!("refused: {active} gesture in progress");
            return Err(EngineError::GestureInProgress { active });
        }
        Ok(())
    }

    /// Replaces all layers and frames, keeping the playback rate.
    fn recreate_model(&mut self, grid_size: i32, layer_count: usize) {
        let frame_rate = self.model.frame_rate();
        self.model = AnimationModel::new(grid_size, layer_count);
        self.model.set_frame_rate(frame_rate);
        self.clock.stop();
    }
}
