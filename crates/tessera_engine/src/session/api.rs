use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use crate::{
    filters::{Adjustment, DitherMode},
    ColorState, PixelGrid, Position, Result, StampBuffer,
};

use super::{EditorSession, FlipDirection, GestureKind, StrokeTool};

/// Everything a presentation layer may do with an editor.
///
/// Grids are handed out as owned copies; there is no way to reach a live grid
/// through this trait.
pub trait EditorApi {
    // canvas
    fn grid_size(&self) -> i32;
    fn layer_count(&self) -> usize;
    fn new_canvas(&mut self, size: i64) -> Result<()>;
    fn new_canvas_from_str(&mut self, size: &str) -> Result<()>;
    fn set_layer_count(&mut self, count: usize) -> Result<()>;
    fn layer_grid(&self, layer: usize) -> Option<PixelGrid>;
    fn composite(&self) -> PixelGrid;

    // brush
    fn color_state(&self) -> &ColorState;
    fn color_state_mut(&mut self) -> &mut ColorState;
    fn brush_size(&self) -> i32;
    fn set_brush_size(&mut self, size: i32);
    fn stamp(&self) -> &StampBuffer;
    fn stamp_mut(&mut self) -> &mut StampBuffer;
    fn capture_stamp(&mut self, origin: Position, cols: i32, rows: i32);

    // gestures
    fn active_gesture(&self) -> Option<GestureKind>;
    fn begin_stroke(&mut self, tool: StrokeTool, pos: Position) -> Result<()>;
    fn continue_stroke(&mut self, pos: Position) -> Result<()>;
    fn begin_move(&mut self, anchor: Position) -> Result<()>;
    fn update_move(&mut self, pos: Position) -> Result<()>;
    fn begin_rotate(&mut self, start: Position) -> Result<()>;
    fn update_rotate(&mut self, pos: Position) -> Result<f64>;
    fn end_gesture(&mut self) -> Result<()>;
    fn cancel_gesture(&mut self) -> Result<()>;

    // one-shot edits
    fn fill_at(&mut self, pos: Position) -> Result<usize>;
    fn flip(&mut self, direction: FlipDirection) -> Result<()>;
    fn blur(&mut self) -> Result<()>;
    fn motion_blur(&mut self, angle_degrees: f64) -> Result<()>;
    fn dither(&mut self, mode: DitherMode) -> Result<()>;
    fn adjust(&mut self, adjustment: Adjustment) -> Result<()>;
    fn clear_layer(&mut self) -> Result<()>;
    fn fill_layer(&mut self) -> Result<()>;
    fn undo(&mut self) -> Result<bool>;
    fn import_image(&mut self, path: &Path) -> Result<()>;

    // frames and playback
    fn add_frame(&mut self) -> Result<()>;
    fn add_blank_frame(&mut self) -> Result<()>;
    fn duplicate_frame(&mut self) -> Result<()>;
    fn delete_frame(&mut self) -> Result<()>;
    fn select_frame(&mut self, index: usize) -> Result<bool>;
    fn step_frame(&mut self, delta: i64) -> Result<()>;
    fn set_frame_rate(&mut self, frame_rate: u32);
    fn start_playback(&mut self, now: Instant) -> Result<()>;
    fn stop_playback(&mut self);
    fn toggle_playback(&mut self, now: Instant) -> Result<bool>;
    fn poll_playback(&mut self, now: Instant) -> bool;

    // layers
    fn set_active_layer(&mut self, layer: usize) -> Result<bool>;
    fn toggle_layer_visibility(&mut self, layer: usize) -> bool;
    fn toggle_layer_animated(&mut self, layer: usize) -> bool;
    fn rename_layer(&mut self, layer: usize, title: &str) -> bool;
    fn move_layer_up(&mut self) -> Result<bool>;
    fn move_layer_down(&mut self) -> Result<bool>;

    // files
    fn export_png(&mut self, path: &Path) -> Result<()>;
    fn export_sequence(&mut self, dir: &Path) -> Result<Vec<PathBuf>>;
    fn export_gif(&mut self, path: &Path) -> Result<usize>;
    fn save_project(&mut self, path: &Path) -> Result<()>;
    fn load_project(&mut self, path: &Path) -> Result<()>;
}

impl EditorApi for EditorSession {
    fn grid_size(&self) -> i32 {
        EditorSession::grid_size(self)
    }

    fn layer_count(&self) -> usize {
        EditorSession::layer_count(self)
    }

    fn new_canvas(&mut self, size: i64) -> Result<()> {
        EditorSession::new_canvas(self, size)
    }

    fn new_canvas_from_str(&mut self, size: &str) -> Result<()> {
        EditorSession::new_canvas_from_str(self, size)
    }

    fn set_layer_count(&mut self, count: usize) -> Result<()> {
        EditorSession::set_layer_count(self, count)
    }

    fn layer_grid(&self, layer: usize) -> Option<PixelGrid> {
        EditorSession::layer_grid(self, layer)
    }

    fn composite(&self) -> PixelGrid {
        EditorSession::composite(self)
    }

    fn color_state(&self) -> &ColorState {
        EditorSession::color_state(self)
    }

    fn color_state_mut(&mut self) -> &mut ColorState {
        EditorSession::color_state_mut(self)
    }

    fn brush_size(&self) -> i32 {
        EditorSession::brush_size(self)
    }

    fn set_brush_size(&mut self, size: i32) {
        EditorSession::set_brush_size(self, size);
    }

    fn stamp(&self) -> &StampBuffer {
        EditorSession::stamp(self)
    }

    fn stamp_mut(&mut self) -> &mut StampBuffer {
        EditorSession::stamp_mut(self)
    }

    fn capture_stamp(&mut self, origin: Position, cols: i32, rows: i32) {
        EditorSession::capture_stamp(self, origin, cols, rows);
    }

    fn active_gesture(&self) -> Option<GestureKind> {
        EditorSession::active_gesture(self)
    }

    fn begin_stroke(&mut self, tool: StrokeTool, pos: Position) -> Result<()> {
        EditorSession::begin_stroke(self, tool, pos)
    }

    fn continue_stroke(&mut self, pos: Position) -> Result<()> {
        EditorSession::continue_stroke(self, pos)
    }

    fn begin_move(&mut self, anchor: Position) -> Result<()> {
        EditorSession::begin_move(self, anchor)
    }

    fn update_move(&mut self, pos: Position) -> Result<()> {
        EditorSession::update_move(self, pos)
    }

    fn begin_rotate(&mut self, start: Position) -> Result<()> {
        EditorSession::begin_rotate(self, start)
    }

    fn update_rotate(&mut self, pos: Position) -> Result<f64> {
        EditorSession::update_rotate(self, pos)
    }

    fn end_gesture(&mut self) -> Result<()> {
        EditorSession::end_gesture(self)
    }

    fn cancel_gesture(&mut self) -> Result<()> {
        EditorSession::cancel_gesture(self)
    }

    fn fill_at(&mut self, pos: Position) -> Result<usize> {
        EditorSession::fill_at(self, pos)
    }

    fn flip(&mut self, direction: FlipDirection) -> Result<()> {
        EditorSession::flip(self, direction)
    }

    fn blur(&mut self) -> Result<()> {
        EditorSession::blur(self)
    }

    fn motion_blur(&mut self, angle_degrees: f64) -> Result<()> {
        EditorSession::motion_blur(self, angle_degrees)
    }

    fn dither(&mut self, mode: DitherMode) -> Result<()> {
        EditorSession::dither(self, mode)
    }

    fn adjust(&mut self, adjustment: Adjustment) -> Result<()> {
        EditorSession::adjust(self, adjustment)
    }

    fn clear_layer(&mut self) -> Result<()> {
        EditorSession::clear_layer(self)
    }

    fn fill_layer(&mut self) -> Result<()> {
        EditorSession::fill_layer(self)
    }

    fn undo(&mut self) -> Result<bool> {
        EditorSession::undo(self)
    }

    fn import_image(&mut self, path: &Path) -> Result<()> {
        EditorSession::import_image(self, path)
    }

    fn add_frame(&mut self) -> Result<()> {
        EditorSession::add_frame(self)
    }

    fn add_blank_frame(&mut self) -> Result<()> {
        EditorSession::add_blank_frame(self)
    }

    fn duplicate_frame(&mut self) -> Result<()> {
        EditorSession::duplicate_frame(self)
    }

    fn delete_frame(&mut self) -> Result<()> {
        EditorSession::delete_frame(self)
    }

    fn select_frame(&mut self, index: usize) -> Result<bool> {
        EditorSession::select_frame(self, index)
    }

    fn step_frame(&mut self, delta: i64) -> Result<()> {
        EditorSession::step_frame(self, delta)
    }

    fn set_frame_rate(&mut self, frame_rate: u32) {
        EditorSession::set_frame_rate(self, frame_rate);
    }

    fn start_playback(&mut self, now: Instant) -> Result<()> {
        EditorSession::start_playback(self, now)
    }

    fn stop_playback(&mut self) {
        EditorSession::stop_playback(self);
    }

    fn toggle_playback(&mut self, now: Instant) -> Result<bool> {
        EditorSession::toggle_playback(self, now)
    }

    fn poll_playback(&mut self, now: Instant) -> bool {
        EditorSession::poll_playback(self, now)
    }

    fn set_active_layer(&mut self, layer: usize) -> Result<bool> {
        EditorSession::set_active_layer(self, layer)
    }

    fn toggle_layer_visibility(&mut self, layer: usize) -> bool {
        EditorSession::toggle_layer_visibility(self, layer)
    }

    fn toggle_layer_animated(&mut self, layer: usize) -> bool {
        EditorSession::toggle_layer_animated(self, layer)
    }

    fn rename_layer(&mut self, layer: usize, title: &str) -> bool {
        EditorSession::rename_layer(self, layer, title)
    }

    fn move_layer_up(&mut self) -> Result<bool> {
        EditorSession::move_layer_up(self)
    }

    fn move_layer_down(&mut self) -> Result<bool> {
        EditorSession::move_layer_down(self)
    }

    fn export_png(&mut self, path: &Path) -> Result<()> {
        EditorSession::export_png(self, path)
    }

    fn export_sequence(&mut self, dir: &Path) -> Result<Vec<PathBuf>> {
        EditorSession::export_sequence(self, dir)
    }

    fn export_gif(&mut self, path: &Path) -> Result<usize> {
        EditorSession::export_gif(self, path)
    }

    fn save_project(&mut self, path: &Path) -> Result<()> {
        EditorSession::save_project(self, path)
    }

    fn load_project(&mut self, path: &Path) -> Result<()> {
        EditorSession::load_project(self, path)
    }
}
