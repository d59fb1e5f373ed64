//! Layers with independent frame sequences and the playback cursor.

mod frame;
mod playback;

pub use frame::Frame;
pub use playback::PlaybackClock;

use crate::{export, EngineError, LayerBuffer, PixelGrid, Result};

pub const DEFAULT_FRAME_RATE: u32 = 8;

/// One layer together with its frame list.
#[derive(Debug, Clone)]
pub struct LayerTrack {
    pub(crate) buffer: LayerBuffer,
    pub(crate) frames: Vec<Frame>,
    pub(crate) current: usize,
}

impl LayerTrack {
    pub fn new(buffer: LayerBuffer) -> Self {
        let size = buffer.size();
        Self {
            buffer,
            frames: vec![Frame::blank(size)],
            current: 0,
        }
    }

    /// Track with a given frame list; an empty list gets one blank frame and `current` is clamped.
    pub(crate) fn with_frames(mut buffer: LayerBuffer, mut frames: Vec<Frame>, current: usize) -> Self {
        if frames.is_empty() {
            frames.push(Frame::blank(buffer.size()));
        }
        let current = current.min(frames.len() - 1);
        buffer.replace_grid(frames[current].to_grid());
        Self { buffer, frames, current }
    }

    pub fn buffer(&self) -> &LayerBuffer {
        &self.buffer
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn current(&self) -> usize {
        self.current
    }

    fn commit(&mut self) {
        self.frames[self.current] = Frame::capture(self.buffer.grid().clone());
    }

    fn load_current(&mut self) {
        let grid = self.frames[self.current].to_grid();
        self.buffer.replace_grid(grid);
    }

    /// Frame shown for a global frame index; each layer cycles through its own list.
    pub fn frame_at(&self, index: usize) -> &Frame {
        &self.frames[index % self.frames.len()]
    }
}

/// Owns all layers and their frame sequences.
///
/// Each layer has its own frame list; lengths may differ. The live grid of a
/// layer shows its current frame; edits reach the frame list only through
/// [`AnimationModel::commit_current_edit`], which every navigation call performs
/// first.
#[derive(Debug, Clone)]
pub struct AnimationModel {
    grid_size: i32,
    tracks: Vec<LayerTrack>,
    active_layer: usize,
    play_cursor: usize,
    playing: bool,
    frame_rate: u32,
}

impl AnimationModel {
    /// Creates `layer_count` empty layers of `grid_size²` cells, each with one blank frame.
    pub fn new(grid_size: i32, layer_count: usize) -> Self {
        let grid_size = grid_size.max(1);
        let tracks = (0..layer_count.max(1))
            .map(|i| LayerTrack::new(LayerBuffer::new(format!("Layer {}", i + 1), grid_size)))
            .collect();
        Self {
            grid_size,
            tracks,
            active_layer: 0,
            play_cursor: 0,
            playing: false,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }

    pub(crate) fn from_tracks(grid_size: i32, tracks: Vec<LayerTrack>, active_layer: usize, frame_rate: u32) -> Result<Self> {
        if tracks.is_empty() {
            return Err(EngineError::InvalidLayerCount { count: 0 });
        }
        if let Some(track) = tracks.iter().find(|t| t.buffer.size() != grid_size) {
            return Err(EngineError::GridSizeMismatch {
                expected: grid_size,
                actual: track.buffer.size(),
            });
        }
        if active_layer >= tracks.len() {
            return Err(EngineError::LayerOutOfRange {
                layer: active_layer,
                max: tracks.len(),
            });
        }
        Ok(Self {
            grid_size,
            tracks,
            active_layer,
            play_cursor: 0,
            playing: false,
            frame_rate: frame_rate.max(1),
        })
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn layer_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[LayerTrack] {
        &self.tracks
    }

    pub fn active_layer(&self) -> usize {
        self.active_layer
    }

    /// Out of range indices are ignored.
    pub fn set_active_layer(&mut self, layer: usize) -> bool {
        if layer >= self.tracks.len() {
            return false;
        }
        self.active_layer = layer;
        true
    }

    pub fn layer(&self, layer: usize) -> Option<&LayerBuffer> {
        self.tracks.get(layer).map(|t| &t.buffer)
    }

    pub fn layer_mut(&mut self, layer: usize) -> Option<&mut LayerBuffer> {
        self.tracks.get_mut(layer).map(|t| &mut t.buffer)
    }

    pub fn active_buffer(&self) -> &LayerBuffer {
        &self.tracks[self.active_layer].buffer
    }

    pub fn active_buffer_mut(&mut self) -> &mut LayerBuffer {
        &mut self.tracks[self.active_layer].buffer
    }

    pub fn layers(&self) -> impl Iterator<Item = &LayerBuffer> {
        self.tracks.iter().map(|t| &t.buffer)
    }

    pub fn frames(&self, layer: usize) -> Option<&[Frame]> {
        self.tracks.get(layer).map(|t| t.frames.as_slice())
    }

    pub fn frame_count(&self, layer: usize) -> usize {
        self.tracks.get(layer).map_or(0, |t| t.frames.len())
    }

    pub fn current_frame(&self, layer: usize) -> Option<usize> {
        self.tracks.get(layer).map(|t| t.current)
    }

    /// Longest frame list over all layers.
    pub fn max_frame_count(&self) -> usize {
        self.tracks.iter().map(|t| t.frames.len()).max().unwrap_or(0)
    }

    /// Writes every layer's live grid into its current frame.
    pub fn commit_current_edit(&mut self) {
        for track in &mut self.tracks {
            track.commit();
        }
    }

    fn load_current_frames(&mut self) {
        for track in &mut self.tracks {
            track.load_current();
        }
    }

    /// Appends a capture of the active layer's live grid and makes it current.
    pub fn add_frame_from_current(&mut self) {
        self.commit_current_edit();
        let track = &mut self.tracks[self.active_layer];
        track.frames.push(Frame::capture(track.buffer.grid().clone()));
        track.current = track.frames.len() - 1;
        log::debug!("layer {}: appended frame {}", self.active_layer, track.current);
    }

    /// Inserts a blank frame after the current one and makes it current.
    pub fn add_blank_frame(&mut self) {
        let blank = Frame::blank(self.grid_size);
        self.insert_after_current(blank);
    }

    /// Inserts a copy of the current frame after it and makes it current.
    pub fn duplicate_current_frame(&mut self) {
        self.commit_current_edit();
        let track = &self.tracks[self.active_layer];
        let copy = track.frames[track.current].clone();
        self.insert_after_current(copy);
    }

    fn insert_after_current(&mut self, frame: Frame) {
        self.commit_current_edit();
        let track = &mut self.tracks[self.active_layer];
        let at = (track.current + 1).min(track.frames.len());
        track.frames.insert(at, frame);
        track.current = at;
        track.load_current();
        log::debug!("layer {}: inserted frame {}", self.active_layer, at);
    }

    /// Removes the active layer's current frame. A list is never left empty.
    pub fn delete_current_frame(&mut self) {
        self.commit_current_edit();
        let grid_size = self.grid_size;
        let track = &mut self.tracks[self.active_layer];
        track.frames.remove(track.current);
        if track.frames.is_empty() {
            track.frames.push(Frame::blank(grid_size));
        }
        track.current = track.current.min(track.frames.len() - 1);
        track.load_current();
        log::debug!("layer {}: deleted frame, now at {}", self.active_layer, track.current);
    }

    /// Makes frame `index` current on the active layer; every other layer shows
    /// `index % its length`. Out of range indices are ignored.
    pub fn select_frame(&mut self, index: usize) -> bool {
        if index >= self.tracks[self.active_layer].frames.len() {
            return false;
        }
        self.commit_current_edit();
        self.sync_to(index);
        true
    }

    /// Moves the active layer by `delta` frames, wrapping at both ends.
    pub fn step_frame(&mut self, delta: i64) {
        let track = &self.tracks[self.active_layer];
        let len = track.frames.len() as i64;
        let next = (track.current as i64 + delta).rem_euclid(len) as usize;
        self.commit_current_edit();
        self.sync_to(next);
    }

    fn sync_to(&mut self, index: usize) {
        for (i, track) in self.tracks.iter_mut().enumerate() {
            track.current = if i == self.active_layer { index } else { index % track.frames.len() };
            track.load_current();
        }
        log::debug!("selected frame {index}");
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play_cursor(&self) -> usize {
        self.play_cursor
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        self.frame_rate = frame_rate.clamp(1, crate::MAX_FRAME_RATE);
    }

    /// True if some layer has more than one frame.
    pub fn can_play(&self) -> bool {
        self.tracks.iter().any(|t| t.frames.len() > 1)
    }

    pub fn start_playback(&mut self) -> Result<()> {
        if self.playing {
            return Ok(());
        }
        if !self.can_play() {
            log::warn!("playback refused: no layer has more than one frame");
            return Err(EngineError::NothingToPlay);
        }
        self.commit_current_edit();
        self.playing = true;
        log::debug!("playback started at {} fps", self.frame_rate);
        Ok(())
    }

    pub fn stop_playback(&mut self) {
        if self.playing {
            self.playing = false;
            log::debug!("playback stopped at cursor {}", self.play_cursor);
        }
    }

    /// Returns the new playing state.
    pub fn toggle_playback(&mut self) -> Result<bool> {
        if self.playing {
            self.stop_playback();
        } else {
            self.start_playback()?;
        }
        Ok(self.playing)
    }

    /// Length of the longest frame list among animated layers.
    fn animated_max_len(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.buffer.properties.is_animated)
            .map(|t| t.frames.len())
            .max()
            .unwrap_or(0)
    }

    /// Advances the playback cursor by one. Animated layers jump to
    /// `cursor % their length`; other layers keep their frame. Does nothing
    /// (and returns false) when not playing or no layer is animated.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let max_len = self.animated_max_len();
        if max_len == 0 {
            return false;
        }
        self.commit_current_edit();
        self.play_cursor = (self.play_cursor + 1) % max_len;
        let cursor = self.play_cursor;
        for track in self.tracks.iter_mut().filter(|t| t.buffer.properties.is_animated && !t.frames.is_empty()) {
            track.current = cursor % track.frames.len();
            track.load_current();
        }
        true
    }

    /// Swaps the active layer with the one above it. No-op at the top.
    pub fn move_layer_up(&mut self) -> bool {
        let layer = self.active_layer;
        if layer + 1 >= self.tracks.len() {
            return false;
        }
        self.tracks.swap(layer, layer + 1);
        self.active_layer = layer + 1;
        true
    }

    /// Swaps the active layer with the one below it. No-op at the bottom.
    pub fn move_layer_down(&mut self) -> bool {
        let layer = self.active_layer;
        if layer == 0 {
            return false;
        }
        self.tracks.swap(layer, layer - 1);
        self.active_layer = layer - 1;
        true
    }

    fn visible_tracks(&self) -> impl Iterator<Item = &LayerTrack> {
        self.tracks.iter().filter(|t| t.buffer.properties.is_visible)
    }

    /// Composite of the visible live grids.
    pub fn composite_current(&self) -> PixelGrid {
        let grids: Vec<&PixelGrid> = self.visible_tracks().map(|t| t.buffer.grid()).collect();
        export::composite(self.grid_size, &grids)
    }

    /// Composite of global frame `index`; each visible layer contributes frame `index % its length`.
    pub fn composite_at(&self, index: usize) -> PixelGrid {
        let grids: Vec<&PixelGrid> = self.visible_tracks().map(|t| t.frame_at(index).grid()).collect();
        export::composite(self.grid_size, &grids)
    }
}
