use std::time::Instant;

use crate::Result;

use super::EditorSession;

impl EditorSession {
    /// Appends a capture of the active layer and moves to it.
    pub fn add_frame(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.model.add_frame_from_current();
        Ok(())
    }

    pub fn add_blank_frame(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.model.add_blank_frame();
        Ok(())
    }

    pub fn duplicate_frame(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.model.duplicate_current_frame();
        Ok(())
    }

    pub fn delete_frame(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.model.delete_current_frame();
        Ok(())
    }

    /// Out of range indices are ignored (returns false).
    pub fn select_frame(&mut self, index: usize) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.model.select_frame(index))
    }

    pub fn step_frame(&mut self, delta: i64) -> Result<()> {
        self.ensure_idle()?;
        self.model.step_frame(delta);
        Ok(())
    }

    pub fn current_frame(&self) -> usize {
        self.model.current_frame(self.model.active_layer()).unwrap_or(0)
    }

    pub fn frame_count(&self) -> usize {
        self.model.frame_count(self.model.active_layer())
    }

    pub fn frame_rate(&self) -> u32 {
        self.model.frame_rate()
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        self.model.set_frame_rate(frame_rate);
        self.clock.set_frame_rate(self.model.frame_rate());
    }

    pub fn is_playing(&self) -> bool {
        self.model.is_playing()
    }

    /// Starts playback; the first tick is due one interval after `now`.
    pub fn start_playback(&mut self, now: Instant) -> Result<()> {
        self.ensure_idle()?;
        if self.model.is_playing() {
            return Ok(());
        }
        self.model.start_playback()?;
        self.clock.reset(now);
        Ok(())
    }

    pub fn stop_playback(&mut self) {
        self.model.stop_playback();
        self.clock.stop();
    }

    pub fn toggle_playback(&mut self, now: Instant) -> Result<bool> {
        if self.model.is_playing() {
            self.stop_playback();
        } else {
            self.start_playback(now)?;
        }
        Ok(self.model.is_playing())
    }

    /// Called periodically by the owner's event loop. Advances playback by at
    /// most one frame and returns true if it did.
    pub fn poll_playback(&mut self, now: Instant) -> bool {
        if !self.model.is_playing() || self.gesture.is_some() {
            return false;
        }
        self.clock.poll(now) && self.model.tick()
    }
}
