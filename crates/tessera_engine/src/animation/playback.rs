use std::time::{Duration, Instant};

/// Turns wall clock time into playback ticks.
///
/// The owner polls it from its event loop. A poll reports at most one due tick,
/// and the next tick is scheduled relative to the poll that fired, so a slow tick
/// delays the following one instead of causing a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl PlaybackClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            interval: Self::interval_for(frame_rate),
            last_tick: None,
        }
    }

    /// `1000 / frame_rate` milliseconds.
    pub fn interval_for(frame_rate: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(frame_rate.max(1)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        self.interval = Self::interval_for(frame_rate);
    }

    /// Restarts the schedule at `now`; the first tick becomes due one interval later.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    pub fn stop(&mut self) {
        self.last_tick = None;
    }

    /// Returns true if a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Time left until the next tick is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => self.interval,
        }
    }
}
