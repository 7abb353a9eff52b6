//! Frame Clock
//!
//! Turns the monotonic timestamps a frame driver supplies into per-frame
//! deltas. The engine never reads the wall clock itself.

use std::time::{Duration, Instant};

/// Computes the time between successive frames
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now` and return the time since the previous one
    ///
    /// The first frame yields zero. A timestamp earlier than the previous
    /// one also yields zero.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        dt
    }
}
