//! Time management utilities

use std::time::Duration;

/// Frame clock owned by the host loop
///
/// The host advances it once per tick and hands `delta_seconds()` to the
/// sprite registry. Durations cannot be negative, so elapsed time is always
/// monotonically non-decreasing.
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    elapsed: Duration,
    total: Duration,
    frame_count: u64,
}

impl GameTime {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick of `delta` length
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = delta;
        self.total += delta;
        self.frame_count += 1;
    }

    /// Length of the last tick
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Length of the last tick in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Total time since the clock was created
    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Number of ticks recorded so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average ticks per second since creation
    pub fn average_fps(&self) -> f32 {
        let total = self.total.as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}
