//! Per-frame context handed to sprites
//!
//! Everything a sprite may read about the outside world during a tick comes
//! through here, so sprites never reach for global state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::math::Vec2;
use crate::foundation::time::GameTime;
use crate::input::KeyboardState;

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies the registry a sprite is attached to
///
/// Unique within the process. Sprites store it as a plain value; it carries no
/// ownership of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManagerId(u64);

impl ManagerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric value of the id
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sprite-manager#{}", self.0)
    }
}

/// Inputs for one update tick
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Seconds since the previous tick
    pub delta_seconds: f32,
    /// Size of the visible area in pixels
    pub viewport: Vec2,
    /// Keys held during this tick
    pub keyboard: &'a KeyboardState,
}

impl<'a> FrameContext<'a> {
    /// Create a context from its parts
    pub const fn new(delta_seconds: f32, viewport: Vec2, keyboard: &'a KeyboardState) -> Self {
        Self {
            delta_seconds,
            viewport,
            keyboard,
        }
    }

    /// Create a context for the tick just recorded on `time`
    pub fn from_time(time: &GameTime, viewport: Vec2, keyboard: &'a KeyboardState) -> Self {
        Self::new(time.delta_seconds(), viewport, keyboard)
    }
}
