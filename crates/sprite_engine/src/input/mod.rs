//! Keyboard state handed to sprites each frame
//!
//! The engine never polls devices. The host records key transitions here and
//! passes the state to the registry through a `FrameContext`.

use std::collections::HashSet;

/// Keyboard state snapshot
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a state with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    /// Mark a key as released
    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Record a key transition
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Whether the key is currently held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether the key is currently not held
    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.is_key_down(key)
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}
