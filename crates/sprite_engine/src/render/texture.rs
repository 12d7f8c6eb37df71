//! Texture handles
//!
//! Loading and uploading textures belongs to the host. Sprites only need to
//! know which texture to reference and how large it is.

use std::fmt;

/// Opaque identifier of a texture owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

/// A texture reference with its pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture {
    /// Backend identifier
    pub id: TextureId,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Texture {
    /// Create a texture reference
    pub const fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Width as a signed pixel coordinate
    pub const fn width_i32(&self) -> i32 {
        self.width as i32
    }

    /// Height as a signed pixel coordinate
    pub const fn height_i32(&self) -> i32 {
        self.height as i32
    }
}
