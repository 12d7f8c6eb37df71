//! Sprite batch trait and batch state
//!
//! Mirrors the begin/draw/end protocol of a classic 2D sprite batcher.

use bitflags::bitflags;

use super::{DrawCommand, RenderResult};
use crate::foundation::math::Mat4;

/// Backend that accepts sprite draw commands
///
/// Every `draw` must happen between a `begin` and the matching `end`.
pub trait SpriteBatch {
    /// Open a batch with the given state
    fn begin(&mut self, settings: &BatchSettings) -> RenderResult<()>;

    /// Submit one sprite
    fn draw(&mut self, command: DrawCommand) -> RenderResult<()>;

    /// Close the current batch and flush it
    fn end(&mut self) -> RenderResult<()>;
}

/// Order in which a batch flushes its sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Buffer and draw in submission order at `end`
    #[default]
    Deferred,
    /// Draw each sprite as soon as it is submitted
    Immediate,
    /// Buffer and sort by depth, far to near
    BackToFront,
    /// Buffer and sort by depth, near to far
    FrontToBack,
}

/// Blend mode for sprite rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blending (fully opaque)
    Opaque,

    /// Standard alpha blending
    #[default]
    AlphaBlend,

    /// Additive blending (for glowing effects)
    Additive,
}

bitflags! {
    /// Mirroring applied to a sprite when drawn
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpriteEffects: u8 {
        /// Mirror around the vertical axis
        const FLIP_HORIZONTALLY = 0b01;
        /// Mirror around the horizontal axis
        const FLIP_VERTICALLY = 0b10;
    }
}

/// State applied to a whole batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSettings {
    /// Flush order
    pub sort_mode: SortMode,
    /// Blend state
    pub blend_mode: BlendMode,
    /// Transform applied to every sprite in the batch (camera)
    pub transform: Mat4,
}

impl BatchSettings {
    /// Settings with the given transform, immediate sorting and alpha blending
    pub fn with_transform(transform: Mat4) -> Self {
        Self {
            sort_mode: SortMode::Immediate,
            blend_mode: BlendMode::AlphaBlend,
            transform,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self::with_transform(Mat4::identity())
    }
}
