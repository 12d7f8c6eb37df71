//! Renderer contract consumed by sprites
//!
//! The engine never owns a render target. Sprites describe what they want
//! drawn as [`DrawCommand`]s and hand them to whatever implements
//! [`SpriteBatch`]. [`CommandRecorder`] is an in-memory implementation used by
//! headless hosts and tests.

pub mod batch;
pub mod commands;
pub mod texture;

pub use batch::{BatchSettings, BlendMode, SortMode, SpriteBatch, SpriteEffects};
pub use commands::{CommandRecorder, DrawCommand, RecordedBatch};
pub use texture::{Texture, TextureId};

/// Rendering errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A draw or end call arrived outside a `begin`/`end` pair
    #[error("Sprite batch has not been started")]
    BatchNotStarted,

    /// `begin` was called while a batch was already open
    #[error("Sprite batch is already started")]
    BatchAlreadyStarted,

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
