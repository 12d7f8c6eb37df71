//! Sprite entities and the sprite registry
//!
//! - [`Sprite`]: shared transform, visual and lifecycle state
//! - [`SpriteObject`]: the interface the registry drives every frame
//! - [`AnimatedSprite`]: frame-strip animation on top of a sprite
//! - [`SpriteManager`]: named registry with deferred destruction and
//!   two-pass drawing

pub mod animated;
pub mod context;
pub mod entity;
pub mod error;
pub mod manager;

pub use animated::{AnimatedSprite, AnimationState, FrameAnimation};
pub use context::{FrameContext, ManagerId};
pub use entity::{Sprite, SpriteObject, DEFAULT_DEPTH, DEFAULT_TAG};
pub use error::{SpriteError, SpriteResult};
pub use manager::SpriteManager;
