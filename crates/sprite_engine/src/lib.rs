//! # Sprite Engine
//!
//! A small 2D sprite framework: named sprite registry, frame-strip animation
//! and a begin/draw/end sprite batch abstraction.
//!
//! ## Features
//!
//! - **Named registry**: unique names, tag queries, typed lookups
//! - **Frame protocol**: one update per sprite per tick, deferred destruction
//! - **Layered drawing**: regular sprites first, late sprites on top, camera
//!   applied as a batch transform
//! - **Backend agnostic**: drawing goes through the [`render::SpriteBatch`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use sprite_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut manager = SpriteManager::new();
//!     let strip = Texture::new(TextureId(1), 64, 16);
//!     manager.create_sprite(AnimatedSprite::new("coin", strip, 4, 8.0)?)?;
//!
//!     let keyboard = KeyboardState::new();
//!     let frame = FrameContext::new(1.0 / 60.0, Vec2::new(640.0, 480.0), &keyboard);
//!     manager.update(&frame);
//!
//!     let mut recorder = CommandRecorder::new();
//!     manager.draw(&mut recorder)?;
//!     assert_eq!(recorder.commands().count(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod sprite;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SpriteManagerConfig},
        foundation::{
            math::{Color, Mat4, Rect, Vec2},
            time::GameTime,
        },
        input::{KeyCode, KeyboardState},
        render::{
            BatchSettings, CommandRecorder, DrawCommand, RenderError, SpriteBatch, SpriteEffects,
            Texture, TextureId,
        },
        sprite::{
            AnimatedSprite, FrameContext, Sprite, SpriteError, SpriteManager, SpriteObject,
            SpriteResult,
        },
    };
}
