//! Keyboard-controlled player sprite

use std::any::Any;

use sprite_engine::prelude::*;

/// Pixels moved per tick while a direction key is held
pub const PLAYER_SPEED: f32 = 3.0;

/// Player character: an animated sprite steered with WASD
///
/// The walk cycle only plays while the player is moving.
#[derive(Debug)]
pub struct Player {
    body: AnimatedSprite,
}

impl Player {
    /// Create the player over a walk-cycle strip
    pub fn new(texture: Texture, frame_count: u32, frames_per_second: f32) -> SpriteResult<Self> {
        let mut body = AnimatedSprite::new("player", texture, frame_count, frames_per_second)?;
        body.sprite_mut().set_tag("player");
        body.sprite_mut().set_depth(0.4);
        body.stop();
        Ok(Self { body })
    }

    /// Current walk-cycle frame
    pub const fn frame(&self) -> u32 {
        self.body.frame()
    }

    fn direction(keyboard: &KeyboardState) -> Vec2 {
        let mut direction = Vec2::zeros();
        if keyboard.is_key_down(KeyCode::W) {
            direction.y -= 1.0;
        }
        if keyboard.is_key_down(KeyCode::S) {
            direction.y += 1.0;
        }
        if keyboard.is_key_down(KeyCode::A) {
            direction.x -= 1.0;
        }
        if keyboard.is_key_down(KeyCode::D) {
            direction.x += 1.0;
        }
        direction
    }
}

impl SpriteObject for Player {
    fn sprite(&self) -> &Sprite {
        self.body.sprite()
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        self.body.sprite_mut()
    }

    fn initialize(&mut self) {
        let position = self.sprite().position;
        log::info!("Player spawned at ({}, {})", position.x, position.y);
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        let direction = Self::direction(frame.keyboard);
        let moving = direction != Vec2::zeros();

        if moving && self.body.is_paused() {
            self.body.play();
        } else if !moving && !self.body.is_paused() {
            self.body.stop();
        }

        self.body.sprite_mut().velocity = direction * PLAYER_SPEED;
        self.body.update(frame);

        // Keep the whole frame inside the viewport
        let rect = self.body.rect();
        let max_x = (frame.viewport.x - rect.width as f32).max(0.0);
        let max_y = (frame.viewport.y - rect.height as f32).max(0.0);
        let position = &mut self.body.sprite_mut().position;
        position.x = position.x.clamp(0.0, max_x);
        position.y = position.y.clamp(0.0, max_y);
    }

    fn draw(&self, batch: &mut dyn SpriteBatch) -> Result<(), RenderError> {
        self.body.draw(batch)
    }

    fn rect(&self) -> Rect {
        self.body.rect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
