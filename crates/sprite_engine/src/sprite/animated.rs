//! Frame-strip animation
//!
//! An animated sprite's texture is a horizontal strip of equally wide frames.
//! [`FrameAnimation`] owns the timing state machine; [`AnimatedSprite`] pairs
//! it with a [`Sprite`] and draws the current frame's slice of the strip.

use std::any::Any;

use super::context::FrameContext;
use super::entity::{Sprite, SpriteObject};
use super::error::{SpriteError, SpriteResult};
use crate::foundation::math::Rect;
use crate::render::{RenderResult, SpriteBatch, Texture};

/// Playback state of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// Time accumulates and frames advance
    #[default]
    Playing,
    /// Time and frame are frozen
    Paused,
}

/// Frame timing state machine
///
/// Invariants: `frame < frame_count` and `elapsed >= 0`. After `advance`,
/// `elapsed` is less than one frame duration up to `f32` rounding. Leftover
/// time carries into the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnimation {
    frame_count: u32,
    frame: u32,
    frame_duration: f32,
    elapsed: f32,
    state: AnimationState,
}

impl FrameAnimation {
    /// Create a playing animation at frame 0
    ///
    /// Fails when `frame_count` is zero or `frames_per_second` is not a
    /// positive, finite number.
    pub fn new(frame_count: u32, frames_per_second: f32) -> SpriteResult<Self> {
        if frame_count == 0 {
            return Err(SpriteError::InvalidFrameCount(frame_count));
        }
        if !frames_per_second.is_finite() || frames_per_second <= 0.0 {
            return Err(SpriteError::InvalidFrameRate(frames_per_second));
        }

        Ok(Self {
            frame_count,
            frame: 0,
            frame_duration: 1.0 / frames_per_second,
            elapsed: 0.0,
            state: AnimationState::Playing,
        })
    }

    /// Accumulate `delta_seconds` and advance as many frames as it covers
    ///
    /// No effect while paused. Negative and non-finite deltas count as zero.
    pub fn advance(&mut self, delta_seconds: f32) {
        if self.state == AnimationState::Paused || !delta_seconds.is_finite() {
            return;
        }

        self.elapsed += delta_seconds.max(0.0);

        // Whole cycles leave the frame unchanged
        let cycle = self.frame_duration * self.frame_count as f32;
        if self.elapsed >= cycle {
            self.elapsed %= cycle;
        }

        let steps = (self.elapsed / self.frame_duration).floor();
        if steps >= 1.0 {
            let frame = (u64::from(self.frame) + steps as u64) % u64::from(self.frame_count);
            self.frame = frame as u32;
            self.elapsed = (self.elapsed - steps * self.frame_duration).max(0.0);
        }
    }

    /// Resume accumulating time; frame and elapsed time are kept
    pub fn play(&mut self) {
        self.state = AnimationState::Playing;
    }

    /// Freeze frame and elapsed time
    pub fn pause(&mut self) {
        self.state = AnimationState::Paused;
    }

    /// Go back to frame 0 with no elapsed time, keeping the play state
    pub fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = 0.0;
    }

    /// Pause and reset
    pub fn stop(&mut self) {
        self.pause();
        self.reset();
    }

    /// Jump to a frame, wrapped into range
    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame % self.frame_count;
    }

    /// Current frame index
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Number of frames in the strip
    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Seconds each frame is shown
    pub const fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    /// Seconds accumulated since the last frame advance
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Playback state
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.state == AnimationState::Paused
    }

    /// Width of one frame of `texture`
    ///
    /// Integer division: when the strip width is not a multiple of the frame
    /// count, the trailing pixels belong to no frame.
    pub const fn frame_width(&self, texture: &Texture) -> i32 {
        (texture.width / self.frame_count) as i32
    }

    /// Region of `texture` holding the current frame
    pub const fn source_rect(&self, texture: &Texture) -> Rect {
        let width = self.frame_width(texture);
        Rect::new(width * self.frame as i32, 0, width, texture.height_i32())
    }
}

/// A sprite that plays a frame-strip animation
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    sprite: Sprite,
    animation: FrameAnimation,
}

impl AnimatedSprite {
    /// Create an animated sprite over a strip of `frame_count` frames
    pub fn new(
        name: impl Into<String>,
        texture: Texture,
        frame_count: u32,
        frames_per_second: f32,
    ) -> SpriteResult<Self> {
        Self::from_sprite(Sprite::new(name, texture), frame_count, frames_per_second)
    }

    /// Animate an already configured sprite
    pub fn from_sprite(
        sprite: Sprite,
        frame_count: u32,
        frames_per_second: f32,
    ) -> SpriteResult<Self> {
        Ok(Self {
            sprite,
            animation: FrameAnimation::new(frame_count, frames_per_second)?,
        })
    }

    /// Timing state
    pub const fn animation(&self) -> &FrameAnimation {
        &self.animation
    }

    /// Width of one frame of the current texture
    pub const fn frame_width(&self) -> i32 {
        self.animation.frame_width(&self.sprite.texture)
    }

    /// Current frame index
    pub const fn frame(&self) -> u32 {
        self.animation.frame()
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.animation.is_paused()
    }

    /// Resume playback
    pub fn play(&mut self) {
        self.animation.play();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.animation.pause();
    }

    /// Rewind to frame 0
    pub fn reset(&mut self) {
        self.animation.reset();
    }

    /// Pause and rewind
    pub fn stop(&mut self) {
        self.animation.stop();
    }

    /// Jump to a frame, wrapped into range
    pub fn set_frame(&mut self, frame: u32) {
        self.animation.set_frame(frame);
    }
}

impl SpriteObject for AnimatedSprite {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    /// Advance the animation, then integrate motion. Pausing the animation
    /// does not stop the sprite moving.
    fn update(&mut self, frame: &FrameContext<'_>) {
        self.animation.advance(frame.delta_seconds);
        self.sprite.integrate_motion();
    }

    fn draw(&self, batch: &mut dyn SpriteBatch) -> RenderResult<()> {
        let source = self.animation.source_rect(&self.sprite.texture);
        self.sprite.draw_region(batch, source)
    }

    /// One frame at the origin unless explicit bounds were set
    fn rect(&self) -> Rect {
        self.sprite.explicit_bounds().unwrap_or_else(|| {
            Rect::new(0, 0, self.frame_width(), self.sprite.texture.height_i32())
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::input::KeyboardState;
    use crate::render::{BatchSettings, CommandRecorder, TextureId};
    use approx::assert_relative_eq;

    fn strip(width: u32, height: u32) -> Texture {
        Texture::new(TextureId(3), width, height)
    }

    #[test]
    fn test_zero_frames_is_rejected() {
        assert_eq!(FrameAnimation::new(0, 10.0), Err(SpriteError::InvalidFrameCount(0)));
        assert!(AnimatedSprite::new("walk", strip(64, 16), 0, 10.0).is_err());
    }

    #[test]
    fn test_non_positive_frame_rate_is_rejected() {
        assert_eq!(FrameAnimation::new(4, 0.0), Err(SpriteError::InvalidFrameRate(0.0)));
        assert_eq!(FrameAnimation::new(4, -2.0), Err(SpriteError::InvalidFrameRate(-2.0)));
        assert!(FrameAnimation::new(4, f32::INFINITY).is_err());
        assert!(FrameAnimation::new(4, f32::NAN).is_err());
    }

    #[test]
    fn test_remainder_is_carried_forward() {
        let mut animation = FrameAnimation::new(4, 2.0).unwrap();
        assert_relative_eq!(animation.frame_duration(), 0.5);

        animation.advance(0.3);
        assert_eq!(animation.frame(), 0);
        assert_relative_eq!(animation.elapsed(), 0.3, epsilon = 1e-6);

        animation.advance(0.3);
        assert_eq!(animation.frame(), 1);
        assert_relative_eq!(animation.elapsed(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_frames_wrap_around() {
        let mut animation = FrameAnimation::new(3, 10.0).unwrap();
        for _ in 0..3 {
            animation.advance(0.1);
        }
        assert_eq!(animation.frame(), 0);

        animation.advance(0.1);
        assert_eq!(animation.frame(), 1);
    }

    #[test]
    fn test_long_tick_advances_several_frames() {
        let mut animation = FrameAnimation::new(4, 2.0).unwrap();
        animation.advance(1.2);
        assert_eq!(animation.frame(), 2);
        assert_relative_eq!(animation.elapsed(), 0.2, epsilon = 1e-5);

        // Five whole cycles plus 0.6s on top of the carried 0.2s.
        animation.advance(10.6);
        assert_eq!(animation.frame(), 3);
        assert_relative_eq!(animation.elapsed(), 0.3, epsilon = 1e-4);
        assert!(animation.frame() < animation.frame_count());
    }

    #[test]
    fn test_huge_strip_advances_in_one_step() {
        let frame_count = 1 << 25;
        let mut animation = FrameAnimation::new(frame_count, 1.0e6).unwrap();
        animation.advance(30.0);

        assert!(animation.frame() > 29_000_000);
        assert!(animation.frame() < frame_count);
        assert!(animation.elapsed() >= 0.0);

        animation.advance(30.0);
        assert!(animation.frame() < frame_count);
    }

    #[test]
    fn test_pause_freezes_state() {
        let mut animation = FrameAnimation::new(4, 2.0).unwrap();
        animation.advance(0.3);
        animation.pause();

        for _ in 0..10 {
            animation.advance(0.4);
        }
        assert!(animation.is_paused());
        assert_eq!(animation.frame(), 0);
        assert_relative_eq!(animation.elapsed(), 0.3, epsilon = 1e-6);

        animation.play();
        animation.advance(0.3);
        assert_eq!(animation.frame(), 1);
        assert_relative_eq!(animation.elapsed(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_keeps_play_state() {
        let mut animation = FrameAnimation::new(4, 2.0).unwrap();
        animation.advance(1.2);
        animation.reset();

        assert_eq!(animation.frame(), 0);
        assert_relative_eq!(animation.elapsed(), 0.0);
        assert_eq!(animation.state(), AnimationState::Playing);
    }

    #[test]
    fn test_stop_pauses_and_rewinds() {
        let mut animation = FrameAnimation::new(4, 2.0).unwrap();
        animation.advance(1.2);
        animation.stop();

        assert_eq!(animation.frame(), 0);
        assert_relative_eq!(animation.elapsed(), 0.0);
        assert!(animation.is_paused());
    }

    #[test]
    fn test_bad_deltas_are_ignored() {
        let mut animation = FrameAnimation::new(4, 2.0).unwrap();
        animation.advance(-1.0);
        animation.advance(f32::NAN);
        animation.advance(f32::INFINITY);
        assert_eq!(animation.frame(), 0);
        assert_relative_eq!(animation.elapsed(), 0.0);

        animation.advance(0.5);
        assert_eq!(animation.frame(), 1);
    }

    #[test]
    fn test_source_rect_slices_strip() {
        let mut animation = FrameAnimation::new(4, 2.0).unwrap();
        let texture = strip(64, 16);

        assert_eq!(animation.source_rect(&texture), Rect::new(0, 0, 16, 16));
        animation.set_frame(2);
        assert_eq!(animation.source_rect(&texture), Rect::new(32, 0, 16, 16));
        animation.set_frame(6);
        assert_eq!(animation.frame(), 2);
    }

    #[test]
    fn test_uneven_strip_drops_trailing_pixels() {
        let mut animation = FrameAnimation::new(3, 2.0).unwrap();
        let texture = strip(50, 10);

        assert_eq!(animation.frame_width(&texture), 16);
        animation.set_frame(2);
        let last = animation.source_rect(&texture);
        assert_eq!(last, Rect::new(32, 0, 16, 10));
        assert_eq!(last.right(), 48);
    }

    #[test]
    fn test_animated_sprite_draws_current_frame() {
        let keyboard = KeyboardState::new();
        let frame = FrameContext::new(0.5, Vec2::new(640.0, 480.0), &keyboard);

        let mut sprite = AnimatedSprite::new("walk", strip(64, 16), 4, 2.0).unwrap();
        sprite.update(&frame);
        assert_eq!(sprite.frame(), 1);

        let mut recorder = CommandRecorder::new();
        recorder.begin(&BatchSettings::default()).unwrap();
        sprite.draw(&mut recorder).unwrap();
        recorder.end().unwrap();

        let command = recorder.commands().next().unwrap();
        assert_eq!(command.source, Rect::new(16, 0, 16, 16));
    }

    #[test]
    fn test_paused_animation_still_moves() {
        let keyboard = KeyboardState::new();
        let frame = FrameContext::new(0.5, Vec2::new(640.0, 480.0), &keyboard);

        let mut sprite = AnimatedSprite::new("walk", strip(64, 16), 4, 2.0).unwrap();
        sprite.sprite_mut().velocity = Vec2::new(3.0, 0.0);
        sprite.pause();
        sprite.update(&frame);

        assert_eq!(sprite.frame(), 0);
        assert_relative_eq!(sprite.sprite().position, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_bounds_cover_one_frame() {
        let mut sprite = AnimatedSprite::new("walk", strip(64, 16), 4, 2.0).unwrap();
        sprite.sprite_mut().position = Vec2::new(10.0, 10.0);
        assert_eq!(sprite.rect(), Rect::new(0, 0, 16, 16));
        assert_eq!(sprite.bounds(), Rect::new(10, 10, 16, 16));

        sprite.sprite_mut().set_bounds(Some(Rect::new(0, 0, 4, 4)));
        assert_eq!(sprite.rect(), Rect::new(0, 0, 4, 4));
    }
}
