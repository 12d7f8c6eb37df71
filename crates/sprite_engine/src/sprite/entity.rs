//! Base sprite state and the sprite capability trait
//!
//! [`Sprite`] is the data every drawable entity carries: transform, tint,
//! visibility and the lifecycle flags the registry reads. [`SpriteObject`] is
//! the interface the registry drives each frame; plain sprites, animated
//! sprites and game-specific types all implement it.

use std::any::Any;

use super::context::{FrameContext, ManagerId};
use crate::foundation::math::{Color, Rect, Vec2};
use crate::render::{DrawCommand, RenderResult, SpriteBatch, SpriteEffects, Texture};

/// Tag given to sprites that were never tagged
pub const DEFAULT_TAG: &str = "default";

/// Depth given to new sprites, the middle of the draw-order range
pub const DEFAULT_DEPTH: f32 = 0.5;

/// Transform, visual and lifecycle state of a sprite
#[derive(Debug, Clone)]
pub struct Sprite {
    name: String,
    tag: String,

    /// Top-left position in world space
    pub position: Vec2,

    /// Pivot for rotation and scaling, in texture pixels
    pub origin: Vec2,

    /// Added to `position` once per tick
    pub velocity: Vec2,

    /// Rotation in radians
    pub rotation: f32,

    /// Added to `rotation` once per tick
    pub rotation_velocity: f32,

    /// Per-axis scale
    pub scale: Vec2,

    /// Tint multiplied with the texture
    pub color: Color,

    /// Invisible sprites still update but submit nothing when drawn
    pub visible: bool,

    /// Mirroring
    pub effects: SpriteEffects,

    /// Texture drawn by this sprite
    pub texture: Texture,

    /// When set, the registry removes the sprite at the end of its next update
    pub destroy_next_frame: bool,

    /// Draw in the second pass, after every other sprite
    pub draw_late: bool,

    depth: f32,
    bounds: Option<Rect>,
    manager: Option<ManagerId>,
}

impl Sprite {
    /// Create an unattached sprite with default transform and tint
    pub fn new(name: impl Into<String>, texture: Texture) -> Self {
        Self {
            name: name.into(),
            tag: DEFAULT_TAG.to_owned(),
            position: Vec2::zeros(),
            origin: Vec2::zeros(),
            velocity: Vec2::zeros(),
            rotation: 0.0,
            rotation_velocity: 0.0,
            scale: Vec2::new(1.0, 1.0),
            color: Color::WHITE,
            visible: true,
            effects: SpriteEffects::empty(),
            texture,
            destroy_next_frame: false,
            draw_late: false,
            depth: DEFAULT_DEPTH,
            bounds: None,
            manager: None,
        }
    }

    /// Set the position
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the origin
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Set the tint
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Set the depth (clamped into `[0, 1]`)
    #[must_use]
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.set_depth(depth);
        self
    }

    /// Set the tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Put the sprite in the late draw pass
    #[must_use]
    pub fn with_draw_late(mut self, draw_late: bool) -> Self {
        self.draw_late = draw_late;
        self
    }

    /// Unique name within a registry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grouping label
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replace the grouping label
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// Layer depth in `[0, 1]`
    pub const fn depth(&self) -> f32 {
        self.depth
    }

    /// Set the layer depth, clamped into `[0, 1]`
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = if depth.is_nan() { DEFAULT_DEPTH } else { depth.clamp(0.0, 1.0) };
    }

    /// Explicit bounding rectangle, if one was set
    pub const fn explicit_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Set or clear the explicit bounding rectangle
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// Bounding rectangle: the explicit one, or the whole texture
    pub fn rect(&self) -> Rect {
        self.bounds
            .unwrap_or_else(|| Rect::new(0, 0, self.texture.width_i32(), self.texture.height_i32()))
    }

    /// Registry this sprite is attached to
    pub const fn manager(&self) -> Option<ManagerId> {
        self.manager
    }

    /// Whether the sprite has been registered
    pub const fn is_attached(&self) -> bool {
        self.manager.is_some()
    }

    pub(crate) fn attach_to(&mut self, manager: ManagerId) {
        self.manager = Some(manager);
    }

    pub(crate) fn detach(&mut self) {
        self.manager = None;
    }

    /// Advance rotation and position by one tick of their velocities
    pub fn integrate_motion(&mut self) {
        self.rotation += self.rotation_velocity;
        self.position += self.velocity;
    }

    /// `rect` with its size placed at the sprite's position
    ///
    /// Position is truncated to whole pixels.
    pub fn bounds_at_position(&self, rect: Rect) -> Rect {
        rect.at(self.position.x as i32, self.position.y as i32)
    }

    /// Submit this sprite with the given source region
    ///
    /// Does nothing when the sprite is invisible.
    pub fn draw_region(&self, batch: &mut dyn SpriteBatch, source: Rect) -> RenderResult<()> {
        if !self.visible {
            return Ok(());
        }
        batch.draw(DrawCommand {
            texture: self.texture.id,
            position: self.position,
            source,
            tint: self.color,
            rotation: self.rotation,
            origin: self.origin,
            scale: self.scale,
            effects: self.effects,
            depth: self.depth,
        })
    }
}

/// Capability interface driven by the sprite registry
///
/// Implementors embed a [`Sprite`] and expose it through `sprite` and
/// `sprite_mut`. The default methods give plain-sprite behavior; override
/// `update`, `draw` or `rect` to specialize.
pub trait SpriteObject: Any {
    /// Shared sprite state
    fn sprite(&self) -> &Sprite;

    /// Shared sprite state, mutable
    fn sprite_mut(&mut self) -> &mut Sprite;

    /// Called once, when the sprite is registered and before its first tick
    fn initialize(&mut self) {}

    /// Advance one tick
    fn update(&mut self, _frame: &FrameContext<'_>) {
        self.sprite_mut().integrate_motion();
    }

    /// Submit draw commands for this sprite
    fn draw(&self, batch: &mut dyn SpriteBatch) -> RenderResult<()> {
        self.sprite().draw_region(batch, self.rect())
    }

    /// Local bounding rectangle
    fn rect(&self) -> Rect {
        self.sprite().rect()
    }

    /// Bounding rectangle in world space
    fn bounds(&self) -> Rect {
        self.sprite().bounds_at_position(self.rect())
    }

    /// Axis-aligned overlap test against another sprite
    fn collides_with(&self, other: &dyn SpriteObject) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Upcast for typed lookups
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed lookups, mutable
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl SpriteObject for Sprite {
    fn sprite(&self) -> &Sprite {
        self
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        self
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
    use crate::input::KeyboardState;
    use crate::render::{BatchSettings, CommandRecorder, TextureId};
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn texture(width: u32, height: u32) -> Texture {
        Texture::new(TextureId(7), width, height)
    }

    #[test]
    fn test_new_sprite_defaults() {
        let sprite = Sprite::new("hero", texture(32, 16));

        assert_eq!(sprite.name(), "hero");
        assert_eq!(sprite.tag(), DEFAULT_TAG);
        assert_eq!(sprite.color, Color::WHITE);
        assert_eq!(sprite.scale, Vec2::new(1.0, 1.0));
        assert_relative_eq!(sprite.depth(), DEFAULT_DEPTH);
        assert!(sprite.visible);
        assert!(!sprite.destroy_next_frame);
        assert!(!sprite.draw_late);
        assert!(!sprite.is_attached());
    }

    #[test]
    fn test_rect_falls_back_to_texture_size() {
        let mut sprite = Sprite::new("hero", texture(32, 16));
        assert_eq!(sprite.rect(), Rect::new(0, 0, 32, 16));

        sprite.set_bounds(Some(Rect::new(4, 4, 8, 8)));
        assert_eq!(sprite.rect(), Rect::new(4, 4, 8, 8));

        sprite.set_bounds(None);
        assert_eq!(sprite.rect(), Rect::new(0, 0, 32, 16));
    }

    #[test]
    fn test_depth_is_clamped() {
        let mut sprite = Sprite::new("hero", texture(1, 1));
        sprite.set_depth(2.0);
        assert_relative_eq!(sprite.depth(), 1.0);
        sprite.set_depth(-1.0);
        assert_relative_eq!(sprite.depth(), 0.0);
        sprite.set_depth(f32::NAN);
        assert_relative_eq!(sprite.depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn test_update_integrates_once_per_tick() {
        let keyboard = KeyboardState::new();
        let frame = FrameContext::new(10.0, Vec2::new(100.0, 100.0), &keyboard);

        let mut sprite = Sprite::new("hero", texture(1, 1)).with_position(Vec2::new(1.0, 1.0));
        sprite.velocity = Vec2::new(2.0, -1.0);
        sprite.rotation_velocity = PI / 4.0;

        sprite.update(&frame);
        sprite.update(&frame);

        assert_relative_eq!(sprite.position, Vec2::new(5.0, -1.0));
        assert_relative_eq!(sprite.rotation, PI / 2.0);
    }

    #[test]
    fn test_draw_submits_current_state() {
        let sprite = Sprite::new("hero", texture(32, 16))
            .with_position(Vec2::new(10.0, 20.0))
            .with_color(Color::RED)
            .with_depth(0.25);

        let mut recorder = CommandRecorder::new();
        recorder.begin(&BatchSettings::default()).unwrap();
        sprite.draw(&mut recorder).unwrap();
        recorder.end().unwrap();

        let command = recorder.commands().next().unwrap();
        assert_eq!(command.texture, TextureId(7));
        assert_eq!(command.source, Rect::new(0, 0, 32, 16));
        assert_eq!(command.position, Vec2::new(10.0, 20.0));
        assert_eq!(command.tint, Color::RED);
        assert_relative_eq!(command.depth, 0.25);
    }

    #[test]
    fn test_invisible_sprite_draws_nothing() {
        let mut sprite = Sprite::new("ghost", texture(8, 8));
        sprite.visible = false;

        let mut recorder = CommandRecorder::new();
        recorder.begin(&BatchSettings::default()).unwrap();
        sprite.draw(&mut recorder).unwrap();
        recorder.end().unwrap();

        assert_eq!(recorder.commands().count(), 0);
    }

    #[test]
    fn test_collision_uses_top_left_position() {
        let a = Sprite::new("a", texture(10, 10)).with_position(Vec2::new(0.0, 0.0));
        let b = Sprite::new("b", texture(10, 10)).with_position(Vec2::new(5.0, 5.0));
        let c = Sprite::new("c", texture(10, 10)).with_position(Vec2::new(10.0, 0.0));

        assert!(a.collides_with(&b));
        assert!(!a.collides_with(&c));
        assert!(b.collides_with(&c));
    }

    #[test]
    fn test_collision_far_from_origin() {
        let far = Sprite::new("far", texture(16, 16)).with_position(Vec2::new(3.0e9, 0.0));
        let near = Sprite::new("near", texture(16, 16));
        let below = Sprite::new("below", texture(16, 16)).with_position(Vec2::new(0.0, -3.0e9));

        assert!(!far.collides_with(&near));
        assert!(!near.collides_with(&far));
        assert!(!below.collides_with(&near));
        assert!(far.collides_with(&far.clone()));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let sizes = [(4, 4), (10, 2), (1, 20)];
        let positions = [(0.0, 0.0), (3.5, 1.0), (-2.0, 8.0), (9.0, 9.0)];

        let sprites: Vec<Sprite> = sizes
            .iter()
            .zip(positions.iter().cycle())
            .chain(sizes.iter().zip(positions.iter().skip(1)))
            .enumerate()
            .map(|(i, (&(w, h), &(x, y)))| {
                Sprite::new(format!("s{i}"), texture(w, h)).with_position(Vec2::new(x, y))
            })
            .collect();

        for a in &sprites {
            for b in &sprites {
                assert_eq!(a.collides_with(b), b.collides_with(a), "{} vs {}", a.name(), b.name());
            }
        }
    }
}
