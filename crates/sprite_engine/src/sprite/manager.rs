//! # Sprite Manager
//!
//! Owns every registered sprite, keyed by unique name, and drives the
//! per-frame update and draw protocol:
//!
//! - **Update**: each sprite receives one `update` per tick. Sprites that
//!   raised `destroy_next_frame` are removed once the pass has finished, so a
//!   removal never disturbs the traversal of the tick that caused it.
//! - **Draw**: one batch per frame, transformed by the inverse camera
//!   position. Regular sprites are drawn first, then every `draw_late` sprite.
//!
//! ## Ordering
//!
//! Sprites are stored in a `BTreeMap`, so both passes visit sprites in
//! lexicographic order of their names. The order is part of the contract:
//! it is reproducible across runs and is what tests observe. Depth sorting,
//! when wanted, is the sprite batch's job (see `SortMode`).

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use super::context::{FrameContext, ManagerId};
use super::entity::{Sprite, SpriteObject};
use super::error::{SpriteError, SpriteResult};
use crate::config::SpriteManagerConfig;
use crate::foundation::math::{utils, Mat4, Vec2};
use crate::render::{BatchSettings, RenderResult, SpriteBatch, Texture};

/// Registry of named sprites
pub struct SpriteManager {
    id: ManagerId,
    sprites: BTreeMap<String, Box<dyn SpriteObject>>,
    camera_position: Vec2,
    manual_update: bool,
    manual_draw: bool,
}

impl SpriteManager {
    /// Create an empty manager with default configuration
    pub fn new() -> Self {
        Self::with_config(&SpriteManagerConfig::default())
    }

    /// Create an empty manager from configuration
    pub fn with_config(config: &SpriteManagerConfig) -> Self {
        let id = ManagerId::next();
        log::debug!(
            "Created {id} (manual update: {}, manual draw: {})",
            config.manual_update,
            config.manual_draw
        );
        Self {
            id,
            sprites: BTreeMap::new(),
            camera_position: config.camera(),
            manual_update: config.manual_update,
            manual_draw: config.manual_draw,
        }
    }

    /// Identifier stored in every sprite this manager owns
    pub const fn id(&self) -> ManagerId {
        self.id
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Register a sprite under its own name
    ///
    /// On success the sprite is attached to this manager and its `initialize`
    /// hook has run. If the name is taken, the sprite is dropped, the registry
    /// is left untouched and [`SpriteError::DuplicateName`] is returned.
    pub fn create_sprite<S: SpriteObject>(
        &mut self,
        sprite: S,
    ) -> SpriteResult<&mut dyn SpriteObject> {
        self.create_boxed(Box::new(sprite))
    }

    /// Register a sprite after moving it to `position`
    pub fn create_sprite_at<S: SpriteObject>(
        &mut self,
        mut sprite: S,
        position: Vec2,
    ) -> SpriteResult<&mut dyn SpriteObject> {
        sprite.sprite_mut().position = position;
        self.create_sprite(sprite)
    }

    /// Build a plain sprite from a texture and register it
    pub fn create_from_texture(
        &mut self,
        name: impl Into<String>,
        texture: Texture,
    ) -> SpriteResult<&mut dyn SpriteObject> {
        self.create_sprite(Sprite::new(name, texture))
    }

    /// Build a plain sprite at `position` and register it
    pub fn create_from_texture_at(
        &mut self,
        name: impl Into<String>,
        texture: Texture,
        position: Vec2,
    ) -> SpriteResult<&mut dyn SpriteObject> {
        self.create_sprite(Sprite::new(name, texture).with_position(position))
    }

    /// Register an already boxed sprite
    pub fn create_boxed(
        &mut self,
        mut sprite: Box<dyn SpriteObject>,
    ) -> SpriteResult<&mut dyn SpriteObject> {
        match self.sprites.entry(sprite.sprite().name().to_owned()) {
            Entry::Occupied(entry) => {
                log::warn!("{}: sprite '{}' already exists, ignoring create", self.id, entry.key());
                Err(SpriteError::DuplicateName {
                    name: entry.key().clone(),
                })
            }
            Entry::Vacant(entry) => {
                log::debug!("{}: registered sprite '{}'", self.id, entry.key());
                sprite.sprite_mut().attach_to(self.id);
                sprite.initialize();
                Ok(&mut **entry.insert(sprite))
            }
        }
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    /// Sprite with the given name
    pub fn get(&self, name: &str) -> Option<&dyn SpriteObject> {
        self.sprites.get(name).map(|sprite| &**sprite)
    }

    /// Sprite with the given name, mutable
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn SpriteObject> {
        match self.sprites.get_mut(name) {
            Some(sprite) => Some(&mut **sprite),
            None => None,
        }
    }

    /// Sprite with the given name, if it is a `T`
    pub fn get_as<T: SpriteObject>(&self, name: &str) -> Option<&T> {
        self.get(name)?.as_any().downcast_ref::<T>()
    }

    /// Sprite with the given name, if it is a `T`, mutable
    pub fn get_as_mut<T: SpriteObject>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    /// Every sprite carrying `tag`, in name order
    pub fn sprites_with_tag(&self, tag: &str) -> Vec<&dyn SpriteObject> {
        self.iter()
            .map(|(_, sprite)| sprite)
            .filter(|sprite| sprite.sprite().tag() == tag)
            .collect()
    }

    /// First sprite in name order carrying `tag`
    pub fn sprite_with_tag(&self, tag: &str) -> Option<&dyn SpriteObject> {
        self.iter()
            .map(|(_, sprite)| sprite)
            .find(|sprite| sprite.sprite().tag() == tag)
    }

    /// Whether a sprite with this name is registered
    pub fn has_sprite(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    /// Number of registered sprites
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether no sprites are registered
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Registered names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.keys().map(String::as_str)
    }

    /// Registered sprites in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn SpriteObject)> {
        self.sprites
            .iter()
            .map(|(name, sprite)| (name.as_str(), &**sprite as &dyn SpriteObject))
    }

    /// Names of every overlapping pair, each pair once, in name order
    pub fn colliding_pairs(&self) -> Vec<(&str, &str)> {
        let entries: Vec<(&str, &dyn SpriteObject)> = self.iter().collect();
        let mut pairs = Vec::new();
        for (i, (name_a, a)) in entries.iter().enumerate() {
            for (name_b, b) in &entries[i + 1..] {
                if a.collides_with(*b) {
                    pairs.push((*name_a, *name_b));
                }
            }
        }
        pairs
    }

    // ---------------------------------------------------------------------
    // Destruction
    // ---------------------------------------------------------------------

    /// Remove a sprite by name, handing it back detached
    ///
    /// Absent names are ignored, so repeated calls are harmless.
    pub fn destroy_sprite(&mut self, name: &str) -> Option<Box<dyn SpriteObject>> {
        let mut sprite = self.sprites.remove(name)?;
        sprite.sprite_mut().detach();
        log::debug!("{}: destroyed sprite '{name}'", self.id);
        Some(sprite)
    }

    /// Remove every sprite
    pub fn destroy_all_sprites(&mut self) {
        log::debug!("{}: destroying all {} sprites", self.id, self.sprites.len());
        self.sprites.clear();
    }

    // ---------------------------------------------------------------------
    // Frame protocol
    // ---------------------------------------------------------------------

    /// Per-frame update entry point; does nothing in manual-update mode
    pub fn update(&mut self, frame: &FrameContext<'_>) -> Vec<String> {
        if self.manual_update {
            return Vec::new();
        }
        self.update_all(frame)
    }

    /// Update every sprite once, in name order, then remove the ones that
    /// asked to be destroyed
    ///
    /// Returns the names removed during this pass.
    pub fn update_all(&mut self, frame: &FrameContext<'_>) -> Vec<String> {
        log::trace!(
            "{}: updating {} sprites (dt = {})",
            self.id,
            self.sprites.len(),
            frame.delta_seconds
        );

        let mut doomed = Vec::new();
        for (name, sprite) in &mut self.sprites {
            sprite.update(frame);
            if sprite.sprite().destroy_next_frame {
                doomed.push(name.clone());
            }
        }

        for name in &doomed {
            let _ = self.destroy_sprite(name);
        }
        doomed
    }

    /// Per-frame draw entry point; does nothing in manual-draw mode
    pub fn draw(&self, batch: &mut dyn SpriteBatch) -> RenderResult<()> {
        if self.manual_draw {
            return Ok(());
        }
        self.draw_all(batch)
    }

    /// Draw every sprite in one camera-transformed batch: regular sprites
    /// first, then late ones
    ///
    /// The batch is closed even when a sprite fails to draw; the first error
    /// is returned.
    pub fn draw_all(&self, batch: &mut dyn SpriteBatch) -> RenderResult<()> {
        batch.begin(&BatchSettings::with_transform(self.camera_transform()))?;
        let drawn = self
            .draw_sprites(batch)
            .and_then(|()| self.draw_sprites_late(batch));
        let ended = batch.end();
        drawn.and(ended)
    }

    /// First draw pass: sprites without `draw_late`, in name order
    ///
    /// Expects an open batch.
    pub fn draw_sprites(&self, batch: &mut dyn SpriteBatch) -> RenderResult<()> {
        self.draw_pass(batch, false)
    }

    /// Second draw pass: sprites with `draw_late`, in name order
    ///
    /// Expects an open batch.
    pub fn draw_sprites_late(&self, batch: &mut dyn SpriteBatch) -> RenderResult<()> {
        self.draw_pass(batch, true)
    }

    fn draw_pass(&self, batch: &mut dyn SpriteBatch, late: bool) -> RenderResult<()> {
        self.sprites
            .values()
            .filter(|sprite| sprite.sprite().draw_late == late)
            .try_for_each(|sprite| sprite.draw(batch))
    }

    // ---------------------------------------------------------------------
    // Camera and modes
    // ---------------------------------------------------------------------

    /// Camera position in world space
    pub const fn camera_position(&self) -> Vec2 {
        self.camera_position
    }

    /// Move the camera; sprite positions are unaffected
    pub fn set_camera_position(&mut self, position: Vec2) {
        self.camera_position = position;
    }

    /// Batch transform: the whole scene translated opposite the camera
    pub fn camera_transform(&self) -> Mat4 {
        utils::translation_2d(-self.camera_position)
    }

    /// Whether `update` is suppressed
    pub const fn manual_update(&self) -> bool {
        self.manual_update
    }

    /// Suppress or restore `update`
    pub fn set_manual_update(&mut self, manual: bool) {
        self.manual_update = manual;
    }

    /// Whether `draw` is suppressed
    pub const fn manual_draw(&self) -> bool {
        self.manual_draw
    }

    /// Suppress or restore `draw`
    pub fn set_manual_draw(&mut self, manual: bool) {
        self.manual_draw = manual;
    }
}

impl Default for SpriteManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpriteManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteManager")
            .field("id", &self.id)
            .field("sprites", &self.sprites.keys().collect::<Vec<_>>())
            .field("camera_position", &self.camera_position)
            .field("manual_update", &self.manual_update)
            .field("manual_draw", &self.manual_draw)
            .finish()
    }
}
