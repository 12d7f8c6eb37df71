//! Draw commands and an in-memory sprite batch
//!
//! A [`DrawCommand`] is a fully resolved sprite draw: no entity state, no
//! lifecycle, just what the backend needs to put pixels on screen.

use super::{
    BatchSettings, RenderError, RenderResult, SortMode, SpriteBatch, SpriteEffects, TextureId,
};
use crate::foundation::math::{Color, Rect, Vec2};

/// A single sprite draw primitive
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Texture to sample
    pub texture: TextureId,
    /// World-space position of the sprite's origin
    pub position: Vec2,
    /// Region of the texture to draw
    pub source: Rect,
    /// Color multiplied with the texture
    pub tint: Color,
    /// Rotation in radians around `origin`
    pub rotation: f32,
    /// Pivot within the source region, in pixels
    pub origin: Vec2,
    /// Per-axis scale
    pub scale: Vec2,
    /// Mirroring
    pub effects: SpriteEffects,
    /// Layer depth in `[0, 1]`
    pub depth: f32,
}

/// One `begin`/`end` pair captured by [`CommandRecorder`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBatch {
    /// Settings passed to `begin`
    pub settings: BatchSettings,
    /// Commands in flush order
    pub commands: Vec<DrawCommand>,
}

/// Sprite batch that records commands instead of rasterizing them
///
/// Enforces the begin/draw/end protocol and applies the batch's sort mode
/// when the batch is closed.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    batches: Vec<RecordedBatch>,
    open: Option<RecordedBatch>,
}

impl CommandRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a batch is currently open
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// All completed batches, oldest first
    pub fn batches(&self) -> &[RecordedBatch] {
        &self.batches
    }

    /// The most recently completed batch
    pub fn last_batch(&self) -> Option<&RecordedBatch> {
        self.batches.last()
    }

    /// Every command of every completed batch, in flush order
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.batches.iter().flat_map(|batch| batch.commands.iter())
    }

    /// Remove and return the completed batches
    pub fn take_batches(&mut self) -> Vec<RecordedBatch> {
        std::mem::take(&mut self.batches)
    }

    /// Forget everything, including an open batch
    pub fn clear(&mut self) {
        self.batches.clear();
        self.open = None;
    }
}

impl SpriteBatch for CommandRecorder {
    fn begin(&mut self, settings: &BatchSettings) -> RenderResult<()> {
        if self.open.is_some() {
            return Err(RenderError::BatchAlreadyStarted);
        }
        self.open = Some(RecordedBatch {
            settings: settings.clone(),
            commands: Vec::new(),
        });
        Ok(())
    }

    fn draw(&mut self, command: DrawCommand) -> RenderResult<()> {
        let batch = self.open.as_mut().ok_or(RenderError::BatchNotStarted)?;
        batch.commands.push(command);
        Ok(())
    }

    fn end(&mut self) -> RenderResult<()> {
        let mut batch = self.open.take().ok_or(RenderError::BatchNotStarted)?;
        match batch.settings.sort_mode {
            SortMode::Deferred | SortMode::Immediate => {}
            SortMode::BackToFront => batch.commands.sort_by(|a, b| b.depth.total_cmp(&a.depth)),
            SortMode::FrontToBack => batch.commands.sort_by(|a, b| a.depth.total_cmp(&b.depth)),
        }
        log::trace!("Flushed sprite batch with {} commands", batch.commands.len());
        self.batches.push(batch);
        Ok(())
    }
}
