//! Sprite registry and construction errors

/// Errors reported by sprite construction and registration
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpriteError {
    /// A sprite with this name is already registered; the registry is unchanged
    #[error("A sprite named '{name}' already exists")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },

    /// Animated sprites need at least one frame
    #[error("Frame count must be at least 1, got {0}")]
    InvalidFrameCount(u32),

    /// Frame rate must be a positive, finite number
    #[error("Frames per second must be positive and finite, got {0}")]
    InvalidFrameRate(f32),
}

/// Result type for sprite operations
pub type SpriteResult<T> = Result<T, SpriteError>;
