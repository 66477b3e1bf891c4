//! Error types for memory-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised while configuring a game.
///
/// Playing a game never fails: invalid selections are ignored by the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("invalid color {value:?}")]
    InvalidColor { value: String },
}
