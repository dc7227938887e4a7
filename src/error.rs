//! Centralized error types for the simulation core.
//!
//! Load-time problems with level data are the only recoverable errors; everything
//! that happens during a tick has a defined fallback instead.

use crate::ghost::Personality;

/// Main error type for the simulation core.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),
}

/// Level data failed validation; no partial maze is ever produced.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MazeError {
    #[error("Missing spawn point for {0}")]
    MissingSpawn(Personality),

    #[error("Duplicate spawn point for {0}")]
    DuplicateSpawn(Personality),

    #[error("Missing favorite tile for {0}")]
    MissingFavoriteTile(Personality),

    #[error("Duplicate favorite tile for {0}")]
    DuplicateFavoriteTile(Personality),

    #[error("Missing player start position")]
    MissingPlayerStart,

    #[error("Invalid maze dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Error type for board layout parsing.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Unknown character in board at ({x}, {y}): {character:?}")]
    UnknownCharacter { character: char, x: usize, y: usize },

    #[error("Row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    #[error("Board is empty")]
    Empty,
}

/// Sprite animation construction errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AnimationError {
    #[error("Frame duration must be positive, got {0}")]
    InvalidFrameDuration(f64),

    #[error("Animation has no frames")]
    NoFrames,
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
