use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty")]
    InvalidDifficulty,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Board dimension must be between 1 and 255")]
    InvalidDimension,
    #[error("Too many mines")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
