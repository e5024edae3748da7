use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position out of bounds")]
    OutOfBounds,
    #[error("Too many mines for the available cells")]
    TooManyMines,
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell value {0} is not in -1..=8")]
    InvalidCellValue(i8),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
