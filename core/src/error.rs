use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cell is already occupied by a tile")]
    CellOccupied,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Tile value must be a power of two, at least 2")]
    InvalidTileValue,
    #[error("Tiles of different values cannot merge")]
    InvalidMerge,
    #[error("Recorded game state does not match the board")]
    StateMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
