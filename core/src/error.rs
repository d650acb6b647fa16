use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card id")]
    InvalidCardId,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board must have an even number of cards")]
    OddCardCount,
    #[error("Deck does not hold exactly two cards of every pair value")]
    InvalidDeck,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Saved game is not a reachable game state")]
    CorruptState,
}

pub type Result<T> = core::result::Result<T, GameError>;
