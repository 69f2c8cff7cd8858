//! Error types for the noughts crate

use thiserror::Error;

use crate::tictactoe::Mark;

/// Main error type for the noughts crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("grid needs exactly {expected} cells, got {got} in {context:?}")]
    InvalidGridLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("unexpected symbol {character:?} at index {position} of {context:?}; expected ' ', 'X' or 'O'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid game state: {reason}")]
    InvalidGameState { reason: String },

    #[error("cell {position} is already taken")]
    InvalidMove { position: usize },

    #[error("cell index {position} is outside the grid (0-8)")]
    InvalidPosition { position: usize },

    #[error("it is not {mark}'s turn")]
    NotYourTurn { mark: Mark },

    #[error("game score is unknown until the game is over")]
    UnknownGameScore,

    #[error("the game has already ended")]
    GameOver,

    #[error("player produced no move")]
    NoValidMoves,

    #[error("bad configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("could not {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for malformed-grid errors raised while constructing a [`Grid`](crate::tictactoe::Grid).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidGridLength { .. } | Error::InvalidCellCharacter { .. }
        )
    }

    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Error::InvalidGameState {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "perform I/O".to_string(),
            source,
        }
    }
}
