//! Error type shared by the whole simulation core.

/// Failures a caller can trigger through the public API.
///
/// Normal gameplay (empty lists, dead entities, shots that miss) never
/// produces an error; only malformed requests do.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// A parameter is outside its accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request does not fit the current state of the game.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

pub type GameResult<T> = Result<T, GameError>;
