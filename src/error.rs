use thiserror::Error;

/// Domain errors for lobby and round operations.
///
/// Every operation either succeeds with a structured payload or fails with
/// exactly one of these; validation always completes before any state
/// mutation, so a failed call leaves the lobby untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Lobby or participant missing.
    #[error("{0} not found")]
    NotFound(String),

    /// Operation attempted outside the required lobby status.
    #[error("{0}")]
    InvalidState(String),

    /// Malformed input: empty name, short word, too few participants.
    #[error("{0}")]
    Validation(String),

    /// Non-captain or wrong-team submission in competitive mode.
    #[error("{0}")]
    Forbidden(String),

    /// The participant already tried this word this round.
    #[error("you already guessed \"{0}\"")]
    AlreadyGuessed(String),

    /// A collaborator (image provider) failed unexpectedly.
    #[error("dependency failure: {0}")]
    Dependency(String),
}

pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn lobby_not_found(code: &str) -> Self {
        GameError::NotFound(format!("lobby {code}"))
    }

    pub fn participant_not_found(name: &str) -> Self {
        GameError::NotFound(format!("participant {name}"))
    }

    /// Stable machine-readable kind for wire payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "not_found",
            GameError::InvalidState(_) => "invalid_state",
            GameError::Validation(_) => "validation",
            GameError::Forbidden(_) => "forbidden",
            GameError::AlreadyGuessed(_) => "already_guessed",
            GameError::Dependency(_) => "dependency",
        }
    }
}
