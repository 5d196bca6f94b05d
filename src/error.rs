use crate::types::{Difficulty, GameMode, GamePhase, PlayerId};

/// Result type for round operations
pub type GameResult<T> = Result<T, GameError>;

/// Errors returned by the round engine and the game session.
///
/// None of these are fatal: the operation is refused, state is left
/// untouched and the caller decides how to recover.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("No content available for {mode:?} mode at {difficulty:?} difficulty")]
    ContentUnavailable {
        mode: GameMode,
        difficulty: Difficulty,
    },

    #[error("Every player has already revealed")]
    RevealComplete,

    #[error("Every player has already voted")]
    VotingComplete,

    #[error("Invalid phase transition from {from:?} to {to:?}")]
    InvalidPhaseTransition { from: GamePhase, to: GamePhase },

    #[error("Phase precondition not met: {0}")]
    PhasePrecondition(String),

    #[error("Operation requires phase {expected:?}, current phase is {actual:?}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("Player {0} is not part of this round")]
    UnknownPlayer(PlayerId),

    #[error("The liar has no guess to make this round")]
    LiarGuessUnavailable,

    #[error("The liar has already guessed")]
    LiarGuessAlreadyMade,

    #[error("Round has no players")]
    NoPlayers,
}

/// Errors while loading a content catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no categories")]
    Empty,

    #[error("Category '{0}' appears more than once")]
    DuplicateCategory(String),
}

/// Errors while reading or writing saved preferences
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("Failed to access preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Preferences schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}
