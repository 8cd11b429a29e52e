//! Error types shared across the game core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Everything that can go wrong between a lesson file and a finished round.
///
/// Lesson/data errors are terminal to the operation that raised them but must
/// never corrupt an already-running round; playback errors are never fatal.
#[derive(Debug, Error)]
pub enum GameError {
    /// A lesson row with fewer than the three required fields. The row is
    /// dropped and loading continues.
    #[error("lesson row {row} has {found} field(s), expected at least 3")]
    MalformedRow { row: usize, found: usize },

    /// The lesson could not be loaded at all (fetch/format failure, or no
    /// usable rows). The previously loaded lesson stays in place.
    #[error("lesson could not be loaded: {0}")]
    LoadFailed(String),

    /// An unrecognized mode name at game start. Nothing is mutated.
    #[error("unknown game mode '{0}'")]
    UnknownMode(String),

    /// Exact-match lookup missed. The reference implementation crashed here;
    /// we surface it instead.
    #[error("no word pair found for '{0}'")]
    WordNotFound(String),

    /// Audio playback failed. Logged and surfaced as a warning only.
    #[error("audio playback failed for '{0}'")]
    Playback(String),
}
