//! Errors surfaced by the runtime layers.

use thiserror::Error;
use wyrm_core::ActionError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine rejected or failed the submitted action. When the inner
    /// error is impossible (see [`ActionError::is_impossible`]) no state
    /// changed and no turn was consumed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The run has already ended; no further actions are accepted.
    #[error("the run is already over")]
    RunOver,

    #[error("no snapshot recorded for turn {turn}")]
    MissingSnapshot { turn: u64 },

    #[error("snapshot for turn {turn} failed its integrity check")]
    CorruptSnapshot { turn: u64 },

    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
}
