//! Action execution errors.

use crate::env::OracleError;

/// Errors surfaced by the action pipeline.
///
/// Most variants are *impossible-action* rejections: the request cannot be
/// honoured, the state is untouched and no turn is consumed. Callers use
/// [`ActionError::is_impossible`] to tell those apart from real faults.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("actor not found")]
    ActorNotFound,

    #[error("actor is dead")]
    ActorDead,

    #[error("actor is petrified")]
    Petrified,

    #[error("destination is out of bounds")]
    OutOfBounds,

    #[error("destination is not walkable")]
    Blocked,

    #[error("destination is occupied")]
    Occupied,

    #[error("nothing to attack there")]
    TargetNotFound,

    #[error("no item here")]
    NoItemHere,

    #[error("the chain is full")]
    ChainFull,

    #[error("no segment at index {0}")]
    NoSuchSegment(usize),

    #[error("cannot spit while choking")]
    Choking,

    #[error("target tile is not visible")]
    TargetNotVisible,

    #[error("the segment refuses to be digested")]
    SegmentRefuses,

    #[error("not standing on the stairs")]
    NotOnStairs,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ActionError {
    /// Impossible actions leave the state unchanged and cost no turn.
    /// Everything else is a wiring fault the runtime must surface.
    pub fn is_impossible(&self) -> bool {
        !matches!(self, ActionError::Oracle(_))
    }
}
