//! Concrete action transitions.

mod combat;
mod item;
mod movement;
mod stairs;

pub use combat::MeleeAction;
pub use item::{DigestAction, PickupAction, SpitAction};
pub use movement::{MoveAction, WaitAction};
pub use stairs::TakeStairsAction;

use crate::action::error::ActionError;
use crate::state::types::{ActorState, StatusKind};
use crate::state::{EntityId, GameState};

/// Shared precondition: the actor exists, lives, and is free to act.
pub(crate) fn ready_actor<'a>(
    state: &'a GameState,
    id: EntityId,
) -> Result<&'a ActorState, ActionError> {
    let actor = state.entities.actor(id).ok_or(ActionError::ActorNotFound)?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDead);
    }
    if actor.statuses.has(StatusKind::Petrified) {
        return Err(ActionError::Petrified);
    }
    Ok(actor)
}
