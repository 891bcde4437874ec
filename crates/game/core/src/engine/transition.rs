//! Transition driver.

use crate::action::kinds::{
    DigestAction, MeleeAction, MoveAction, PickupAction, SpitAction, TakeStairsAction, WaitAction,
};
use crate::action::{Action, ActionError, ActionKind, ActionTransition};
use crate::engine::Event;
use crate::env::GameEnv;
use crate::state::GameState;

/// Runs one transition: validate against the untouched state, then apply.
/// A validation failure leaves the state exactly as it was.
fn drive<T: ActionTransition>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Vec<Event>, ActionError> {
    transition.pre_validate(state, env)?;
    transition.apply(state, env)
}

/// Resolves the action kind (bumps become moves or strikes) and drives it.
pub(crate) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Vec<Event>, ActionError> {
    let kind = resolve_bump(action, state)?;
    match kind {
        ActionKind::Move { dir } => drive(
            &MoveAction {
                actor: action.actor,
                dir,
            },
            state,
            env,
        ),
        ActionKind::Melee { dir } => drive(
            &MeleeAction {
                actor: action.actor,
                dir,
            },
            state,
            env,
        ),
        ActionKind::Pickup => drive(&PickupAction, state, env),
        ActionKind::Digest { index } => drive(&DigestAction { index }, state, env),
        ActionKind::Spit { index, target } => drive(&SpitAction { index, target }, state, env),
        ActionKind::TakeStairs => drive(&TakeStairsAction, state, env),
        ActionKind::Wait => drive(
            &WaitAction {
                actor: action.actor,
            },
            state,
            env,
        ),
        ActionKind::Bump { .. } => unreachable!("bump resolved before dispatch"),
    }
}

/// A bump is a melee strike when something attackable occupies the
/// destination, a move otherwise.
fn resolve_bump(action: &Action, state: &GameState) -> Result<ActionKind, ActionError> {
    let ActionKind::Bump { dir } = action.kind else {
        return Ok(action.kind);
    };
    let actor = state
        .entities
        .actor(action.actor)
        .ok_or(ActionError::ActorNotFound)?;
    let target = actor.position.step(dir);

    let attackable = if action.actor.is_player() {
        state.entities.npc_at(target).is_some()
    } else {
        (state.entities.player.is_alive() && state.entities.player.position == target)
            || state.entities.chain.segment_at(target).is_some()
            || state.entities.npc_at(target).is_some()
    };

    Ok(if attackable {
        ActionKind::Melee { dir }
    } else {
        ActionKind::Move { dir }
    })
}
