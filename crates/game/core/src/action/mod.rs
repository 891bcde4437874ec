//! Action domain.
//!
//! Every mutation of [`GameState`](crate::state::GameState) is an action
//! flowing through the two-phase transition pipeline: `pre_validate`
//! inspects the state before mutation and rejects impossible requests
//! without touching anything; `apply` performs the mutation and reports
//! what happened as [`Event`](crate::engine::Event) values.

pub mod effect;
pub mod error;
pub mod kinds;

pub use error::ActionError;

use crate::engine::Event;
use crate::env::GameEnv;
use crate::state::{Direction, EntityId, GameState, Position};

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError>;
}

/// What an actor is trying to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Context-sensitive step: melee when a living actor (or, for enemies,
    /// a chain segment) blocks the way, a plain move otherwise.
    Bump { dir: Direction },
    Move { dir: Direction },
    Melee { dir: Direction },
    /// Swallow the item under the head without moving.
    Pickup,
    /// Digest the chain segment at `index`.
    Digest { index: usize },
    /// Spit the chain segment at `index` toward `target`.
    Spit { index: usize, target: Position },
    TakeStairs,
    Wait,
}

/// An action bound to the entity performing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(actor: EntityId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    /// Shorthand for player-issued actions.
    pub fn player(kind: ActionKind) -> Self {
        Self::new(EntityId::PLAYER, kind)
    }
}
