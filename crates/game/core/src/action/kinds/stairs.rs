//! Descending the stairs.

use crate::action::error::ActionError;
use crate::action::kinds::ready_actor;
use crate::action::ActionTransition;
use crate::engine::Event;
use crate::env::GameEnv;
use crate::state::types::TileKind;
use crate::state::{EntityId, GameState};

/// Step down to the next floor. Only valid on the stairs tile; the floor
/// change itself happens in the runtime, which regenerates the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TakeStairsAction;

impl ActionTransition for TakeStairsAction {
    fn actor(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        let player = ready_actor(state, EntityId::PLAYER)?;
        if state.grid.kind(player.position) != Some(TileKind::DownStairs) {
            return Err(ActionError::NotOnStairs);
        }
        Ok(())
    }

    fn apply(&self, _state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError> {
        Ok(vec![Event::DescendedStairs])
    }
}
