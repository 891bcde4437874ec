//! Movement transitions.

use crate::action::error::ActionError;
use crate::action::kinds::ready_actor;
use crate::action::ActionTransition;
use crate::engine::Event;
use crate::env::GameEnv;
use crate::state::types::AiState;
use crate::state::{Direction, EntityId, GameState};

/// One step in a direction. For the player this drags the whole chain,
/// swallows whatever letter is lying on the destination, constricts any
/// enemy the coils now seal in, and can end the run when the step leads
/// into a dead pocket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAction {
    pub actor: EntityId,
    pub dir: Direction,
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = ready_actor(state, self.actor)?;
        let target = actor.position.step(self.dir);
        if !state.grid.in_bounds(target) {
            return Err(ActionError::OutOfBounds);
        }
        if !state.grid.is_walkable(target) {
            return Err(ActionError::Blocked);
        }
        if state.entities.blocks_movement_at(target) {
            return Err(ActionError::Occupied);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError> {
        let mut events = Vec::new();
        let from = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::ActorNotFound)?
            .position;
        state.move_actor(self.actor, self.dir);
        let to = from.step(self.dir);
        events.push(Event::Moved {
            actor: self.actor,
            from,
            to,
        });

        if !self.actor.is_player() {
            return Ok(events);
        }

        // swallow the letter under the head
        if let Some(item) = state.entities.ground_item_at(to).map(|i| i.id)
            && !state.entities.chain.is_full()
            && let Some(item) = state.entities.take_ground_item(item)
        {
            let glyph = item.glyph;
            state.entities.chain.swallow(item);
            events.push(Event::SegmentSwallowed { glyph });
        }

        constrict_sealed_enemies(state, &mut events);

        // a step into a pocket with no exit is the end
        if state.is_trapped(to) {
            state.entities.player.ai = AiState::None;
            events.push(Event::Trapped);
            events.push(Event::Killed {
                entity: EntityId::PLAYER,
            });
        }

        Ok(events)
    }
}

/// Enemies sealed in by the coils (no enterable adjacent tile, touching
/// the head or a segment) become constricted and stop acting.
fn constrict_sealed_enemies(state: &mut GameState, events: &mut Vec<Event>) {
    let sealed: Vec<EntityId> = state
        .entities
        .npcs
        .values()
        .filter(|npc| npc.is_alive() && !npc.is_constricted())
        .filter(|npc| {
            state.adjacent_coil_count(npc.position) > 0 && state.is_surrounded(npc.position)
        })
        .map(|npc| npc.id)
        .collect();
    for id in sealed {
        if let Some(npc) = state.entities.actor_mut(id) {
            let previous = std::mem::replace(&mut npc.ai, AiState::None);
            npc.ai = AiState::Constricted {
                previous: Box::new(previous),
            };
            npc.intent.clear();
            events.push(Event::ConstrictionStarted { target: id });
        }
    }
}

/// Pass the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitAction {
    pub actor: EntityId,
}

impl ActionTransition for WaitAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        ready_actor(state, self.actor)?;
        Ok(())
    }

    fn apply(&self, _state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError> {
        Ok(vec![Event::Waited { actor: self.actor }])
    }
}
