//! Melee transition.

use crate::action::effect::{damage_actor, kill_actor};
use crate::action::error::ActionError;
use crate::action::kinds::ready_actor;
use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::engine::Event;
use crate::env::GameEnv;
use crate::state::{Direction, EntityId, GameState};

/// A melee strike into an adjacent tile.
///
/// The player bites enemies for flat damage. An enemy striking the chain
/// destroys the segment it hits; a strike on the head itself is lethal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeleeAction {
    pub actor: EntityId,
    pub dir: Direction,
}

impl MeleeAction {
    fn target_position(&self, state: &GameState) -> Option<crate::state::Position> {
        state
            .entities
            .actor(self.actor)
            .map(|a| a.position.step(self.dir))
    }
}

impl ActionTransition for MeleeAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        ready_actor(state, self.actor)?;
        let target = self
            .target_position(state)
            .ok_or(ActionError::ActorNotFound)?;
        if self.actor.is_player() {
            state
                .entities
                .npc_at(target)
                .ok_or(ActionError::TargetNotFound)?;
            return Ok(());
        }
        let hits_head = state.entities.player.is_alive()
            && state.entities.player.blocks_movement()
            && state.entities.player.position == target;
        let hits_segment = state.entities.chain.segment_at(target).is_some();
        let hits_npc = state.entities.npc_at(target).is_some();
        if hits_head || hits_segment || hits_npc {
            Ok(())
        } else {
            Err(ActionError::TargetNotFound)
        }
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError> {
        let mut events = Vec::new();
        let target = self
            .target_position(state)
            .ok_or(ActionError::ActorNotFound)?;

        if self.actor.is_player() {
            let victim = state
                .entities
                .npc_at(target)
                .map(|npc| npc.id)
                .ok_or(ActionError::TargetNotFound)?;
            damage_actor(
                state,
                env,
                &mut events,
                self.actor,
                victim,
                GameConfig::MELEE_DAMAGE,
            );
            return Ok(events);
        }

        // enemy attacker: head first, then segments, then rivals
        if state.entities.player.is_alive() && state.entities.player.position == target {
            events.push(Event::MeleeHit {
                attacker: self.actor,
                target: EntityId::PLAYER,
                damage: GameConfig::MELEE_DAMAGE,
            });
            kill_actor(state, env, &mut events, EntityId::PLAYER);
            return Ok(events);
        }

        let segment_hit = state
            .entities
            .chain
            .iter()
            .position(|s| s.solid && s.position == target);
        if let Some(index) = segment_hit {
            if let Some(destroyed) = state.remove_segment_and_repair(index) {
                events.push(Event::SegmentDestroyed {
                    glyph: destroyed.glyph,
                    position: target,
                });
            }
            return Ok(events);
        }

        if let Some(victim) = state.entities.npc_at(target).map(|npc| npc.id) {
            damage_actor(
                state,
                env,
                &mut events,
                self.actor,
                victim,
                GameConfig::MELEE_DAMAGE,
            );
            return Ok(events);
        }

        Err(ActionError::TargetNotFound)
    }
}
