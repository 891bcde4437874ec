//! Segment transitions: pickup, digest, spit.

use crate::action::effect::{self, DigestKind};
use crate::action::error::ActionError;
use crate::action::kinds::ready_actor;
use crate::action::ActionTransition;
use crate::engine::Event;
use crate::env::{compute_seed, GameEnv, OracleError, SegmentDefinition};
use crate::state::types::{Glyph, SegmentKind, StatusKind};
use crate::state::{EntityId, GameState, Position};

fn definition(
    env: &GameEnv<'_>,
    kind: SegmentKind,
) -> Result<SegmentDefinition, ActionError> {
    env.catalog()?
        .segment(kind)
        .ok_or(ActionError::Oracle(OracleError::CatalogNotAvailable))
}

fn identify(state: &mut GameState, events: &mut Vec<Event>, glyph: Glyph, kind: SegmentKind) {
    if state.identity.identify(glyph) {
        events.push(Event::Identified { glyph, kind });
    }
}

/// Swallow the letter under the head without moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupAction;

impl ActionTransition for PickupAction {
    fn actor(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        let player = ready_actor(state, EntityId::PLAYER)?;
        state
            .entities
            .ground_item_at(player.position)
            .ok_or(ActionError::NoItemHere)?;
        if state.entities.chain.is_full() {
            return Err(ActionError::ChainFull);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError> {
        let position = state.entities.player.position;
        let id = state
            .entities
            .ground_item_at(position)
            .map(|item| item.id)
            .ok_or(ActionError::NoItemHere)?;
        let item = state
            .entities
            .take_ground_item(id)
            .ok_or(ActionError::NoItemHere)?;
        let glyph = item.glyph;
        state.entities.chain.swallow(item);
        Ok(vec![Event::SegmentSwallowed { glyph }])
    }
}

/// Digest the chain segment at `index`.
///
/// The standard sequence is remove, activate, identify, then let the chain
/// close the gap. A few kinds override it: refusing segments reject the
/// action outright, reversing segments flip the chain, consuming segments
/// drag a neighbour down with them, and time-reversing segments defer to
/// the runtime entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigestAction {
    pub index: usize,
}

impl ActionTransition for DigestAction {
    fn actor(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        ready_actor(state, EntityId::PLAYER)?;
        let segment = state
            .entities
            .chain
            .get(self.index)
            .ok_or(ActionError::NoSuchSegment(self.index))?;
        let def = definition(env, segment.kind)?;
        if def.digest == DigestKind::Refusing {
            return Err(ActionError::SegmentRefuses);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError> {
        let mut events = Vec::new();
        let segment = state
            .entities
            .chain
            .get(self.index)
            .ok_or(ActionError::NoSuchSegment(self.index))?;
        let (item_id, glyph, kind) = (segment.id, segment.glyph, segment.kind);
        let def = definition(env, kind)?;

        match def.digest {
            DigestKind::TimeReverse { turns } => {
                // nothing to do here: the runtime rewinds the timeline and
                // strips this segment from whatever state comes back
                events.push(Event::TimeReversal {
                    turns,
                    item: item_id,
                });
                return Ok(events);
            }
            DigestKind::Reversing => {
                state.remove_segment_and_repair(self.index);
                events.push(Event::SegmentDigested { glyph });
                state.entities.chain.reverse_solid();
                events.push(Event::ChainReversed);
            }
            DigestKind::Consuming => {
                // a neighbour goes down with it, identified on the way
                let neighbour = self.pick_neighbour(state, env);
                events.push(Event::SegmentDigested { glyph });
                match neighbour {
                    Some(n) if n > self.index => {
                        if let Some(eaten) = state.remove_segment_and_repair(n) {
                            identify(state, &mut events, eaten.glyph, eaten.kind);
                            events.push(Event::SegmentDigested { glyph: eaten.glyph });
                        }
                        state.remove_segment_and_repair(self.index);
                    }
                    Some(n) => {
                        state.remove_segment_and_repair(self.index);
                        if let Some(eaten) = state.remove_segment_and_repair(n) {
                            identify(state, &mut events, eaten.glyph, eaten.kind);
                            events.push(Event::SegmentDigested { glyph: eaten.glyph });
                        }
                    }
                    None => {
                        state.remove_segment_and_repair(self.index);
                    }
                }
            }
            _ => {
                state.remove_segment_and_repair(self.index);
                events.push(Event::SegmentDigested { glyph });
                effect::activate_digest(state, env, &mut events, def.digest);
            }
        }

        identify(state, &mut events, glyph, kind);
        Ok(events)
    }
}

impl DigestAction {
    /// Picks the neighbour a consuming segment eats: the only one that
    /// exists, or a coin flip when both sides are occupied.
    fn pick_neighbour(&self, state: &mut GameState, env: &GameEnv<'_>) -> Option<usize> {
        let before = self.index.checked_sub(1);
        let after = (self.index + 1 < state.entities.chain.len()).then_some(self.index + 1);
        match (before, after) {
            (Some(b), Some(a)) => {
                let rng = env.rng().ok()?;
                let seed = compute_seed(state.game_seed, state.draw_nonce(), 0, 0);
                Some(if rng.chance(seed, 1, 2) { b } else { a })
            }
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }
}

/// Spit the chain segment at `index` toward a visible target tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpitAction {
    pub index: usize,
    pub target: Position,
}

impl ActionTransition for SpitAction {
    fn actor(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let player = ready_actor(state, EntityId::PLAYER)?;
        if player.statuses.has(StatusKind::Choking) {
            return Err(ActionError::Choking);
        }
        let segment = state
            .entities
            .chain
            .get(self.index)
            .ok_or(ActionError::NoSuchSegment(self.index))?;
        if !state.grid.is_visible(self.target) {
            return Err(ActionError::TargetNotVisible);
        }
        let def = definition(env, segment.kind)?;
        use crate::action::effect::SpitKind;
        match def.spit {
            SpitKind::Projectile { .. }
            | SpitKind::Confusion { .. }
            | SpitKind::PetrifyEnemy
            | SpitKind::Knockback { .. } => {
                state
                    .entities
                    .npc_at(self.target)
                    .ok_or(ActionError::TargetNotFound)?;
            }
            SpitKind::Lightning { range, .. } => {
                let origin = player.position;
                let reachable = state.entities.npcs.values().any(|npc| {
                    npc.is_alive()
                        && !npc.is_decoy
                        && origin.distance(npc.position) <= range
                        && state.grid.is_visible(npc.position)
                });
                if !reachable {
                    return Err(ActionError::TargetNotFound);
                }
            }
            SpitKind::Decoy => {
                if !state.can_enter(self.target) {
                    return Err(ActionError::Occupied);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Event>, ActionError> {
        let mut events = Vec::new();
        let segment = state
            .entities
            .chain
            .get(self.index)
            .ok_or(ActionError::NoSuchSegment(self.index))?;
        let (glyph, kind) = (segment.glyph, segment.kind);
        let def = definition(env, kind)?;

        let salivating = state
            .entities
            .player
            .statuses
            .has(StatusKind::Salivating);
        let free = salivating && def.spit.free_while_salivating();
        if !free {
            state.remove_segment_and_repair(self.index);
        }

        events.push(Event::SegmentSpat {
            glyph,
            target: self.target,
        });
        effect::resolve_spit(state, env, &mut events, def.spit, self.target)?;
        identify(state, &mut events, glyph, kind);
        Ok(events)
    }
}
