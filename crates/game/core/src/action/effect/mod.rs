//! Effect resolution for digested and spat segments.
//!
//! The catalog says *what* a segment kind does ([`DigestKind`],
//! [`SpitKind`]); this module is the *how*, shared by the digest and spit
//! transitions.

mod digest;
mod spit;

pub use digest::DigestKind;
pub use spit::SpitKind;

use crate::action::error::ActionError;
use crate::engine::Event;
use crate::env::{compute_seed, GameEnv};
use crate::state::types::{
    ActorState, AiState, BeastKind, Direction, EntityId, HealthDigit, ItemState, Polarity,
    Position, StatusApplied, StatusKind, TileKind,
};
use crate::state::GameState;
use crate::stats::Stat;

/// Domain-separation tag for corpse item draws.
const CORPSE_DRAW: u32 = 0x0c09;

/// Base duration in turns for each status-granting effect, before the
/// foresight modifier.
pub fn base_duration(kind: StatusKind) -> i32 {
    match kind {
        StatusKind::Salivating | StatusKind::PetrifyingGaze => 4,
        StatusKind::Petrified => 3,
        _ => 10,
    }
}

/// Signed foresight modifier for a status landing on `target`. Statuses
/// that work in the player's favour last longer, ones against them last
/// shorter; anything inflicted on an enemy favours the player.
pub fn duration_modifier(kind: StatusKind, target_is_player: bool, foresight: i32) -> i32 {
    if !target_is_player {
        return foresight;
    }
    match kind.polarity() {
        Polarity::Beneficial => foresight,
        Polarity::Detrimental => -foresight,
    }
}

/// Applies a status to an actor with foresight-adjusted duration.
pub fn apply_status(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
    target: EntityId,
    kind: StatusKind,
) {
    let foresight = state.foresight(env);
    let modifier = duration_modifier(kind, target.is_player(), foresight);
    let base = base_duration(kind);
    let Some(actor) = state.entities.actor_mut(target) else {
        return;
    };
    if actor.statuses.apply(kind, base, modifier) != StatusApplied::Rejected {
        events.push(Event::StatusApplied { target, kind });
    }
}

/// Deals damage to an actor; a lethal hit hands over to [`kill_actor`].
pub fn damage_actor(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
    attacker: EntityId,
    target: EntityId,
    amount: u8,
) {
    events.push(Event::MeleeHit {
        attacker,
        target,
        damage: amount,
    });
    let Some(actor) = state.entities.actor_mut(target) else {
        return;
    };
    match actor.health.damaged(amount) {
        Some(health) => actor.health = health,
        None => kill_actor(state, env, events, target),
    }
}

/// Finishes off an actor. The player stays on the map as remains; an enemy
/// leaves the floor entirely and scatters a random segment item where it
/// fell. Decoys just vanish.
pub fn kill_actor(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
    target: EntityId,
) {
    if target.is_player() {
        state.entities.player.ai = AiState::None;
        state.entities.player.intent.clear();
        events.push(Event::Killed { entity: target });
        return;
    }
    let Some(npc) = state.entities.remove_npc(target) else {
        return;
    };
    events.push(Event::Killed { entity: target });
    if npc.is_boss {
        events.push(Event::BossSlain { entity: target });
    }
    if !npc.is_decoy {
        drop_corpse(state, env, events, npc.position, target);
    }
}

fn drop_corpse(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
    position: Position,
    fallen: EntityId,
) {
    let (Ok(catalog), Ok(rng)) = (env.catalog(), env.rng()) else {
        return;
    };
    let kinds = catalog.kinds();
    if kinds.is_empty() {
        return;
    }
    let seed = compute_seed(state.game_seed, state.draw_nonce(), fallen.0, CORPSE_DRAW);
    let kind = kinds[rng.pick(seed, kinds.len())];
    // kinds the run never lettered cannot appear on the floor
    let Some(glyph) = state.identity.glyph_of(kind) else {
        return;
    };
    let id = state.allocate_entity_id();
    state
        .entities
        .place_item(ItemState::new(id, position, glyph, kind));
    events.push(Event::CorpseDropped { glyph, position });
}

/// Resolves a digest effect that follows the standard consume sequence.
/// The segment has already been removed from the chain; override kinds
/// (Reversing, Refusing) and TimeReverse never reach this function.
pub fn activate_digest(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
    kind: DigestKind,
) {
    match kind {
        DigestKind::Nothing => {}
        DigestKind::StatBoost { stat, amount } => {
            apply_status(
                state,
                env,
                events,
                EntityId::PLAYER,
                StatusKind::StatBoost { stat, amount },
            );
        }
        DigestKind::FreeSpit => {
            apply_status(state, env, events, EntityId::PLAYER, StatusKind::Salivating);
        }
        DigestKind::PetrifyingGaze => {
            apply_status(
                state,
                env,
                events,
                EntityId::PLAYER,
                StatusKind::PetrifyingGaze,
            );
        }
        DigestKind::Choking => {
            apply_status(state, env, events, EntityId::PLAYER, StatusKind::Choking);
        }
        DigestKind::ForesightBlind => {
            apply_status(
                state,
                env,
                events,
                EntityId::PLAYER,
                StatusKind::ForesightBlind,
            );
        }
        DigestKind::PetrifySelf => {
            apply_status(state, env, events, EntityId::PLAYER, StatusKind::Petrified);
        }
        DigestKind::Mapping => {
            state.grid.reveal_map();
            events.push(Event::MapRevealed);
        }
        DigestKind::TimeReverse { .. }
        | DigestKind::Reversing
        | DigestKind::Consuming
        | DigestKind::Refusing => {
            // handled by the digest transition before activation
        }
    }
}

/// Resolves a spit effect at `target`. The segment has already been taken
/// off the chain when the spit is not free.
pub fn resolve_spit(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
    kind: SpitKind,
    target: Position,
) -> Result<(), ActionError> {
    let bile = state.stat_value(Stat::Bile, env);
    match kind {
        SpitKind::Projectile { damage } => {
            let victim = npc_id_at(state, target).ok_or(ActionError::TargetNotFound)?;
            let amount = (damage as i32 + bile).max(0) as u8;
            damage_actor(state, env, events, EntityId::PLAYER, victim, amount);
        }
        SpitKind::Confusion { turns } => {
            let victim = npc_id_at(state, target).ok_or(ActionError::TargetNotFound)?;
            if let Some(npc) = state.entities.actor_mut(victim) {
                let previous = std::mem::replace(&mut npc.ai, AiState::None);
                npc.ai = AiState::Confused {
                    turns_left: turns,
                    previous: Box::new(previous),
                };
                npc.intent.clear();
                events.push(Event::Confused {
                    target: victim,
                    turns,
                });
            }
        }
        SpitKind::PetrifyEnemy => {
            let victim = npc_id_at(state, target).ok_or(ActionError::TargetNotFound)?;
            apply_status(state, env, events, victim, StatusKind::Petrified);
        }
        SpitKind::Knockback { force } => {
            let victim = npc_id_at(state, target).ok_or(ActionError::TargetNotFound)?;
            knock_back(state, events, victim, force);
        }
        SpitKind::Lightning { damage, range } => {
            let origin = state.entities.player.position;
            let victim = state
                .entities
                .npcs
                .values()
                .filter(|npc| npc.is_alive() && !npc.is_decoy)
                .filter(|npc| origin.distance(npc.position) <= range)
                .filter(|npc| state.grid.is_visible(npc.position))
                .min_by_key(|npc| (origin.distance(npc.position), npc.id))
                .map(|npc| npc.id)
                .ok_or(ActionError::TargetNotFound)?;
            let amount = (damage as i32 + bile).max(0) as u8;
            damage_actor(state, env, events, EntityId::PLAYER, victim, amount);
        }
        SpitKind::Fireball { damage, radius } => {
            let amount = (damage as i32 + bile).max(0) as u8;
            let mut caught: Vec<EntityId> = state
                .entities
                .npcs
                .values()
                .filter(|npc| npc.is_alive() && npc.position.distance(target) <= radius)
                .map(|npc| npc.id)
                .collect();
            // the blast does not spare the spitter
            if state.entities.player.position.distance(target) <= radius {
                caught.push(EntityId::PLAYER);
            }
            for id in caught {
                damage_actor(state, env, events, EntityId::PLAYER, id, amount);
            }
        }
        SpitKind::Entangling { radius } => {
            for position in state.grid.iter_positions().collect::<Vec<_>>() {
                if position.distance(target) <= radius
                    && state.grid.kind(position) == Some(TileKind::Floor)
                {
                    state.grid.set_kind(position, TileKind::SnakeOnly);
                }
            }
            events.push(Event::TerrainEntangled { centre: target });
        }
        SpitKind::Phasing => {
            apply_status(state, env, events, EntityId::PLAYER, StatusKind::PhasedOut);
        }
        SpitKind::DestroyItems => {
            const BLAST_RADIUS: u32 = 2;
            let doomed: Vec<EntityId> = state
                .entities
                .items
                .values()
                .filter(|item| item.position.distance(target) <= BLAST_RADIUS)
                .map(|item| item.id)
                .collect();
            for id in doomed {
                if let Some(item) = state.entities.take_ground_item(id) {
                    events.push(Event::ItemDestroyed {
                        glyph: item.glyph,
                        position: item.position,
                    });
                }
            }
        }
        SpitKind::Decoy => {
            let id = state.allocate_entity_id();
            let mut decoy = ActorState::new(id, target, HealthDigit::new(0), 0, BeastKind::default());
            decoy.ai = AiState::Statue;
            decoy.is_decoy = true;
            state.entities.spawn_npc(decoy);
            apply_status(state, env, events, id, StatusKind::Doomed);
            events.push(Event::DecoyPlaced { position: target });
        }
    }
    Ok(())
}

fn npc_id_at(state: &GameState, position: Position) -> Option<EntityId> {
    state.entities.npc_at(position).map(|npc| npc.id)
}

/// Shoves a target away from the player, one tile at a time, stopping at
/// the first tile it cannot enter.
fn knock_back(state: &mut GameState, events: &mut Vec<Event>, target: EntityId, force: u8) {
    let Some(npc) = state.entities.actor(target) else {
        return;
    };
    let origin = state.entities.player.position;
    let mut position = npc.position;
    let Some(dir) = Direction::from_delta(position.x - origin.x, position.y - origin.y) else {
        return;
    };
    for _ in 0..force {
        let next = position.step(dir);
        if !state.can_enter(next) {
            break;
        }
        position = next;
    }
    if let Some(npc) = state.entities.actor_mut(target) {
        npc.position = position;
        events.push(Event::KnockedBack { target, to: position });
    }
}
