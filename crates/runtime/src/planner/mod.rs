//! Enemy intent planning.
//!
//! Every living enemy gets a fresh [`Intent`] in the pre-turn phase, cached
//! on the actor so snapshots capture it and word-mode forecasting can show
//! it. Hostile actors path-find to the nearest player segment (head
//! preferred, decoys override everything); confused actors stumble through
//! random legal steps; constricted and statue actors plan nothing.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use wyrm_core::{
    AiState, Direction, EntityId, GameEnv, GameState, Intent, IntentStep, Position, StepKind,
    StatusKind, compute_seed,
};

/// Recomputes the cached intent of every living enemy.
pub fn plan_enemy_turns(state: &mut GameState, env: &GameEnv<'_>) {
    for id in state.entities.living_npc_ids() {
        plan_one(state, env, id);
    }
}

/// Enemy intents the player can currently read: word mode only, and hidden
/// entirely while foresight-blind.
pub fn visible_intents(state: &GameState) -> Vec<(EntityId, Vec<IntentStep>)> {
    if !state.turn.word_mode
        || state
            .entities
            .player
            .statuses
            .has(StatusKind::ForesightBlind)
    {
        return Vec::new();
    }
    state
        .entities
        .npcs
        .values()
        .filter(|npc| npc.is_alive() && state.grid.is_visible(npc.position))
        .map(|npc| (npc.id, npc.intent.steps().copied().collect()))
        .collect()
}

fn plan_one(state: &mut GameState, env: &GameEnv<'_>, id: EntityId) {
    let Some(npc) = state.entities.npcs.get_mut(&id) else {
        return;
    };

    // confusion runs on its own timer, not the status set
    if let AiState::Confused { turns_left, .. } = &mut npc.ai {
        if *turns_left == 0 {
            let ai = std::mem::replace(&mut npc.ai, AiState::None);
            npc.ai = ai.revert();
        } else {
            *turns_left -= 1;
        }
    }
    npc.intent.clear();

    let position = npc.position;
    let move_speed = npc.move_speed;
    let suppressed = npc.is_suppressed();
    let confused = matches!(npc.ai, AiState::Confused { .. });
    let plans = npc.ai.plans_intent();

    // a petrifying gaze freezes any enemy the player can see
    let gaze_frozen = state
        .entities
        .player
        .statuses
        .has(StatusKind::PetrifyingGaze)
        && state.grid.is_visible(position);
    if suppressed || gaze_frozen || !plans {
        return;
    }

    let intent = if confused {
        random_steps(state, env, id, position, move_speed)
    } else {
        hostile_steps(state, position, move_speed)
    };
    if let Some(npc) = state.entities.npcs.get_mut(&id) {
        npc.intent = intent;
    }
}

/// Random legal steps, one nonce draw per step.
fn random_steps(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    from: Position,
    move_speed: u8,
) -> Intent {
    let mut intent = Intent::empty();
    let Ok(rng) = env.rng() else {
        return intent;
    };
    let mut at = from;
    for roll in 0..move_speed {
        let legal: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| state.can_enter(at.step(*dir)))
            .collect();
        if legal.is_empty() {
            break;
        }
        let seed = compute_seed(state.game_seed, state.draw_nonce(), id.0, roll as u32);
        let dir = legal[rng.pick(seed, legal.len())];
        if !intent.push(IntentStep {
            dir,
            kind: StepKind::Step,
        }) {
            break;
        }
        at = at.step(dir);
    }
    intent
}

fn hostile_steps(state: &GameState, from: Position, move_speed: u8) -> Intent {
    let goals = hunt_targets(state);
    let mut intent = Intent::empty();
    let speed = move_speed as usize;

    let Some(route) = route(state, from, &goals) else {
        // boxed in: try a single greedy step toward the nearest goal
        if let Some(goal) = goals.iter().copied().min_by_key(|g| from.distance(*g))
            && let Some(dir) = Direction::from_delta(goal.x - from.x, goal.y - from.y)
            && state.can_enter(from.step(dir))
        {
            intent.push(IntentStep {
                dir,
                kind: StepKind::Step,
            });
        }
        return intent;
    };

    if route.steps.len() < speed {
        // the walk finishes with movement to spare: close with a strike
        for dir in route.steps {
            intent.push(IntentStep {
                dir,
                kind: StepKind::Step,
            });
        }
        intent.push(IntentStep {
            dir: route.strike,
            kind: StepKind::Strike,
        });
    } else {
        for dir in route.steps.into_iter().take(speed) {
            intent.push(IntentStep {
                dir,
                kind: StepKind::Step,
            });
        }
    }
    intent
}

/// What hostile enemies hunt. A living decoy overrides the player entirely;
/// otherwise the head is listed first so ties prefer it over body segments.
fn hunt_targets(state: &GameState) -> Vec<Position> {
    let decoys: Vec<Position> = state
        .entities
        .npcs
        .values()
        .filter(|npc| npc.is_alive() && npc.is_decoy)
        .map(|npc| npc.position)
        .collect();
    if !decoys.is_empty() {
        return decoys;
    }
    let mut goals = vec![state.entities.player.position];
    goals.extend(state.entities.chain.solid_positions());
    goals
}

struct Route {
    steps: Vec<Direction>,
    strike: Direction,
}

/// 8-way BFS over enterable tiles to the first tile adjacent to a goal.
/// Neighbour expansion follows `Direction::ALL`, so routes are
/// deterministic for a given state.
fn route(state: &GameState, from: Position, goals: &[Position]) -> Option<Route> {
    let mut parents: BTreeMap<Position, (Position, Direction)> = BTreeMap::new();
    let mut seen: BTreeSet<Position> = BTreeSet::new();
    let mut queue: VecDeque<Position> = VecDeque::new();
    seen.insert(from);
    queue.push_back(from);

    while let Some(tile) = queue.pop_front() {
        for &goal in goals {
            if !tile.is_adjacent(goal) {
                continue;
            }
            let strike = Direction::from_delta(goal.x - tile.x, goal.y - tile.y)?;
            let mut steps = Vec::new();
            let mut cursor = tile;
            while cursor != from {
                match parents.get(&cursor) {
                    Some(&(prev, dir)) => {
                        steps.push(dir);
                        cursor = prev;
                    }
                    None => return None,
                }
            }
            steps.reverse();
            return Some(Route { steps, strike });
        }
        for dir in Direction::ALL {
            let next = tile.step(dir);
            if seen.contains(&next) || !state.can_enter(next) {
                continue;
            }
            seen.insert(next);
            parents.insert(next, (tile, dir));
            queue.push_back(next);
        }
    }
    None
}
