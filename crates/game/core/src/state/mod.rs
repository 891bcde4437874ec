//! Authoritative game state.
//!
//! This module owns the data structures describing one floor of a run plus
//! the turn bookkeeping. Runtime layers clone or query this state but
//! mutate it exclusively through the engine's action pipeline.

pub mod types;

use crate::config::GameConfig;
use crate::env::{CatalogOracle, GameEnv};
use crate::fov;
use crate::stats::Stat;

pub use types::{
    ActorState, AiState, BeastKind, BodyChain, Direction, EntitiesState, EntityId, Glyph,
    HealthDigit, IdentityTable, Intent, IntentStep, ItemState, Position, Rarity, RenderPriority,
    SegmentKind, StatusEffect, StatusEffects, StatusKind, StepKind, TileFlags, TileGrid, TileKind,
};

/// Turn bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Completed turns.
    pub count: u64,
    /// Per-roll entropy counter; bumped for every randomness draw so two
    /// rolls in one turn never share a seed.
    pub nonce: u64,
    /// Whether the chain currently spells a dictionary word.
    pub word_mode: bool,
}

/// Canonical snapshot of the deterministic game state for one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Set once at run start, never modified; combined with `turn.nonce`
    /// for every in-turn random draw.
    pub game_seed: u64,
    /// Monotonic id allocator. Never reused, survives floor descents and
    /// rewinds so ids stay unique across the whole run.
    next_entity_id: u32,
    pub turn: TurnState,
    /// 1-based floor number.
    pub floor: u32,
    pub entities: EntitiesState,
    pub grid: TileGrid,
    pub identity: IdentityTable,
    /// Where the stairs were carved (unused on the boss floor).
    pub downstairs: Position,
}

impl GameState {
    pub fn new(
        game_seed: u64,
        grid: TileGrid,
        player_position: Position,
        downstairs: Position,
    ) -> Self {
        Self {
            game_seed,
            next_entity_id: 1,
            turn: TurnState::default(),
            floor: 1,
            entities: EntitiesState::new(ActorState::player(player_position)),
            grid,
            identity: IdentityTable::empty(),
            downstairs,
        }
    }

    /// Allocates a fresh unique id. Saturates rather than wraps; a run
    /// cannot plausibly allocate four billion entities.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        id
    }

    pub fn next_entity_id(&self) -> u32 {
        self.next_entity_id
    }

    /// Restores the allocator watermark, only ever upward. Used when an
    /// older snapshot is brought back and must not re-issue ids that were
    /// handed out after it was taken.
    pub fn restore_entity_watermark(&mut self, watermark: u32) {
        self.next_entity_id = self.next_entity_id.max(watermark);
    }

    /// Bumps and returns the nonce for one random draw.
    pub fn draw_nonce(&mut self) -> u64 {
        let nonce = self.turn.nonce;
        self.turn.nonce += 1;
        nonce
    }

    // ------------------------------------------------------------------
    // Terrain and occupancy queries
    // ------------------------------------------------------------------

    /// Whether an actor can step onto `position`: walkable terrain with no
    /// blocking occupant.
    pub fn can_enter(&self, position: Position) -> bool {
        self.grid.is_walkable(position) && !self.entities.blocks_movement_at(position)
    }

    /// Whether a chain segment may rest on `position` (snake-only terrain
    /// admits segments that actors cannot follow onto).
    pub fn segment_can_rest(&self, position: Position) -> bool {
        self.grid.is_snakeable(position) && !self.entities.blocks_movement_at(position)
    }

    /// True when no adjacent tile can be entered and the actor is not
    /// standing on the stairs. For the player this is lethal.
    pub fn is_trapped(&self, position: Position) -> bool {
        let on_stairs = self.grid.kind(position) == Some(TileKind::DownStairs);
        !on_stairs && position.neighbours().all(|n| !self.can_enter(n))
    }

    /// Adjacent tiles held by the player's head or solid segments. Feeds
    /// constriction damage.
    pub fn adjacent_coil_count(&self, position: Position) -> u32 {
        position
            .neighbours()
            .filter(|&n| {
                self.entities.player.position == n
                    || self.entities.chain.segment_at(n).is_some()
            })
            .count() as u32
    }

    /// An enemy with no free adjacent tile is held fast by the coils.
    pub fn is_surrounded(&self, position: Position) -> bool {
        position.neighbours().all(|n| !self.can_enter(n))
    }

    // ------------------------------------------------------------------
    // Stats
    // ------------------------------------------------------------------

    /// Current value of a player stat: timed boosts always count, passive
    /// segment bonuses only while the chain spells a word.
    pub fn stat_value(&self, stat: Stat, env: &GameEnv<'_>) -> i32 {
        let mut value = self.entities.player.statuses.stat_bonus(stat);
        if self.turn.word_mode
            && let Ok(catalog) = env.catalog()
        {
            value += self.passive_bonus(stat, catalog);
        }
        value
    }

    fn passive_bonus(&self, stat: Stat, catalog: &dyn CatalogOracle) -> i32 {
        self.entities
            .chain
            .iter()
            .filter_map(|segment| catalog.segment(segment.kind))
            .filter_map(|def| def.passive)
            .filter(|(s, _)| *s == stat)
            .map(|(_, amount)| amount as i32)
            .sum()
    }

    /// Foresight shortens bad statuses, lengthens good ones, and reveals
    /// intents in word mode.
    pub fn foresight(&self, env: &GameEnv<'_>) -> i32 {
        self.stat_value(Stat::Mind, env)
    }

    pub fn fov_radius(&self, env: &GameEnv<'_>) -> u32 {
        let radius = GameConfig::BASE_FOV_RADIUS as i32 + self.stat_value(Stat::Tongue, env);
        radius.max(1) as u32
    }

    /// Recomputes the visible overlay from the player's position.
    pub fn refresh_visibility(&mut self, env: &GameEnv<'_>) {
        let radius = self.fov_radius(env);
        let visible = fov::compute(&self.grid, self.entities.player.position, radius);
        self.grid.apply_visibility(&visible);
    }

    // ------------------------------------------------------------------
    // Movement and chain propagation
    // ------------------------------------------------------------------

    /// Moves an actor one step without validation (the action pipeline
    /// validates first). A player move drags the chain behind the head.
    pub fn move_actor(&mut self, id: EntityId, direction: Direction) {
        if id.is_player() {
            let footprint = self.entities.player.position;
            self.entities.player.position = footprint.step(direction);
            self.propagate_chain(footprint, 0);
        } else if let Some(npc) = self.entities.actor_mut(id) {
            npc.position = npc.position.step(direction);
        }
    }

    /// Walks the chain from `start_index`, pulling each solid segment onto
    /// the footprint of the element ahead. The walk ends at the first
    /// non-solid segment, which solidifies in place when its tile is clear
    /// and otherwise waits for a later pass.
    pub fn propagate_chain(&mut self, footprint: Position, start_index: usize) {
        let mut footprint = footprint;
        let mut index = start_index;
        loop {
            let Some(segment) = self.entities.chain.get(index) else {
                return;
            };
            if segment.solid {
                let vacated = segment.position;
                let segment = self
                    .entities
                    .chain
                    .get_mut(index)
                    .unwrap_or_else(|| unreachable!());
                segment.position = footprint;
                footprint = vacated;
                index += 1;
                continue;
            }
            let tile = segment.position;
            let clear = !self.entities.blocks_movement_at(tile)
                && self.entities.player.position != tile;
            if clear && let Some(segment) = self.entities.chain.get_mut(index) {
                segment.solid = true;
            }
            return;
        }
    }

    /// Removes the chain segment at `index` and closes the gap by pulling
    /// the segments behind it forward onto its tile.
    pub fn remove_segment_and_repair(&mut self, index: usize) -> Option<ItemState> {
        let removed = self.entities.chain.remove(index)?;
        if removed.solid {
            self.propagate_chain(removed.position, index);
        }
        Some(removed)
    }

    /// The word the chain currently spells.
    pub fn chain_word(&self) -> String {
        self.entities.chain.glyph_word()
    }

    // ------------------------------------------------------------------
    // Rendering queries
    // ------------------------------------------------------------------

    /// Every visible entity as `(position, glyph, priority)`, for callers
    /// that draw the grid. Higher priority draws on top.
    pub fn render_entities(&self) -> Vec<(Position, char, RenderPriority)> {
        let mut out = Vec::new();
        for item in self.entities.items.values() {
            if self.grid.is_visible(item.position) {
                out.push((item.position, item.glyph.as_char(), item.render_priority()));
            }
        }
        for segment in self.entities.chain.iter() {
            out.push((
                segment.position,
                segment.glyph.as_char(),
                segment.render_priority(),
            ));
        }
        for npc in self.entities.npcs.values() {
            if npc.is_alive() && self.grid.is_visible(npc.position) {
                out.push((npc.position, npc.glyph(), npc.render_priority()));
            }
        }
        let player = &self.entities.player;
        if player.is_alive() {
            out.push((player.position, player.glyph(), player.render_priority()));
        }
        out.sort_by_key(|(_, _, priority)| *priority);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::item::Glyph;

    fn open_state() -> GameState {
        let mut grid = TileGrid::filled_with_walls(10, 10);
        for p in grid.iter_positions().collect::<Vec<_>>() {
            if p.x > 0 && p.y > 0 && p.x < 9 && p.y < 9 {
                grid.set_kind(p, TileKind::Floor);
            }
        }
        GameState::new(7, grid, Position::new(5, 5), Position::new(8, 8))
    }

    fn swallowed(state: &mut GameState, x: i32, y: i32, glyph: char, solid: bool) {
        let id = state.allocate_entity_id();
        let mut item = ItemState::new(id, Position::new(x, y), Glyph(glyph), SegmentKind(0));
        item.solid = solid;
        state.entities.chain.swallow(item);
        if solid {
            if let Some(segment) = state.entities.chain.iter_mut().last() {
                segment.solid = true;
            }
        }
    }

    #[test]
    fn chain_follows_the_head_footprint() {
        let mut state = open_state();
        swallowed(&mut state, 4, 5, 'a', true);
        swallowed(&mut state, 3, 5, 'b', true);

        state.move_actor(EntityId::PLAYER, Direction::East);

        assert_eq!(state.entities.player.position, Position::new(6, 5));
        assert_eq!(
            state.entities.chain.get(0).unwrap().position,
            Position::new(5, 5)
        );
        assert_eq!(
            state.entities.chain.get(1).unwrap().position,
            Position::new(4, 5)
        );
    }

    #[test]
    fn chain_length_and_order_survive_movement() {
        let mut state = open_state();
        swallowed(&mut state, 4, 5, 'a', true);
        swallowed(&mut state, 3, 5, 'b', true);
        swallowed(&mut state, 2, 5, 'c', true);

        state.move_actor(EntityId::PLAYER, Direction::North);
        state.move_actor(EntityId::PLAYER, Direction::East);

        assert_eq!(state.entities.chain.len(), 3);
        assert_eq!(state.chain_word(), "abc");
        // positions form a connected 8-adjacent path rooted at the head
        let mut prev = state.entities.player.position;
        for segment in state.entities.chain.iter().filter(|s| s.solid) {
            assert!(prev.is_adjacent(segment.position));
            prev = segment.position;
        }
    }

    #[test]
    fn non_solid_tail_solidifies_once_vacated() {
        let mut state = open_state();
        // freshly swallowed under the head: stays non-solid while occupied
        swallowed(&mut state, 5, 5, 'x', false);
        state.propagate_chain(state.entities.player.position, 0);
        assert!(!state.entities.chain.get(0).unwrap().solid);

        state.move_actor(EntityId::PLAYER, Direction::East);
        assert!(state.entities.chain.get(0).unwrap().solid);
        assert_eq!(
            state.entities.chain.get(0).unwrap().position,
            Position::new(5, 5)
        );
    }

    #[test]
    fn removing_a_segment_closes_the_gap() {
        let mut state = open_state();
        swallowed(&mut state, 4, 5, 'a', true);
        swallowed(&mut state, 3, 5, 'b', true);
        swallowed(&mut state, 2, 5, 'c', true);

        let removed = state.remove_segment_and_repair(1).unwrap();
        assert_eq!(removed.glyph, Glyph('b'));
        assert_eq!(state.chain_word(), "ac");
        // 'c' stepped forward into b's old tile
        assert_eq!(
            state.entities.chain.get(1).unwrap().position,
            Position::new(3, 5)
        );
    }

    #[test]
    fn trapped_means_no_exit_off_stairs() {
        let mut state = open_state();
        let centre = Position::new(5, 5);
        for n in centre.neighbours() {
            state.grid.set_kind(n, TileKind::Wall);
        }
        assert!(state.is_trapped(centre));
        state.grid.set_kind(centre, TileKind::DownStairs);
        assert!(!state.is_trapped(centre));
    }

    #[test]
    fn entity_ids_are_never_reused() {
        let mut state = open_state();
        let a = state.allocate_entity_id();
        let b = state.allocate_entity_id();
        assert_ne!(a, b);
        state.restore_entity_watermark(100);
        assert_eq!(state.allocate_entity_id(), EntityId(100));
        // restoring a lower watermark must not roll the allocator back
        state.restore_entity_watermark(5);
        assert_eq!(state.allocate_entity_id(), EntityId(101));
    }
}
