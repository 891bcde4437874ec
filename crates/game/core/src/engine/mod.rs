//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for
//! [`GameState`](crate::state::GameState): every mutation flows through
//! `execute`, which validates against the untouched state and either
//! applies the action and reports events, or rejects it leaving the state
//! as it was.

mod events;
mod transition;

pub use events::Event;

use crate::action::{Action, ActionError};
use crate::env::GameEnv;
use crate::state::GameState;

/// Game engine that executes actions against a borrowed state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes one action. An `Err` whose [`ActionError::is_impossible`]
    /// is true means the request was rejected cleanly: no mutation took
    /// place and no turn should be consumed.
    pub fn execute(
        &mut self,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<Vec<Event>, ActionError> {
        transition::execute_transition(action, self.state, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::{DigestKind, SpitKind};
    use crate::action::ActionKind;
    use crate::env::{
        BestiaryOracle, CatalogOracle, Env, PcgRng, SegmentDefinition, WordOracle,
    };
    use crate::state::types::{
        ActorState, BeastKind, Direction, EntityId, Glyph, HealthDigit, ItemState, Position,
        Rarity, SegmentKind, StatusKind, TileGrid, TileKind,
    };
    use crate::stats::Stat;

    struct TestCatalog;

    impl CatalogOracle for TestCatalog {
        fn segment(&self, kind: SegmentKind) -> Option<SegmentDefinition> {
            let def = match kind.0 {
                0 => SegmentDefinition {
                    name: "nutrition",
                    rarity: Rarity::Common,
                    digest: DigestKind::Nothing,
                    spit: SpitKind::Projectile { damage: 1 },
                    passive: None,
                },
                1 => SegmentDefinition {
                    name: "bile",
                    rarity: Rarity::Uncommon,
                    digest: DigestKind::StatBoost {
                        stat: Stat::Bile,
                        amount: 2,
                    },
                    spit: SpitKind::Projectile { damage: 2 },
                    passive: Some((Stat::Bile, 1)),
                },
                2 => SegmentDefinition {
                    name: "refusal",
                    rarity: Rarity::Rare,
                    digest: DigestKind::Refusing,
                    spit: SpitKind::Projectile { damage: 1 },
                    passive: None,
                },
                3 => SegmentDefinition {
                    name: "rewind",
                    rarity: Rarity::Rare,
                    digest: DigestKind::TimeReverse { turns: 3 },
                    spit: SpitKind::Projectile { damage: 1 },
                    passive: None,
                },
                _ => return None,
            };
            Some(def)
        }

        fn kinds(&self) -> Vec<SegmentKind> {
            (0..4).map(SegmentKind).collect()
        }
    }

    struct NoWords;

    impl WordOracle for NoWords {
        fn is_valid_word(&self, _word: &str) -> bool {
            false
        }
    }

    struct NoBeasts;

    impl BestiaryOracle for NoBeasts {
        fn beast(&self, _kind: BeastKind) -> Option<crate::env::BeastDefinition> {
            None
        }
        fn spawnable_on(&self, _floor: u32) -> Vec<BeastKind> {
            Vec::new()
        }
        fn boss(&self) -> BeastKind {
            BeastKind(0)
        }
    }

    fn fixture() -> (GameState, TestCatalog, NoBeasts, NoWords, PcgRng) {
        let mut grid = TileGrid::filled_with_walls(12, 12);
        for p in grid.iter_positions().collect::<Vec<_>>() {
            if p.x > 0 && p.y > 0 && p.x < 11 && p.y < 11 {
                grid.set_kind(p, TileKind::Floor);
            }
        }
        let mut state = GameState::new(99, grid, Position::new(5, 5), Position::new(10, 10));
        state.identity.assign(Glyph('a'), SegmentKind(0));
        state.identity.assign(Glyph('b'), SegmentKind(1));
        state.identity.assign(Glyph('r'), SegmentKind(2));
        state.identity.assign(Glyph('t'), SegmentKind(3));
        (state, TestCatalog, NoBeasts, NoWords, PcgRng)
    }

    macro_rules! game_env {
        ($c:expr, $b:expr, $w:expr, $r:expr) => {
            Env::with_all(&$c, &$b, &$w, &$r).as_game_env()
        };
    }

    fn ground_item(state: &mut GameState, x: i32, y: i32, glyph: char, kind: u16) -> EntityId {
        let id = state.allocate_entity_id();
        state.entities.place_item(ItemState::new(
            id,
            Position::new(x, y),
            Glyph(glyph),
            SegmentKind(kind),
        ));
        id
    }

    fn spawn_enemy(state: &mut GameState, x: i32, y: i32, health: u8) -> EntityId {
        let id = state.allocate_entity_id();
        state.entities.spawn_npc(ActorState::new(
            id,
            Position::new(x, y),
            HealthDigit::new(health),
            1,
            BeastKind(0),
        ));
        id
    }

    #[test]
    fn moving_onto_a_letter_swallows_it() {
        let (mut state, c, b, w, r) = fixture();
        ground_item(&mut state, 6, 5, 'a', 0);
        let env = game_env!(c, b, w, r);
        let events = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::Move { dir: Direction::East }))
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::SegmentSwallowed { glyph } if glyph.0 == 'a')));
        assert_eq!(state.entities.chain.len(), 1);
        assert!(state.entities.ground_item_at(Position::new(6, 5)).is_none());
    }

    #[test]
    fn moving_into_a_wall_mutates_nothing() {
        let (mut state, c, b, w, r) = fixture();
        state.entities.player.position = Position::new(1, 1);
        let before = state.clone();
        let env = game_env!(c, b, w, r);
        let err = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::Move { dir: Direction::West }))
            .unwrap_err();
        assert!(err.is_impossible());
        assert_eq!(state, before);
    }

    #[test]
    fn bump_into_an_enemy_is_a_strike() {
        let (mut state, c, b, w, r) = fixture();
        let enemy = spawn_enemy(&mut state, 6, 5, 3);
        let env = game_env!(c, b, w, r);
        let events = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::Bump { dir: Direction::East }))
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::MeleeHit { target, .. } if *target == enemy)));
        assert_eq!(
            state.entities.actor(enemy).unwrap().health,
            HealthDigit::new(2)
        );
        // player did not move
        assert_eq!(state.entities.player.position, Position::new(5, 5));
    }

    #[test]
    fn digesting_identifies_the_glyph_for_the_rest_of_the_run() {
        let (mut state, c, b, w, r) = fixture();
        let id = ground_item(&mut state, 5, 5, 'b', 1);
        if let Some(item) = state.entities.take_ground_item(id) {
            state.entities.chain.swallow(item);
        }
        let env = game_env!(c, b, w, r);
        let events = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::Digest { index: 0 }))
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Identified { glyph, .. } if glyph.0 == 'b')));
        assert!(state.identity.is_identified(Glyph('b')));
        assert!(state.entities.chain.is_empty());
        // the boost landed
        assert!(state
            .entities
            .player
            .statuses
            .has(StatusKind::StatBoost {
                stat: Stat::Bile,
                amount: 0
            }));
    }

    #[test]
    fn refusing_segments_reject_digestion_without_a_turn() {
        let (mut state, c, b, w, r) = fixture();
        let id = ground_item(&mut state, 5, 5, 'r', 2);
        if let Some(item) = state.entities.take_ground_item(id) {
            state.entities.chain.swallow(item);
        }
        let before = state.clone();
        let env = game_env!(c, b, w, r);
        let err = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::Digest { index: 0 }))
            .unwrap_err();
        assert_eq!(err, ActionError::SegmentRefuses);
        assert_eq!(state, before);
    }

    #[test]
    fn time_reversal_defers_to_the_runtime() {
        let (mut state, c, b, w, r) = fixture();
        let id = ground_item(&mut state, 5, 5, 't', 3);
        if let Some(item) = state.entities.take_ground_item(id) {
            state.entities.chain.swallow(item);
        }
        let env = game_env!(c, b, w, r);
        let events = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::Digest { index: 0 }))
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::TimeReversal { turns: 3, .. })));
        // the segment is still on the chain: the runtime strips it after
        // the rewind resolves
        assert_eq!(state.entities.chain.len(), 1);
    }

    #[test]
    fn spitting_at_an_unseen_tile_is_impossible() {
        let (mut state, c, b, w, r) = fixture();
        let id = ground_item(&mut state, 5, 5, 'a', 0);
        if let Some(item) = state.entities.take_ground_item(id) {
            state.entities.chain.swallow(item);
        }
        spawn_enemy(&mut state, 9, 9, 2);
        // visibility never refreshed: everything is unseen
        let env = game_env!(c, b, w, r);
        let err = GameEngine::new(&mut state)
            .execute(
                &env,
                &Action::player(ActionKind::Spit {
                    index: 0,
                    target: Position::new(9, 9),
                }),
            )
            .unwrap_err();
        assert_eq!(err, ActionError::TargetNotVisible);
    }

    #[test]
    fn spit_consumes_the_segment_and_damages_the_target() {
        let (mut state, c, b, w, r) = fixture();
        let id = ground_item(&mut state, 5, 5, 'a', 0);
        if let Some(item) = state.entities.take_ground_item(id) {
            state.entities.chain.swallow(item);
        }
        let enemy = spawn_enemy(&mut state, 7, 5, 3);
        let env = game_env!(c, b, w, r);
        state.refresh_visibility(&env);
        let events = GameEngine::new(&mut state)
            .execute(
                &env,
                &Action::player(ActionKind::Spit {
                    index: 0,
                    target: Position::new(7, 5),
                }),
            )
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::SegmentSpat { .. })));
        assert!(state.entities.chain.is_empty());
        assert_eq!(
            state.entities.actor(enemy).unwrap().health,
            HealthDigit::new(2)
        );
        assert!(state.identity.is_identified(Glyph('a')));
    }

    #[test]
    fn stairs_require_standing_on_them() {
        let (mut state, c, b, w, r) = fixture();
        let env = game_env!(c, b, w, r);
        let err = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::TakeStairs))
            .unwrap_err();
        assert_eq!(err, ActionError::NotOnStairs);

        state.grid.set_kind(Position::new(5, 5), TileKind::DownStairs);
        let events = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::TakeStairs))
            .unwrap();
        assert_eq!(events, vec![Event::DescendedStairs]);
    }

    #[test]
    fn dead_enemies_leave_the_floor_and_drop_a_segment() {
        let (mut state, c, b, w, r) = fixture();
        let enemy = spawn_enemy(&mut state, 6, 5, 0);
        let env = game_env!(c, b, w, r);
        let events = GameEngine::new(&mut state)
            .execute(&env, &Action::player(ActionKind::Melee { dir: Direction::East }))
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Killed { entity } if *entity == enemy)));
        assert!(state.entities.actor(enemy).is_none());
        assert!(state.can_enter(Position::new(6, 5)));
        // what falls out of a dead enemy is a swallowable letter
        let corpse = state.entities.ground_item_at(Position::new(6, 5)).unwrap();
        assert_eq!(state.identity.kind_of(corpse.glyph), Some(corpse.kind));
    }
}
