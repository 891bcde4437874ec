//! The turn loop.
//!
//! One call to [`TurnScheduler::player_action`] drives a full cycle: the
//! player's action through the engine, execution of the intents enemies
//! cached last turn, status ticks, planning of next turn's intents,
//! word-mode recheck and the end-of-turn snapshot. Planning runs after
//! execution so the cached intents survive between turns for forecasting.
//! A rejected player action consumes nothing. Time reversal and stair
//! descents are the two events the core cannot resolve itself; the
//! scheduler intercepts them.

use wyrm_core::action::effect;
use wyrm_core::{
    Action, ActionKind, ActorState, AiState, BestiaryOracle, CatalogOracle, EntityId, Env, Event,
    GameEngine, GameState, IntentStep, ItemState, PcgRng, Stat, StatusKind, StepKind, WordOracle,
};
use wyrm_content::GenerationConfig;

use crate::error::{Result, RuntimeError};
use crate::planner;
use crate::procgen::{FloorBlueprint, Generator, ItemSpawn, MonsterSpawn};
use crate::timeline::Timeline;

/// Where the run stands after a completed cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Playing,
    Dead,
    Victory,
}

/// Everything that happened during one scheduler cycle, in order.
#[derive(Debug)]
pub struct TurnReport {
    pub events: Vec<Event>,
    pub outcome: RunOutcome,
}

/// Builds the oracle aggregate from the scheduler's own fields. Expanded
/// inline so the borrows stay field-precise next to `&mut self.state`.
macro_rules! game_env {
    ($sched:expr) => {
        Env::with_all(
            &$sched.catalog,
            &$sched.bestiary,
            &$sched.words,
            &$sched.rng,
        )
        .as_game_env()
    };
}

pub struct TurnScheduler<C, B, W> {
    state: GameState,
    timeline: Timeline,
    config: GenerationConfig,
    catalog: C,
    bestiary: B,
    words: W,
    rng: PcgRng,
    outcome: RunOutcome,
}

impl<C, B, W> TurnScheduler<C, B, W>
where
    C: CatalogOracle,
    B: BestiaryOracle,
    W: WordOracle,
{
    /// Starts a fresh run: generates the first floor, deals the run's glyph
    /// identities and records the opening snapshot.
    pub fn new(
        game_seed: u64,
        config: GenerationConfig,
        catalog: C,
        bestiary: B,
        words: W,
    ) -> Result<Self> {
        let (blueprint, identity) = {
            let generator = Generator::new(&config, &catalog, &bestiary);
            (
                generator.generate(game_seed, 1),
                generator.assign_glyphs(game_seed),
            )
        };
        let FloorBlueprint {
            grid,
            player_start,
            downstairs,
            monsters,
            items,
        } = blueprint;
        let mut state = GameState::new(game_seed, grid, player_start, downstairs);
        state.identity = identity;
        stock_floor(&mut state, &bestiary, monsters, items);

        let mut scheduler = Self {
            state,
            timeline: Timeline::new(),
            config,
            catalog,
            bestiary,
            words,
            rng: PcgRng,
            outcome: RunOutcome::Playing,
        };
        {
            let env = game_env!(scheduler);
            scheduler.state.refresh_visibility(&env);
            planner::plan_enemy_turns(&mut scheduler.state, &env);
        }
        scheduler.recheck_word_mode();
        scheduler.timeline.record(&scheduler.state)?;
        Ok(scheduler)
    }

    /// Resumes from a previously captured state (see
    /// [`Timeline::restore_bytes`]). Cached intents travel inside the
    /// state, so resuming does not re-plan.
    pub fn resume(
        state: GameState,
        config: GenerationConfig,
        catalog: C,
        bestiary: B,
        words: W,
    ) -> Result<Self> {
        let outcome = if state.entities.player.is_alive() {
            RunOutcome::Playing
        } else {
            RunOutcome::Dead
        };
        let mut scheduler = Self {
            state,
            timeline: Timeline::new(),
            config,
            catalog,
            bestiary,
            words,
            rng: PcgRng,
            outcome,
        };
        {
            let env = game_env!(scheduler);
            scheduler.state.refresh_visibility(&env);
        }
        scheduler.timeline.record(&scheduler.state)?;
        Ok(scheduler)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Enemy intents readable by the player this turn (word mode only).
    pub fn forecast(&self) -> Vec<(EntityId, Vec<IntentStep>)> {
        planner::visible_intents(&self.state)
    }

    /// The current state as opaque persistence bytes.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>> {
        Timeline::snapshot_bytes(&self.state)
    }

    /// Runs one full turn cycle from a player action. An error from the
    /// engine leaves the state untouched and the turn unconsumed.
    pub fn player_action(&mut self, kind: ActionKind) -> Result<TurnReport> {
        if self.outcome != RunOutcome::Playing {
            return Err(RuntimeError::RunOver);
        }
        let action = Action::player(kind);
        let mut events = {
            let env = game_env!(self);
            GameEngine::new(&mut self.state).execute(&env, &action)
        }
        .map_err(|e| {
            tracing::debug!(error = %e, impossible = e.is_impossible(), "player action failed");
            RuntimeError::from(e)
        })?;

        let reversal = events.iter().find_map(|e| match e {
            Event::TimeReversal { turns, item } => Some((*turns, *item)),
            _ => None,
        });
        if let Some((turns, item)) = reversal {
            self.rewind(turns, item)?;
            return Ok(self.report(events));
        }

        if events.iter().any(|e| matches!(e, Event::DescendedStairs)) {
            self.descend();
        } else {
            self.refresh_outcome(&events);
            if self.outcome == RunOutcome::Playing {
                self.enemy_phase(&mut events);
            }
        }
        self.finish_turn(&mut events)?;

        // a petrified player forfeits whole turns; the floor keeps moving
        while self.outcome == RunOutcome::Playing
            && self
                .state
                .entities
                .player
                .statuses
                .has(StatusKind::Petrified)
        {
            self.enemy_phase(&mut events);
            self.finish_turn(&mut events)?;
        }

        Ok(self.report(events))
    }

    fn report(&self, events: Vec<Event>) -> TurnReport {
        TurnReport {
            events,
            outcome: self.outcome,
        }
    }

    /// Cached intents from last turn execute first; planning for the next
    /// turn comes last, so between turns every enemy holds a readable plan.
    fn enemy_phase(&mut self, events: &mut Vec<Event>) {
        self.constriction_phase(events);
        self.execute_intents(events);
        self.tick_statuses(events);
        {
            let env = game_env!(self);
            planner::plan_enemy_turns(&mut self.state, &env);
        }
        self.refresh_outcome(events);
    }

    /// Constricted enemies take coil damage each turn, or slip free the
    /// moment a gap opens (regaining one digit as they do).
    fn constriction_phase(&mut self, events: &mut Vec<Event>) {
        let env = game_env!(self);
        let tail = self.state.stat_value(Stat::Tail, &env);
        for id in self.state.entities.living_npc_ids() {
            let Some(npc) = self.state.entities.npcs.get(&id) else {
                continue;
            };
            if !npc.is_constricted() {
                continue;
            }
            let position = npc.position;
            if self.state.is_surrounded(position) {
                let coils = self.state.adjacent_coil_count(position);
                let damage = (coils as i32 + tail).clamp(0, u8::MAX as i32) as u8;
                effect::damage_actor(&mut self.state, &env, events, EntityId::PLAYER, id, damage);
            } else if let Some(npc) = self.state.entities.npcs.get_mut(&id) {
                let ai = std::mem::replace(&mut npc.ai, AiState::None);
                npc.ai = ai.revert();
                npc.health = npc.health.regenerated(npc.base_health);
                events.push(Event::ConstrictionReleased { target: id });
            }
        }
    }

    /// Executes cached intents in ascending id order. An impossible step
    /// forfeits the rest of that enemy's turn, nothing more.
    fn execute_intents(&mut self, events: &mut Vec<Event>) {
        for id in self.state.entities.living_npc_ids() {
            loop {
                if !self.state.entities.player.is_alive() {
                    return;
                }
                let Some(step) = self
                    .state
                    .entities
                    .npcs
                    .get_mut(&id)
                    .and_then(|npc| npc.intent.take_next())
                else {
                    break;
                };
                let kind = match step.kind {
                    StepKind::Step => ActionKind::Move { dir: step.dir },
                    StepKind::Strike => ActionKind::Melee { dir: step.dir },
                };
                let action = Action::new(id, kind);
                let result = {
                    let env = game_env!(self);
                    GameEngine::new(&mut self.state).execute(&env, &action)
                };
                match result {
                    Ok(mut produced) => events.append(&mut produced),
                    Err(e) => {
                        tracing::debug!(npc = %id, error = %e, "enemy forfeits its turn");
                        if let Some(npc) = self.state.entities.npcs.get_mut(&id) {
                            npc.intent.clear();
                        }
                        break;
                    }
                }
            }
        }
    }

    fn tick_statuses(&mut self, events: &mut Vec<Event>) {
        let env = game_env!(self);
        let mut ids = vec![EntityId::PLAYER];
        ids.extend(self.state.entities.living_npc_ids());
        for id in ids {
            let lapsed = match self.state.entities.actor_mut(id) {
                Some(actor) => actor.statuses.tick(),
                None => continue,
            };
            for kind in lapsed {
                events.push(Event::StatusExpired { target: id, kind });
                match kind {
                    StatusKind::Doomed if !id.is_player() => {
                        effect::kill_actor(&mut self.state, &env, events, id);
                    }
                    // an enemy that rides out petrification stays stone
                    StatusKind::Petrified if !id.is_player() => {
                        if let Some(npc) = self.state.entities.npcs.get_mut(&id) {
                            npc.ai = AiState::Statue;
                            npc.intent.clear();
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn recheck_word_mode(&mut self) {
        let word = self.state.chain_word();
        let active = !word.is_empty() && self.words.is_valid_word(&word);
        if active != self.state.turn.word_mode {
            tracing::debug!(%word, active, "word mode toggled");
            self.state.turn.word_mode = active;
        }
    }

    fn refresh_outcome(&mut self, events: &[Event]) {
        if !self.state.entities.player.is_alive() {
            if self.outcome == RunOutcome::Playing {
                tracing::info!(turn = self.state.turn.count, "the run ends in death");
            }
            self.outcome = RunOutcome::Dead;
            return;
        }
        let boss_killed = events
            .iter()
            .any(|e| matches!(e, Event::BossSlain { .. }));
        if boss_killed {
            tracing::info!(turn = self.state.turn.count, "the boss falls");
            self.outcome = RunOutcome::Victory;
        }
    }

    fn finish_turn(&mut self, events: &mut Vec<Event>) -> Result<()> {
        self.recheck_word_mode();
        self.refresh_outcome(events);
        self.state.turn.count += 1;
        {
            let env = game_env!(self);
            self.state.refresh_visibility(&env);
        }
        self.timeline.record(&self.state)
    }

    fn descend(&mut self) {
        self.state.floor += 1;
        let blueprint = {
            let generator = Generator::new(&self.config, &self.catalog, &self.bestiary);
            generator.generate(self.state.game_seed, self.state.floor)
        };
        self.apply_blueprint(blueprint);
        {
            // no enemy phase runs this turn; the new floor plans directly
            let env = game_env!(self);
            self.state.refresh_visibility(&env);
            planner::plan_enemy_turns(&mut self.state, &env);
        }
        tracing::info!(floor = self.state.floor, "descended the stairs");
    }

    fn apply_blueprint(&mut self, blueprint: FloorBlueprint) {
        let FloorBlueprint {
            grid,
            player_start,
            downstairs,
            monsters,
            items,
        } = blueprint;
        self.state.grid = grid;
        self.state.downstairs = downstairs;
        self.state.entities.npcs.clear();
        self.state.entities.items.clear();
        self.state.entities.player.position = player_start;
        // the chain re-coils under the head and re-solidifies step by step
        for segment in self.state.entities.chain.iter_mut() {
            segment.position = player_start;
            segment.solid = false;
        }
        stock_floor(&mut self.state, &self.bestiary, monsters, items);
    }

    /// Restores the snapshot `turns` back (clamped to the window), keeping
    /// the id watermark and everything identified since. The trigger
    /// segment burns up outside time: force-identified and removed from
    /// wherever the restored state holds it.
    fn rewind(&mut self, turns: u32, item: EntityId) -> Result<()> {
        let requested = self.state.turn.count.saturating_sub(turns as u64);
        let oldest = self
            .timeline
            .oldest_turn()
            .ok_or(RuntimeError::MissingSnapshot { turn: requested })?;
        let target = requested.max(oldest);
        let mut restored = self.timeline.restore(target)?;

        restored.restore_entity_watermark(self.state.next_entity_id());
        restored.identity.merge_identified(&self.state.identity);

        if let Some(index) = restored.entities.chain.index_of(item) {
            if let Some(removed) = restored.remove_segment_and_repair(index) {
                restored.identity.identify(removed.glyph);
            }
        } else if let Some(removed) = restored.entities.take_ground_item(item) {
            restored.identity.identify(removed.glyph);
        }

        tracing::info!(
            from_turn = self.state.turn.count,
            to_turn = target,
            "time reversal"
        );
        self.state = restored;
        self.outcome = RunOutcome::Playing;
        self.timeline.truncate_from(target);
        self.recheck_word_mode();
        {
            let env = game_env!(self);
            self.state.refresh_visibility(&env);
        }
        self.timeline.record(&self.state)
    }
}

fn stock_floor(
    state: &mut GameState,
    bestiary: &dyn BestiaryOracle,
    monsters: Vec<MonsterSpawn>,
    items: Vec<ItemSpawn>,
) {
    for spawn in monsters {
        let Some(def) = bestiary.beast(spawn.kind) else {
            continue;
        };
        let id = state.allocate_entity_id();
        let mut npc = ActorState::new(id, spawn.position, def.health, def.move_speed, spawn.kind);
        npc.is_boss = spawn.is_boss;
        state.entities.spawn_npc(npc);
    }
    for spawn in items {
        // a kind without a glyph was never dealt a letter; skip it
        let Some(glyph) = state.identity.glyph_of(spawn.kind) else {
            continue;
        };
        let id = state.allocate_entity_id();
        state
            .entities
            .place_item(ItemState::new(id, spawn.position, glyph, spawn.kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wyrm_content::{Bestiary, SegmentCatalog};
    use wyrm_core::{
        Direction, Glyph, HealthDigit, Position, SegmentKind, TileGrid, TileKind,
    };

    struct FewWords;
    impl WordOracle for FewWords {
        fn is_valid_word(&self, word: &str) -> bool {
            matches!(word, "at" | "ta" | "o")
        }
    }

    // catalog indices used by fixtures
    const MORSEL: SegmentKind = SegmentKind(0);
    const TONGUE_ROOT: SegmentKind = SegmentKind(3);
    const STONE_SEED: SegmentKind = SegmentKind(9);

    fn open_grid() -> TileGrid {
        let mut grid = TileGrid::filled_with_walls(12, 12);
        for p in grid.iter_positions().collect::<Vec<_>>() {
            if p.x > 0 && p.y > 0 && p.x < 11 && p.y < 11 {
                grid.set_kind(p, TileKind::Floor);
            }
        }
        grid
    }

    fn open_state() -> GameState {
        let mut state = GameState::new(17, open_grid(), Position::new(5, 5), Position::new(10, 10));
        state.identity.assign(Glyph('a'), MORSEL);
        state.identity.assign(Glyph('t'), TONGUE_ROOT);
        state.identity.assign(Glyph('j'), STONE_SEED);
        state
    }

    /// Like [`open_state`], but every catalog kind holds a letter, the way
    /// a real run deals them. Corpse drops need the full table.
    fn lettered_state() -> GameState {
        let mut state = GameState::new(23, open_grid(), Position::new(5, 5), Position::new(10, 10));
        for (i, kind) in SegmentCatalog.kinds().into_iter().enumerate() {
            state.identity.assign(Glyph((b'a' + i as u8) as char), kind);
        }
        state
    }

    fn spawn_enemy(state: &mut GameState, x: i32, y: i32, health: u8) -> EntityId {
        let id = state.allocate_entity_id();
        state.entities.spawn_npc(ActorState::new(
            id,
            Position::new(x, y),
            HealthDigit::new(health),
            1,
            wyrm_core::BeastKind(0),
        ));
        id
    }

    // hand-built states carry no cached intents; plan them the way a
    // recorded snapshot would have before handing over to the scheduler
    fn scheduler_from(
        mut state: GameState,
    ) -> TurnScheduler<SegmentCatalog, Bestiary, FewWords> {
        {
            let env = Env::with_all(&SegmentCatalog, &Bestiary, &FewWords, &PcgRng).as_game_env();
            state.refresh_visibility(&env);
            planner::plan_enemy_turns(&mut state, &env);
        }
        TurnScheduler::resume(
            state,
            GenerationConfig::default(),
            SegmentCatalog,
            Bestiary,
            FewWords,
        )
        .unwrap()
    }

    fn swallow(state: &mut GameState, x: i32, y: i32, glyph: char, kind: SegmentKind) {
        let id = state.allocate_entity_id();
        let item = ItemState::new(id, Position::new(x, y), Glyph(glyph), kind);
        state.entities.chain.swallow(item);
        if let Some(segment) = state.entities.chain.iter_mut().last() {
            segment.solid = true;
        }
    }

    #[test]
    fn a_wait_consumes_one_turn_and_snapshots_it() {
        let mut scheduler = scheduler_from(open_state());
        let report = scheduler.player_action(ActionKind::Wait).unwrap();
        assert_eq!(report.outcome, RunOutcome::Playing);
        assert_eq!(scheduler.state().turn.count, 1);
        assert_eq!(scheduler.timeline.latest_turn(), Some(1));
    }

    #[test]
    fn rejected_actions_cost_nothing() {
        let mut state = open_state();
        state.grid.set_kind(Position::new(6, 5), TileKind::Wall);
        let mut scheduler = scheduler_from(state);
        let before = scheduler.state().clone();

        let err = scheduler
            .player_action(ActionKind::Move {
                dir: Direction::East,
            })
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Action(e) if e.is_impossible()));
        assert_eq!(scheduler.state(), &before);
        assert_eq!(scheduler.state().turn.count, 0);
    }

    #[test]
    fn enemies_close_in_while_the_player_waits() {
        let mut state = open_state();
        let id = spawn_enemy(&mut state, 8, 5, 2);
        let mut scheduler = scheduler_from(state);

        scheduler.player_action(ActionKind::Wait).unwrap();
        scheduler.player_action(ActionKind::Wait).unwrap();
        let position = scheduler.state().entities.npcs[&id].position;
        assert!(position.is_adjacent(Position::new(5, 5)));

        // the next strike lands on the head, which is lethal
        let report = scheduler.player_action(ActionKind::Wait).unwrap();
        assert_eq!(report.outcome, RunOutcome::Dead);
        assert!(matches!(
            scheduler.player_action(ActionKind::Wait),
            Err(RuntimeError::RunOver)
        ));
    }

    #[test]
    fn a_petrified_player_auto_advances_until_it_wears_off() {
        let mut state = open_state();
        swallow(&mut state, 4, 5, 'j', STONE_SEED);
        let mut scheduler = scheduler_from(state);

        let report = scheduler
            .player_action(ActionKind::Digest { index: 0 })
            .unwrap();
        // the digest turn plus the forfeited petrified turns
        assert_eq!(scheduler.state().turn.count, 3);
        assert!(
            !scheduler
                .state()
                .entities
                .player
                .statuses
                .has(StatusKind::Petrified)
        );
        assert!(
            report
                .events
                .iter()
                .any(|e| matches!(e, Event::StatusExpired { kind: StatusKind::Petrified, .. }))
        );
    }

    #[test]
    fn word_mode_follows_the_chain_spelling() {
        let mut state = open_state();
        swallow(&mut state, 4, 5, 'a', MORSEL);
        swallow(&mut state, 3, 5, 't', TONGUE_ROOT);
        let mut scheduler = scheduler_from(state);
        assert!(!scheduler.state().turn.word_mode);

        scheduler.player_action(ActionKind::Wait).unwrap();
        assert!(scheduler.state().turn.word_mode);

        scheduler
            .player_action(ActionKind::Digest { index: 1 })
            .unwrap();
        assert!(!scheduler.state().turn.word_mode);
    }

    #[test]
    fn a_single_letter_word_engages_word_mode() {
        let mut state = open_state();
        state.identity.assign(Glyph('o'), SegmentKind(1));
        swallow(&mut state, 4, 5, 'o', SegmentKind(1));
        let mut scheduler = scheduler_from(state);

        scheduler.player_action(ActionKind::Wait).unwrap();
        assert!(scheduler.state().turn.word_mode);
    }

    #[test]
    fn word_mode_reveals_cached_plans_between_turns() {
        let mut state = open_state();
        swallow(&mut state, 4, 5, 'a', MORSEL);
        swallow(&mut state, 3, 5, 't', TONGUE_ROOT);
        let id = spawn_enemy(&mut state, 8, 5, 2);
        let mut scheduler = scheduler_from(state);

        scheduler.player_action(ActionKind::Wait).unwrap();
        assert!(scheduler.state().turn.word_mode);
        // the enemy acted this turn and already holds next turn's plan
        let forecast = scheduler.forecast();
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast[0].0, id);
        assert!(!forecast[0].1.is_empty());
    }

    #[test]
    fn slain_enemies_leave_the_floor_and_scatter_a_segment() {
        let mut state = lettered_state();
        let id = spawn_enemy(&mut state, 6, 5, 0);
        let mut scheduler = scheduler_from(state);

        let report = scheduler
            .player_action(ActionKind::Melee {
                dir: Direction::East,
            })
            .unwrap();
        assert!(
            report
                .events
                .iter()
                .any(|e| matches!(e, Event::Killed { entity } if *entity == id))
        );
        assert!(!scheduler.state().entities.npcs.contains_key(&id));
        let corpse = scheduler
            .state()
            .entities
            .items
            .values()
            .find(|item| item.position == Position::new(6, 5));
        assert!(corpse.is_some());
    }

    // head at (2,2), coils ringing (3,3); one position left out when a gap
    // is wanted
    fn coil_ring(state: &mut GameState, skip: Option<(i32, i32)>) {
        state.entities.player.position = Position::new(2, 2);
        let ring = [(3, 2), (4, 2), (2, 3), (4, 3), (2, 4), (3, 4), (4, 4)];
        for (i, (x, y)) in ring.into_iter().enumerate() {
            if skip == Some((x, y)) {
                continue;
            }
            swallow(state, x, y, (b'a' + i as u8) as char, SegmentKind(i as u16));
        }
    }

    #[test]
    fn surrounded_constricted_enemies_are_crushed() {
        let mut state = lettered_state();
        coil_ring(&mut state, None);
        let id = spawn_enemy(&mut state, 3, 3, 3);
        if let Some(npc) = state.entities.npcs.get_mut(&id) {
            npc.ai = AiState::Constricted {
                previous: Box::new(AiState::Hostile),
            };
        }
        let mut scheduler = scheduler_from(state);

        let report = scheduler.player_action(ActionKind::Wait).unwrap();
        // one digit per adjacent coil, and seven coils close the ring
        assert!(
            report
                .events
                .iter()
                .any(|e| matches!(e, Event::MeleeHit { damage: 7, .. }))
        );
        assert!(
            report
                .events
                .iter()
                .any(|e| matches!(e, Event::Killed { entity } if *entity == id))
        );
        assert!(!scheduler.state().entities.npcs.contains_key(&id));
        assert!(
            scheduler
                .state()
                .entities
                .items
                .values()
                .any(|item| item.position == Position::new(3, 3))
        );
    }

    #[test]
    fn a_gap_in_the_coils_frees_the_constricted_enemy() {
        let mut state = lettered_state();
        coil_ring(&mut state, Some((4, 4)));
        let id = spawn_enemy(&mut state, 3, 3, 3);
        if let Some(npc) = state.entities.npcs.get_mut(&id) {
            npc.ai = AiState::Constricted {
                previous: Box::new(AiState::Hostile),
            };
            npc.health = HealthDigit::new(1);
        }
        let mut scheduler = scheduler_from(state);

        let report = scheduler.player_action(ActionKind::Wait).unwrap();
        assert!(
            report
                .events
                .iter()
                .any(|e| matches!(e, Event::ConstrictionReleased { target } if *target == id))
        );
        let npc = &scheduler.state().entities.npcs[&id];
        assert_eq!(npc.ai, AiState::Hostile);
        // slipping free restores one digit
        assert_eq!(npc.health, HealthDigit::new(2));
    }

    #[test]
    fn descending_regenerates_the_floor_and_keeps_the_chain() {
        let mut state = open_state();
        swallow(&mut state, 4, 5, 'a', MORSEL);
        state
            .grid
            .set_kind(Position::new(5, 5), TileKind::DownStairs);
        let mut scheduler = scheduler_from(state);

        scheduler.player_action(ActionKind::TakeStairs).unwrap();
        let state = scheduler.state();
        assert_eq!(state.floor, 2);
        assert_eq!(state.entities.chain.len(), 1);
        assert_eq!(state.entities.player.position, {
            // the chain re-coils under the head on arrival
            state.entities.chain.get(0).unwrap().position
        });
        assert!(state.grid.is_walkable(state.entities.player.position));
    }
}
