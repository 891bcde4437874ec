//! End-to-end runs through the scheduler with the shipped content.

use std::fs;

use wyrm_content::{Bestiary, GenerationConfig, SegmentCatalog};
use wyrm_core::{
    ActionKind, Direction, Event, GameState, Glyph, ItemState, Position, SegmentKind, TileGrid,
    TileKind, WordOracle,
};
use wyrm_runtime::{RunOutcome, Timeline, TurnScheduler};

struct NoWords;
impl WordOracle for NoWords {
    fn is_valid_word(&self, _word: &str) -> bool {
        false
    }
}

const HOURGLASS_CORE: SegmentKind = SegmentKind(10);

fn new_scheduler(seed: u64) -> TurnScheduler<SegmentCatalog, Bestiary, NoWords> {
    TurnScheduler::new(
        seed,
        GenerationConfig::default(),
        SegmentCatalog,
        Bestiary,
        NoWords,
    )
    .unwrap()
}

/// An open 12x12 arena with the hourglass core lying under the player.
fn arena_with_hourglass() -> GameState {
    let mut grid = TileGrid::filled_with_walls(12, 12);
    for p in grid.iter_positions().collect::<Vec<_>>() {
        if p.x > 0 && p.y > 0 && p.x < 11 && p.y < 11 {
            grid.set_kind(p, TileKind::Floor);
        }
    }
    let mut state = GameState::new(29, grid, Position::new(5, 5), Position::new(10, 10));
    state.identity.assign(Glyph('x'), HOURGLASS_CORE);
    let id = state.allocate_entity_id();
    state.entities.place_item(ItemState::new(
        id,
        Position::new(5, 5),
        Glyph('x'),
        HOURGLASS_CORE,
    ));
    state
}

fn resume_scheduler(state: GameState) -> TurnScheduler<SegmentCatalog, Bestiary, NoWords> {
    TurnScheduler::resume(
        state,
        GenerationConfig::default(),
        SegmentCatalog,
        Bestiary,
        NoWords,
    )
    .unwrap()
}

#[test]
fn a_generated_run_starts_playable() {
    let mut scheduler = new_scheduler(0xb007);
    let state = scheduler.state();
    assert_eq!(state.floor, 1);
    assert!(state.grid.is_walkable(state.entities.player.position));
    assert_eq!(scheduler.outcome(), RunOutcome::Playing);

    scheduler.player_action(ActionKind::Wait).unwrap();
    assert_eq!(scheduler.state().turn.count, 1);
}

#[test]
fn generation_is_deterministic_per_seed() {
    let a = new_scheduler(99);
    let b = new_scheduler(99);
    assert_eq!(
        a.snapshot_bytes().unwrap(),
        b.snapshot_bytes().unwrap()
    );
}

#[test]
fn time_reversal_restores_an_earlier_turn() {
    let mut scheduler = resume_scheduler(arena_with_hourglass());

    scheduler.player_action(ActionKind::Pickup).unwrap();
    assert_eq!(scheduler.state().entities.chain.len(), 1);
    for _ in 0..3 {
        scheduler.player_action(ActionKind::Wait).unwrap();
    }
    assert_eq!(scheduler.state().turn.count, 4);

    let report = scheduler
        .player_action(ActionKind::Digest { index: 0 })
        .unwrap();
    assert!(
        report
            .events
            .iter()
            .any(|e| matches!(e, Event::TimeReversal { turns: 5, .. }))
    );

    // five turns back clamps to the start of the recorded window
    let state = scheduler.state();
    assert_eq!(state.turn.count, 0);
    assert_eq!(state.entities.player.position, Position::new(5, 5));

    // the trigger segment burned up outside time, but its lesson stuck
    assert!(state.entities.chain.is_empty());
    assert!(state.entities.ground_item_at(Position::new(5, 5)).is_none());
    assert!(state.identity.is_identified(Glyph('x')));

    assert_eq!(scheduler.outcome(), RunOutcome::Playing);
    scheduler.player_action(ActionKind::Wait).unwrap();
    assert_eq!(scheduler.state().turn.count, 1);
}

#[test]
fn a_rewound_run_replays_identically() {
    let mut scheduler = resume_scheduler(arena_with_hourglass());
    let east = ActionKind::Move {
        dir: Direction::East,
    };

    scheduler.player_action(ActionKind::Pickup).unwrap();
    scheduler.player_action(east).unwrap();
    scheduler.player_action(east).unwrap();
    scheduler.player_action(ActionKind::Wait).unwrap();
    scheduler.player_action(ActionKind::Wait).unwrap();
    let before = scheduler.state().clone();
    assert_eq!(before.turn.count, 5);
    assert_eq!(before.entities.chain.len(), 1);

    scheduler
        .player_action(ActionKind::Digest { index: 0 })
        .unwrap();
    assert_eq!(scheduler.state().turn.count, 0);

    // feed the same inputs again; the trigger segment is gone, so there is
    // nothing left to pick up, but every step lands where it landed before
    scheduler.player_action(east).unwrap();
    scheduler.player_action(east).unwrap();
    for _ in 0..3 {
        scheduler.player_action(ActionKind::Wait).unwrap();
    }

    let after = scheduler.state();
    assert_eq!(after.turn.count, before.turn.count);
    assert_eq!(after.floor, before.floor);
    assert_eq!(
        after.entities.player.position,
        before.entities.player.position
    );
    assert!(after.entities.chain.is_empty());
    assert!(after.identity.is_identified(Glyph('x')));
}

#[test]
fn snapshots_survive_a_disk_round_trip() {
    let mut scheduler = resume_scheduler(arena_with_hourglass());
    scheduler.player_action(ActionKind::Pickup).unwrap();
    scheduler.player_action(ActionKind::Wait).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.save");
    fs::write(&path, scheduler.snapshot_bytes().unwrap()).unwrap();

    let restored = Timeline::restore_bytes(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(&restored, scheduler.state());

    let mut resumed = resume_scheduler(restored);
    resumed.player_action(ActionKind::Wait).unwrap();
    assert_eq!(resumed.state().turn.count, 3);
    assert_eq!(resumed.state().entities.chain.len(), 1);
}
