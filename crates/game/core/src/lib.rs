//! Deterministic simulation rules for the wyrm roguelike.
//!
//! `wyrm-core` defines the canonical rules (world state, the body chain,
//! actions, effects, statuses) and exposes pure APIs reused by the runtime
//! and offline tools. All state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.

pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod fov;
pub mod state;
pub mod stats;

pub use action::{Action, ActionError, ActionKind, ActionTransition};
pub use config::GameConfig;
pub use engine::{Event, GameEngine};
pub use env::{
    BeastDefinition, BestiaryOracle, CatalogOracle, Env, GameEnv, OracleError, PcgRng, RngOracle,
    SegmentDefinition, WordOracle, compute_seed,
};
pub use state::{
    ActorState, AiState, BeastKind, BodyChain, Direction, EntitiesState, EntityId, GameState,
    Glyph, HealthDigit, IdentityTable, Intent, IntentStep, ItemState, Position, Rarity,
    RenderPriority, SegmentKind, StatusEffect, StatusEffects, StatusKind, StepKind, TileFlags,
    TileGrid, TileKind, TurnState,
};
pub use stats::Stat;
