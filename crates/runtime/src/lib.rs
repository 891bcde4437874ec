//! Run orchestration on top of `wyrm-core`.
//!
//! The core resolves single actions; this crate owns everything that spans
//! turns and floors: procedural floor generation, enemy intent planning,
//! the turn scheduler and the snapshot timeline behind time reversal. A
//! front end drives a run through [`TurnScheduler`] alone.

pub mod error;
pub mod planner;
pub mod procgen;
pub mod scheduler;
pub mod timeline;

pub use error::{Result, RuntimeError};
pub use planner::visible_intents;
pub use procgen::{FloorBlueprint, Generator, ItemSpawn, MonsterSpawn};
pub use scheduler::{RunOutcome, TurnReport, TurnScheduler};
pub use timeline::Timeline;
