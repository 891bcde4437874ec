//! Plain data types making up the game state.

pub mod actor;
pub mod chain;
pub mod common;
pub mod entities;
pub mod identity;
pub mod item;
pub mod status;
pub mod world;

pub use actor::{ActorState, AiState, BeastKind, Intent, IntentStep, StepKind};
pub use chain::BodyChain;
pub use common::{Direction, EntityId, HealthDigit, Position, RenderPriority};
pub use entities::EntitiesState;
pub use identity::IdentityTable;
pub use item::{Glyph, ItemState, Rarity, SegmentKind};
pub use status::{Polarity, StatusApplied, StatusEffect, StatusEffects, StatusKind};
pub use world::{TileFlags, TileGrid, TileKind};
