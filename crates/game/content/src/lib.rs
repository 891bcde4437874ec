//! Static game content: the segment catalog, the bestiary and the letter
//! frequency table, plus a TOML loader for generation tuning.
//!
//! Content implements the oracle traits from `wyrm-core` and is consumed by
//! the runtime; nothing in here ever appears in game state directly. Which
//! letter a catalog entry wears in a given run is the generator's business.

pub mod bestiary;
pub mod catalog;
pub mod config;
pub mod letters;

pub use bestiary::Bestiary;
pub use catalog::SegmentCatalog;
pub use config::GenerationConfig;
