//! Player stats.
//!
//! The player has no intrinsic stat values. Every point comes from either a
//! timed stat-boost status or from the passive bonuses of swallowed
//! consonant segments, and passive bonuses only count while the chain
//! spells a real word. Stat lookup therefore lives on `GameState`, which
//! can see the chain, the word-mode flag and the status set together.

/// The four player stats.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    /// Adds to spit damage.
    Bile,
    /// Foresight: lengthens beneficial statuses, shortens detrimental ones,
    /// and (in word mode) reveals enemy intents.
    Mind,
    /// Widens the field-of-view radius.
    Tongue,
    /// Adds to per-turn constriction damage.
    Tail,
}
