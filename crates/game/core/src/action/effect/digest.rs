//! What happens when a segment is digested.

use crate::stats::Stat;

/// Closed set of digest behaviours a segment kind can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigestKind {
    /// Plain nutrition; the segment is consumed with no extra effect.
    Nothing,
    /// Timed boost to one stat.
    StatBoost { stat: Stat, amount: i8 },
    /// Grants Salivating: projectile spits stop consuming their segment.
    FreeSpit,
    /// Grants the petrifying gaze: visible enemies freeze.
    PetrifyingGaze,
    /// Chokes the digester: no spitting until it wears off.
    Choking,
    /// Blinds foresight: enemy intents are hidden even in word mode.
    ForesightBlind,
    /// Petrifies the digester. Risky eating.
    PetrifySelf,
    /// Rolls the run back. Resolved outside the core via an event.
    TimeReverse { turns: u32 },
    /// Reveals the floor layout.
    Mapping,
    /// Reverses the solid chain in place instead of being consumed.
    Reversing,
    /// Digests a random neighbouring segment along with itself, identifying
    /// the neighbour first.
    Consuming,
    /// Refuses to be digested at all.
    Refusing,
}

impl DigestKind {
    /// Kinds that replace the standard remove-activate-identify sequence
    /// with their own handling.
    pub fn overrides_consume_sequence(self) -> bool {
        matches!(self, DigestKind::Reversing | DigestKind::Refusing)
    }
}
