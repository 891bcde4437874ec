//! Timed status modifiers attached to actors.
//!
//! A status is applied once per kind: re-applying an already-present kind
//! strengthens the existing instance (additive duration) instead of
//! stacking a duplicate. Durations count whole turns and are decremented
//! after each completed turn; a status whose duration drops below 1 is
//! removed.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::stats::Stat;

/// Closed set of status kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Spitting projectiles does not consume the segment.
    Salivating,
    /// Enemies that can be seen freeze rather than act.
    PetrifyingGaze,
    /// Temporary boost to a single stat.
    StatBoost { stat: Stat, amount: i8 },
    /// Cannot spit.
    Choking,
    /// Cannot see enemy intents even in word mode.
    ForesightBlind,
    /// Cannot act at all; the scheduler auto-advances a petrified player.
    Petrified,
    /// Out of phase: untargetable, produces no intent.
    PhasedOut,
    /// Dies when the timer lapses (decoy lifetime).
    Doomed,
}

/// Whether the player's foresight stat lengthens or shortens a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Beneficial,
    Detrimental,
}

impl StatusKind {
    pub fn polarity(self) -> Polarity {
        match self {
            StatusKind::Salivating | StatusKind::PetrifyingGaze | StatusKind::StatBoost { .. } => {
                Polarity::Beneficial
            }
            StatusKind::Choking
            | StatusKind::ForesightBlind
            | StatusKind::Petrified
            | StatusKind::PhasedOut
            | StatusKind::Doomed => Polarity::Detrimental,
        }
    }

    /// Turns added when the same kind is applied on top of itself.
    pub fn strengthen_amount(self) -> i32 {
        match self {
            StatusKind::Salivating | StatusKind::PetrifyingGaze | StatusKind::Petrified => 3,
            _ => 10,
        }
    }

    /// Two kinds are the same slot even when their payloads differ; a second
    /// stat boost strengthens the first rather than stacking.
    pub fn same_kind(self, other: StatusKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

/// One active status instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Remaining whole turns.
    pub duration: i32,
}

/// Result of applying a status to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplied {
    Fresh,
    Strengthened,
    /// The bounded set was full and the status was dropped.
    Rejected,
}

/// The set of statuses active on one actor. At most one instance per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind.same_kind(kind))
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind.same_kind(kind))
    }

    /// Applies `kind` with the given base duration plus a signed modifier
    /// (the player's foresight, with the sign chosen by the caller: statuses
    /// that help the player last longer, ones that hurt them last shorter).
    /// Duration is never negative at creation. Re-application strengthens
    /// the existing instance in place.
    pub fn apply(&mut self, kind: StatusKind, base_duration: i32, modifier: i32) -> StatusApplied {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind.same_kind(kind)) {
            existing.duration += kind.strengthen_amount();
            return StatusApplied::Strengthened;
        }

        let duration = (base_duration + modifier).max(0);

        if self.effects.try_push(StatusEffect { kind, duration }).is_ok() {
            StatusApplied::Fresh
        } else {
            StatusApplied::Rejected
        }
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| !e.kind.same_kind(kind));
    }

    /// Decrements every status by one turn and returns the kinds that
    /// lapsed, in set order, for the caller to fire remove side effects.
    pub fn tick(&mut self) -> Vec<StatusKind> {
        for effect in self.effects.iter_mut() {
            effect.duration -= 1;
        }
        let lapsed: Vec<StatusKind> = self
            .effects
            .iter()
            .filter(|e| e.duration < 1)
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.duration >= 1);
        lapsed
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Summed stat-boost contribution for one stat.
    pub fn stat_bonus(&self, stat: Stat) -> i32 {
        self.effects
            .iter()
            .filter_map(|e| match e.kind {
                StatusKind::StatBoost { stat: s, amount } if s == stat => Some(amount as i32),
                _ => None,
            })
            .sum()
    }
}
