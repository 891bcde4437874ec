//! Structured events describing what an action did.
//!
//! The core never logs; it returns these for the runtime to trace, render
//! into a message log, or act on (time reversal in particular).

use std::fmt;

use crate::state::types::{EntityId, Glyph, Position, SegmentKind, StatusKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Moved {
        actor: EntityId,
        from: Position,
        to: Position,
    },
    Waited {
        actor: EntityId,
    },
    MeleeHit {
        attacker: EntityId,
        target: EntityId,
        damage: u8,
    },
    Killed {
        entity: EntityId,
    },
    SegmentSwallowed {
        glyph: Glyph,
    },
    SegmentDigested {
        glyph: Glyph,
    },
    SegmentSpat {
        glyph: Glyph,
        target: Position,
    },
    SegmentDestroyed {
        glyph: Glyph,
        position: Position,
    },
    Identified {
        glyph: Glyph,
        kind: SegmentKind,
    },
    StatusApplied {
        target: EntityId,
        kind: StatusKind,
    },
    StatusExpired {
        target: EntityId,
        kind: StatusKind,
    },
    Confused {
        target: EntityId,
        turns: u32,
    },
    ConstrictionStarted {
        target: EntityId,
    },
    ConstrictionReleased {
        target: EntityId,
    },
    /// A slain enemy left a segment item where it fell.
    CorpseDropped {
        glyph: Glyph,
        position: Position,
    },
    /// The floor's boss is down; the run is won.
    BossSlain {
        entity: EntityId,
    },
    ChainReversed,
    MapRevealed,
    KnockedBack {
        target: EntityId,
        to: Position,
    },
    DecoyPlaced {
        position: Position,
    },
    ItemDestroyed {
        glyph: Glyph,
        position: Position,
    },
    TerrainEntangled {
        centre: Position,
    },
    /// The player died with no exit tile adjacent.
    Trapped,
    /// Digesting a time-reversing segment. The core cannot resolve this;
    /// the runtime rewinds the timeline and strips the trigger item.
    TimeReversal {
        turns: u32,
        item: EntityId,
    },
    /// The player stepped down; the runtime regenerates the floor.
    DescendedStairs,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Moved { actor, to, .. } => write!(f, "{actor} moves to {to}"),
            Event::Waited { actor } => write!(f, "{actor} waits"),
            Event::MeleeHit {
                attacker,
                target,
                damage,
            } => write!(f, "{attacker} hits {target} for {damage}"),
            Event::Killed { entity } => write!(f, "{entity} dies"),
            Event::SegmentSwallowed { glyph } => write!(f, "swallowed '{glyph}'"),
            Event::SegmentDigested { glyph } => write!(f, "digested '{glyph}'"),
            Event::SegmentSpat { glyph, target } => write!(f, "spat '{glyph}' at {target}"),
            Event::SegmentDestroyed { glyph, position } => {
                write!(f, "segment '{glyph}' destroyed at {position}")
            }
            Event::Identified { glyph, .. } => write!(f, "'{glyph}' identified"),
            Event::StatusApplied { target, kind } => {
                write!(f, "{target} gains {kind:?}")
            }
            Event::StatusExpired { target, kind } => {
                write!(f, "{kind:?} wears off {target}")
            }
            Event::Confused { target, turns } => {
                write!(f, "{target} is confused for {turns} turns")
            }
            Event::ConstrictionStarted { target } => write!(f, "{target} is constricted"),
            Event::ConstrictionReleased { target } => write!(f, "{target} slips free"),
            Event::CorpseDropped { glyph, position } => {
                write!(f, "'{glyph}' tumbles loose at {position}")
            }
            Event::BossSlain { entity } => write!(f, "{entity} is slain"),
            Event::ChainReversed => write!(f, "the chain reverses itself"),
            Event::MapRevealed => write!(f, "the floor layout becomes clear"),
            Event::KnockedBack { target, to } => write!(f, "{target} is knocked back to {to}"),
            Event::DecoyPlaced { position } => write!(f, "a decoy appears at {position}"),
            Event::ItemDestroyed { glyph, position } => {
                write!(f, "'{glyph}' is destroyed at {position}")
            }
            Event::TerrainEntangled { centre } => {
                write!(f, "vines erupt around {centre}")
            }
            Event::Trapped => write!(f, "trapped with no way out"),
            Event::TimeReversal { turns, .. } => write!(f, "time lurches back {turns} turns"),
            Event::DescendedStairs => write!(f, "descending the stairs"),
        }
    }
}
