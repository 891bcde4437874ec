//! Letter-segment items.
//!
//! Every item is a single letter glyph. What the letter *does* (its digest
//! and spit behaviour, rarity, name) lives in the segment catalog and is
//! addressed through [`SegmentKind`]; which letter maps to which kind is a
//! per-run assignment owned by the identity table. The item instance itself
//! carries only identity, position and solidity.

use std::fmt;

use super::{EntityId, Position, RenderPriority};

/// Opaque handle into the segment catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentKind(pub u16);

/// A single letter glyph on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph(pub char);

impl Glyph {
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generation cost class; also drives the letter-pool split at run start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Budget cost when the generator places an item of this rarity.
    pub fn placement_cost(self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
        }
    }
}

/// A letter-segment instance, either lying on the floor or linked into a
/// body chain. Identification state is *not* stored here: it is keyed by
/// glyph in the identity table so that learning one copy teaches all.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: EntityId,
    pub position: Position,
    pub glyph: Glyph,
    pub kind: SegmentKind,
    /// Solid segments block movement and move with the chain. A freshly
    /// swallowed segment floats non-solid at the tail until the chain has
    /// vacated its tile.
    pub solid: bool,
}

impl ItemState {
    pub fn new(id: EntityId, position: Position, glyph: Glyph, kind: SegmentKind) -> Self {
        Self {
            id,
            position,
            glyph,
            kind,
            solid: false,
        }
    }

    pub fn blocks_movement(&self) -> bool {
        self.solid
    }

    pub fn render_priority(&self) -> RenderPriority {
        if self.solid {
            RenderPriority::Actor
        } else {
            RenderPriority::Item
        }
    }
}
