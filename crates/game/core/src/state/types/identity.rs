//! Run-scoped glyph identity.
//!
//! At run start every catalog kind is dealt one distinct letter; the mapping
//! holds for the whole run and identification is keyed by the letter, not
//! the item instance. Eating one `q` teaches the player what every `q` on
//! every floor does.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::types::item::{Glyph, SegmentKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentityTable {
    assignments: BTreeMap<char, SegmentKind>,
    identified: BTreeSet<char>,
}

impl IdentityTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Binds `glyph` to `kind`. Returns false if the glyph was already
    /// taken; assignments are without replacement.
    pub fn assign(&mut self, glyph: Glyph, kind: SegmentKind) -> bool {
        if self.assignments.contains_key(&glyph.0) {
            return false;
        }
        self.assignments.insert(glyph.0, kind);
        true
    }

    pub fn kind_of(&self, glyph: Glyph) -> Option<SegmentKind> {
        self.assignments.get(&glyph.0).copied()
    }

    pub fn glyph_of(&self, kind: SegmentKind) -> Option<Glyph> {
        self.assignments
            .iter()
            .find(|(_, k)| **k == kind)
            .map(|(c, _)| Glyph(*c))
    }

    /// Marks the glyph identified. Returns true when this was new knowledge.
    pub fn identify(&mut self, glyph: Glyph) -> bool {
        self.identified.insert(glyph.0)
    }

    pub fn is_identified(&self, glyph: Glyph) -> bool {
        self.identified.contains(&glyph.0)
    }

    pub fn identified_glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.identified.iter().map(|c| Glyph(*c))
    }

    pub fn assignments(&self) -> impl Iterator<Item = (Glyph, SegmentKind)> + '_ {
        self.assignments.iter().map(|(c, k)| (Glyph(*c), *k))
    }

    /// Folds another run's identified set into this one. Used when a
    /// restored snapshot must keep knowledge gained after it was taken.
    pub fn merge_identified(&mut self, newer: &IdentityTable) {
        self.identified.extend(newer.identified.iter().copied());
    }
}
