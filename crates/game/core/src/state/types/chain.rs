//! The player's body chain of swallowed letter segments.
//!
//! The chain is an ordered list: index 0 sits directly behind the head.
//! Swallowed segments start non-solid at their pickup tile and solidify as
//! the chain vacates them (see the propagation pass on `GameState`). The
//! container itself only maintains order and the length cap.

use crate::config::GameConfig;
use crate::state::types::item::{Glyph, ItemState};
use crate::state::types::{EntityId, Position};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyChain {
    segments: Vec<ItemState>,
}

impl BodyChain {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.segments.len() >= GameConfig::MAX_CHAIN_SEGMENTS
    }

    /// Appends a freshly swallowed segment at the tail, non-solid, at its
    /// pickup tile. Returns false (and drops nothing) when the chain is at
    /// the letter cap.
    pub fn swallow(&mut self, mut segment: ItemState) -> bool {
        if self.is_full() {
            return false;
        }
        segment.solid = false;
        self.segments.push(segment);
        true
    }

    pub fn get(&self, index: usize) -> Option<&ItemState> {
        self.segments.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ItemState> {
        self.segments.get_mut(index)
    }

    /// Removes the segment at `index`. The caller is responsible for the
    /// follow-up propagation pass that closes the gap.
    pub fn remove(&mut self, index: usize) -> Option<ItemState> {
        (index < self.segments.len()).then(|| self.segments.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemState> {
        self.segments.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ItemState> {
        self.segments.iter_mut()
    }

    pub fn segment_at(&self, position: Position) -> Option<&ItemState> {
        self.segments
            .iter()
            .find(|s| s.solid && s.position == position)
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// Tiles occupied by solid segments, head-adjacent first.
    pub fn solid_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().filter(|s| s.solid).map(|s| s.position)
    }

    /// The word currently spelled by the chain, head to tail.
    pub fn glyph_word(&self) -> String {
        self.segments.iter().map(|s| s.glyph.as_char()).collect()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.segments.iter().map(|s| s.glyph)
    }

    /// Reverses the solid portion of the chain in place: segment order flips
    /// across the occupied tiles while each tile keeps a segment. Non-solid
    /// tail segments are unaffected.
    pub fn reverse_solid(&mut self) {
        let mut solid_indices: Vec<usize> = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.solid)
            .map(|(i, _)| i)
            .collect();
        let positions: Vec<Position> = solid_indices
            .iter()
            .map(|&i| self.segments[i].position)
            .collect();
        solid_indices.reverse();
        for (&index, &position) in solid_indices.iter().zip(positions.iter()) {
            self.segments[index].position = position;
        }
        // flip the stored order so index 0 is still head-adjacent
        let mut reordered: Vec<ItemState> = Vec::with_capacity(self.segments.len());
        for segment in self.segments.iter().rev().filter(|s| s.solid) {
            reordered.push(segment.clone());
        }
        for segment in self.segments.iter().filter(|s| !s.solid) {
            reordered.push(segment.clone());
        }
        self.segments = reordered;
    }
}
