//! Segment catalog oracle.

use crate::action::effect::{DigestKind, SpitKind};
use crate::state::types::{Rarity, SegmentKind};
use crate::stats::Stat;

/// Static definition of one segment kind. Which letter it wears in a given
/// run is decided by the generator, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentDefinition {
    /// Revealed name once identified ("segment of mapping").
    pub name: &'static str,
    pub rarity: Rarity,
    pub digest: DigestKind,
    pub spit: SpitKind,
    /// Passive stat bonus while the chain spells a word.
    pub passive: Option<(Stat, i8)>,
}

/// Read-only access to the segment catalog.
pub trait CatalogOracle: Send + Sync {
    fn segment(&self, kind: SegmentKind) -> Option<SegmentDefinition>;

    /// Every kind in the catalog, in stable order.
    fn kinds(&self) -> Vec<SegmentKind>;
}
