//! The segment catalog.
//!
//! Every swallowable letter on a floor is an instance of one of these
//! kinds. The catalog is deliberately a plain static table: balance tweaks
//! are edits here, and the generator assigns one distinct letter to each
//! kind per run.

use wyrm_core::action::effect::{DigestKind, SpitKind};
use wyrm_core::{CatalogOracle, Rarity, SegmentDefinition, SegmentKind, Stat};

struct Entry {
    name: &'static str,
    rarity: Rarity,
    digest: DigestKind,
    spit: SpitKind,
    passive: Option<(Stat, i8)>,
}

const ENTRIES: &[Entry] = &[
    Entry {
        name: "morsel",
        rarity: Rarity::Common,
        digest: DigestKind::Nothing,
        spit: SpitKind::Projectile { damage: 1 },
        passive: None,
    },
    Entry {
        name: "bile gland",
        rarity: Rarity::Common,
        digest: DigestKind::StatBoost {
            stat: Stat::Bile,
            amount: 1,
        },
        spit: SpitKind::Projectile { damage: 2 },
        passive: Some((Stat::Bile, 1)),
    },
    Entry {
        name: "mind bloom",
        rarity: Rarity::Uncommon,
        digest: DigestKind::StatBoost {
            stat: Stat::Mind,
            amount: 1,
        },
        spit: SpitKind::Confusion { turns: 10 },
        passive: Some((Stat::Mind, 1)),
    },
    Entry {
        name: "tongue root",
        rarity: Rarity::Common,
        digest: DigestKind::StatBoost {
            stat: Stat::Tongue,
            amount: 1,
        },
        spit: SpitKind::Projectile { damage: 1 },
        passive: Some((Stat::Tongue, 1)),
    },
    Entry {
        name: "tail knot",
        rarity: Rarity::Uncommon,
        digest: DigestKind::StatBoost {
            stat: Stat::Tail,
            amount: 1,
        },
        spit: SpitKind::Knockback { force: 3 },
        passive: Some((Stat::Tail, 1)),
    },
    Entry {
        name: "drool pod",
        rarity: Rarity::Common,
        digest: DigestKind::FreeSpit,
        spit: SpitKind::Projectile { damage: 1 },
        passive: None,
    },
    Entry {
        name: "gorgon eye",
        rarity: Rarity::Rare,
        digest: DigestKind::PetrifyingGaze,
        spit: SpitKind::PetrifyEnemy,
        passive: None,
    },
    Entry {
        name: "gag weed",
        rarity: Rarity::Common,
        digest: DigestKind::Choking,
        spit: SpitKind::Projectile { damage: 1 },
        passive: None,
    },
    Entry {
        name: "blindcap",
        rarity: Rarity::Uncommon,
        digest: DigestKind::ForesightBlind,
        spit: SpitKind::Confusion { turns: 5 },
        passive: None,
    },
    Entry {
        name: "stone seed",
        rarity: Rarity::Uncommon,
        digest: DigestKind::PetrifySelf,
        spit: SpitKind::PetrifyEnemy,
        passive: None,
    },
    Entry {
        name: "hourglass core",
        rarity: Rarity::Rare,
        digest: DigestKind::TimeReverse { turns: 5 },
        spit: SpitKind::Projectile { damage: 1 },
        passive: None,
    },
    Entry {
        name: "surveyor gland",
        rarity: Rarity::Uncommon,
        digest: DigestKind::Mapping,
        spit: SpitKind::Projectile { damage: 1 },
        passive: None,
    },
    Entry {
        name: "mirror scale",
        rarity: Rarity::Rare,
        digest: DigestKind::Reversing,
        spit: SpitKind::Knockback { force: 2 },
        passive: None,
    },
    Entry {
        name: "glutton seed",
        rarity: Rarity::Uncommon,
        digest: DigestKind::Consuming,
        spit: SpitKind::Projectile { damage: 2 },
        passive: None,
    },
    Entry {
        name: "iron scale",
        rarity: Rarity::Rare,
        digest: DigestKind::Refusing,
        spit: SpitKind::Projectile { damage: 3 },
        passive: None,
    },
    Entry {
        name: "storm sac",
        rarity: Rarity::Uncommon,
        digest: DigestKind::Nothing,
        spit: SpitKind::Lightning {
            damage: 2,
            range: 6,
        },
        passive: None,
    },
    Entry {
        name: "ember gland",
        rarity: Rarity::Rare,
        digest: DigestKind::Nothing,
        spit: SpitKind::Fireball {
            damage: 2,
            radius: 2,
        },
        passive: None,
    },
    Entry {
        name: "briar pod",
        rarity: Rarity::Uncommon,
        digest: DigestKind::Nothing,
        spit: SpitKind::Entangling { radius: 2 },
        passive: None,
    },
    Entry {
        name: "ghost pepper",
        rarity: Rarity::Rare,
        digest: DigestKind::Nothing,
        spit: SpitKind::Phasing,
        passive: None,
    },
    Entry {
        name: "acid sac",
        rarity: Rarity::Uncommon,
        digest: DigestKind::Nothing,
        spit: SpitKind::DestroyItems,
        passive: None,
    },
    Entry {
        name: "molt husk",
        rarity: Rarity::Common,
        digest: DigestKind::Nothing,
        spit: SpitKind::Decoy,
        passive: None,
    },
];

/// The full segment catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentCatalog;

impl SegmentCatalog {
    pub fn len(&self) -> usize {
        ENTRIES.len()
    }

    pub fn is_empty(&self) -> bool {
        ENTRIES.is_empty()
    }
}

impl CatalogOracle for SegmentCatalog {
    fn segment(&self, kind: SegmentKind) -> Option<SegmentDefinition> {
        let entry = ENTRIES.get(kind.0 as usize)?;
        Some(SegmentDefinition {
            name: entry.name,
            rarity: entry.rarity,
            digest: entry.digest,
            spit: entry.spit,
            passive: entry.passive,
        })
    }

    fn kinds(&self) -> Vec<SegmentKind> {
        (0..ENTRIES.len() as u16).map(SegmentKind).collect()
    }
}
