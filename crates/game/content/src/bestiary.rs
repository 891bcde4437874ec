//! The bestiary.
//!
//! An enemy's on-screen glyph is its current health digit, so a template is
//! just a starting digit, a speed and a floor band. The generator prices
//! each template out of the floor's monster budget.

use wyrm_core::{BeastDefinition, BeastKind, BestiaryOracle, HealthDigit};

struct Entry {
    name: &'static str,
    health: u8,
    move_speed: u8,
    /// Inclusive floor band this template spawns on.
    floors: (u32, u32),
}

const ENTRIES: &[Entry] = &[
    Entry {
        name: "mite",
        health: 1,
        move_speed: 1,
        floors: (1, 3),
    },
    Entry {
        name: "rat",
        health: 2,
        move_speed: 1,
        floors: (1, 4),
    },
    Entry {
        name: "jackal",
        health: 1,
        move_speed: 2,
        floors: (2, 5),
    },
    Entry {
        name: "toad",
        health: 3,
        move_speed: 1,
        floors: (3, 6),
    },
    Entry {
        name: "hound",
        health: 3,
        move_speed: 2,
        floors: (4, 7),
    },
    Entry {
        name: "ogre",
        health: 5,
        move_speed: 1,
        floors: (5, 8),
    },
    Entry {
        name: "wraith",
        health: 4,
        move_speed: 2,
        floors: (6, 9),
    },
    Entry {
        name: "drake",
        health: 6,
        move_speed: 2,
        floors: (7, 10),
    },
    Entry {
        name: "golem",
        health: 8,
        move_speed: 1,
        floors: (8, 10),
    },
    // never spawns from the budget; placed by hand on the last floor
    Entry {
        name: "basilisk",
        health: 9,
        move_speed: 2,
        floors: (u32::MAX, u32::MAX),
    },
];

const BOSS: BeastKind = BeastKind(ENTRIES.len() as u16 - 1);

/// The full enemy roster.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bestiary;

impl BestiaryOracle for Bestiary {
    fn beast(&self, kind: BeastKind) -> Option<BeastDefinition> {
        let entry = ENTRIES.get(kind.0 as usize)?;
        Some(BeastDefinition {
            name: entry.name,
            health: HealthDigit::new(entry.health),
            move_speed: entry.move_speed,
        })
    }

    fn spawnable_on(&self, floor: u32) -> Vec<BeastKind> {
        ENTRIES
            .iter()
            .enumerate()
            .filter(|(_, e)| e.floors.0 <= floor && floor <= e.floors.1)
            .map(|(i, _)| BeastKind(i as u16))
            .collect()
    }

    fn boss(&self) -> BeastKind {
        BOSS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_floor_has_something_to_fight() {
        let bestiary = Bestiary;
        for floor in 1..=10 {
            assert!(
                !bestiary.spawnable_on(floor).is_empty(),
                "floor {floor} has an empty spawn set"
            );
        }
    }

    #[test]
    fn the_boss_never_spawns_from_the_budget() {
        let bestiary = Bestiary;
        for floor in 1..=10 {
            assert!(!bestiary.spawnable_on(floor).contains(&bestiary.boss()));
        }
        assert!(bestiary.beast(bestiary.boss()).is_some());
    }

    #[test]
    fn placement_cost_scales_with_threat() {
        let bestiary = Bestiary;
        let mite = bestiary.beast(BeastKind(0)).unwrap();
        let drake = bestiary.beast(BeastKind(7)).unwrap();
        // digit x speed + 1
        assert_eq!(mite.placement_cost(), 2);
        assert_eq!(drake.placement_cost(), 13);
        assert!(drake.placement_cost() > mite.placement_cost());
    }
}
