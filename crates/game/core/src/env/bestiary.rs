//! Bestiary oracle.

use crate::state::types::{BeastKind, HealthDigit};

/// Static definition of one enemy template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeastDefinition {
    pub name: &'static str,
    pub health: HealthDigit,
    /// Steps planned per turn.
    pub move_speed: u8,
}

impl BeastDefinition {
    /// Budget price when the generator places this beast.
    pub fn placement_cost(&self) -> u32 {
        self.health.value() as u32 * self.move_speed as u32 + 1
    }
}

/// Read-only access to the bestiary.
pub trait BestiaryOracle: Send + Sync {
    fn beast(&self, kind: BeastKind) -> Option<BeastDefinition>;

    /// Templates eligible to spawn on `floor`, in stable order.
    fn spawnable_on(&self, floor: u32) -> Vec<BeastKind>;

    /// The terminal-floor boss template.
    fn boss(&self) -> BeastKind;
}
