//! What happens when a segment is spat at a target tile.

/// Closed set of spit behaviours a segment kind can carry. Damage-bearing
/// variants are modified by the Bile stat at resolution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpitKind {
    /// Straight damage to the target tile's occupant.
    Projectile { damage: u8 },
    /// Confuses the target for a number of turns.
    Confusion { turns: u32 },
    /// Petrifies the target.
    PetrifyEnemy,
    /// Shoves the target away from the impact.
    Knockback { force: u8 },
    /// Arcs to the nearest enemy within range, ignoring line of fire.
    Lightning { damage: u8, range: u32 },
    /// Damages every actor in the blast radius, the spitter included.
    Fireball { damage: u8, radius: u32 },
    /// Paints snake-only terrain around the impact tile.
    Entangling { radius: u32 },
    /// Phases the spitter out for a while.
    Phasing,
    /// Destroys ground items around the impact.
    DestroyItems,
    /// Leaves a doomed decoy segment that enemies chase.
    Decoy,
}

impl SpitKind {
    /// Whether Salivating makes this spit free (the segment is kept).
    pub fn free_while_salivating(self) -> bool {
        matches!(self, SpitKind::Projectile { .. })
    }
}
