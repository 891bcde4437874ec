//! Fixed rule constants.
//!
//! These are rules of the game, not tunables: changing one changes what a
//! recorded run replays to, so they live in code rather than in the
//! generation config.

pub struct GameConfig;

impl GameConfig {
    /// One segment per letter of the alphabet.
    pub const MAX_CHAIN_SEGMENTS: usize = 26;

    /// Bounded status set per actor.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    /// Upper bound on planned enemy steps per turn (fastest bestiary entry).
    pub const MAX_INTENT_STEPS: usize = 4;

    /// Sight radius before the tongue stat widens it.
    pub const BASE_FOV_RADIUS: u32 = 8;

    /// Flat melee damage for every actor.
    pub const MELEE_DAMAGE: u8 = 1;

    /// Placement loops give up after this many rejected samples.
    pub const PLACEMENT_ATTEMPT_CAP: u32 = 1000;

    /// Completed turns kept rewindable.
    pub const REWIND_WINDOW: u32 = 10;

    /// The floor that carries the boss instead of stairs.
    pub const FINAL_FLOOR: u32 = 10;
}
