//! Deterministic in-turn randomness.
//!
//! Confusion steps, corpse scatter and similar rolls are pure functions of
//! `(game_seed, nonce, actor, context)`, so the same recorded inputs always
//! replay to the same run. Generation-time randomness is a runtime concern
//! and does not go through this oracle.

/// Seed-addressed random source. Implementations must be deterministic:
/// the same seed always yields the same value.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform pick in `[0, len)`, for indexing into a choice list.
    fn pick(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32(seed) as usize) % len
    }

    /// Roll in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_u32(seed) % (max - min + 1)
    }

    /// Bernoulli trial with probability `numerator / denominator`.
    fn chance(&self, seed: u64, numerator: u32, denominator: u32) -> bool {
        denominator > 0 && self.next_u32(seed) % denominator < numerator
    }
}

/// PCG-XSH-RR: 32-bit output permuted from 64-bit state. Small, fast and
/// statistically solid, which is all a per-roll oracle needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes the run seed, turn nonce, acting entity and a per-roll context
/// index into one seed. Use distinct context values when a single action
/// needs several independent rolls.
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
