//! Turn-indexed snapshot history backing time reversal.
//!
//! One snapshot is taken per completed turn: the full `GameState` in
//! bincode, guarded by a SHA-256 digest. The window is bounded; snapshots
//! older than the rewind horizon are pruned. Restoration never touches the
//! live state on failure, so a corrupt snapshot is a recoverable error.

use std::collections::VecDeque;

use sha2::{Digest, Sha256};
use wyrm_core::{GameConfig, GameState};

use crate::error::{Result, RuntimeError};

struct Snapshot {
    turn: u64,
    bytes: Vec<u8>,
    digest: [u8; 32],
}

pub struct Timeline {
    window: usize,
    snapshots: VecDeque<Snapshot>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        // +1: the window counts rewindable turns, and the snapshot of the
        // current turn also lives here
        Self::with_window(GameConfig::REWIND_WINDOW as usize + 1)
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
            snapshots: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn oldest_turn(&self) -> Option<u64> {
        self.snapshots.front().map(|s| s.turn)
    }

    pub fn latest_turn(&self) -> Option<u64> {
        self.snapshots.back().map(|s| s.turn)
    }

    /// Appends a snapshot of `state` keyed by its turn count, pruning
    /// anything that fell off the rewind horizon.
    pub fn record(&mut self, state: &GameState) -> Result<()> {
        let bytes = Self::snapshot_bytes(state)?;
        let digest: [u8; 32] = Sha256::digest(&bytes).into();
        let turn = state.turn.count;
        tracing::debug!(
            turn,
            size = bytes.len(),
            digest = %hex::encode(&digest[..8]),
            "snapshot recorded"
        );
        self.snapshots.push_back(Snapshot {
            turn,
            bytes,
            digest,
        });
        while self.snapshots.len() > self.window {
            self.snapshots.pop_front();
        }
        Ok(())
    }

    /// Rebuilds the state recorded at `turn`. Verifies the digest before
    /// deserializing; the caller's live state is never touched.
    pub fn restore(&self, turn: u64) -> Result<GameState> {
        let snapshot = self
            .snapshots
            .iter()
            .find(|s| s.turn == turn)
            .ok_or(RuntimeError::MissingSnapshot { turn })?;
        let digest: [u8; 32] = Sha256::digest(&snapshot.bytes).into();
        if digest != snapshot.digest {
            tracing::error!(turn, "snapshot digest mismatch");
            return Err(RuntimeError::CorruptSnapshot { turn });
        }
        bincode::deserialize(&snapshot.bytes).map_err(|e| {
            tracing::error!(turn, error = %e, "snapshot deserialization failed");
            RuntimeError::CorruptSnapshot { turn }
        })
    }

    /// Drops the snapshot at `turn` and everything after it. Called after a
    /// rewind so the altered present re-records from that point.
    pub fn truncate_from(&mut self, turn: u64) {
        self.snapshots.retain(|s| s.turn < turn);
    }

    /// Serializes a state to the opaque persistence format.
    pub fn snapshot_bytes(state: &GameState) -> Result<Vec<u8>> {
        bincode::serialize(state).map_err(|e| RuntimeError::Serialization(e.to_string()))
    }

    /// Rebuilds a state from [`Timeline::snapshot_bytes`] output.
    pub fn restore_bytes(bytes: &[u8]) -> Result<GameState> {
        bincode::deserialize(bytes).map_err(|e| RuntimeError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wyrm_core::{Position, TileGrid, TileKind};

    fn state_at_turn(turn: u64) -> GameState {
        let mut grid = TileGrid::filled_with_walls(6, 6);
        grid.set_kind(Position::new(2, 2), TileKind::Floor);
        let mut state = GameState::new(11, grid, Position::new(2, 2), Position::new(3, 3));
        state.turn.count = turn;
        state
    }

    #[test]
    fn record_and_restore_round_trip() {
        let mut timeline = Timeline::new();
        let state = state_at_turn(4);
        timeline.record(&state).unwrap();
        let restored = timeline.restore(4).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn missing_turn_is_a_clean_error() {
        let timeline = Timeline::new();
        assert!(matches!(
            timeline.restore(9),
            Err(RuntimeError::MissingSnapshot { turn: 9 })
        ));
    }

    #[test]
    fn tampered_bytes_fail_the_digest_check() {
        let mut timeline = Timeline::new();
        timeline.record(&state_at_turn(1)).unwrap();
        if let Some(snapshot) = timeline.snapshots.front_mut() {
            snapshot.bytes[0] ^= 0xff;
        }
        assert!(matches!(
            timeline.restore(1),
            Err(RuntimeError::CorruptSnapshot { turn: 1 })
        ));
    }

    #[test]
    fn window_prunes_the_oldest_snapshots() {
        let mut timeline = Timeline::with_window(3);
        for turn in 0..6 {
            timeline.record(&state_at_turn(turn)).unwrap();
        }
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.oldest_turn(), Some(3));
        assert_eq!(timeline.latest_turn(), Some(5));
    }

    #[test]
    fn truncate_from_drops_the_turn_and_later() {
        let mut timeline = Timeline::with_window(10);
        for turn in 0..5 {
            timeline.record(&state_at_turn(turn)).unwrap();
        }
        timeline.truncate_from(2);
        assert_eq!(timeline.latest_turn(), Some(1));
    }
}
