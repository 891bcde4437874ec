//! Actor state: the player head and every enemy on the floor.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::types::{Direction, EntityId, HealthDigit, Position, RenderPriority};
use crate::state::types::status::{StatusEffects, StatusKind};

/// Opaque handle into the bestiary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeastKind(pub u16);

/// Behavioural mode of an actor. `None` doubles as the dead marker for the
/// player, which keeps "is the run over" a pure state query.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiState {
    /// Pursues the nearest player segment.
    Hostile,
    /// Takes random legal steps until the timer lapses, then reverts.
    Confused {
        turns_left: u32,
        previous: Box<AiState>,
    },
    /// Pinned by the player's coils: no intent, damage every turn.
    Constricted { previous: Box<AiState> },
    /// Permanently inert (petrified enemies that ran out their timer).
    Statue,
    /// No behaviour at all.
    None,
}

impl AiState {
    pub fn is_active(&self) -> bool {
        !matches!(self, AiState::None)
    }

    /// Whether this mode produces an intent at all. Constricted and Statue
    /// actors stand still without one.
    pub fn plans_intent(&self) -> bool {
        matches!(self, AiState::Hostile | AiState::Confused { .. })
    }

    /// Unwraps one layer of wrapped state, e.g. when confusion or
    /// constriction ends.
    pub fn revert(self) -> AiState {
        match self {
            AiState::Confused { previous, .. } | AiState::Constricted { previous } => *previous,
            other => other,
        }
    }
}

/// What one planned step does when executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// Move one tile.
    Step,
    /// Melee attack into the adjacent tile.
    Strike,
}

/// One step of a planned enemy turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentStep {
    pub dir: Direction,
    pub kind: StepKind,
}

/// A full planned enemy turn, at most `move_speed` steps. Cached on the
/// actor so snapshots capture it and word-mode forecasting can read it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    steps: ArrayVec<IntentStep, { GameConfig::MAX_INTENT_STEPS }>,
}

impl Intent {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: IntentStep) -> bool {
        self.steps.try_push(step).is_ok()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Removes and returns the first pending step.
    pub fn take_next(&mut self) -> Option<IntentStep> {
        if self.steps.is_empty() {
            None
        } else {
            Some(self.steps.remove(0))
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = &IntentStep> {
        self.steps.iter()
    }
}

/// One actor on the floor.
///
/// An enemy has no stored display glyph: its glyph *is* its current health
/// digit, so hitting it is immediately legible on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub position: Position,
    pub health: HealthDigit,
    /// Cap for constriction-release regeneration.
    pub base_health: HealthDigit,
    /// Steps planned (and taken) per turn.
    pub move_speed: u8,
    pub ai: AiState,
    pub statuses: StatusEffects,
    pub intent: Intent,
    pub template: BeastKind,
    pub is_boss: bool,
    /// Decoys draw hostile pathing away from the player.
    pub is_decoy: bool,
}

impl ActorState {
    pub fn new(
        id: EntityId,
        position: Position,
        health: HealthDigit,
        move_speed: u8,
        template: BeastKind,
    ) -> Self {
        Self {
            id,
            position,
            health,
            base_health: health,
            move_speed,
            ai: AiState::Hostile,
            statuses: StatusEffects::empty(),
            intent: Intent::empty(),
            template,
            is_boss: false,
            is_decoy: false,
        }
    }

    pub fn player(position: Position) -> Self {
        Self {
            id: EntityId::PLAYER,
            position,
            health: HealthDigit::MAX,
            base_health: HealthDigit::MAX,
            move_speed: 1,
            ai: AiState::Hostile,
            statuses: StatusEffects::empty(),
            intent: Intent::empty(),
            template: BeastKind::default(),
            is_boss: false,
            is_decoy: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.ai.is_active()
    }

    pub fn glyph(&self) -> char {
        if self.id.is_player() {
            '@'
        } else {
            self.health.glyph()
        }
    }

    pub fn render_priority(&self) -> RenderPriority {
        RenderPriority::Actor
    }

    /// Phased-out actors drop off the collision grid entirely.
    pub fn blocks_movement(&self) -> bool {
        !self.statuses.has(StatusKind::PhasedOut)
    }

    /// Whether any status forces this actor to forfeit its turn outright.
    pub fn is_suppressed(&self) -> bool {
        self.statuses.has(StatusKind::Petrified) || self.statuses.has(StatusKind::PhasedOut)
    }

    pub fn is_constricted(&self) -> bool {
        matches!(self.ai, AiState::Constricted { .. })
    }
}
