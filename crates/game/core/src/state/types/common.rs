use std::fmt;

/// Unique identifier for any entity tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Chebyshev distance; adjacency on an 8-way grid is distance 1.
    pub fn distance(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self != other && self.distance(other) == 1
    }

    /// Iterates the eight neighbouring tiles.
    pub fn neighbours(self) -> impl Iterator<Item = Position> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Eight-way grid direction. The chain moves diagonally as freely as
/// orthogonally, so every direction is a single-tile step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Direction whose delta matches `(dx, dy)` after clamping each axis to
    /// a unit step. Returns None for the zero vector.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        let unit = (dx.signum(), dy.signum());
        Direction::ALL.into_iter().find(|d| d.delta() == unit)
    }
}

/// Draw ordering tag for entities sharing a tile. Lower draws first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderPriority {
    Corpse,
    Item,
    Actor,
}

/// Remaining hit capacity expressed as a single base-36 digit class (0-9).
///
/// An enemy's display glyph *is* its current digit, so combat feedback and
/// health are the same datum. Damage that exceeds the remaining capacity
/// kills outright; there are no negative health states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthDigit(u8);

impl HealthDigit {
    pub const MAX: Self = Self(9);

    /// Clamps to the valid digit range 0-9.
    pub fn new(value: u8) -> Self {
        Self(value.min(9))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn glyph(self) -> char {
        (b'0' + self.0) as char
    }

    /// Applies `amount` damage. `None` means the capacity was exceeded and
    /// the owner dies, skipping any negative intermediate state.
    pub fn damaged(self, amount: u8) -> Option<HealthDigit> {
        if amount > self.0 {
            None
        } else {
            Some(Self(self.0 - amount))
        }
    }

    /// Regenerates one step, never exceeding `cap`.
    pub fn regenerated(self, cap: HealthDigit) -> HealthDigit {
        Self((self.0 + 1).min(cap.0))
    }
}

impl fmt::Display for HealthDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_exceeding_digit_kills_without_negative_states() {
        let health = HealthDigit::new(3);
        assert_eq!(health.damaged(2), Some(HealthDigit::new(1)));
        assert_eq!(health.damaged(3), Some(HealthDigit::new(0)));
        assert_eq!(health.damaged(5), None);
    }

    #[test]
    fn zero_digit_survives_zero_damage_only() {
        let health = HealthDigit::new(0);
        assert_eq!(health.damaged(0), Some(health));
        assert_eq!(health.damaged(1), None);
    }

    #[test]
    fn direction_from_delta_normalises_long_vectors() {
        assert_eq!(Direction::from_delta(3, 0), Some(Direction::East));
        assert_eq!(Direction::from_delta(-2, 2), Some(Direction::SouthWest));
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn chebyshev_adjacency_includes_diagonals() {
        let origin = Position::new(4, 4);
        assert!(origin.is_adjacent(Position::new(5, 5)));
        assert!(origin.is_adjacent(Position::new(4, 3)));
        assert!(!origin.is_adjacent(origin));
        assert!(!origin.is_adjacent(Position::new(6, 4)));
    }
}
