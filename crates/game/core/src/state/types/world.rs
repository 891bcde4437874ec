//! Tile grid and per-tile player knowledge.
//!
//! The grid stores categorical tile kinds; walkability, snake-only terrain
//! and transparency are derived per kind through [`TileFlags`]. Knowledge
//! grids (`visible` / `explored` / `mapped`) only ever grow within a floor
//! and are rebuilt wholesale on floor regeneration.

use bitflags::bitflags;

use super::Position;

bitflags! {
    /// Attribute flags derived from a tile's kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TileFlags: u8 {
        /// Any actor may stand here.
        const WALKABLE    = 0b0001;
        /// Body-chain segments may rest here (superset of WALKABLE).
        const SNAKEABLE   = 0b0010;
        /// Line of sight passes through.
        const TRANSPARENT = 0b0100;
    }
}

/// Categorical tile kinds making up a floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    Door,
    VaultFloor,
    /// Terrain only the body chain can traverse.
    SnakeOnly,
    DownStairs,
}

impl TileKind {
    pub fn flags(self) -> TileFlags {
        match self {
            TileKind::Wall => TileFlags::empty(),
            TileKind::Floor | TileKind::VaultFloor | TileKind::DownStairs => {
                TileFlags::WALKABLE | TileFlags::SNAKEABLE | TileFlags::TRANSPARENT
            }
            TileKind::Door => TileFlags::WALKABLE | TileFlags::SNAKEABLE,
            TileKind::SnakeOnly => TileFlags::SNAKEABLE | TileFlags::TRANSPARENT,
        }
    }

    pub fn is_walkable(self) -> bool {
        self.flags().contains(TileFlags::WALKABLE)
    }

    pub fn is_snakeable(self) -> bool {
        self.flags().contains(TileFlags::SNAKEABLE)
    }

    pub fn is_transparent(self) -> bool {
        self.flags().contains(TileFlags::TRANSPARENT)
    }
}

/// Dense 2-D grid of tile kinds plus the three knowledge overlays.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileKind>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    mapped: Vec<bool>,
}

impl TileGrid {
    /// Creates a grid filled with walls (the generator carves floors out).
    pub fn filled_with_walls(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; len],
            visible: vec![false; len],
            explored: vec![false; len],
            mapped: vec![false; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| (position.y as u32 * self.width + position.x as u32) as usize)
    }

    pub fn kind(&self, position: Position) -> Option<TileKind> {
        self.index(position).map(|i| self.tiles[i])
    }

    pub fn set_kind(&mut self, position: Position, kind: TileKind) {
        if let Some(i) = self.index(position) {
            self.tiles[i] = kind;
        }
    }

    /// Terrain-only walkability; entity blocking is layered on by the state.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.kind(position).is_some_and(TileKind::is_walkable)
    }

    pub fn is_snakeable(&self, position: Position) -> bool {
        self.kind(position).is_some_and(TileKind::is_snakeable)
    }

    pub fn is_transparent(&self, position: Position) -> bool {
        self.kind(position).is_some_and(TileKind::is_transparent)
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.visible[i])
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.explored[i])
    }

    pub fn is_mapped(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.mapped[i])
    }

    /// Replaces the visible overlay and folds it into `explored`.
    /// Knowledge never shrinks: previously explored tiles stay explored.
    pub fn apply_visibility(&mut self, visible: &[bool]) {
        debug_assert_eq!(visible.len(), self.visible.len());
        self.visible.copy_from_slice(visible);
        for (explored, seen) in self.explored.iter_mut().zip(visible) {
            *explored |= *seen;
        }
    }

    /// Marks every non-wall tile as mapped (the mapping segment effect).
    /// Stairs become explored outright so the descent target is rendered.
    pub fn reveal_map(&mut self) {
        for i in 0..self.tiles.len() {
            match self.tiles[i] {
                TileKind::Wall => {}
                TileKind::DownStairs => {
                    self.mapped[i] = true;
                    self.explored[i] = true;
                }
                _ => self.mapped[i] = true,
            }
        }
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_only_terrain_is_snakeable_but_not_walkable() {
        let kind = TileKind::SnakeOnly;
        assert!(!kind.is_walkable());
        assert!(kind.is_snakeable());
        assert!(kind.is_transparent());
    }

    #[test]
    fn doors_block_sight_but_not_movement() {
        assert!(TileKind::Door.is_walkable());
        assert!(!TileKind::Door.is_transparent());
    }

    #[test]
    fn explored_overlay_only_grows() {
        let mut grid = TileGrid::filled_with_walls(3, 1);
        grid.apply_visibility(&[true, false, false]);
        grid.apply_visibility(&[false, true, false]);
        assert!(grid.is_explored(Position::new(0, 0)));
        assert!(grid.is_explored(Position::new(1, 0)));
        assert!(!grid.is_visible(Position::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_lookups_are_not_walkable() {
        let grid = TileGrid::filled_with_walls(4, 4);
        assert!(!grid.is_walkable(Position::new(-1, 0)));
        assert!(!grid.is_walkable(Position::new(4, 0)));
        assert_eq!(grid.kind(Position::new(9, 9)), None);
    }
}
